use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::OrganizerError;

pub type FolderId = i64;
pub type NoteId = i64;

/// Reserved id of the permanent root folder.
pub const ROOT_FOLDER_ID: FolderId = 0;
pub const ROOT_FOLDER_NAME: &str = "Root";

pub(crate) fn timestamp_now() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// A local point in time. All-day values carry only a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Moment {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Moment {
    pub fn date(&self) -> NaiveDate {
        match self {
            Moment::Date(d) => *d,
            Moment::DateTime(dt) => dt.date(),
        }
    }

    /// Date values are treated as starting at midnight.
    pub fn as_datetime(&self) -> NaiveDateTime {
        match self {
            Moment::Date(d) => d.and_time(NaiveTime::MIN),
            Moment::DateTime(dt) => *dt,
        }
    }

    /// Same variant and time of day, moved to `date`.
    pub fn with_date(&self, date: NaiveDate) -> Moment {
        match self {
            Moment::Date(_) => Moment::Date(date),
            Moment::DateTime(dt) => Moment::DateTime(date.and_time(dt.time())),
        }
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, Moment::Date(_))
    }

    pub fn parse(s: &str) -> Result<Moment, OrganizerError> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Moment::Date(date));
        }
        const FORMATS: [&str; 4] = [
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
        ];
        FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(Moment::DateTime)
            .ok_or_else(|| {
                OrganizerError::MalformedInput(format!(
                    "'{}' is not a date (YYYY-MM-DD) or date-time (YYYY-MM-DDTHH:MM)",
                    s
                ))
            })
    }
}

impl Ord for Moment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_datetime()
            .cmp(&other.as_datetime())
            .then_with(|| self.is_all_day().cmp(&other.is_all_day()).reverse())
    }
}

impl PartialOrd for Moment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Moment::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Moment::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

impl FromStr for Moment {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Moment::parse(s)
    }
}

/// Step between generated occurrences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Yearly => "yearly",
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }
}

impl FromStr for Recurrence {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Recurrence::None),
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            "yearly" => Ok(Recurrence::Yearly),
            other => Err(OrganizerError::MalformedInput(format!(
                "unknown recurrence '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" | "in-progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(OrganizerError::MalformedInput(format!(
                "unknown task status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(OrganizerError::MalformedInput(format!(
                "unknown task priority '{}'",
                other
            ))),
        }
    }
}

/// Temporal fields shared by events and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub start: Moment,
    pub end: Option<Moment>,
    #[serde(default)]
    pub recurrence: Recurrence,
}

impl Schedule {
    pub fn new(start: Moment, end: Option<Moment>, recurrence: Recurrence) -> Self {
        Self {
            start,
            end,
            recurrence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub schedule: Schedule,
    pub color: Option<String>,
    #[serde(default)]
    pub categories: Vec<i64>,
    #[serde(default)]
    pub people: Vec<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub schedule: Schedule,
    pub color: Option<String>,
    #[serde(default)]
    pub categories: Vec<i64>,
    #[serde(default)]
    pub people: Vec<i64>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub created_at: String,
    pub updated_at: String,
}

impl Event {
    pub fn new(title: String, schedule: Schedule) -> Self {
        let now = timestamp_now();
        Self {
            id: None,
            title,
            description: None,
            schedule,
            color: None,
            categories: Vec::new(),
            people: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl Task {
    pub fn new(title: String, schedule: Schedule) -> Self {
        let now = timestamp_now();
        Self {
            id: None,
            title,
            description: None,
            schedule,
            color: None,
            categories: Vec::new(),
            people: Vec::new(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Anything that can appear on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    Event(Event),
    Task(Task),
}

impl Item {
    pub fn id(&self) -> Option<i64> {
        match self {
            Item::Event(e) => e.id,
            Item::Task(t) => t.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Item::Event(e) => &e.title,
            Item::Task(t) => &t.title,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        match self {
            Item::Event(e) => &e.schedule,
            Item::Task(t) => &t.schedule,
        }
    }

    pub fn schedule_mut(&mut self) -> &mut Schedule {
        match self {
            Item::Event(e) => &mut e.schedule,
            Item::Task(t) => &mut t.schedule,
        }
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            Item::Event(e) => e.color.as_deref(),
            Item::Task(t) => t.color.as_deref(),
        }
    }

    pub fn categories(&self) -> &[i64] {
        match self {
            Item::Event(e) => &e.categories,
            Item::Task(t) => &t.categories,
        }
    }

    pub fn people(&self) -> &[i64] {
        match self {
            Item::Event(e) => &e.people,
            Item::Task(t) => &t.people,
        }
    }

    pub fn is_task(&self) -> bool {
        matches!(self, Item::Task(_))
    }
}

impl From<Event> for Item {
    fn from(event: Event) -> Self {
        Item::Event(event)
    }
}

impl From<Task> for Item {
    fn from(task: Task) -> Self {
        Item::Task(task)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    pub parent_id: Option<FolderId>,
    pub created_at: String,
    pub updated_at: String,
}

impl Folder {
    pub fn new(id: FolderId, name: impl Into<String>, parent_id: Option<FolderId>) -> Self {
        let now = timestamp_now();
        Self {
            id,
            name: name.into(),
            parent_id,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn root() -> Self {
        Self::new(ROOT_FOLDER_ID, ROOT_FOLDER_NAME, None)
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_FOLDER_ID
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Option<NoteId>,
    pub title: String,
    pub content: String,
    pub folder_id: Option<FolderId>,
    pub created_at: String,
    pub updated_at: String,
}

impl Note {
    pub fn new(title: String, content: String) -> Self {
        let now = timestamp_now();
        Self {
            id: None,
            title,
            content,
            folder_id: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub birthday: NaiveDate,
    pub created_at: String,
    pub updated_at: String,
}

impl Person {
    pub fn new(first_name: String, last_name: String, birthday: NaiveDate) -> Self {
        let now = timestamp_now();
        Self {
            id: None,
            first_name,
            last_name,
            avatar: None,
            birthday,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<NaiveDate>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub mobile_phone: Option<String>,
    pub fixed_phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Contact {
    pub fn new(first_name: String, last_name: String) -> Self {
        let now = timestamp_now();
        Self {
            first_name,
            last_name,
            created_at: now.clone(),
            updated_at: now,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Category {
    pub fn new(title: String) -> Self {
        let now = timestamp_now();
        Self {
            id: None,
            title,
            description: None,
            color: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Field checks applied before a record is written.
pub trait Validate {
    fn validate(&self) -> Result<(), OrganizerError>;
}

fn check_len(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), OrganizerError> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(OrganizerError::validation(
            field,
            format!("must contain between {} and {} characters", min, max),
        ));
    }
    Ok(())
}

fn check_schedule(schedule: &Schedule) -> Result<(), OrganizerError> {
    match schedule.end {
        Some(end) if end < schedule.start => Err(OrganizerError::validation(
            "end_date",
            "must not be before the start date",
        )),
        _ => Ok(()),
    }
}

fn check_phone(field: &'static str, value: &Option<String>) -> Result<(), OrganizerError> {
    let Some(phone) = value.as_deref() else {
        return Ok(());
    };
    check_len(field, phone, 10, 20)?;
    if !phone.starts_with(|c: char| c.is_ascii_digit() || c == '+') {
        return Err(OrganizerError::validation(
            field,
            "must start with a number or a +",
        ));
    }
    Ok(())
}

impl Validate for Folder {
    fn validate(&self) -> Result<(), OrganizerError> {
        check_len("name", &self.name, 2, 100)
    }
}

impl Validate for Note {
    fn validate(&self) -> Result<(), OrganizerError> {
        check_len("title", &self.title, 2, 100)?;
        if self.content.trim().is_empty() {
            return Err(OrganizerError::validation("content", "cannot be empty"));
        }
        Ok(())
    }
}

impl Validate for Event {
    fn validate(&self) -> Result<(), OrganizerError> {
        check_len("title", &self.title, 2, 120)?;
        check_schedule(&self.schedule)
    }
}

impl Validate for Task {
    fn validate(&self) -> Result<(), OrganizerError> {
        check_len("title", &self.title, 2, 120)?;
        check_schedule(&self.schedule)
    }
}

impl Validate for Person {
    fn validate(&self) -> Result<(), OrganizerError> {
        check_len("first_name", &self.first_name, 2, 50)?;
        check_len("last_name", &self.last_name, 2, 50)?;
        if let Some(avatar) = &self.avatar {
            if !avatar.starts_with("data:image") {
                return Err(OrganizerError::validation(
                    "avatar",
                    "must be a valid data URL",
                ));
            }
        }
        Ok(())
    }
}

impl Validate for Contact {
    fn validate(&self) -> Result<(), OrganizerError> {
        check_len("first_name", &self.first_name, 2, 50)?;
        check_len("last_name", &self.last_name, 2, 50)?;
        if let Some(code) = self.postal_code.as_deref() {
            if !code.chars().all(|c| c.is_ascii_digit()) {
                return Err(OrganizerError::validation(
                    "postal_code",
                    "must contain numbers only",
                ));
            }
            check_len("postal_code", code, 2, 20)?;
        }
        if let Some(city) = self.city.as_deref() {
            check_len("city", city, 2, 50)?;
        }
        if let Some(country) = self.country.as_deref() {
            check_len("country", country, 2, 50)?;
        }
        if let Some(email) = self.email.as_deref() {
            if !looks_like_email(email) {
                return Err(OrganizerError::validation(
                    "email",
                    "must be a valid email address",
                ));
            }
        }
        check_phone("mobile_phone", &self.mobile_phone)?;
        check_phone("fixed_phone", &self.fixed_phone)
    }
}

impl Validate for Category {
    fn validate(&self) -> Result<(), OrganizerError> {
        check_len("title", &self.title, 2, 120)
    }
}

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moment_parses_dates_and_datetimes() {
        assert_eq!(
            Moment::parse("2024-02-01").unwrap(),
            Moment::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        );
        let timed = Moment::parse("2024-02-01T09:30").unwrap();
        assert!(!timed.is_all_day());
        assert_eq!(timed.date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(Moment::parse("2024-02-01 09:30:15").unwrap().to_string(), "2024-02-01T09:30:15");
    }

    #[test]
    fn moment_rejects_garbage() {
        assert!(matches!(
            Moment::parse("next tuesday"),
            Err(OrganizerError::MalformedInput(_))
        ));
    }

    #[test]
    fn all_day_sorts_before_midnight_timed_value() {
        let day = Moment::parse("2024-03-01").unwrap();
        let midnight = Moment::parse("2024-03-01T00:00").unwrap();
        let later = Moment::parse("2024-03-01T08:00").unwrap();
        assert!(day < midnight);
        assert!(midnight < later);
    }

    #[test]
    fn item_serializes_with_kind_tag() {
        let task = Task::new(
            "Water plants".to_string(),
            Schedule::new(
                Moment::parse("2024-01-30").unwrap(),
                None,
                Recurrence::Weekly,
            ),
        );
        let json = serde_json::to_value(Item::from(task)).unwrap();
        assert_eq!(json["kind"], "task");
        assert_eq!(json["recurrence"], "weekly");
        assert_eq!(json["start"], "2024-01-30");
        assert_eq!(json["status"], "todo");
    }

    #[test]
    fn event_end_before_start_fails_validation() {
        let event = Event::new(
            "Dentist".to_string(),
            Schedule::new(
                Moment::parse("2024-05-02").unwrap(),
                Some(Moment::parse("2024-05-01").unwrap()),
                Recurrence::None,
            ),
        );
        assert!(matches!(
            event.validate(),
            Err(OrganizerError::Validation { field: "end_date", .. })
        ));
    }

    #[test]
    fn contact_validation_checks_optional_fields() {
        let mut contact = Contact::new("Ada".to_string(), "Lovelace".to_string());
        assert!(contact.validate().is_ok());

        contact.email = Some("ada@example".to_string());
        assert!(contact.validate().is_err());
        contact.email = Some("ada@example.org".to_string());
        assert!(contact.validate().is_ok());

        contact.mobile_phone = Some("call me".to_string());
        assert!(contact.validate().is_err());
        contact.mobile_phone = Some("+33612345678".to_string());
        assert!(contact.validate().is_ok());

        contact.postal_code = Some("75A01".to_string());
        assert!(contact.validate().is_err());
    }

    #[test]
    fn folder_name_length_is_checked() {
        assert!(Folder::new(5, "x", None).validate().is_err());
        assert!(Folder::new(5, "Recipes", None).validate().is_ok());
    }

    #[test]
    fn person_initials() {
        let person = Person::new(
            "Grace".to_string(),
            "Hopper".to_string(),
            NaiveDate::from_ymd_opt(1906, 12, 9).unwrap(),
        );
        assert_eq!(person.initials(), "GH");
    }
}

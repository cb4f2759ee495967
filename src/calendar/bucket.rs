//! Grouping of expanded instances and birthdays per calendar day.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};

use crate::calendar::date_range::DateRange;
use crate::calendar::recurrence::Instance;
use crate::models::{Contact, Person};

/// Year-agnostic day used to look up birthdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn of(date: NaiveDate) -> Self {
        MonthDay {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BirthdaySource {
    Person,
    Contact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Birthday {
    pub source: BirthdaySource,
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub date: NaiveDate,
}

impl Birthday {
    /// Age reached on `day`, if the birthday is not in the future.
    pub fn age_on(&self, day: NaiveDate) -> Option<u32> {
        day.years_since(self.date)
    }
}

/// Birthdays of people and contacts keyed by month and day.
#[derive(Debug, Clone, Default)]
pub struct BirthdayIndex {
    by_day: BTreeMap<MonthDay, Vec<Birthday>>,
}

impl BirthdayIndex {
    pub fn build(people: &[Person], contacts: &[Contact]) -> Self {
        let mut index = BirthdayIndex::default();
        for person in people {
            index.insert(Birthday {
                source: BirthdaySource::Person,
                id: person.id,
                first_name: person.first_name.clone(),
                last_name: person.last_name.clone(),
                date: person.birthday,
            });
        }
        for contact in contacts {
            let Some(date) = contact.birthday else {
                continue;
            };
            index.insert(Birthday {
                source: BirthdaySource::Contact,
                id: contact.id,
                first_name: contact.first_name.clone(),
                last_name: contact.last_name.clone(),
                date,
            });
        }
        index
    }

    fn insert(&mut self, birthday: Birthday) {
        self.by_day
            .entry(MonthDay::of(birthday.date))
            .or_default()
            .push(birthday);
    }

    pub fn on(&self, day: NaiveDate) -> &[Birthday] {
        self.by_day
            .get(&MonthDay::of(day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_day.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }
}

/// Everything shown on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket<'a> {
    pub events: Vec<&'a Instance>,
    pub tasks: Vec<&'a Instance>,
    pub birthdays: Vec<&'a Birthday>,
}

impl DayBucket<'_> {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.tasks.is_empty() && self.birthdays.is_empty()
    }
}

/// Whether `instance` is shown on `day`.
///
/// The day matches when its midnight lies within `[start, end]` or when the
/// instance starts that day. Without an end, events last their start day and
/// tasks never expire.
fn occurs_on(instance: &Instance, day: NaiveDate, open_ended: bool) -> bool {
    let start = instance.start();
    if start.date() == day {
        return true;
    }
    let midnight = day.and_time(NaiveTime::MIN);
    if midnight < start.as_datetime() {
        return false;
    }
    match instance.end() {
        Some(end) => midnight <= end.as_datetime(),
        None => open_ended,
    }
}

pub fn for_day<'a>(
    day: NaiveDate,
    events: &'a [Instance],
    tasks: &'a [Instance],
    birthdays: &'a BirthdayIndex,
) -> DayBucket<'a> {
    DayBucket {
        events: events.iter().filter(|e| occurs_on(e, day, false)).collect(),
        tasks: tasks.iter().filter(|t| occurs_on(t, day, true)).collect(),
        birthdays: birthdays.on(day).iter().collect(),
    }
}

/// Buckets for every day of `range`, in order.
pub fn month_agenda<'a>(
    range: &DateRange,
    events: &'a [Instance],
    tasks: &'a [Instance],
    birthdays: &'a BirthdayIndex,
) -> Vec<(NaiveDate, DayBucket<'a>)> {
    range
        .days()
        .map(|day| (day, for_day(day, events, tasks, birthdays)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::recurrence::expand_all;
    use crate::models::{Event, Item, Moment, Recurrence, Schedule, Task};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn moment(s: &str) -> Moment {
        Moment::parse(s).unwrap()
    }

    fn events(specs: &[(i64, &str, Option<&str>)]) -> Vec<Instance> {
        let items: Vec<Item> = specs
            .iter()
            .map(|(id, start, end)| {
                let mut event = Event::new(
                    format!("Event {}", id),
                    Schedule::new(moment(start), end.map(moment), Recurrence::None),
                );
                event.id = Some(*id);
                Item::Event(event)
            })
            .collect();
        expand_all(&items, &DateRange::month(2024, 3).unwrap())
    }

    fn tasks(specs: &[(i64, &str, Option<&str>)]) -> Vec<Instance> {
        let items: Vec<Item> = specs
            .iter()
            .map(|(id, start, end)| {
                let mut task = Task::new(
                    format!("Task {}", id),
                    Schedule::new(moment(start), end.map(moment), Recurrence::None),
                );
                task.id = Some(*id);
                Item::Task(task)
            })
            .collect();
        expand_all(&items, &DateRange::month(2024, 3).unwrap())
    }

    fn ids(instances: &[&Instance]) -> Vec<String> {
        instances.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn birthdays_match_month_and_day_only() {
        let person = Person::new("Marie".to_string(), "Curie".to_string(), d(1990, 3, 15));
        let index = BirthdayIndex::build(&[person], &[]);
        assert_eq!(index.on(d(2024, 3, 15)).len(), 1);
        assert_eq!(index.on(d(2025, 3, 15)).len(), 1);
        assert!(index.on(d(2024, 3, 16)).is_empty());
    }

    #[test]
    fn birthdays_from_people_and_contacts_share_a_day() {
        let person = Person::new("Marie".to_string(), "Curie".to_string(), d(1990, 3, 15));
        let mut contact = Contact::new("Pierre".to_string(), "Curie".to_string());
        contact.birthday = Some(d(1985, 3, 15));
        let no_birthday = Contact::new("Paul".to_string(), "Langevin".to_string());
        let index = BirthdayIndex::build(&[person], &[contact, no_birthday]);

        assert_eq!(index.len(), 2);
        let sources: Vec<_> = index.on(d(2024, 3, 15)).iter().map(|b| b.source).collect();
        assert_eq!(sources, vec![BirthdaySource::Person, BirthdaySource::Contact]);
        assert_eq!(index.on(d(2024, 3, 15))[1].age_on(d(2024, 3, 15)), Some(39));
        assert_eq!(MonthDay::of(d(1985, 3, 15)).to_string(), "03-15");
    }

    #[test]
    fn events_span_their_inclusive_range() {
        let events = events(&[(1, "2024-03-04", Some("2024-03-06")), (2, "2024-03-05", None)]);
        let index = BirthdayIndex::default();
        assert_eq!(ids(&for_day(d(2024, 3, 3), &events, &[], &index).events), Vec::<String>::new());
        assert_eq!(ids(&for_day(d(2024, 3, 4), &events, &[], &index).events), vec!["1"]);
        assert_eq!(ids(&for_day(d(2024, 3, 5), &events, &[], &index).events), vec!["1", "2"]);
        assert_eq!(ids(&for_day(d(2024, 3, 6), &events, &[], &index).events), vec!["1"]);
        assert!(for_day(d(2024, 3, 7), &events, &[], &index).is_empty());
    }

    #[test]
    fn timed_event_shows_on_its_start_day() {
        let events = events(&[(1, "2024-03-04T10:00", Some("2024-03-04T12:00"))]);
        let index = BirthdayIndex::default();
        assert_eq!(for_day(d(2024, 3, 4), &events, &[], &index).events.len(), 1);
        assert!(for_day(d(2024, 3, 5), &events, &[], &index).events.is_empty());
    }

    #[test]
    fn timed_event_ending_before_midnight_of_next_day_is_excluded_that_day() {
        let events = events(&[(1, "2024-03-04T22:00", Some("2024-03-05T09:00"))]);
        let index = BirthdayIndex::default();
        assert_eq!(for_day(d(2024, 3, 5), &events, &[], &index).events.len(), 1);
        assert!(for_day(d(2024, 3, 6), &events, &[], &index).events.is_empty());
    }

    #[test]
    fn tasks_without_end_never_expire() {
        let tasks = tasks(&[(1, "2024-03-10", None), (2, "2024-03-10", Some("2024-03-11"))]);
        let index = BirthdayIndex::default();
        assert!(for_day(d(2024, 3, 9), &[], &tasks, &index).tasks.is_empty());
        assert_eq!(ids(&for_day(d(2024, 3, 11), &[], &tasks, &index).tasks), vec!["1", "2"]);
        assert_eq!(ids(&for_day(d(2099, 12, 31), &[], &tasks, &index).tasks), vec!["1"]);
    }

    #[test]
    fn month_agenda_covers_every_day() {
        let march = DateRange::month(2024, 3).unwrap();
        let events = events(&[(1, "2024-03-31", None)]);
        let index = BirthdayIndex::default();
        let agenda = month_agenda(&march, &events, &[], &index);
        assert_eq!(agenda.len(), 31);
        assert_eq!(agenda[30].0, d(2024, 3, 31));
        assert_eq!(agenda[30].1.events.len(), 1);
        assert!(agenda[0].1.is_empty());
    }
}

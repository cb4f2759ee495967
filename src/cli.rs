use std::io::{self, Write};

use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt};

use crate::calendar::{
    BirthdayIndex, DateRange, DayBucket, Instance, Week, WeekStart, expand_all, month_agenda,
    month_grid,
};
use crate::database::{Database, DatabaseError};
use crate::error::OrganizerError;
use crate::folders::FolderTree;
use crate::models::{
    Category, Contact, Event, FolderId, Item, Moment, Note, NoteId, Person, Recurrence, Schedule,
    Task, TaskStatus,
};
use crate::utils::{self, parse_date};

/// Environment variable consulted when `--log-level` is not given.
pub const LOG_ENV: &str = "HOMEPLAN_LOG";

#[derive(Parser)]
#[command(name = "homeplan")]
#[command(about = "Household organizer: calendar, tasks, people and notes")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    /// Log filter, e.g. "debug" or "homeplan=trace"
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the agenda of a month
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<String>,
        /// Print the agenda as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a calendar event
    AddEvent {
        title: String,
        /// Start (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        start: String,
        /// End (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        end: Option<String>,
        /// none, daily, weekly, monthly or yearly
        #[arg(long, default_value = "none")]
        recurrence: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
        /// Comma-separated category ids
        #[arg(long)]
        categories: Option<String>,
        /// Comma-separated person ids
        #[arg(long)]
        people: Option<String>,
    },
    /// Add a task
    AddTask {
        title: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: Option<String>,
        #[arg(long, default_value = "none")]
        recurrence: String,
        /// todo, in_progress or done
        #[arg(long, default_value = "todo")]
        status: String,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        priority: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        categories: Option<String>,
        #[arg(long)]
        people: Option<String>,
    },
    /// Add a person whose birthday shows on the calendar
    AddPerson {
        first_name: String,
        last_name: String,
        /// Birthday (YYYY-MM-DD)
        #[arg(long)]
        birthday: String,
        /// Avatar as a data URL
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Add an address book contact
    AddContact {
        first_name: String,
        last_name: String,
        #[arg(long)]
        birthday: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        mobile_phone: Option<String>,
        #[arg(long)]
        fixed_phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        postal_code: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Add a category for events and tasks
    AddCategory {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Add a note
    AddNote {
        title: String,
        #[arg(long)]
        content: String,
        /// Folder id, unfiled when omitted
        #[arg(long)]
        folder: Option<FolderId>,
    },
    /// List notes, optionally only those of one folder
    Notes {
        #[arg(long)]
        folder: Option<FolderId>,
    },
    /// Edit a note
    #[command(subcommand)]
    Note(NoteCommand),
    /// Manage note folders
    #[command(subcommand)]
    Folder(FolderCommand),
    /// List events
    Events,
    /// List tasks
    Tasks {
        /// Group tasks into todo, in_progress and done columns
        #[arg(long)]
        by_status: bool,
    },
    /// Update a task
    #[command(subcommand)]
    Task(TaskCommand),
    /// List people
    People,
    /// List contacts
    Contacts,
    /// List categories
    Categories,
    /// Delete a record by id
    #[command(subcommand)]
    Delete(DeleteCommand),
}

#[derive(Subcommand)]
pub enum NoteCommand {
    /// Change the title, content or folder of a note
    Edit {
        id: NoteId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Move the note into this folder
        #[arg(long, conflicts_with = "unfile")]
        folder: Option<FolderId>,
        /// Take the note out of its folder
        #[arg(long)]
        unfile: bool,
    },
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// Move a task to another status column
    Status {
        id: i64,
        /// todo, in_progress or done
        status: String,
    },
}

#[derive(Subcommand)]
pub enum DeleteCommand {
    Note { id: NoteId },
    Event { id: i64 },
    Task { id: i64 },
    Person { id: i64 },
    Contact { id: i64 },
    Category { id: i64 },
}

#[derive(Subcommand)]
pub enum FolderCommand {
    /// Print the folder hierarchy
    List,
    /// Create a folder
    Add {
        name: String,
        /// Parent folder id, root when omitted
        #[arg(long)]
        parent: Option<FolderId>,
    },
    /// Rename a folder
    Rename { id: FolderId, name: String },
    /// Move a folder under another one
    Move {
        id: FolderId,
        #[arg(long)]
        parent: FolderId,
    },
    /// Delete a folder
    Delete {
        id: FolderId,
        /// Also delete sub-folders and every note inside them
        #[arg(long)]
        recursive: bool,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error(transparent)]
    Organizer(#[from] OrganizerError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Invalid id list '{0}'")]
    InvalidIds(String),
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to set up logging: {0}")]
    Logging(String),
}

/// Install the stderr log subscriber.
pub fn init_tracing(level: &str) -> Result<(), CliError> {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

/// Log filter from the flag, then the environment, then the config file.
pub fn resolve_log_level(flag: Option<&str>, configured: &str) -> String {
    flag.map(str::to_string)
        .or_else(|| std::env::var(LOG_ENV).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| configured.to_string())
}

fn parse_ids(raw: Option<&str>) -> Result<Vec<i64>, CliError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(|_| CliError::InvalidIds(raw.to_string())))
        .collect()
}

fn parse_birthday(raw: &str) -> Result<NaiveDate, CliError> {
    parse_date(raw)
        .map_err(|e| CliError::DateParseError(format!("Invalid date format '{}': {}", raw, e)))
}

fn parse_schedule(start: &str, end: Option<&str>, recurrence: &str) -> Result<Schedule, CliError> {
    let start = Moment::parse(start)?;
    let end = end.map(Moment::parse).transpose()?;
    let recurrence: Recurrence = recurrence.parse()?;
    Ok(Schedule::new(start, end, recurrence))
}

/// Handle the add-event command
#[allow(clippy::too_many_arguments)]
pub fn handle_add_event(
    title: String,
    start: String,
    end: Option<String>,
    recurrence: String,
    description: Option<String>,
    color: Option<String>,
    categories: Option<String>,
    people: Option<String>,
    db: &Database,
) -> Result<(), CliError> {
    let schedule = parse_schedule(&start, end.as_deref(), &recurrence)?;
    let mut event = Event::new(title, schedule);
    event.description = description;
    event.color = color;
    event.categories = parse_ids(categories.as_deref())?;
    event.people = parse_ids(people.as_deref())?;

    let id = db.insert_event(&event)?;
    println!("Event created successfully (ID: {})", id);
    Ok(())
}

/// Handle the add-task command
#[allow(clippy::too_many_arguments)]
pub fn handle_add_task(
    title: String,
    start: String,
    end: Option<String>,
    recurrence: String,
    status: String,
    priority: String,
    description: Option<String>,
    color: Option<String>,
    categories: Option<String>,
    people: Option<String>,
    db: &Database,
) -> Result<(), CliError> {
    let schedule = parse_schedule(&start, end.as_deref(), &recurrence)?;
    let mut task = Task::new(title, schedule);
    task.status = status.parse()?;
    task.priority = priority.parse()?;
    task.description = description;
    task.color = color;
    task.categories = parse_ids(categories.as_deref())?;
    task.people = parse_ids(people.as_deref())?;

    let id = db.insert_task(&task)?;
    println!("Task created successfully (ID: {})", id);
    Ok(())
}

/// Handle the add-person command
pub fn handle_add_person(
    first_name: String,
    last_name: String,
    birthday: String,
    avatar: Option<String>,
    db: &Database,
) -> Result<(), CliError> {
    let mut person = Person::new(first_name, last_name, parse_birthday(&birthday)?);
    person.avatar = avatar;
    let id = db.insert_person(&person)?;
    println!("Person created successfully (ID: {})", id);
    Ok(())
}

/// Handle the add-contact command
pub fn handle_add_contact(contact: Contact, birthday: Option<String>, db: &Database) -> Result<(), CliError> {
    let mut contact = contact;
    contact.birthday = birthday.as_deref().map(parse_birthday).transpose()?;
    let id = db.insert_contact(&contact)?;
    println!("Contact created successfully (ID: {})", id);
    Ok(())
}

/// Handle the add-category command
pub fn handle_add_category(
    title: String,
    description: Option<String>,
    color: Option<String>,
    db: &Database,
) -> Result<(), CliError> {
    let mut category = Category::new(title);
    category.description = description;
    category.color = color;
    let id = db.insert_category(&category)?;
    println!("Category created successfully (ID: {})", id);
    Ok(())
}

/// Handle the add-note command
pub fn handle_add_note(
    title: String,
    content: String,
    folder: Option<FolderId>,
    db: &Database,
) -> Result<(), CliError> {
    let mut note = Note::new(title, content);
    note.folder_id = folder;
    let id = db.insert_note(&note)?;
    println!("Note created successfully (ID: {})", id);
    Ok(())
}

/// Handle the notes command
pub fn handle_list_notes(folder: Option<FolderId>, db: &Database) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let notes = match folder {
        Some(id) => {
            db.get_folder(id)?;
            writeln!(out, "{}", folder_breadcrumb(&db.folder_tree()?, id))?;
            db.get_notes_in_folder(Some(id))?
        }
        None => db.get_all_notes()?,
    };
    write_notes(&mut out, &notes)?;
    Ok(())
}

/// Folder names from root down to `id`, e.g. "Root / Recipes / Desserts"
pub fn folder_breadcrumb(tree: &FolderTree, id: FolderId) -> String {
    tree.path_to(id)
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn write_notes<W: Write>(out: &mut W, notes: &[Note]) -> io::Result<()> {
    if notes.is_empty() {
        writeln!(out, "No notes")?;
    }
    for note in notes {
        let folder = note
            .folder_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "[{}] {} (folder: {}, updated {})",
            note.id.unwrap_or_default(),
            note.title,
            folder,
            note.updated_at
        )?;
    }
    Ok(())
}

/// Handle the note subcommands
pub fn handle_note(command: NoteCommand, db: &Database) -> Result<(), CliError> {
    match command {
        NoteCommand::Edit {
            id,
            title,
            content,
            folder,
            unfile,
        } => {
            let mut note = db.get_note(id)?;
            apply_note_edit(&mut note, title, content, folder, unfile);
            db.update_note(&note)?;
            println!("Note {} updated", id);
        }
    }
    Ok(())
}

fn apply_note_edit(
    note: &mut Note,
    title: Option<String>,
    content: Option<String>,
    folder: Option<FolderId>,
    unfile: bool,
) {
    if let Some(title) = title {
        note.title = title;
    }
    if let Some(content) = content {
        note.content = content;
    }
    if unfile {
        note.folder_id = None;
    } else if folder.is_some() {
        note.folder_id = folder;
    }
}

/// Handle the task subcommands
pub fn handle_task(command: TaskCommand, db: &Database) -> Result<(), CliError> {
    match command {
        TaskCommand::Status { id, status } => {
            let status: TaskStatus = status.parse()?;
            db.update_task_status(id, status)?;
            println!("Task {} moved to {}", id, status.as_str());
        }
    }
    Ok(())
}

/// Handle the delete subcommands
pub fn handle_delete(command: DeleteCommand, db: &Database) -> Result<(), CliError> {
    let (kind, id) = match command {
        DeleteCommand::Note { id } => {
            db.delete_note(id)?;
            ("Note", id)
        }
        DeleteCommand::Event { id } => {
            db.delete_event(id)?;
            ("Event", id)
        }
        DeleteCommand::Task { id } => {
            db.delete_task(id)?;
            ("Task", id)
        }
        DeleteCommand::Person { id } => {
            db.delete_person(id)?;
            ("Person", id)
        }
        DeleteCommand::Contact { id } => {
            db.delete_contact(id)?;
            ("Contact", id)
        }
        DeleteCommand::Category { id } => {
            db.delete_category(id)?;
            ("Category", id)
        }
    };
    println!("{} {} deleted", kind, id);
    Ok(())
}

/// Handle the events command
pub fn handle_list_events(db: &Database) -> Result<(), CliError> {
    write_events(&mut io::stdout().lock(), &db.get_all_events()?)?;
    Ok(())
}

/// Handle the tasks command
pub fn handle_list_tasks(by_status: bool, db: &Database) -> Result<(), CliError> {
    let tasks = db.get_all_tasks()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if by_status {
        write_kanban(&mut out, &tasks)?;
    } else {
        write_tasks(&mut out, &tasks)?;
    }
    Ok(())
}

/// Handle the people command
pub fn handle_list_people(db: &Database) -> Result<(), CliError> {
    write_people(&mut io::stdout().lock(), &db.get_all_people()?)?;
    Ok(())
}

/// Handle the contacts command
pub fn handle_list_contacts(db: &Database) -> Result<(), CliError> {
    write_contacts(&mut io::stdout().lock(), &db.get_all_contacts()?)?;
    Ok(())
}

/// Handle the categories command
pub fn handle_list_categories(db: &Database) -> Result<(), CliError> {
    write_categories(&mut io::stdout().lock(), &db.get_all_categories()?)?;
    Ok(())
}

fn schedule_label(schedule: &Schedule) -> String {
    let mut label = schedule.start.to_string();
    if let Some(end) = schedule.end {
        label.push_str(&format!(" .. {}", end));
    }
    if schedule.recurrence.is_recurring() {
        label.push_str(&format!(", {}", schedule.recurrence.as_str()));
    }
    label
}

pub fn write_events<W: Write>(out: &mut W, events: &[Event]) -> io::Result<()> {
    if events.is_empty() {
        writeln!(out, "No events")?;
    }
    for event in events {
        writeln!(
            out,
            "[{}] {} ({})",
            event.id.unwrap_or_default(),
            event.title,
            schedule_label(&event.schedule)
        )?;
    }
    Ok(())
}

pub fn write_tasks<W: Write>(out: &mut W, tasks: &[Task]) -> io::Result<()> {
    if tasks.is_empty() {
        writeln!(out, "No tasks")?;
    }
    for task in tasks {
        writeln!(
            out,
            "[{}] {} [{}, {}] ({})",
            task.id.unwrap_or_default(),
            task.title,
            task.status.as_str(),
            task.priority.as_str(),
            schedule_label(&task.schedule)
        )?;
    }
    Ok(())
}

/// Tasks grouped into one column per status, with a count in each header.
pub fn write_kanban<W: Write>(out: &mut W, tasks: &[Task]) -> io::Result<()> {
    let columns = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];
    for (n, status) in columns.into_iter().enumerate() {
        let column: Vec<&Task> = tasks.iter().filter(|t| t.status == status).collect();
        if n > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{} ({})", status.as_str(), column.len())?;
        for task in column {
            writeln!(
                out,
                "  [{}] {} ({})",
                task.id.unwrap_or_default(),
                task.title,
                task.priority.as_str()
            )?;
        }
    }
    Ok(())
}

pub fn write_people<W: Write>(out: &mut W, people: &[Person]) -> io::Result<()> {
    if people.is_empty() {
        writeln!(out, "No people")?;
    }
    for person in people {
        writeln!(
            out,
            "[{}] {:<2} {} {} (born {})",
            person.id.unwrap_or_default(),
            person.initials(),
            person.first_name,
            person.last_name,
            person.birthday.format("%Y-%m-%d")
        )?;
    }
    Ok(())
}

pub fn write_contacts<W: Write>(out: &mut W, contacts: &[Contact]) -> io::Result<()> {
    if contacts.is_empty() {
        writeln!(out, "No contacts")?;
    }
    for contact in contacts {
        let reach: Vec<&str> = [&contact.email, &contact.mobile_phone, &contact.fixed_phone]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .collect();
        write!(
            out,
            "[{}] {} {}",
            contact.id.unwrap_or_default(),
            contact.first_name,
            contact.last_name
        )?;
        if !reach.is_empty() {
            write!(out, " <{}>", reach.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_categories<W: Write>(out: &mut W, categories: &[Category]) -> io::Result<()> {
    if categories.is_empty() {
        writeln!(out, "No categories")?;
    }
    for category in categories {
        match &category.color {
            Some(color) => writeln!(
                out,
                "[{}] {} ({})",
                category.id.unwrap_or_default(),
                category.title,
                color
            )?,
            None => writeln!(out, "[{}] {}", category.id.unwrap_or_default(), category.title)?,
        }
    }
    Ok(())
}

/// Handle the folder subcommands
pub fn handle_folder(command: FolderCommand, db: &Database) -> Result<(), CliError> {
    match command {
        FolderCommand::List => {
            let tree = db.folder_tree()?;
            let stdout = io::stdout();
            write_folder_tree(&mut stdout.lock(), &tree)?;
        }
        FolderCommand::Add { name, parent } => {
            let id = db.create_folder(&name, parent)?;
            println!("Folder created successfully (ID: {})", id);
        }
        FolderCommand::Rename { id, name } => {
            db.rename_folder(id, &name)?;
            println!("Folder {} renamed", id);
        }
        FolderCommand::Move { id, parent } => {
            db.move_folder(id, parent)?;
            println!("Folder {} moved under {}", id, parent);
        }
        FolderCommand::Delete { id, recursive } => {
            let outcome = db.delete_folder(id, recursive)?;
            println!(
                "Deleted {} folder(s) and {} note(s)",
                outcome.folders, outcome.notes
            );
        }
    }
    Ok(())
}

pub fn write_folder_tree<W: Write>(out: &mut W, tree: &FolderTree) -> io::Result<()> {
    for entry in tree.flatten() {
        writeln!(
            out,
            "{}{} [{}]",
            "  ".repeat(entry.depth),
            entry.folder.name,
            entry.folder.id
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
struct AgendaDay<'a> {
    date: NaiveDate,
    #[serde(flatten)]
    bucket: &'a DayBucket<'a>,
}

#[derive(Serialize)]
struct MonthView<'a> {
    range: DateRange,
    weeks: Vec<Week>,
    days: Vec<AgendaDay<'a>>,
}

/// Handle the calendar command
pub fn handle_calendar(
    month: Option<String>,
    json: bool,
    week_start: WeekStart,
    db: &Database,
) -> Result<(), CliError> {
    let range = match month {
        Some(raw) => DateRange::parse_month(&raw)?,
        None => DateRange::month_of(utils::today())?,
    };

    let events: Vec<Item> = db.get_all_events()?.into_iter().map(Item::from).collect();
    let tasks: Vec<Item> = db.get_all_tasks()?.into_iter().map(Item::from).collect();
    let event_instances = expand_all(&events, &range);
    let task_instances = expand_all(&tasks, &range);
    let birthdays = BirthdayIndex::build(&db.get_all_people()?, &db.get_all_contacts()?);
    tracing::debug!(
        events = event_instances.len(),
        tasks = task_instances.len(),
        birthdays = birthdays.len(),
        "calendar expanded"
    );

    let agenda = month_agenda(&range, &event_instances, &task_instances, &birthdays);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        let view = MonthView {
            range,
            weeks: month_grid(&range, week_start),
            days: agenda
                .iter()
                .map(|(date, bucket)| AgendaDay { date: *date, bucket })
                .collect(),
        };
        serde_json::to_writer_pretty(&mut out, &view)?;
        writeln!(out)?;
    } else {
        write_agenda(&mut out, &range, week_start, &agenda)?;
    }
    Ok(())
}

fn time_label(instance: &Instance) -> String {
    let start = instance.start();
    if start.is_all_day() {
        "all day".to_string()
    } else {
        start.as_datetime().format("%H:%M").to_string()
    }
}

/// Print the month grid followed by every non-empty day.
pub fn write_agenda<W: Write>(
    out: &mut W,
    range: &DateRange,
    week_start: WeekStart,
    agenda: &[(NaiveDate, DayBucket<'_>)],
) -> io::Result<()> {
    writeln!(out, "{}", range.start.format("%B %Y"))?;
    let mut weekday = week_start.weekday();
    let mut header = Vec::with_capacity(7);
    for _ in 0..7 {
        header.push(weekday.to_string().chars().take(2).collect::<String>());
        weekday = weekday.succ();
    }
    writeln!(out, "Wk  {}", header.join("  "))?;

    let busy = |day: NaiveDate| agenda.iter().any(|(d, b)| *d == day && !b.is_empty());
    for week in month_grid(range, week_start) {
        let cells: Vec<String> = week
            .days
            .iter()
            .map(|day| {
                if !range.contains(*day) {
                    "   ".to_string()
                } else if busy(*day) {
                    format!("{:>2}*", day.day())
                } else {
                    format!("{:>2} ", day.day())
                }
            })
            .collect();
        writeln!(out, "{:>2}  {}", week.number, cells.join(" ").trim_end())?;
    }

    for (day, bucket) in agenda.iter().filter(|(_, b)| !b.is_empty()) {
        writeln!(out)?;
        writeln!(out, "{}", day.format("%Y-%m-%d %a"))?;
        for event in &bucket.events {
            writeln!(out, "  event     {} ({})", event.title(), time_label(event))?;
        }
        for task in &bucket.tasks {
            let status = match &task.item {
                Item::Task(t) => t.status.as_str(),
                Item::Event(_) => "",
            };
            writeln!(out, "  task      {} [{}]", task.title(), status)?;
        }
        for birthday in &bucket.birthdays {
            match birthday.age_on(*day) {
                Some(age) => writeln!(
                    out,
                    "  birthday  {} {} ({})",
                    birthday.first_name, birthday.last_name, age
                )?,
                None => writeln!(out, "  birthday  {} {}", birthday.first_name, birthday.last_name)?,
            }
        }
    }
    Ok(())
}

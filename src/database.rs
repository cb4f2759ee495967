use std::path::PathBuf;
use std::str::FromStr;

use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;

use crate::error::OrganizerError;
use crate::folders::{self, DeletePlan, FolderTree};
use crate::models::{
    Category, Contact, Event, Folder, FolderId, Note, NoteId, Person, ROOT_FOLDER_ID,
    ROOT_FOLDER_NAME, Schedule, Task, TaskStatus, Validate, timestamp_now,
};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },
    #[error(transparent)]
    Organizer(#[from] OrganizerError),
}

/// Rows removed by a folder deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub folders: usize,
    pub notes: usize,
}

pub struct Database {
    conn: Connection,
}

fn not_found(kind: &'static str, id: i64) -> impl FnOnce(rusqlite::Error) -> DatabaseError {
    move |err| match err {
        rusqlite::Error::QueryReturnedNoRows => DatabaseError::NotFound { kind, id },
        other => DatabaseError::SqliteError(other),
    }
}

fn conversion_error(idx: usize, err: OrganizerError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

/// Read a text column through `FromStr`.
fn parsed<T>(row: &rusqlite::Row, idx: usize) -> Result<T, rusqlite::Error>
where
    T: FromStr<Err = OrganizerError>,
{
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e| conversion_error(idx, e))
}

fn parsed_opt<T>(row: &rusqlite::Row, idx: usize) -> Result<Option<T>, rusqlite::Error>
where
    T: FromStr<Err = OrganizerError>,
{
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| s.parse().map_err(|e| conversion_error(idx, e)))
        .transpose()
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Join tables linking events and tasks to categories and people.
const LINK_TABLES: [(&str, &str, &str); 4] = [
    ("event_categories", "event_id", "category_id"),
    ("event_people", "event_id", "person_id"),
    ("task_categories", "task_id", "category_id"),
    ("task_people", "task_id", "person_id"),
];

impl Database {
    /// Create a new database connection and initialize the schema
    pub fn new(path: &str) -> Result<Self, DatabaseError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Database { conn };
        db.initialize_schema()?;
        db.ensure_root_folder()?;
        tracing::debug!(path = %db_path.display(), "database ready");

        Ok(db)
    }

    /// Initialize the database schema (tables and indexes)
    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS folders (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                name            TEXT NOT NULL,
                parent_id       INTEGER,
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS notes (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL,
                content         TEXT NOT NULL,
                folder_id       INTEGER,
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS events (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL UNIQUE,
                description     TEXT,
                start_date      TEXT NOT NULL,
                end_date        TEXT,
                recurrence      TEXT NOT NULL DEFAULT 'none',
                color           TEXT,
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS tasks (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL UNIQUE,
                description     TEXT,
                start_date      TEXT NOT NULL,
                end_date        TEXT,
                recurrence      TEXT NOT NULL DEFAULT 'none',
                color           TEXT,
                status          TEXT NOT NULL DEFAULT 'todo',
                priority        TEXT NOT NULL DEFAULT 'medium',
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS people (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name      TEXT NOT NULL,
                last_name       TEXT NOT NULL,
                avatar          TEXT,
                birthday        TEXT NOT NULL,
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL,
                UNIQUE (first_name, last_name)
            );

            CREATE TABLE IF NOT EXISTS contacts (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name      TEXT NOT NULL,
                last_name       TEXT NOT NULL,
                birthday        TEXT,
                address         TEXT,
                postal_code     TEXT,
                city            TEXT,
                country         TEXT,
                email           TEXT,
                mobile_phone    TEXT,
                fixed_phone     TEXT,
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL,
                UNIQUE (first_name, last_name)
            );

            CREATE TABLE IF NOT EXISTS categories (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL,
                description     TEXT,
                color           TEXT,
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS event_categories (
                event_id        INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
                category_id     INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
                PRIMARY KEY (event_id, category_id)
            );

            CREATE TABLE IF NOT EXISTS event_people (
                event_id        INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
                person_id       INTEGER NOT NULL REFERENCES people(id) ON DELETE CASCADE,
                PRIMARY KEY (event_id, person_id)
            );

            CREATE TABLE IF NOT EXISTS task_categories (
                task_id         INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
                category_id     INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
                PRIMARY KEY (task_id, category_id)
            );

            CREATE TABLE IF NOT EXISTS task_people (
                task_id         INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
                person_id       INTEGER NOT NULL REFERENCES people(id) ON DELETE CASCADE,
                PRIMARY KEY (task_id, person_id)
            );

            CREATE INDEX IF NOT EXISTS idx_folders_parent_id ON folders(parent_id);
            CREATE INDEX IF NOT EXISTS idx_notes_folder_id ON notes(folder_id);
            CREATE INDEX IF NOT EXISTS idx_events_start_date ON events(start_date);
            CREATE INDEX IF NOT EXISTS idx_tasks_start_date ON tasks(start_date);",
        )?;
        Ok(())
    }

    /// Create the root folder if it is missing
    pub fn ensure_root_folder(&self) -> Result<(), DatabaseError> {
        let now = timestamp_now();
        let created = self.conn.execute(
            "INSERT OR IGNORE INTO folders (id, name, parent_id, created_at, updated_at)
             VALUES (?1, ?2, NULL, ?3, ?4)",
            rusqlite::params![ROOT_FOLDER_ID, ROOT_FOLDER_NAME, now, now],
        )?;
        if created > 0 {
            tracing::info!("root folder created");
        }
        Ok(())
    }

    /// Get a reference to the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Remove one row by id; link rows follow through `ON DELETE CASCADE`
    fn delete_row(&self, table: &str, kind: &'static str, id: i64) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        let deleted = tx.execute(
            &format!("DELETE FROM {} WHERE id = ?1", table),
            rusqlite::params![id],
        )?;
        tx.commit()?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound { kind, id });
        }
        tracing::debug!(kind, id, "row deleted");
        Ok(())
    }

    // ---- folders ----

    fn row_to_folder(row: &rusqlite::Row) -> Result<Folder, rusqlite::Error> {
        Ok(Folder {
            id: row.get(0)?,
            name: row.get(1)?,
            parent_id: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }

    /// Get all folders as a flat list ordered by id
    pub fn get_all_folders(&self) -> Result<Vec<Folder>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, parent_id, created_at, updated_at FROM folders ORDER BY id ASC",
        )?;
        let folders = stmt
            .query_map([], Self::row_to_folder)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(folders)
    }

    pub fn get_folder(&self, id: FolderId) -> Result<Folder, DatabaseError> {
        self.conn
            .query_row(
                "SELECT id, name, parent_id, created_at, updated_at FROM folders WHERE id = ?1",
                rusqlite::params![id],
                Self::row_to_folder,
            )
            .map_err(not_found("folder", id))
    }

    fn folder_exists(&self, id: FolderId) -> Result<bool, DatabaseError> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM folders WHERE id = ?1",
                rusqlite::params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Load the folder hierarchy
    pub fn folder_tree(&self) -> Result<FolderTree, DatabaseError> {
        Ok(FolderTree::build(&self.get_all_folders()?))
    }

    /// Create a folder under `parent_id` (root when `None`) and return its ID
    pub fn create_folder(&self, name: &str, parent_id: Option<FolderId>) -> Result<FolderId, DatabaseError> {
        let parent = parent_id.unwrap_or(ROOT_FOLDER_ID);
        let folder = Folder::new(ROOT_FOLDER_ID, name.trim(), Some(parent));
        folder.validate()?;
        if !self.folder_exists(parent)? {
            return Err(OrganizerError::FolderNotFound(parent).into());
        }
        self.conn.execute(
            "INSERT INTO folders (name, parent_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![folder.name, parent, folder.created_at, folder.updated_at],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(folder_id = id, parent_id = parent, "folder created");
        Ok(id)
    }

    pub fn rename_folder(&self, id: FolderId, name: &str) -> Result<(), DatabaseError> {
        if id == ROOT_FOLDER_ID {
            return Err(OrganizerError::ProtectedResource(
                "the root folder cannot be renamed".to_string(),
            )
            .into());
        }
        let mut folder = self.get_folder(id)?;
        folder.name = name.trim().to_string();
        folder.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE folders SET name = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![folder.name, timestamp_now(), id],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Move a folder under a new parent, refusing moves that would create a cycle
    pub fn move_folder(&self, id: FolderId, new_parent: FolderId) -> Result<(), DatabaseError> {
        self.folder_tree()?.check_move(id, new_parent)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE folders SET parent_id = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![new_parent, timestamp_now(), id],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Remove every folder of `plan` and every note filed in them, atomically
    pub fn delete_folders(&self, plan: &DeletePlan) -> Result<DeleteOutcome, DatabaseError> {
        if plan.contains_folder(ROOT_FOLDER_ID) {
            return Err(OrganizerError::ProtectedResource(
                "the root folder cannot be deleted".to_string(),
            )
            .into());
        }
        if plan.is_empty() {
            return Ok(DeleteOutcome { folders: 0, notes: 0 });
        }

        let ids: Vec<FolderId> = plan.folder_ids().iter().copied().collect();
        let marks = placeholders(ids.len());

        let tx = self.conn.unchecked_transaction()?;
        let notes = tx.execute(
            &format!("DELETE FROM notes WHERE folder_id IN ({})", marks),
            rusqlite::params_from_iter(ids.iter()),
        )?;
        let folders = tx.execute(
            &format!("DELETE FROM folders WHERE id IN ({})", marks),
            rusqlite::params_from_iter(ids.iter()),
        )?;
        tx.commit()?;

        tracing::info!(folder_id = plan.target(), folders, notes, "folders deleted");
        Ok(DeleteOutcome { folders, notes })
    }

    /// Delete a folder; with `recursive`, its sub-folders and notes go too,
    /// otherwise the folder must be empty
    pub fn delete_folder(&self, id: FolderId, recursive: bool) -> Result<DeleteOutcome, DatabaseError> {
        let all_folders = self.get_all_folders()?;
        let plan = if recursive {
            folders::plan_delete(id, &all_folders)?
        } else {
            let notes = self.get_notes_in_folder(Some(id))?;
            folders::plan_shallow_delete(id, &all_folders, &notes)?
        };
        self.delete_folders(&plan)
    }

    // ---- notes ----

    fn row_to_note(row: &rusqlite::Row) -> Result<Note, rusqlite::Error> {
        Ok(Note {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            content: row.get(2)?,
            folder_id: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn check_note(&self, note: &Note) -> Result<(), DatabaseError> {
        note.validate()?;
        if let Some(folder_id) = note.folder_id {
            if !self.folder_exists(folder_id)? {
                return Err(OrganizerError::FolderNotFound(folder_id).into());
            }
        }
        Ok(())
    }

    /// Insert a note into the database and return its ID
    pub fn insert_note(&self, note: &Note) -> Result<NoteId, DatabaseError> {
        self.check_note(note)?;
        self.conn.execute(
            "INSERT INTO notes (title, content, folder_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                note.title,
                note.content,
                note.folder_id,
                note.created_at,
                note.updated_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_note(&self, id: NoteId) -> Result<Note, DatabaseError> {
        self.conn
            .query_row(
                "SELECT id, title, content, folder_id, created_at, updated_at FROM notes WHERE id = ?1",
                rusqlite::params![id],
                Self::row_to_note,
            )
            .map_err(not_found("note", id))
    }

    pub fn get_all_notes(&self) -> Result<Vec<Note>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, folder_id, created_at, updated_at
             FROM notes ORDER BY updated_at DESC, id DESC",
        )?;
        let notes = stmt
            .query_map([], Self::row_to_note)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notes)
    }

    /// Notes filed directly in `folder_id`; `None` lists unfiled notes
    pub fn get_notes_in_folder(&self, folder_id: Option<FolderId>) -> Result<Vec<Note>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, folder_id, created_at, updated_at
             FROM notes WHERE folder_id IS ?1 ORDER BY updated_at DESC, id DESC",
        )?;
        let notes = stmt
            .query_map(rusqlite::params![folder_id], Self::row_to_note)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notes)
    }

    pub fn update_note(&self, note: &Note) -> Result<(), DatabaseError> {
        let id = note
            .id
            .ok_or_else(|| OrganizerError::validation("id", "note has not been saved yet"))?;
        self.check_note(note)?;

        let tx = self.conn.unchecked_transaction()?;
        let updated = tx.execute(
            "UPDATE notes SET title = ?1, content = ?2, folder_id = ?3, updated_at = ?4 WHERE id = ?5",
            rusqlite::params![note.title, note.content, note.folder_id, timestamp_now(), id],
        )?;
        tx.commit()?;
        if updated == 0 {
            return Err(DatabaseError::NotFound { kind: "note", id });
        }
        Ok(())
    }

    pub fn delete_note(&self, id: NoteId) -> Result<(), DatabaseError> {
        self.delete_row("notes", "note", id)
    }

    // ---- links ----

    fn load_links(&self, table: &str, owner_column: &str, value_column: &str, owner: i64) -> Result<Vec<i64>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {value} FROM {table} WHERE {owner} = ?1 ORDER BY {value} ASC",
            value = value_column,
            table = table,
            owner = owner_column
        ))?;
        let ids = stmt
            .query_map(rusqlite::params![owner], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    fn insert_links(
        tx: &rusqlite::Transaction,
        (table, owner_column, value_column): (&str, &str, &str),
        owner: i64,
        values: &[i64],
    ) -> Result<(), DatabaseError> {
        let mut stmt = tx.prepare(&format!(
            "INSERT OR IGNORE INTO {table} ({owner}, {value}) VALUES (?1, ?2)",
            table = table,
            owner = owner_column,
            value = value_column
        ))?;
        for value in values {
            stmt.execute(rusqlite::params![owner, value])?;
        }
        Ok(())
    }

    // ---- events ----

    fn row_to_event(row: &rusqlite::Row) -> Result<Event, rusqlite::Error> {
        Ok(Event {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            description: row.get(2)?,
            schedule: Schedule {
                start: parsed(row, 3)?,
                end: parsed_opt(row, 4)?,
                recurrence: parsed(row, 5)?,
            },
            color: row.get(6)?,
            categories: Vec::new(),
            people: Vec::new(),
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    /// Insert an event and its category/person links, returning its ID
    pub fn insert_event(&self, event: &Event) -> Result<i64, DatabaseError> {
        event.validate()?;
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO events (title, description, start_date, end_date, recurrence, color, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                event.title,
                event.description,
                event.schedule.start.to_string(),
                event.schedule.end.map(|m| m.to_string()),
                event.schedule.recurrence.as_str(),
                event.color,
                event.created_at,
                event.updated_at
            ],
        )?;
        let id = tx.last_insert_rowid();
        Self::insert_links(&tx, LINK_TABLES[0], id, &event.categories)?;
        Self::insert_links(&tx, LINK_TABLES[1], id, &event.people)?;
        tx.commit()?;
        Ok(id)
    }

    /// Get all events with their category and person ids, ordered by start date
    pub fn get_all_events(&self) -> Result<Vec<Event>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, start_date, end_date, recurrence, color, created_at, updated_at
             FROM events ORDER BY start_date ASC, id ASC",
        )?;
        let mut events = stmt
            .query_map([], Self::row_to_event)?
            .collect::<Result<Vec<_>, _>>()?;
        for event in &mut events {
            if let Some(id) = event.id {
                let (table, owner, value) = LINK_TABLES[0];
                event.categories = self.load_links(table, owner, value, id)?;
                let (table, owner, value) = LINK_TABLES[1];
                event.people = self.load_links(table, owner, value, id)?;
            }
        }
        Ok(events)
    }

    pub fn delete_event(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_row("events", "event", id)
    }

    // ---- tasks ----

    fn row_to_task(row: &rusqlite::Row) -> Result<Task, rusqlite::Error> {
        Ok(Task {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            description: row.get(2)?,
            schedule: Schedule {
                start: parsed(row, 3)?,
                end: parsed_opt(row, 4)?,
                recurrence: parsed(row, 5)?,
            },
            color: row.get(6)?,
            categories: Vec::new(),
            people: Vec::new(),
            status: parsed(row, 7)?,
            priority: parsed(row, 8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }

    /// Insert a task and its category/person links, returning its ID
    pub fn insert_task(&self, task: &Task) -> Result<i64, DatabaseError> {
        task.validate()?;
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO tasks (title, description, start_date, end_date, recurrence, color, status, priority, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
                task.title,
                task.description,
                task.schedule.start.to_string(),
                task.schedule.end.map(|m| m.to_string()),
                task.schedule.recurrence.as_str(),
                task.color,
                task.status.as_str(),
                task.priority.as_str(),
                task.created_at,
                task.updated_at
            ],
        )?;
        let id = tx.last_insert_rowid();
        Self::insert_links(&tx, LINK_TABLES[2], id, &task.categories)?;
        Self::insert_links(&tx, LINK_TABLES[3], id, &task.people)?;
        tx.commit()?;
        Ok(id)
    }

    /// Get all tasks with their category and person ids, ordered by start date
    pub fn get_all_tasks(&self) -> Result<Vec<Task>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, start_date, end_date, recurrence, color, status, priority, created_at, updated_at
             FROM tasks ORDER BY start_date ASC, id ASC",
        )?;
        let mut tasks = stmt
            .query_map([], Self::row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        for task in &mut tasks {
            if let Some(id) = task.id {
                let (table, owner, value) = LINK_TABLES[2];
                task.categories = self.load_links(table, owner, value, id)?;
                let (table, owner, value) = LINK_TABLES[3];
                task.people = self.load_links(table, owner, value, id)?;
            }
        }
        Ok(tasks)
    }

    /// Move a task to another kanban column
    pub fn update_task_status(&self, id: i64, status: TaskStatus) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        let updated = tx.execute(
            "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![status.as_str(), timestamp_now(), id],
        )?;
        tx.commit()?;
        if updated == 0 {
            return Err(DatabaseError::NotFound { kind: "task", id });
        }
        Ok(())
    }

    pub fn delete_task(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_row("tasks", "task", id)
    }

    // ---- people, contacts, categories ----

    pub fn insert_person(&self, person: &Person) -> Result<i64, DatabaseError> {
        person.validate()?;
        self.conn.execute(
            "INSERT INTO people (first_name, last_name, avatar, birthday, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                person.first_name,
                person.last_name,
                person.avatar,
                person.birthday,
                person.created_at,
                person.updated_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_all_people(&self) -> Result<Vec<Person>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, last_name, avatar, birthday, created_at, updated_at
             FROM people ORDER BY last_name ASC, first_name ASC",
        )?;
        let people = stmt
            .query_map([], |row| {
                Ok(Person {
                    id: Some(row.get(0)?),
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    avatar: row.get(3)?,
                    birthday: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(people)
    }

    pub fn insert_contact(&self, contact: &Contact) -> Result<i64, DatabaseError> {
        contact.validate()?;
        self.conn.execute(
            "INSERT INTO contacts (first_name, last_name, birthday, address, postal_code, city, country,
                                   email, mobile_phone, fixed_phone, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            rusqlite::params![
                contact.first_name,
                contact.last_name,
                contact.birthday,
                contact.address,
                contact.postal_code,
                contact.city,
                contact.country,
                contact.email,
                contact.mobile_phone,
                contact.fixed_phone,
                contact.created_at,
                contact.updated_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_all_contacts(&self) -> Result<Vec<Contact>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, last_name, birthday, address, postal_code, city, country,
                    email, mobile_phone, fixed_phone, created_at, updated_at
             FROM contacts ORDER BY last_name ASC, first_name ASC",
        )?;
        let contacts = stmt
            .query_map([], |row| {
                Ok(Contact {
                    id: Some(row.get(0)?),
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    birthday: row.get(3)?,
                    address: row.get(4)?,
                    postal_code: row.get(5)?,
                    city: row.get(6)?,
                    country: row.get(7)?,
                    email: row.get(8)?,
                    mobile_phone: row.get(9)?,
                    fixed_phone: row.get(10)?,
                    created_at: row.get(11)?,
                    updated_at: row.get(12)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    pub fn insert_category(&self, category: &Category) -> Result<i64, DatabaseError> {
        category.validate()?;
        self.conn.execute(
            "INSERT INTO categories (title, description, color, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                category.title,
                category.description,
                category.color,
                category.created_at,
                category.updated_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_all_categories(&self) -> Result<Vec<Category>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, color, created_at, updated_at
             FROM categories ORDER BY title ASC",
        )?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: Some(row.get(0)?),
                    title: row.get(1)?,
                    description: row.get(2)?,
                    color: row.get(3)?,
                    created_at: row.get(4)?,
                    updated_at: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    pub fn delete_person(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_row("people", "person", id)
    }

    pub fn delete_contact(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_row("contacts", "contact", id)
    }

    pub fn delete_category(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_row("categories", "category", id)
    }
}

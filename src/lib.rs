pub mod calendar;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod folders;
pub mod models;
pub mod utils;

pub use config::Config;
pub use database::Database;
pub use error::OrganizerError;
pub use models::{Category, Contact, Event, Folder, Item, Moment, Note, Person, Recurrence, Schedule, Task};
pub use utils::Profile;

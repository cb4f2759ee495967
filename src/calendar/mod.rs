//! Calendar view computations: month windows, recurrence expansion and
//! per-day grouping. All functions are pure over already-loaded records.

pub mod bucket;
pub mod date_range;
pub mod recurrence;

pub use bucket::{Birthday, BirthdayIndex, BirthdaySource, DayBucket, MonthDay, for_day, month_agenda};
pub use date_range::{DateRange, Week, WeekStart, day_key, month_grid};
pub use recurrence::{Instance, expand, expand_all};

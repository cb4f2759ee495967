//! Date ranges and recurrence stepping.
//!
//! Everything here is a value type: stepping a moment or moving a window
//! returns a new value and never mutates the input.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::OrganizerError;
use crate::models::{Moment, Recurrence};

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The whole of `month` in `year`.
    pub fn month(year: i32, month: u32) -> Result<Self, OrganizerError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            OrganizerError::MalformedInput(format!("invalid month {:04}-{:02}", year, month))
        })?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| {
                OrganizerError::MalformedInput(format!("month {:04}-{:02} out of range", year, month))
            })?;
        Ok(Self { start, end })
    }

    /// Month containing `day`.
    pub fn month_of(day: NaiveDate) -> Result<Self, OrganizerError> {
        Self::month(day.year(), day.month())
    }

    /// Parse `YYYY-MM` into the matching month window.
    pub fn parse_month(s: &str) -> Result<Self, OrganizerError> {
        let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|_| OrganizerError::MalformedInput(format!("'{}' is not a month (YYYY-MM)", s)))?;
        Self::month_of(first)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    pub fn next_month(&self) -> Result<Self, OrganizerError> {
        let next = self.start.checked_add_months(Months::new(1)).ok_or_else(|| {
            OrganizerError::MalformedInput("month after range is out of bounds".to_string())
        })?;
        Self::month_of(next)
    }

    pub fn previous_month(&self) -> Result<Self, OrganizerError> {
        let prev = self.start.checked_sub_months(Months::new(1)).ok_or_else(|| {
            OrganizerError::MalformedInput("month before range is out of bounds".to_string())
        })?;
        Self::month_of(prev)
    }
}

impl Recurrence {
    /// One step after `moment`, or `None` for non-recurring items.
    ///
    /// Month and year steps clamp to the last day of a shorter month
    /// (Jan 31 + 1 month = Feb 29 in 2024).
    pub fn step(&self, moment: Moment) -> Option<Moment> {
        let date = moment.date();
        let next = match self {
            Recurrence::None => return None,
            Recurrence::Daily => date.checked_add_days(Days::new(1))?,
            Recurrence::Weekly => date.checked_add_days(Days::new(7))?,
            Recurrence::Monthly => date.checked_add_months(Months::new(1))?,
            Recurrence::Yearly => date.checked_add_months(Months::new(12))?,
        };
        Some(moment.with_date(next))
    }

    /// The occurrence `n` steps after `anchor`.
    ///
    /// Month and year steps are chained one at a time, so a day clamped in a
    /// short month stays clamped for the following occurrences.
    pub fn advance(&self, anchor: Moment, n: u32) -> Option<Moment> {
        let days_per_step = match self {
            Recurrence::None => return None,
            Recurrence::Daily => 1,
            Recurrence::Weekly => 7,
            Recurrence::Monthly | Recurrence::Yearly => {
                let mut current = anchor;
                for _ in 0..n {
                    current = self.step(current)?;
                }
                return Some(current);
            }
        };
        let days = u64::from(n).checked_mul(days_per_step)?;
        Some(anchor.with_date(anchor.date().checked_add_days(Days::new(days))?))
    }

    /// First occurrence stepped from `anchor` whose date is on or after `day`.
    pub(crate) fn first_on_or_after(&self, anchor: Moment, day: NaiveDate) -> Option<Moment> {
        if !self.is_recurring() {
            return None;
        }
        let start = anchor.date();
        if start >= day {
            return Some(anchor);
        }
        let days_between = u32::try_from((day - start).num_days()).ok()?;
        match self {
            Recurrence::Daily => self.advance(anchor, days_between),
            Recurrence::Weekly => self.advance(anchor, days_between.div_ceil(7)),
            _ => {
                let mut current = anchor;
                while current.date() < day {
                    current = self.step(current)?;
                }
                Some(current)
            }
        }
    }
}

/// First day of the week in calendar grids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

/// One row of a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Week {
    /// ISO week number of the row's Monday.
    pub number: u32,
    pub days: [NaiveDate; 7],
}

/// Full weeks covering `range`, padded with days of the neighbouring months.
pub fn month_grid(range: &DateRange, week_start: WeekStart) -> Vec<Week> {
    let first_weekday = week_start.weekday();
    let lead = u64::from(
        (7 + range.start.weekday().num_days_from_monday() - first_weekday.num_days_from_monday()) % 7,
    );
    let Some(mut cursor) = range.start.checked_sub_days(Days::new(lead)) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    while cursor <= range.end {
        let mut days = [cursor; 7];
        for (offset, slot) in days.iter_mut().enumerate() {
            match cursor.checked_add_days(Days::new(offset as u64)) {
                Some(day) => *slot = day,
                None => return weeks,
            }
        }
        let number = days
            .iter()
            .find(|d| d.weekday() == Weekday::Mon)
            .map(|d| d.iso_week().week())
            .unwrap_or_else(|| cursor.iso_week().week());
        weeks.push(Week { number, days });
        match cursor.checked_add_days(Days::new(7)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    weeks
}

/// `YYYYMMDD`, used to build instance ids.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_window_handles_leap_years() {
        let feb = DateRange::month(2024, 2).unwrap();
        assert_eq!(feb.start, d(2024, 2, 1));
        assert_eq!(feb.end, d(2024, 2, 29));
        assert_eq!(feb.days().count(), 29);
        assert_eq!(DateRange::month(2023, 2).unwrap().end, d(2023, 2, 28));
    }

    #[test]
    fn month_navigation_returns_new_values() {
        let dec = DateRange::parse_month("2024-12").unwrap();
        let jan = dec.next_month().unwrap();
        assert_eq!(jan, DateRange::month(2025, 1).unwrap());
        assert_eq!(jan.previous_month().unwrap(), dec);
        assert_eq!(dec.start, d(2024, 12, 1));
    }

    #[test]
    fn invalid_month_is_malformed_input() {
        assert!(matches!(
            DateRange::month(2024, 13),
            Err(OrganizerError::MalformedInput(_))
        ));
        assert!(DateRange::parse_month("2024/02").is_err());
    }

    #[test]
    fn containment_is_inclusive() {
        let feb = DateRange::month(2024, 2).unwrap();
        assert!(feb.contains(d(2024, 2, 1)));
        assert!(feb.contains(d(2024, 2, 29)));
        assert!(!feb.contains(d(2024, 3, 1)));
    }

    #[test]
    fn steps_by_recurrence_unit() {
        let start = Moment::Date(d(2024, 1, 31));
        assert_eq!(Recurrence::Daily.step(start), Some(Moment::Date(d(2024, 2, 1))));
        assert_eq!(Recurrence::Weekly.step(start), Some(Moment::Date(d(2024, 2, 7))));
        assert_eq!(Recurrence::Monthly.step(start), Some(Moment::Date(d(2024, 2, 29))));
        assert_eq!(Recurrence::Yearly.step(start), Some(Moment::Date(d(2025, 1, 31))));
        assert_eq!(Recurrence::None.step(start), None);
    }

    #[test]
    fn monthly_advance_chains_single_steps() {
        let start = Moment::Date(d(2024, 1, 31));
        assert_eq!(Recurrence::Monthly.advance(start, 2), Some(Moment::Date(d(2024, 3, 29))));
        assert_eq!(
            Recurrence::Monthly.advance(start, 2),
            Recurrence::Monthly
                .step(start)
                .and_then(|m| Recurrence::Monthly.step(m))
        );
        assert_eq!(Recurrence::Daily.advance(start, 30), Some(Moment::Date(d(2024, 3, 1))));
    }

    #[test]
    fn stepping_keeps_time_of_day() {
        let start = Moment::parse("2024-01-01T18:30").unwrap();
        assert_eq!(
            Recurrence::Weekly.step(start),
            Some(Moment::parse("2024-01-08T18:30").unwrap())
        );
    }

    #[test]
    fn first_occurrence_aligns_with_anchor() {
        let anchor = Moment::Date(d(2024, 1, 1));
        assert_eq!(
            Recurrence::Weekly.first_on_or_after(anchor, d(2024, 2, 1)),
            Some(Moment::Date(d(2024, 2, 5)))
        );
        assert_eq!(
            Recurrence::Weekly.first_on_or_after(anchor, d(2024, 1, 29)),
            Some(Moment::Date(d(2024, 1, 29)))
        );
        assert_eq!(
            Recurrence::Monthly.first_on_or_after(Moment::Date(d(2023, 11, 30)), d(2024, 3, 1)),
            Some(Moment::Date(d(2024, 3, 29)))
        );
        assert_eq!(Recurrence::Yearly.first_on_or_after(anchor, d(2023, 6, 1)), Some(anchor));
        assert_eq!(Recurrence::None.first_on_or_after(anchor, d(2024, 6, 1)), None);
    }

    #[test]
    fn month_grid_covers_whole_weeks() {
        let feb = DateRange::month(2024, 2).unwrap();
        let weeks = month_grid(&feb, WeekStart::Monday);
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0].days[0], d(2024, 1, 29));
        assert_eq!(weeks[4].days[6], d(2024, 3, 3));
        assert_eq!(weeks[0].number, 5);

        let sunday_first = month_grid(&feb, WeekStart::Sunday);
        assert_eq!(sunday_first[0].days[0], d(2024, 1, 28));
        assert_eq!(sunday_first[0].days[0].weekday(), Weekday::Sun);
    }

    #[test]
    fn day_key_format() {
        assert_eq!(day_key(d(2024, 2, 1)), "20240201");
    }
}

//! Expansion of recurring events and tasks into dated instances.

use serde::Serialize;

use crate::calendar::date_range::{DateRange, day_key};
use crate::models::{Item, Moment};

/// A single displayed occurrence of an item. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instance {
    /// Item id for pass-through instances, `{id}-{YYYYMMDD}` for generated ones.
    pub id: String,
    /// Back-reference to the source item of a generated instance.
    pub original_id: Option<i64>,
    pub is_recurring_instance: bool,
    pub item: Item,
}

impl Instance {
    fn passthrough(item: &Item) -> Self {
        Instance {
            id: item.id().map(|id| id.to_string()).unwrap_or_default(),
            original_id: None,
            is_recurring_instance: false,
            item: item.clone(),
        }
    }

    fn occurrence(item: &Item, start: Moment, end: Moment) -> Self {
        let key = day_key(start.date());
        let id = match item.id() {
            Some(id) => format!("{}-{}", id, key),
            None => key,
        };
        let mut copy = item.clone();
        let schedule = copy.schedule_mut();
        schedule.start = start;
        schedule.end = Some(end);
        Instance {
            id,
            original_id: item.id(),
            is_recurring_instance: true,
            item: copy,
        }
    }

    pub fn start(&self) -> Moment {
        self.item.schedule().start
    }

    pub fn end(&self) -> Option<Moment> {
        self.item.schedule().end
    }

    pub fn title(&self) -> &str {
        self.item.title()
    }
}

/// Concrete instances of `item` for display in `window`.
///
/// Non-recurring items pass through untouched and are left to the day
/// bucketing to filter. Recurring items without an end produce only their
/// first occurrence. Recurring items with an end step from their start one
/// period at a time and keep every occurrence dated inside the window that
/// does not start after the item ends; when none qualifies the item is
/// returned as-is, so the result is never empty.
pub fn expand(item: &Item, window: &DateRange) -> Vec<Instance> {
    let schedule = item.schedule();
    let recurrence = schedule.recurrence;
    if !recurrence.is_recurring() {
        return vec![Instance::passthrough(item)];
    }

    let Some(end) = schedule.end else {
        return vec![Instance::occurrence(item, schedule.start, schedule.start)];
    };

    let lower = schedule.start.date().max(window.start);
    let instance_end = if end.date() <= window.end {
        end
    } else {
        end.with_date(window.end)
    };

    let mut instances = Vec::new();
    let mut next = recurrence.first_on_or_after(schedule.start, lower);
    while let Some(occurrence) = next {
        // window bound by day, item bound by the full timestamp
        if occurrence.date() > window.end || occurrence.as_datetime() > end.as_datetime() {
            break;
        }
        instances.push(Instance::occurrence(item, occurrence, instance_end));
        next = recurrence.step(occurrence);
    }

    if instances.is_empty() {
        tracing::trace!(item = ?item.id(), "no occurrence in window, keeping item as-is");
        return vec![Instance::passthrough(item)];
    }
    instances
}

/// Expand every item of a list, keeping input order.
pub fn expand_all<'a, I>(items: I, window: &DateRange) -> Vec<Instance>
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .flat_map(|item| expand(item, window))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, Recurrence, Schedule, Task};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn date(s: &str) -> Moment {
        Moment::parse(s).unwrap()
    }

    fn task(id: i64, start: &str, end: Option<&str>, recurrence: Recurrence) -> Item {
        let mut task = Task::new(
            "Take out bins".to_string(),
            Schedule::new(date(start), end.map(date), recurrence),
        );
        task.id = Some(id);
        Item::Task(task)
    }

    fn event(id: i64, start: &str, end: Option<&str>, recurrence: Recurrence) -> Item {
        let mut event = Event::new(
            "Choir rehearsal".to_string(),
            Schedule::new(date(start), end.map(date), recurrence),
        );
        event.id = Some(id);
        Item::Event(event)
    }

    fn february() -> DateRange {
        DateRange::month(2024, 2).unwrap()
    }

    #[test]
    fn non_recurring_item_passes_through_unchanged() {
        let item = event(3, "2023-06-01", None, Recurrence::None);
        let instances = expand(&item, &february());
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].id, "3");
        assert_eq!(instances[0].item, item);
        assert!(!instances[0].is_recurring_instance);
        assert_eq!(instances[0].original_id, None);
    }

    #[test]
    fn daily_task_is_clipped_to_window_and_item_end() {
        let item = task(7, "2024-01-30", Some("2024-02-02"), Recurrence::Daily);
        let instances = expand(&item, &february());
        let starts: Vec<_> = instances.iter().map(|i| i.start().date()).collect();
        assert_eq!(starts, vec![d(2024, 2, 1), d(2024, 2, 2)]);
        assert_eq!(instances[0].id, "7-20240201");
        assert_eq!(instances[1].id, "7-20240202");
        for instance in &instances {
            assert_eq!(instance.original_id, Some(7));
            assert!(instance.is_recurring_instance);
            assert_eq!(instance.end(), Some(date("2024-02-02")));
            assert!(instance.item.is_task());
        }
    }

    #[test]
    fn weekly_event_keeps_its_weekday_inside_window() {
        let item = event(1, "2024-01-01", Some("2024-03-01"), Recurrence::Weekly);
        let instances = expand(&item, &february());
        let starts: Vec<_> = instances.iter().map(|i| i.start().date()).collect();
        assert_eq!(
            starts,
            vec![d(2024, 2, 5), d(2024, 2, 12), d(2024, 2, 19), d(2024, 2, 26)]
        );
        for start in &starts {
            assert_eq!((*start - d(2024, 1, 1)).num_days() % 7, 0);
        }
        // clipped to the window end
        assert_eq!(instances[0].end(), Some(date("2024-02-29")));
    }

    #[test]
    fn instances_stay_inside_item_and_window_bounds() {
        let spring = DateRange::new(d(2024, 1, 1), d(2024, 4, 30));
        let cases = [
            ("2023-12-20", "2024-02-20", february()),
            ("2024-01-31", "2024-12-31", spring),
            ("2023-10-31T08:00", "2024-04-15T07:00", spring),
        ];
        for (start, end, window) in cases {
            for recurrence in [
                Recurrence::Daily,
                Recurrence::Weekly,
                Recurrence::Monthly,
                Recurrence::Yearly,
            ] {
                let item = event(9, start, Some(end), recurrence);
                let instances = expand(&item, &window);
                assert!(!instances.is_empty());
                if !instances[0].is_recurring_instance {
                    continue;
                }
                for pair in instances.windows(2) {
                    assert_eq!(recurrence.step(pair[0].start()), Some(pair[1].start()));
                }
                for instance in &instances {
                    assert!(window.contains(instance.start().date()));
                    assert!(instance.start() >= date(start));
                    assert!(instance.start() <= date(end));
                    assert!(instance.end() >= Some(instance.start()));
                }
            }
        }
    }

    #[test]
    fn monthly_item_on_the_31st_chains_clamped_days() {
        let item = event(6, "2024-01-31", Some("2024-12-31"), Recurrence::Monthly);
        let window = DateRange::new(d(2024, 1, 1), d(2024, 4, 30));
        let starts: Vec<_> = expand(&item, &window).iter().map(|i| i.start()).collect();
        assert_eq!(
            starts,
            vec![
                date("2024-01-31"),
                date("2024-02-29"),
                date("2024-03-29"),
                date("2024-04-29"),
            ]
        );
    }

    #[test]
    fn timed_occurrence_after_item_end_is_dropped() {
        let item = event(10, "2024-02-01T19:00", Some("2024-02-03T09:00"), Recurrence::Daily);
        let instances = expand(&item, &february());
        let starts: Vec<_> = instances.iter().map(|i| i.start()).collect();
        assert_eq!(starts, vec![date("2024-02-01T19:00"), date("2024-02-02T19:00")]);
        for instance in &instances {
            assert_eq!(instance.end(), Some(date("2024-02-03T09:00")));
            assert!(instance.end() >= Some(instance.start()));
        }
    }

    #[test]
    fn monthly_item_on_the_31st_uses_last_day_of_short_months() {
        let item = event(4, "2024-01-31", Some("2024-12-31"), Recurrence::Monthly);
        let instances = expand(&item, &february());
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].start(), date("2024-02-29"));
        assert_eq!(instances[0].id, "4-20240229");
    }

    #[test]
    fn yearly_item_outside_window_falls_back_to_original() {
        let item = event(5, "2020-03-10", Some("2030-03-10"), Recurrence::Yearly);
        let instances = expand(&item, &february());
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].item, item);
        assert!(!instances[0].is_recurring_instance);
    }

    #[test]
    fn open_ended_recurring_item_yields_only_first_occurrence() {
        let item = task(12, "2024-01-15", None, Recurrence::Daily);
        let instances = expand(&item, &february());
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].id, "12-20240115");
        assert_eq!(instances[0].start(), date("2024-01-15"));
        assert_eq!(instances[0].end(), Some(date("2024-01-15")));
        assert_eq!(instances[0].original_id, Some(12));
    }

    #[test]
    fn end_before_start_is_tolerated() {
        let item = task(8, "2024-02-10", Some("2024-02-01"), Recurrence::Daily);
        let instances = expand(&item, &february());
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].item, item);
    }

    #[test]
    fn timed_occurrences_keep_their_time() {
        let item = event(2, "2024-01-29T19:00", Some("2024-02-14T21:00"), Recurrence::Weekly);
        let instances = expand(&item, &february());
        let starts: Vec<_> = instances.iter().map(|i| i.start()).collect();
        assert_eq!(starts, vec![date("2024-02-05T19:00"), date("2024-02-12T19:00")]);
        assert_eq!(instances[0].end(), Some(date("2024-02-14T21:00")));
    }

    #[test]
    fn expansion_is_deterministic() {
        let item = event(1, "2024-01-01", Some("2024-03-01"), Recurrence::Daily);
        assert_eq!(expand(&item, &february()), expand(&item, &february()));
    }

    #[test]
    fn expand_all_flattens_in_input_order() {
        let items = vec![
            event(1, "2024-02-03", None, Recurrence::None),
            task(2, "2024-02-27", Some("2024-03-05"), Recurrence::Daily),
        ];
        let ids: Vec<_> = expand_all(&items, &february())
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["1", "2-20240227", "2-20240228", "2-20240229"]);
    }
}

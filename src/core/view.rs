//! Listing pipeline: relative time window, text search, sort, pagination

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::cmp::Ordering;

use crate::cli::SortOrder;
use crate::core::types::{Page, Task};

/// How far back the listing reaches, measured from the task date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Deserialize)]
pub(crate) enum TimeWindow {
    /// Last 24 hours
    #[value(name = "24h")]
    #[serde(rename = "24h")]
    Day,
    /// Last 7 days (default)
    #[default]
    #[value(name = "7d")]
    #[serde(rename = "7d")]
    Week,
    /// Last 30 days
    #[value(name = "1m")]
    #[serde(rename = "1m")]
    Month,
    /// Last 365 days
    #[value(name = "1a")]
    #[serde(rename = "1a")]
    Year,
    /// Everything
    #[value(name = "all")]
    #[serde(rename = "all")]
    All,
}

impl TimeWindow {
    fn span(self) -> Option<Duration> {
        match self {
            TimeWindow::Day => Some(Duration::hours(24)),
            TimeWindow::Week => Some(Duration::days(7)),
            TimeWindow::Month => Some(Duration::days(30)),
            TimeWindow::Year => Some(Duration::days(365)),
            TimeWindow::All => None,
        }
    }

    /// Whether `task` falls inside the window ending at `now`.
    /// Tasks dated in the future are always inside; undated tasks only in `All`.
    pub(crate) fn contains(self, task: &Task, now: DateTime<Utc>) -> bool {
        let Some(span) = self.span() else {
            return true;
        };
        match task.date_instant() {
            Some(date) => now - date <= span,
            None => false,
        }
    }
}

/// Column the listing is sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum SortField {
    /// Task date (default)
    #[default]
    Date,
    /// Boxes
    Quantity,
    /// Unit price
    Value,
    /// Expiry date, undated first
    Expiry,
    /// Unit price times boxes
    Total,
    /// Weight in kg, boxes when unrecorded
    Weight,
}

fn instant_key(instant: Option<DateTime<Utc>>) -> f64 {
    instant.map_or(f64::NAN, |dt| dt.timestamp_millis() as f64)
}

impl SortField {
    fn key(self, task: &Task) -> f64 {
        match self {
            SortField::Date => instant_key(task.date_instant()),
            SortField::Quantity => task.quantity,
            SortField::Value => task.value,
            SortField::Expiry => match task.expiry_date {
                None => 0.0,
                Some(_) => instant_key(task.expiry_instant()),
            },
            SortField::Total => task.total_price(),
            SortField::Weight => task.weight(),
        }
    }
}

/// Total order over floats with NaN last
pub(crate) fn compare_f64(a: f64, b: f64) -> Ordering {
    if a.is_nan() && b.is_nan() {
        Ordering::Equal
    } else if a.is_nan() {
        Ordering::Greater
    } else if b.is_nan() {
        Ordering::Less
    } else {
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }
}

/// Case-insensitive match on the description, or a plain match on the date
pub(crate) fn matches_search(task: &Task, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    task.description
        .to_lowercase()
        .contains(&term.to_lowercase())
        || task.date.contains(term)
}

/// Stable sort by `field` in `order`; unsortable keys stay last either way
pub(crate) fn sort_tasks(tasks: &mut [&Task], field: SortField, order: SortOrder) {
    tasks.sort_by(|a, b| {
        let (ka, kb) = (field.key(a), field.key(b));
        ka.is_nan().cmp(&kb.is_nan()).then_with(|| match order {
            SortOrder::Asc => compare_f64(ka, kb),
            SortOrder::Desc => compare_f64(kb, ka),
        })
    });
}

#[derive(Debug, Clone)]
pub(crate) struct ListQuery<'a> {
    pub(crate) search: &'a str,
    pub(crate) window: TimeWindow,
    pub(crate) sort: SortField,
    pub(crate) order: SortOrder,
}

/// Filter by window and search term, then sort
pub(crate) fn select_tasks<'t>(
    tasks: &'t [Task],
    query: &ListQuery<'_>,
    now: DateTime<Utc>,
) -> Vec<&'t Task> {
    let mut selected: Vec<&Task> = tasks
        .iter()
        .filter(|t| matches_search(t, query.search) && query.window.contains(t, now))
        .collect();
    sort_tasks(&mut selected, query.sort, query.order);
    selected
}

/// Cut one page out of `items`; the requested page is clamped into range
pub(crate) fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let items = if start < total_items {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };
    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::tests::make_task;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn dated(id: &str, date: &str) -> Task {
        let mut t = make_task(id, 1.0, 1.0, 30.0);
        t.date = date.to_string();
        t
    }

    #[test]
    fn window_day_keeps_last_24_hours() {
        assert!(TimeWindow::Day.contains(&dated("a", "2026-10-17"), now()));
        assert!(!TimeWindow::Day.contains(&dated("b", "2026-10-16"), now()));
    }

    #[test]
    fn window_week_boundary_is_inclusive() {
        // 2026-10-10T12:00Z is exactly 7 days back, the date itself is at midnight
        assert!(TimeWindow::Week.contains(&dated("a", "2026-10-11"), now()));
        assert!(!TimeWindow::Week.contains(&dated("b", "2026-10-10"), now()));
        assert!(TimeWindow::Week.contains(&dated("c", "2026-10-10T12:00:00Z"), now()));
    }

    #[test]
    fn window_keeps_future_and_all_keeps_everything() {
        assert!(TimeWindow::Day.contains(&dated("a", "2027-01-01"), now()));
        assert!(TimeWindow::All.contains(&dated("b", "1999-01-01"), now()));
        assert!(TimeWindow::All.contains(&dated("c", "not a date"), now()));
        assert!(!TimeWindow::Year.contains(&dated("d", "not a date"), now()));
    }

    #[test]
    fn search_is_case_insensitive_on_description() {
        let mut t = dated("a", "2024-01-15");
        t.description = "Reposição de produtos de LIMPEZA".into();
        assert!(matches_search(&t, "limpeza"));
        assert!(matches_search(&t, "2024-01"));
        assert!(matches_search(&t, ""));
        assert!(!matches_search(&t, "bebidas"));
    }

    #[test]
    fn sort_by_total_desc() {
        let a = make_task("a", 2.0, 10.0, 1.0); // 20
        let b = make_task("b", 10.0, 5.0, 1.0); // 50
        let c = make_task("c", 1.0, 30.0, 1.0); // 30
        let mut refs = vec![&a, &b, &c];
        sort_tasks(&mut refs, SortField::Total, SortOrder::Desc);
        let ids: Vec<_> = refs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn sort_by_expiry_puts_missing_first_ascending() {
        let mut a = dated("a", "2024-01-01");
        a.expiry_date = Some("2025-01-01".into());
        let b = dated("b", "2024-01-01");
        let mut c = dated("c", "2024-01-01");
        c.expiry_date = Some("2024-06-01".into());
        let mut refs = vec![&a, &b, &c];
        sort_tasks(&mut refs, SortField::Expiry, SortOrder::Asc);
        let ids: Vec<_> = refs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let a = dated("a", "2024-01-01");
        let b = dated("b", "2024-01-01");
        let mut refs = vec![&a, &b];
        sort_tasks(&mut refs, SortField::Date, SortOrder::Desc);
        assert_eq!(refs[0].id, "a");
    }

    #[test]
    fn sort_with_unparsable_dates_does_not_panic() {
        let a = dated("a", "garbage");
        let b = dated("b", "2024-01-01");
        let c = dated("c", "also garbage");
        let mut refs = vec![&a, &b, &c];
        sort_tasks(&mut refs, SortField::Date, SortOrder::Asc);
        assert_eq!(refs[0].id, "b");

        let d = dated("d", "2025-06-01");
        let mut refs = vec![&a, &b, &c, &d];
        sort_tasks(&mut refs, SortField::Date, SortOrder::Desc);
        let ids: Vec<_> = refs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["d", "b", "a", "c"]);
    }

    #[test]
    fn select_filters_then_sorts() {
        let tasks = vec![
            dated("old", "2020-01-01"),
            dated("x", "2026-10-15"),
            dated("y", "2026-10-16"),
        ];
        let query = ListQuery {
            search: "",
            window: TimeWindow::Week,
            sort: SortField::Date,
            order: SortOrder::Desc,
        };
        let ids: Vec<_> = select_tasks(&tasks, &query, now())
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(ids, ["y", "x"]);
    }

    #[test]
    fn paginate_splits_and_clamps() {
        let items: Vec<u32> = (1..=12).collect();
        let p = paginate(&items, 1, 5);
        assert_eq!(p.items, vec![1, 2, 3, 4, 5]);
        assert_eq!(p.total_pages, 3);

        let last = paginate(&items, 3, 5);
        assert_eq!(last.items, vec![11, 12]);

        let clamped = paginate(&items, 99, 5);
        assert_eq!(clamped.page, 3);
        assert_eq!(clamped.items, vec![11, 12]);

        let zero = paginate(&items, 0, 5);
        assert_eq!(zero.page, 1);
    }

    #[test]
    fn paginate_empty() {
        let p = paginate::<u32>(&[], 2, 5);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 0);
        assert!(p.items.is_empty());
    }
}

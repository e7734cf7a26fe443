//! Dashboard rollups: per product, per brand, per calendar day

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;

use crate::consts::{
    DATE_FORMAT, LOSSES_PREVENTED_RATIO, MAX_WINDOW_DAYS, OTHER_BRAND, PROTECTED_STOCK_RATIO,
    TOP_BRANDS,
};
use crate::core::types::{BrandShare, ContributionDay, DailyPoint, ProductSummary, Task};
use crate::core::view::compare_f64;
use crate::utils::{Timezone, format_date};

/// Calendar day a task belongs to.
///
/// Plain dates are taken as written; timestamps are converted into `tz`.
pub(crate) fn task_day(task: &Task, tz: Timezone) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(task.date.trim(), DATE_FORMAT) {
        return Some(d);
    }
    task.date_instant().map(|utc| tz.local_date(utc))
}

#[derive(Debug, Default)]
struct ProductAccumulator {
    total_quantity: f64,
    total_value: f64,
    total_duration: f64,
    count: usize,
    last_date: String,
    last_key: f64,
}

impl ProductAccumulator {
    fn add(&mut self, task: &Task) {
        self.total_quantity += task.quantity;
        self.total_value += task.value;
        self.total_duration += task.duration;
        self.count += 1;

        let key = task
            .date_instant()
            .map_or(f64::NAN, |dt| dt.timestamp_millis() as f64);
        let newer = !key.is_nan() && (self.last_key.is_nan() || key > self.last_key);
        if self.count == 1 || newer {
            self.last_key = key;
            self.last_date = task.date.clone();
        }
    }
}

/// Group by (product, brand), most boxes first
pub(crate) fn product_summaries(tasks: &[Task]) -> Vec<ProductSummary> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: HashMap<(String, String), ProductAccumulator> = HashMap::new();

    for task in tasks {
        let key = (task.product.clone(), task.brand.clone());
        let acc = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            ProductAccumulator::default()
        });
        acc.add(task);
    }

    let total_tasks = tasks.len();
    let mut summaries: Vec<ProductSummary> = order
        .into_iter()
        .filter_map(|key| {
            let acc = groups.remove(&key)?;
            let (product, brand) = key;
            Some(ProductSummary {
                product,
                brand,
                total_quantity: acc.total_quantity,
                total_value: acc.total_value,
                completed_tasks: acc.count,
                percentage: acc.count as f64 / total_tasks as f64 * 100.0,
                last_restocked: acc.last_date,
                average_time: acc.total_duration / acc.count as f64,
            })
        })
        .collect();

    summaries.sort_by(|a, b| compare_f64(b.total_quantity, a.total_quantity));
    summaries
}

/// Task count and unit-price sum per brand, highest value first, top eight
pub(crate) fn brand_distribution(tasks: &[Task]) -> Vec<BrandShare> {
    let mut order: Vec<String> = Vec::new();
    let mut brands: HashMap<String, (usize, f64)> = HashMap::new();

    for task in tasks {
        let brand = if task.brand.trim().is_empty() {
            OTHER_BRAND.to_string()
        } else {
            task.brand.clone()
        };
        let entry = brands.entry(brand.clone()).or_insert_with(|| {
            order.push(brand);
            (0, 0.0)
        });
        entry.0 += 1;
        entry.1 += task.value;
    }

    let total = tasks.len();
    let mut shares: Vec<BrandShare> = order
        .into_iter()
        .filter_map(|brand| {
            let (count, value) = brands.remove(&brand)?;
            Some(BrandShare {
                brand,
                count,
                value,
                percentage: count as f64 / total as f64 * 100.0,
            })
        })
        .collect();

    shares.sort_by(|a, b| compare_f64(b.value, a.value));
    shares.truncate(TOP_BRANDS);
    shares
}

/// Days from `today - (days - 1)` through `today`, oldest first
fn day_range(today: NaiveDate, days: u32) -> impl Iterator<Item = NaiveDate> {
    let days = i64::from(days).clamp(1, MAX_WINDOW_DAYS);
    (0..days).filter_map(move |i| today.checked_sub_signed(Duration::days(days - 1 - i)))
}

fn bucket_by_day<'t>(tasks: &'t [Task], tz: Timezone) -> HashMap<NaiveDate, Vec<&'t Task>> {
    let mut buckets: HashMap<NaiveDate, Vec<&Task>> = HashMap::new();
    for task in tasks {
        if let Some(day) = task_day(task, tz) {
            buckets.entry(day).or_default().push(task);
        }
    }
    buckets
}

/// One point per day for the last `days` days ending today
pub(crate) fn daily_series(
    tasks: &[Task],
    now: DateTime<Utc>,
    tz: Timezone,
    days: u32,
) -> Vec<DailyPoint> {
    let buckets = bucket_by_day(tasks, tz);
    let today = tz.local_date(now);

    day_range(today, days)
        .map(|day| {
            let on_day = buckets.get(&day).map(Vec::as_slice).unwrap_or_default();
            let value: f64 = on_day.iter().map(|t| t.value).sum();
            DailyPoint {
                date: format_date(day),
                tasks: on_day.len(),
                value,
                stock_value: on_day.iter().map(|t| t.total_price()).sum(),
                weight: on_day.iter().map(|t| t.weight()).sum(),
                losses_prevented_value: value * LOSSES_PREVENTED_RATIO,
                protected_value: value * PROTECTED_STOCK_RATIO,
            }
        })
        .collect()
}

/// Heat level for a day with `count` tasks
pub(crate) fn contribution_level(count: usize) -> u8 {
    match count {
        0 => 0,
        1 => 1,
        2..=3 => 2,
        4..=5 => 3,
        _ => 4,
    }
}

/// Activity heatmap covering the last `days` days
pub(crate) fn contribution_heatmap(
    tasks: &[Task],
    now: DateTime<Utc>,
    tz: Timezone,
    days: u32,
) -> Vec<ContributionDay> {
    let buckets = bucket_by_day(tasks, tz);
    let today = tz.local_date(now);

    day_range(today, days)
        .map(|day| {
            let on_day = buckets.get(&day).map(Vec::as_slice).unwrap_or_default();
            ContributionDay {
                date: format_date(day),
                count: on_day.len(),
                value: on_day.iter().map(|t| t.value).sum(),
                level: contribution_level(on_day.len()),
            }
        })
        .collect()
}

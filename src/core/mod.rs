//! Core module - task model, statistics and dashboard views

mod aggregator;
pub(crate) mod stats;
mod types;
mod view;

pub(crate) use aggregator::{
    brand_distribution, contribution_heatmap, daily_series, product_summaries,
};
pub(crate) use stats::{derive_stats, total_stock_value, total_weight};
pub(crate) use types::{
    BrandShare, ContributionDay, DailyPoint, ExpiryStatus, NewTask, Page, ProductSummary,
    StatsReport, Task, TaskView,
};
pub(crate) use view::{ListQuery, SortField, TimeWindow, paginate, select_tasks};

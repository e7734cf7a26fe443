/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage key holding the JSON array of tasks
pub(crate) const TASKS_KEY: &str = "loja22_tasks";

/// Storage key holding the schema version of `TASKS_KEY`
pub(crate) const TASKS_SCHEMA_KEY: &str = "loja22_tasks_schema";

/// Storage key holding the theme preference
pub(crate) const THEME_KEY: &str = "loja22_theme";

/// Placeholder product for records that predate the product field
pub(crate) const DEFAULT_PRODUCT: &str = "Produto Geral";

/// Brands drawn from when a stored record has none
pub(crate) const DEFAULT_BRANDS: [&str; 6] = ["Unilever", "P&G", "Gtex", "Ypê", "Start", "Reckitt"];

/// Bucket label for tasks without a brand
pub(crate) const OTHER_BRAND: &str = "Outros";

/// Inclusive bounds (minutes) for a backfilled duration
pub(crate) const DEFAULT_DURATION_MIN: u32 = 15;
pub(crate) const DEFAULT_DURATION_MAX: u32 = 180;

/// Days added to the task date when a stored record has no expiry date
pub(crate) const DEFAULT_SHELF_LIFE_DAYS: i64 = 180;

/// Duration recorded for tasks added without one
pub(crate) const DEFAULT_TASK_DURATION: f64 = 45.0;

/// Heuristic share of total value counted as prevented losses
pub(crate) const LOSSES_PREVENTED_RATIO: f64 = 0.15;

/// Heuristic share of total value counted as protected stock
pub(crate) const PROTECTED_STOCK_RATIO: f64 = 0.92;

/// Loss rate shown with no tasks logged, and its upper bound (percent)
pub(crate) const LOSS_RATE_CEILING: f64 = 8.0;

/// Loss rate reduction per logged task (percent)
pub(crate) const LOSS_RATE_STEP: f64 = 0.1;

pub(crate) const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 7;
pub(crate) const DEFAULT_PAGE_SIZE: usize = 5;
pub(crate) const DEFAULT_SERIES_DAYS: u32 = 30;
/// Longest look-ahead or look-back window accepted, about a century
pub(crate) const MAX_WINDOW_DAYS: i64 = 36_500;
pub(crate) const HEATMAP_DAYS: u32 = 365;
pub(crate) const TOP_BRANDS: usize = 8;

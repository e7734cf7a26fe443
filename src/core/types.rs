//! Core data types
//!
//! `Task` is the persisted record; everything else here is derived on
//! demand and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::parse_instant;

/// One logged restocking event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Task {
    pub(crate) id: String,
    pub(crate) product: String,
    pub(crate) brand: String,
    /// Boxes restocked
    pub(crate) quantity: f64,
    /// Weight in kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) peso: Option<f64>,
    /// Unit price
    pub(crate) value: f64,
    pub(crate) date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) expiry_date: Option<String>,
    pub(crate) description: String,
    /// Minutes spent
    pub(crate) duration: f64,
    pub(crate) created_at: String,
}

impl Task {
    /// Unit price times boxes
    pub(crate) fn total_price(&self) -> f64 {
        self.value * self.quantity
    }

    /// Recorded weight, falling back to one kg per box
    pub(crate) fn weight(&self) -> f64 {
        self.peso.unwrap_or(self.quantity)
    }

    pub(crate) fn date_instant(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.date)
    }

    pub(crate) fn expiry_instant(&self) -> Option<DateTime<Utc>> {
        self.expiry_date.as_deref().and_then(parse_instant)
    }
}

/// A task as supplied by the caller; the store assigns `id` and `createdAt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewTask {
    pub(crate) product: String,
    pub(crate) brand: String,
    pub(crate) quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) peso: Option<f64>,
    pub(crate) value: f64,
    pub(crate) date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) expiry_date: Option<String>,
    pub(crate) description: String,
    pub(crate) duration: f64,
}

impl NewTask {
    pub(crate) fn into_task(self, id: String, created_at: String) -> Task {
        Task {
            id,
            product: self.product,
            brand: self.brand,
            quantity: self.quantity,
            peso: self.peso,
            value: self.value,
            date: self.date,
            expiry_date: self.expiry_date,
            description: self.description,
            duration: self.duration,
            created_at,
        }
    }
}

/// Where a task stands relative to its expiry date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Ok,
    /// No expiry date, or one that does not parse
    Unknown,
}

impl ExpiryStatus {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "expired",
            ExpiryStatus::ExpiringSoon => "expiring",
            ExpiryStatus::Ok => "ok",
            ExpiryStatus::Unknown => "-",
        }
    }
}

/// A task annotated with its expiry standing at a given moment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskView<'a> {
    #[serde(flatten)]
    pub(crate) task: &'a Task,
    pub(crate) days_until_expiry: Option<i64>,
    pub(crate) status: ExpiryStatus,
}

/// Aggregate figures over the whole task list
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Stats {
    pub(crate) total_tasks: usize,
    pub(crate) total_quantity: f64,
    pub(crate) total_value: f64,
    pub(crate) average_quantity: f64,
    pub(crate) average_value: f64,
    pub(crate) losses_prevented_value: f64,
    pub(crate) protected_stock_value: f64,
    pub(crate) loss_rate: f64,
}

/// `Stats` together with the stock totals shown beside them
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatsReport {
    #[serde(flatten)]
    pub(crate) stats: Stats,
    pub(crate) total_stock_value: f64,
    pub(crate) total_weight: f64,
    pub(crate) expired_count: usize,
    pub(crate) expiring_count: usize,
}

/// Per (product, brand) rollup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductSummary {
    pub(crate) product: String,
    pub(crate) brand: String,
    pub(crate) total_quantity: f64,
    pub(crate) total_value: f64,
    pub(crate) completed_tasks: usize,
    /// Share of all tasks, 0..=100
    pub(crate) percentage: f64,
    pub(crate) last_restocked: String,
    /// Mean duration in minutes
    pub(crate) average_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrandShare {
    pub(crate) brand: String,
    pub(crate) count: usize,
    pub(crate) value: f64,
    pub(crate) percentage: f64,
}

/// One calendar day of the chart series
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DailyPoint {
    pub(crate) date: String,
    pub(crate) tasks: usize,
    pub(crate) value: f64,
    pub(crate) stock_value: f64,
    pub(crate) weight: f64,
    pub(crate) losses_prevented_value: f64,
    pub(crate) protected_value: f64,
}

/// One cell of the yearly activity heatmap
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContributionDay {
    pub(crate) date: String,
    pub(crate) count: usize,
    pub(crate) value: f64,
    pub(crate) level: u8,
}

/// A slice of a sorted listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Page<T> {
    pub(crate) items: Vec<T>,
    /// 1-based
    pub(crate) page: usize,
    pub(crate) total_pages: usize,
    pub(crate) total_items: usize,
}

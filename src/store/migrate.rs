//! Versioned upgrade of stored task records
//!
//! Records are upgraded as raw JSON objects, one step per schema version,
//! and only then decoded into `Task`. Every step only fills fields that are
//! missing, so re-running an upgrade over already upgraded records is a
//! no-op.

use chrono::Duration;
use rand::Rng;
use serde_json::{Map, Value};

use crate::consts::{
    DEFAULT_BRANDS, DEFAULT_DURATION_MAX, DEFAULT_DURATION_MIN, DEFAULT_PRODUCT,
    DEFAULT_SHELF_LIFE_DAYS,
};
use crate::core::Task;
use crate::error::MigrateError;
use crate::utils::{format_date, parse_instant};

/// Schema version written alongside the task collection
pub(crate) const SCHEMA_VERSION: u32 = 2;

type Record = Map<String, Value>;

/// Absent, null, zero, false or the empty string
fn is_missing(record: &Record, field: &str) -> bool {
    match record.get(field) {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// v1: duration, product and brand became required; `weight` was dropped
fn step_v1<R: Rng + ?Sized>(record: &mut Record, rng: &mut R) {
    if is_missing(record, "duration") {
        let minutes = rng.random_range(DEFAULT_DURATION_MIN..=DEFAULT_DURATION_MAX);
        record.insert("duration".to_string(), Value::from(minutes));
    }
    if is_missing(record, "product") {
        record.insert("product".to_string(), Value::from(DEFAULT_PRODUCT));
    }
    if is_missing(record, "brand") {
        let brand = DEFAULT_BRANDS[rng.random_range(0..DEFAULT_BRANDS.len())];
        record.insert("brand".to_string(), Value::from(brand));
    }
    record.remove("weight");
}

/// v2: every task carries an expiry date, defaulting to shelf life after the task date
fn step_v2(record: &mut Record, index: usize) -> Result<(), MigrateError> {
    if !is_missing(record, "expiryDate") {
        return Ok(());
    }
    let date = record
        .get("date")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let Some(instant) = parse_instant(&date) else {
        return Err(MigrateError::InvalidDate { index, date });
    };
    let expiry = instant.date_naive() + Duration::days(DEFAULT_SHELF_LIFE_DAYS);
    record.insert("expiryDate".to_string(), Value::from(format_date(expiry)));
    Ok(())
}

/// Upgrade a stored collection written at schema version `from`
pub(crate) fn upgrade<R: Rng + ?Sized>(
    stored: Value,
    from: u32,
    rng: &mut R,
) -> Result<Vec<Task>, MigrateError> {
    let Value::Array(records) = stored else {
        return Err(MigrateError::NotAnArray);
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let Value::Object(mut record) = value else {
                return Err(MigrateError::NotAnObject { index });
            };
            if from < 1 {
                step_v1(&mut record, rng);
            }
            if from < 2 {
                step_v2(&mut record, index)?;
            }
            serde_json::from_value(Value::Object(record)).map_err(|e| MigrateError::Schema {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_BRANDS;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use serde_json::json;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    fn legacy_record() -> Value {
        json!({
            "id": "legacy-1",
            "product": "Conservas",
            "quantity": 12,
            "weight": 30,
            "value": 9.9,
            "date": "2024-02-01",
            "description": "old",
            "createdAt": "2024-02-01T08:00:00Z"
        })
    }

    #[test]
    fn fills_missing_duration_and_brand_and_strips_weight() {
        let tasks = upgrade(json!([legacy_record()]), 0, &mut rng()).unwrap();
        let t = &tasks[0];
        assert!((15.0..=180.0).contains(&t.duration));
        assert!(DEFAULT_BRANDS.contains(&t.brand.as_str()));
        assert_eq!(t.product, "Conservas");
        assert_eq!(t.expiry_date.as_deref(), Some("2024-07-30"));

        let reencoded = serde_json::to_value(t).unwrap();
        assert!(reencoded.get("weight").is_none());
    }

    #[test]
    fn falsy_values_count_as_missing() {
        let record = json!({
            "id": "x", "product": "", "brand": null, "quantity": 1, "value": 1,
            "date": "2024-01-01", "description": "", "duration": 0,
            "createdAt": "t", "expiryDate": ""
        });
        let t = &upgrade(json!([record]), 0, &mut rng()).unwrap()[0];
        assert_eq!(t.product, DEFAULT_PRODUCT);
        assert!(t.duration >= 15.0);
        assert!(!t.brand.is_empty());
        assert_eq!(t.expiry_date.as_deref(), Some("2024-06-29"));
    }

    #[test]
    fn upgrade_is_idempotent() {
        let first = upgrade(json!([legacy_record()]), 0, &mut rng()).unwrap();
        let stored = serde_json::to_value(&first).unwrap();
        let mut other_rng = Pcg32::seed_from_u64(999);
        let second = upgrade(stored, 0, &mut other_rng).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn same_seed_same_defaults() {
        let a = upgrade(json!([legacy_record()]), 0, &mut rng()).unwrap();
        let b = upgrade(json!([legacy_record()]), 0, &mut rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn current_version_skips_steps() {
        let record = json!({
            "id": "x", "product": "P", "brand": "B", "quantity": 1, "value": 1,
            "date": "2024-01-01", "description": "", "duration": 30, "createdAt": "t"
        });
        let t = &upgrade(json!([record]), SCHEMA_VERSION, &mut rng()).unwrap()[0];
        assert_eq!(t.expiry_date, None);
    }

    #[test]
    fn missing_required_field_at_current_version_is_schema_error() {
        let record = json!({ "id": "x", "date": "2024-01-01" });
        let err = upgrade(json!([record]), SCHEMA_VERSION, &mut rng()).unwrap_err();
        assert!(matches!(err, MigrateError::Schema { index: 0, .. }));
    }

    #[test]
    fn unparsable_date_without_expiry_fails() {
        let mut record = legacy_record();
        record["date"] = json!("ontem");
        let err = upgrade(json!([record]), 0, &mut rng()).unwrap_err();
        assert_eq!(
            err,
            MigrateError::InvalidDate {
                index: 0,
                date: "ontem".to_string()
            }
        );
    }

    #[test]
    fn rejects_non_array_and_non_object() {
        assert_eq!(
            upgrade(json!({"a": 1}), 0, &mut rng()).unwrap_err(),
            MigrateError::NotAnArray
        );
        assert_eq!(
            upgrade(json!([1]), 0, &mut rng()).unwrap_err(),
            MigrateError::NotAnObject { index: 0 }
        );
    }
}

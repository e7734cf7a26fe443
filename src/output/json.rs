use serde::Serialize;

use crate::error::AppError;

/// Pretty JSON for any report; field names follow the stored camelCase form
pub(crate) fn output_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("No task with id {id}")]
    TaskNotFound { id: String },

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("Failed to encode tasks: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("Failed to read {key}: {source}")]
    Read {
        key: String,
        source: std::io::Error,
    },

    #[error("Failed to write {key}: {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },

    #[error("Failed to create data directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

#[derive(Debug, Error, PartialEq)]
pub(crate) enum MigrateError {
    #[error("stored tasks are not valid JSON: {0}")]
    Malformed(String),

    #[error("stored tasks are not a JSON array")]
    NotAnArray,

    #[error("record {index} is not an object")]
    NotAnObject { index: usize },

    #[error("record {index} has unparsable date \"{date}\"")]
    InvalidDate { index: usize, date: String },

    #[error("record {index} does not match the task schema: {reason}")]
    Schema { index: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_date() {
        let e = AppError::InvalidDate {
            input: "abc".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Invalid date "abc" (expected YYYYMMDD or YYYY-MM-DD)"#
        );
    }

    #[test]
    fn app_error_display_timezone() {
        let e = AppError::InvalidTimezone {
            input: "Mars/Olympus".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn app_error_display_field() {
        let e = AppError::InvalidField {
            field: "quantity",
            reason: "must be greater than 0".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid quantity: must be greater than 0");
    }

    #[test]
    fn storage_error_read_names_key() {
        let e = StorageError::Read {
            key: "loja22_tasks".to_string(),
            source: std::io::Error::other("denied"),
        };
        assert_eq!(e.to_string(), "Failed to read loja22_tasks: denied");
    }

    #[test]
    fn app_error_from_storage_error() {
        let storage = StorageError::Write {
            key: "loja22_theme".to_string(),
            source: std::io::Error::other("disk full"),
        };
        let app: AppError = storage.into();
        assert_eq!(app.to_string(), "Failed to write loja22_theme: disk full");
    }

    #[test]
    fn migrate_error_display_date() {
        let e = MigrateError::InvalidDate {
            index: 2,
            date: "ontem".to_string(),
        };
        assert_eq!(e.to_string(), r#"record 2 has unparsable date "ontem""#);
    }
}

use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

/// Timezone used to decide which calendar day "today" and each task fall on
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn to_fixed_offset(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }

    /// Calendar date of `utc` in this timezone
    pub(crate) fn local_date(self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_fixed_offset(utc).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_none_returns_local() {
        assert!(matches!(Timezone::parse(None).unwrap(), Timezone::Local));
    }

    #[test]
    fn parse_local_string_any_case() {
        for raw in ["local", "LOCAL", "  Local  ", ""] {
            assert!(matches!(
                Timezone::parse(Some(raw)).unwrap(),
                Timezone::Local
            ));
        }
    }

    #[test]
    fn parse_utc_variants() {
        for raw in ["utc", "UTC", "z", "Z"] {
            assert!(matches!(
                Timezone::parse(Some(raw)).unwrap(),
                Timezone::Named(chrono_tz::UTC)
            ));
        }
    }

    #[test]
    fn parse_named_timezone() {
        let tz = Timezone::parse(Some("America/Sao_Paulo")).unwrap();
        assert!(matches!(tz, Timezone::Named(chrono_tz::America::Sao_Paulo)));
    }

    #[test]
    fn parse_invalid_timezone_returns_error() {
        let err = Timezone::parse(Some("Mars/Olympus")).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn local_date_crosses_midnight_backwards() {
        let utc = "2026-03-10T01:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let tz = Timezone::parse(Some("America/Sao_Paulo")).unwrap();
        // Sao Paulo is UTC-3, still the previous evening
        assert_eq!(
            tz.local_date(utc),
            NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
        );
    }

    #[test]
    fn local_date_utc_is_identity() {
        let utc = "2026-03-10T23:59:00Z".parse::<DateTime<Utc>>().unwrap();
        let tz = Timezone::Named(chrono_tz::UTC);
        assert_eq!(
            tz.local_date(utc),
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
        );
    }
}

//! Per-domain [`CollectionRecord`](crate::domain::record_list::CollectionRecord)
//! implementations and their draft (raw form input) types, plus the shared
//! string-to-type coercion helpers the drafts are parsed with.

pub mod breeding;
pub mod dry_off;
pub mod milk_sales;
pub mod pregnancies;
pub mod sheds;
pub mod vaccines;

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::domain::record_list::ValidationError;

pub(crate) fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::invalid(field, "expected a date in YYYY-MM-DD format"))
}

/// Empty input is a legitimate "not recorded" for optional date fields.
pub(crate) fn parse_optional_date(
    field: &'static str,
    value: &str,
) -> Result<Option<NaiveDate>, ValidationError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(field, value).map(Some)
    }
}

pub(crate) fn parse_number<N>(field: &'static str, value: &str) -> Result<N, ValidationError>
where
    N: FromStr,
    N::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ValidationError::invalid(field, format!("not a valid number ({})", e)))
}

pub(crate) fn parse_status<T>(field: &'static str, value: &str) -> Result<T, ValidationError>
where
    T: FromStr<Err = String>,
{
    value
        .trim()
        .parse()
        .map_err(|reason: String| ValidationError::InvalidField { field, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ShedStatus;

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(parse_date("date", "2025-03-01").is_ok());
        assert!(parse_date("date", "01/03/2025").is_err());
        assert!(parse_date("date", "").is_err());
    }

    #[test]
    fn test_parse_optional_date_treats_blank_as_none() {
        assert_eq!(parse_optional_date("date", "  ").unwrap(), None);
        assert!(parse_optional_date("date", "2025-03-01").unwrap().is_some());
        assert!(parse_optional_date("date", "soon").is_err());
    }

    #[test]
    fn test_parse_number_reports_field() {
        let err = parse_number::<u32>("capacity", "fifty").unwrap_err();
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn test_parse_status() {
        let status: ShedStatus = parse_status("status", " active ").unwrap();
        assert_eq!(status, ShedStatus::Active);
        assert!(parse_status::<ShedStatus>("status", "open").is_err());
    }
}

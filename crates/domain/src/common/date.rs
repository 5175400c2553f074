//! ISO calendar date helpers.
//!
//! Every date crossing the boundary is a bare `YYYY-MM-DD` calendar date
//! with no time of day and no timezone.

use chrono::NaiveDate;

use crate::DomainError;

const ISO_DATE: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` string.
///
/// # Examples
///
/// ```
/// use armory_domain::common::parse_iso_date;
/// use chrono::Datelike;
///
/// let d = parse_iso_date("2024-01-15").unwrap();
/// assert_eq!(d.year(), 2024);
/// ```
///
/// # Errors
///
/// Returns [`DomainError::Parse`] for anything that is not a valid
/// calendar date in that exact layout.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), ISO_DATE)
        .map_err(|e| DomainError::parse(format!("Invalid date '{}': {}", s, e)))
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Fails with a validation error when `later` precedes `earlier`.
pub fn require_not_before(
    later: NaiveDate,
    earlier: NaiveDate,
    later_field: &'static str,
    earlier_field: &'static str,
) -> Result<(), DomainError> {
    if later < earlier {
        return Err(DomainError::validation(format!(
            "{} ({}) cannot be before {} ({})",
            later_field,
            format_iso_date(later),
            earlier_field,
            format_iso_date(earlier)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date_valid() {
        let d = parse_iso_date("2024-03-01").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_iso_date_rejects_time_and_garbage() {
        assert!(parse_iso_date("2024-03-01T10:00:00Z").is_err());
        assert!(parse_iso_date("01/03/2024").is_err());
        assert!(parse_iso_date("2024-02-30").is_err());
        assert!(parse_iso_date("").is_err());
    }

    #[test]
    fn test_format_round_trips() {
        let d = NaiveDate::from_ymd_opt(2023, 1, 10).unwrap();
        assert_eq!(format_iso_date(d), "2023-01-10");
    }

    #[test]
    fn test_require_not_before() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert!(require_not_before(start, start, "end_date", "start_date").is_ok());
        let err = require_not_before(end, start, "end_date", "start_date").unwrap_err();
        assert!(err.to_string().contains("end_date (2023-12-31)"));
    }
}

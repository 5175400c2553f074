//! String normalisation utilities.

use crate::DomainError;

/// Trims surrounding whitespace, returning an owned string.
///
/// Free-text fields are stored trimmed; an absent value becomes empty.
///
/// # Examples
///
/// ```
/// use armory_domain::common::trimmed;
///
/// assert_eq!(trimmed(Some("  Austria ")), "Austria");
/// assert_eq!(trimmed(None), "");
/// ```
pub fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// Trims a required text field and rejects it if nothing is left.
pub fn required_text(value: &str, field_name: &'static str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(value.to_string())
}

//! Date path parameter handling.
//!
//! Stored dates are `YYYY-MM-DD` text and the store compares them as
//! strings, which only orders correctly for that exact format.

use chrono::NaiveDate;
use thiserror::Error;

/// Format of every date stored in and accepted by the service.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date path parameter that is not a canonical calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {param} '{value}': expected YYYY-MM-DD")]
pub struct InvalidDate {
    pub param: &'static str,
    pub value: String,
}

/// Parse a date only if it is written exactly as `YYYY-MM-DD`.
///
/// chrono accepts unpadded fields such as `2017-8-1`; those would compare
/// wrongly against stored text, so the round trip must be exact.
pub fn parse_canonical(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == value).then_some(date)
}

/// Accept a date path parameter.
///
/// In strict mode anything but a canonical date is rejected. Otherwise the
/// raw value is handed to the store untouched.
pub fn date_param(param: &'static str, value: String, strict: bool) -> Result<String, InvalidDate> {
    if strict && parse_canonical(&value).is_none() {
        return Err(InvalidDate { param, value });
    }
    Ok(value)
}

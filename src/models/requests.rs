//! Request parameter types
//!
//! Path segments are validated into these types before anything reaches the
//! stats source or the cache.

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, Result};

static INTERFACE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+[a-zA-Z0-9:._-]*$").expect("interface pattern"));

static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern"));

// == Interface ==
/// A network interface name safe to pass to the accounting tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interface(String);

impl Interface {
    /// Validates an interface name.
    ///
    /// Names start with an ASCII letter or digit and continue with letters,
    /// digits, `:`, `.`, `_` or `-`.
    pub fn parse(raw: &str) -> Result<Self> {
        if INTERFACE_NAME.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(AppError::InvalidInterface)
        }
    }

    /// The validated name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Report Date ==
/// A `YYYY-MM-DD` calendar date bounding a range report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportDate(NaiveDate);

impl ReportDate {
    /// Accepts only zero-padded `YYYY-MM-DD` strings naming a real date.
    pub fn parse(raw: &str) -> Result<Self> {
        if !DATE_SHAPE.is_match(raw) {
            return Err(AppError::InvalidDate);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| AppError::InvalidDate)
    }

    /// The calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

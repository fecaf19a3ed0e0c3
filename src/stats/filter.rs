//! Recency filtering of report rows.
//!
//! vnstat lists everything it has stored for a granularity; the short-period
//! views only keep rows from a trailing window ending at `now`.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::stats::DIVIDER;

static TIME_OF_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{2}):([0-9]{2})").expect("time pattern"));

static US_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{2})/([0-9]{2})/([0-9]{2})").expect("us date pattern"));

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4})-([0-9]{2})-([0-9]{2})").expect("iso date pattern"));

// == Recency Window ==
/// Trailing span a data row must fall within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecencyWindow {
    /// Rows stamped `HH:MM` within the last 60 minutes
    Minutes,
    /// Rows stamped `HH:MM` whose hour started within the last 12 hours
    Hours,
    /// Rows dated within the last 12 days, never in the future
    Days,
}

impl RecencyWindow {
    /// Length of the window.
    pub fn span(&self) -> Duration {
        match self {
            RecencyWindow::Minutes => Duration::minutes(60),
            RecencyWindow::Hours => Duration::hours(12),
            RecencyWindow::Days => Duration::days(12),
        }
    }

    /// Reconstructs the point in time a data line refers to.
    ///
    /// Time-of-day stamps are placed on `now`'s date and moved back a day when
    /// that would put them in the future.
    pub fn timestamp_of(&self, line: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            RecencyWindow::Minutes | RecencyWindow::Hours => {
                let caps = TIME_OF_DAY.captures(line)?;
                let hour: u32 = caps[1].parse().ok()?;
                let minute: u32 = match self {
                    RecencyWindow::Minutes => caps[2].parse().ok()?,
                    _ => 0,
                };
                let stamp = now.date().and_hms_opt(hour, minute, 0)?;
                if stamp > now {
                    Some(stamp - Duration::days(1))
                } else {
                    Some(stamp)
                }
            }
            RecencyWindow::Days => {
                let date = if let Some(caps) = US_DATE.captures(line) {
                    let month: u32 = caps[1].parse().ok()?;
                    let day: u32 = caps[2].parse().ok()?;
                    let year: i32 = caps[3].parse().ok()?;
                    NaiveDate::from_ymd_opt(2000 + year, month, day)?
                } else {
                    let caps = ISO_DATE.captures(line)?;
                    NaiveDate::from_ymd_opt(
                        caps[1].parse().ok()?,
                        caps[2].parse().ok()?,
                        caps[3].parse().ok()?,
                    )?
                };
                date.and_hms_opt(0, 0, 0)
            }
        }
    }

    /// Whether a data line falls inside the window ending at `now`.
    ///
    /// Lines without a parseable stamp are not recent.
    pub fn is_recent(&self, line: &str, now: NaiveDateTime) -> bool {
        let Some(stamp) = self.timestamp_of(line, now) else {
            return false;
        };
        let age = now - stamp;
        match self {
            RecencyWindow::Days => age >= Duration::zero() && age <= self.span(),
            _ => age <= self.span(),
        }
    }
}

// == Filter ==
/// Drops data rows outside `window`.
///
/// Everything up to and including the first divider line is header and kept,
/// as are blank lines anywhere.
pub fn filter_recent<S: AsRef<str>>(
    lines: &[S],
    window: RecencyWindow,
    now: NaiveDateTime,
) -> Vec<String> {
    let mut in_header = true;
    let mut kept = Vec::with_capacity(lines.len());

    for line in lines {
        let line = line.as_ref();
        let keep = if in_header {
            if line.contains(DIVIDER) {
                in_header = false;
            }
            true
        } else {
            line.trim().is_empty() || window.is_recent(line, now)
        };

        if keep {
            kept.push(line.to_string());
        }
    }

    kept
}

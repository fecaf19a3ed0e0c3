//! Stats Pipeline
//!
//! Turns raw vnstat output into display-ready lines:
//! translate, filter by recency, then per line suppress estimates, normalize
//! the header, delimit columns and rescale volumes.

use chrono::{Local, NaiveDateTime};

use crate::stats::filter::filter_recent;
use crate::stats::format::{delimit_columns, is_header, normalize_header};
use crate::stats::period::Period;
use crate::stats::translate::translate;
use crate::stats::units::{normalize_line, Unit};
use crate::stats::{DIVIDER, ESTIMATE_MARKER};

// == Processing ==
/// Processes a period report against the local wall clock.
pub fn process(raw: &str, period: Period) -> Vec<String> {
    process_at(raw, period, Local::now().naive_local())
}

/// Processes a period report with an explicit `now` for the recency filter.
pub fn process_at(raw: &str, period: Period, now: NaiveDateTime) -> Vec<String> {
    let translated = translate(raw);
    let lines: Vec<&str> = translated.split('\n').collect();

    let lines = match period.recency_window() {
        Some(window) => filter_recent(&lines, window, now),
        None => lines.into_iter().map(str::to_string).collect(),
    };

    let header_unit = period.target_unit().unwrap_or(Unit::MiB);

    lines
        .into_iter()
        .filter_map(|line| format_line(line, period, header_unit))
        .collect()
}

// == Range Reports ==
/// Date-ranged daily reports are only translated.
pub fn process_range(raw: &str) -> Vec<String> {
    translate(raw).split('\n').map(str::to_string).collect()
}

// == Line Formatting ==
/// Formats one surviving line, or drops it when it is a suppressed estimate.
fn format_line(line: String, period: Period, header_unit: Unit) -> Option<String> {
    if line.contains(DIVIDER) || line.trim().is_empty() {
        return Some(line);
    }

    if period.drops_estimates() && line.contains(ESTIMATE_MARKER) {
        return None;
    }

    if is_header(&line) {
        return Some(normalize_header(&line, header_unit));
    }

    let line = delimit_columns(&line);
    match period.target_unit() {
        Some(unit) => Some(normalize_line(&line, unit)),
        None => Some(line),
    }
}

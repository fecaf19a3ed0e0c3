//! Reporting periods and their per-period settings.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;


use crate::error::AppError;
use crate::stats::filter::RecencyWindow;
use crate::stats::units::Unit;

// == Period ==
/// Reporting granularity selected by a one-character period code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// `l`: live traffic rate sample
    Live,
    /// `5`: five-minute buckets
    FiveMinute,
    /// `h`: hourly buckets
    Hourly,
    /// `d`: daily buckets
    Daily,
    /// `m`: monthly buckets
    Monthly,
    /// `y`: yearly buckets
    Yearly,
}

impl Period {
    /// Every period, in code order `l 5 h d m y`.
    pub const ALL: [Period; 6] = [
        Period::Live,
        Period::FiveMinute,
        Period::Hourly,
        Period::Daily,
        Period::Monthly,
        Period::Yearly,
    ];

    // == Codes ==
    /// Parses a period code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "l" => Some(Period::Live),
            "5" => Some(Period::FiveMinute),
            "h" => Some(Period::Hourly),
            "d" => Some(Period::Daily),
            "m" => Some(Period::Monthly),
            "y" => Some(Period::Yearly),
            _ => None,
        }
    }

    /// The period code as used in URLs and cache keys.
    pub fn code(&self) -> &'static str {
        match self {
            Period::Live => "l",
            Period::FiveMinute => "5",
            Period::Hourly => "h",
            Period::Daily => "d",
            Period::Monthly => "m",
            Period::Yearly => "y",
        }
    }

    // == Per-Period Settings ==
    /// vnstat flag selecting this period's report.
    pub fn vnstat_flag(&self) -> &'static str {
        match self {
            Period::Live => "-tr",
            Period::FiveMinute => "-5",
            Period::Hourly => "-h",
            Period::Daily => "-d",
            Period::Monthly => "-m",
            Period::Yearly => "-y",
        }
    }

    /// Unit every volume column is rescaled to. Live samples are not rescaled.
    pub fn target_unit(&self) -> Option<Unit> {
        match self {
            Period::Live => None,
            Period::FiveMinute | Period::Hourly => Some(Unit::MiB),
            Period::Daily | Period::Monthly => Some(Unit::GiB),
            Period::Yearly => Some(Unit::TiB),
        }
    }

    /// Window rows must fall within, for periods that are filtered by recency.
    pub fn recency_window(&self) -> Option<RecencyWindow> {
        match self {
            Period::FiveMinute => Some(RecencyWindow::Minutes),
            Period::Hourly => Some(RecencyWindow::Hours),
            Period::Daily => Some(RecencyWindow::Days),
            Period::Live | Period::Monthly | Period::Yearly => None,
        }
    }

    /// Whether projected ("estimated") rows are dropped from the output.
    pub fn drops_estimates(&self) -> bool {
        matches!(self, Period::Monthly | Period::Yearly)
    }

    /// How long a processed report stays cached. Live samples are never cached.
    pub fn cache_ttl(&self) -> Option<Duration> {
        match self {
            Period::Live => None,
            Period::FiveMinute => Some(Duration::from_secs(30)),
            Period::Hourly => Some(Duration::from_secs(60)),
            Period::Daily => Some(Duration::from_secs(2 * 60)),
            Period::Monthly => Some(Duration::from_secs(5 * 60)),
            Period::Yearly => Some(Duration::from_secs(10 * 60)),
        }
    }
}

impl FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::from_code(s).ok_or(AppError::InvalidPeriod)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

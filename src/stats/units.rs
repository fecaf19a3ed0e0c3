//! Volume unit normalization.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::stats::COLUMN_DELIMITER;

// == Patterns ==
static VOLUME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9.]+)\s*(KiB|MiB|GiB|TiB)?").expect("volume pattern")
});

/// Columns of a data row that carry volumes: received, transmitted, total.
const VOLUME_COLUMNS: std::ops::RangeInclusive<usize> = 1..=3;

/// Minimum number of `|`-separated segments for a line to count as a data row.
pub const MIN_DATA_SEGMENTS: usize = 5;

// == Unit ==
/// Binary byte multiples vnstat reports volumes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    KiB,
    MiB,
    GiB,
    TiB,
}

impl Unit {
    /// Suffix as vnstat prints it, e.g. `GiB`.
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::KiB => "KiB",
            Unit::MiB => "MiB",
            Unit::GiB => "GiB",
            Unit::TiB => "TiB",
        }
    }

    /// Size of one of this unit in MiB.
    pub fn in_mib(&self) -> f64 {
        match self {
            Unit::KiB => 1.0 / 1024.0,
            Unit::MiB => 1.0,
            Unit::GiB => 1024.0,
            Unit::TiB => 1024.0 * 1024.0,
        }
    }

    /// Case-insensitive suffix lookup.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        [Unit::KiB, Unit::MiB, Unit::GiB, Unit::TiB]
            .into_iter()
            .find(|unit| unit.suffix().eq_ignore_ascii_case(suffix))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

// == Volume ==
/// A traffic volume, held in MiB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    mib: f64,
}

impl Volume {
    /// Creates a volume of `value` in `unit`.
    pub fn new(value: f64, unit: Unit) -> Self {
        Self {
            mib: value * unit.in_mib(),
        }
    }

    /// Parses the first `number [unit]` found in `raw`; a missing unit means MiB.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = VOLUME.captures(raw)?;
        let value: f64 = caps[1].parse().ok()?;
        let unit = caps
            .get(2)
            .and_then(|m| Unit::from_suffix(m.as_str()))
            .unwrap_or(Unit::MiB);
        Some(Self::new(value, unit))
    }

    /// Value expressed in `unit`, unrounded.
    pub fn value_in(&self, unit: Unit) -> f64 {
        self.mib / unit.in_mib()
    }

    /// Renders with two decimals and the unit suffix, e.g. `2.00 GiB`.
    pub fn format_in(&self, unit: Unit) -> String {
        format!("{:.2} {}", self.value_in(unit), unit)
    }
}

// == Normalization ==
/// Rescales one volume cell to `target`; cells that do not parse are returned as-is.
pub fn normalize_value(raw: &str, target: Unit) -> String {
    match Volume::parse(raw) {
        Some(volume) => volume.format_in(target),
        None => raw.to_string(),
    }
}

/// Rescales the received, transmitted and total columns of a delimited data row.
///
/// Lines with fewer than [`MIN_DATA_SEGMENTS`] segments are not data rows and
/// pass through unchanged.
pub fn normalize_line(line: &str, target: Unit) -> String {
    let mut parts: Vec<String> = line.split(COLUMN_DELIMITER).map(str::to_string).collect();
    if parts.len() < MIN_DATA_SEGMENTS {
        return line.to_string();
    }

    for idx in VOLUME_COLUMNS {
        parts[idx] = format!(" {}", normalize_value(parts[idx].trim(), target));
    }

    parts.join(COLUMN_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mib_to_gib() {
        assert_eq!(normalize_value("2048.00 MiB", Unit::GiB), "2.00 GiB");
    }

    #[test]
    fn test_mib_to_mib_keeps_value() {
        assert_eq!(normalize_value("2048.00 MiB", Unit::MiB), "2048.00 MiB");
    }

    #[test]
    fn test_larger_units_scale_down_to_mib() {
        assert_eq!(normalize_value("1.50 GiB", Unit::MiB), "1536.00 MiB");
        assert_eq!(normalize_value("1.00 TiB", Unit::GiB), "1024.00 GiB");
        assert_eq!(normalize_value("3.00 TiB", Unit::TiB), "3.00 TiB");
    }

    #[test]
    fn test_missing_unit_defaults_to_mib() {
        assert_eq!(normalize_value("512", Unit::GiB), "0.50 GiB");
    }

    #[test]
    fn test_kib_is_recognized() {
        assert_eq!(normalize_value("512.00 KiB", Unit::MiB), "0.50 MiB");
        assert_eq!(normalize_value("2048 kib", Unit::MiB), "2.00 MiB");
        assert_eq!(Volume::new(1.0, Unit::KiB).value_in(Unit::MiB), 1.0 / 1024.0);
    }

    #[test]
    fn test_unit_suffix_is_case_insensitive() {
        assert_eq!(normalize_value("1 gib", Unit::MiB), "1024.00 MiB");
    }

    #[test]
    fn test_unparseable_cell_is_untouched() {
        assert_eq!(normalize_value("--", Unit::GiB), "--");
        assert_eq!(normalize_value(".", Unit::GiB), ".");
    }

    #[test]
    fn test_normalize_line() {
        let line = "     2026-10-15 |     2.00 GiB |  512.00 MiB |    2.50 GiB |  297.27 kb/秒";
        assert_eq!(
            normalize_line(line, Unit::GiB),
            "     2026-10-15 | 2.00 GiB| 0.50 GiB| 2.50 GiB|  297.27 kb/秒"
        );
    }

    #[test]
    fn test_short_lines_pass_through() {
        let line = "  接收 | 发送 | 总计";
        assert_eq!(normalize_line(line, Unit::GiB), line);
    }

    #[test]
    fn test_empty_cells_collapse_to_single_space() {
        let line = " 2026 |  | 1.00 TiB | 1.00 TiB |";
        assert_eq!(normalize_line(line, Unit::TiB), " 2026 | | 1.00 TiB| 1.00 TiB|");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn unit() -> impl Strategy<Value = Unit> {
            prop::sample::select(vec![Unit::KiB, Unit::MiB, Unit::GiB, Unit::TiB])
        }

        fn target() -> impl Strategy<Value = Unit> {
            prop::sample::select(vec![Unit::MiB, Unit::GiB, Unit::TiB])
        }

        proptest! {
            // Output is `N.NN UNIT` in the target unit and within rounding of the true value
            #[test]
            fn prop_normalized_value_is_rounded_conversion(
                value in 0.0f64..1_000_000.0,
                from in unit(),
                to in target()
            ) {
                let out = normalize_value(&format!("{} {}", value, from), to);

                let (number, suffix) = out.split_once(' ').expect("number and unit");
                prop_assert_eq!(suffix, to.suffix());
                prop_assert_eq!(number.split_once('.').map(|(_, frac)| frac.len()), Some(2));

                let expected = value * from.in_mib() / to.in_mib();
                let parsed: f64 = number.parse().unwrap();
                prop_assert!((parsed - expected).abs() <= 0.005 + expected * 1e-12);
            }
        }
    }
}

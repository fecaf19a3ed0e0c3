//! Output formatting: the fixed five-column header and column delimiting of
//! data rows.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::stats::units::Unit;
use crate::stats::COLUMN_DELIMITER;

/// Translated "received" column label; its presence marks a header line.
pub const RECEIVED_LABEL: &str = "接收";

/// Translated temporal column labels, in the order they are checked.
pub const TEMPORAL_LABELS: [&str; 5] = ["时间", "小时", "日期", "月份", "年份"];

// == Leading Labels ==
/// Leading label shapes of a data row, in match order: `HH` or `HH:MM`,
/// `YYYY-MM-DD`, `YYYY-MM`, then `YYYY`.
static LABEL_SHAPES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^(\s*[0-9]{2}(?::[0-9]{2})?)(\s+)",
        r"^(\s*[0-9]{4}-[0-9]{2}-[0-9]{2})(\s+)",
        r"^(\s*[0-9]{4}-[0-9]{2})(\s+)",
        r"^(\s*[0-9]{4})(\s+)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("label pattern"))
    .collect()
});

/// A recognized leading label and where it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadingLabel {
    /// Byte offset just past the label token (leading indentation included)
    pub token_end: usize,
    /// Byte offset just past the whitespace following the token
    pub gap_end: usize,
}

/// Identifies the leading label of a row, if it has one of the known shapes
/// followed by whitespace.
pub fn leading_label(line: &str) -> Option<LeadingLabel> {
    LABEL_SHAPES.iter().find_map(|re| {
        let caps = re.captures(line)?;
        Some(LeadingLabel {
            token_end: caps.get(1)?.end(),
            gap_end: caps.get(2)?.end(),
        })
    })
}

// == Column Delimiting ==
/// Inserts ` |` right after a recognized leading label.
///
/// Rows whose label is already followed by the delimiter are returned unchanged.
pub fn delimit_columns(line: &str) -> String {
    let Some(label) = leading_label(line) else {
        return line.to_string();
    };

    if line[label.gap_end..].starts_with(COLUMN_DELIMITER) {
        return line.to_string();
    }

    format!(
        "{} {}{}",
        &line[..label.token_end],
        COLUMN_DELIMITER,
        &line[label.token_end..]
    )
}

// == Header Normalization ==
/// Whether a translated line is a column header.
pub fn is_header(line: &str) -> bool {
    line.contains(RECEIVED_LABEL) && TEMPORAL_LABELS.iter().any(|label| line.contains(label))
}

/// Builds the fixed five-column header for a temporal label and unit.
pub fn standard_header(temporal_label: &str, unit: Unit) -> String {
    format!(
        "{label}\t| 接收({unit})\t| 发送({unit})\t| 总计({unit})\t| 平均速率",
        label = temporal_label,
        unit = unit
    )
}

/// Replaces a header line with the standard header; other lines are returned as-is.
pub fn normalize_header(line: &str, unit: Unit) -> String {
    if !line.contains(RECEIVED_LABEL) {
        return line.to_string();
    }
    match TEMPORAL_LABELS.iter().find(|label| line.contains(*label)) {
        Some(label) => standard_header(label, unit),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_label_shapes() {
        fn label(line: &str) -> Option<&str> {
            leading_label(line).map(|l| &line[..l.token_end])
        }

        assert_eq!(label("    10:05     1.00 MiB"), Some("    10:05"));
        assert_eq!(label("    10     1.00 MiB"), Some("    10"));
        assert_eq!(label("  2026-10-15   1.00 GiB"), Some("  2026-10-15"));
        assert_eq!(label("  2026-10   1.00 GiB"), Some("  2026-10"));
        assert_eq!(label("  2026   1.00 TiB"), Some("  2026"));
        assert_eq!(label("  预计   1.00 TiB"), None);
        assert_eq!(label("2026-10-15"), None, "label without following whitespace");
    }

    #[test]
    fn test_leading_label_gap_end() {
        let line = "  2026-10   1.00 GiB";
        let label = leading_label(line).unwrap();
        assert_eq!(&line[label.token_end..label.gap_end], "   ");
        assert_eq!(&line[label.gap_end..], "1.00 GiB");
    }

    #[test]
    fn test_delimit_time_row() {
        assert_eq!(
            delimit_columns("    10:05     1.23 MiB |  0.50 MiB"),
            "    10:05 |     1.23 MiB |  0.50 MiB"
        );
    }

    #[test]
    fn test_delimit_date_month_year_rows() {
        assert_eq!(
            delimit_columns("  2026-10-15   1.00 GiB |"),
            "  2026-10-15 |   1.00 GiB |"
        );
        assert_eq!(delimit_columns("  2026-10   1.00 GiB |"), "  2026-10 |   1.00 GiB |");
        assert_eq!(delimit_columns("  2026   1.00 TiB |"), "  2026 |   1.00 TiB |");
    }

    #[test]
    fn test_delimit_skips_already_delimited_rows() {
        let line = "  2026-10-15 | 1.00 GiB";
        assert_eq!(delimit_columns(line), line);
    }

    #[test]
    fn test_delimit_leaves_other_lines() {
        assert_eq!(delimit_columns(" eth0  /  每日"), " eth0  /  每日");
        assert_eq!(delimit_columns("  预计   1.00 GiB"), "  预计   1.00 GiB");
    }

    #[test]
    fn test_is_header() {
        assert!(is_header("   日期   接收 | 发送 | 总计 | 平均速率"));
        assert!(is_header("   月份   接收 |"));
        assert!(!is_header("   接收   1.23 kb/秒"));
        assert!(!is_header("   日期"));
    }

    #[test]
    fn test_standard_header() {
        assert_eq!(
            normalize_header("日期 | 接收 | 发送 | 总计 | 平均速率", Unit::GiB),
            "日期\t| 接收(GiB)\t| 发送(GiB)\t| 总计(GiB)\t| 平均速率"
        );
        assert_eq!(
            normalize_header("   时间   接收 |", Unit::MiB),
            "时间\t| 接收(MiB)\t| 发送(MiB)\t| 总计(MiB)\t| 平均速率"
        );
    }

    #[test]
    fn test_header_label_precedence() {
        // 时间 is checked before 年份
        assert_eq!(
            normalize_header("年份 时间 接收", Unit::TiB),
            standard_header("时间", Unit::TiB)
        );
    }
}

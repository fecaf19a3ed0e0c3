//! Translation of vnstat output into Simplified Chinese.
//!
//! Three line shapes get fixed-shape rewrites that keep their captured values.
//! Every other line runs through [`TRANSLATIONS`] in declaration order. Each
//! rule replaces whole-word, ASCII case-insensitive occurrences of its phrase,
//! and later rules see the output of earlier ones.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Source phrase -> display phrase, applied top to bottom.
pub const TRANSLATIONS: &[(&str, &str)] = &[
    ("month", "月份"),
    ("day", "日期"),
    ("hour", "小时"),
    ("rx", "接收"),
    ("tx", "发送"),
    ("total", "总计"),
    ("avg. rate", "平均速率"),
    ("estimated", "预计"),
    ("daily", "每日"),
    ("monthly", "每月"),
    ("hourly", "每小时"),
    ("yearly", "每年"),
    ("year", "年份"),
    ("time", "时间"),
    ("Available interfaces", "可用接口"),
    ("received", "接收"),
    ("transmitted", "发送"),
    ("Sampling", "正在采样"),
    ("seconds average", "秒平均值"),
    ("packets sampled in", "个数据包采样于"),
    ("seconds", "秒"),
    ("Traffic average for", "流量平均值 -"),
    ("current rate", "当前速率"),
    ("bytes", "字节"),
    ("packets", "数据包"),
    ("packets/s", "包/秒"),
    ("bits/s", "b/秒"),
    ("kbit/s", "kb/秒"),
    ("Mbit/s", "Mb/秒"),
    ("Gbit/s", "Gb/秒"),
    ("KiB/s", "KB/秒"),
    ("MiB/s", "MB/秒"),
    ("GiB/s", "GB/秒"),
    ("yesterday", "昨天"),
    ("today", "今天"),
    ("last 5 minutes", "最近5分钟"),
    ("last hour", "最近1小时"),
    ("last day", "最近24小时"),
    ("last month", "最近30天"),
];

static SAMPLING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Sampling ([^ ]+) \((\d+) seconds average\)").expect("sampling pattern")
});

// == Fixed-Shape Lines ==
static PACKETS_SAMPLED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+) packets sampled in (\d+) seconds").expect("packets pattern")
});

static TRAFFIC_AVERAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Traffic average for (.+)").expect("traffic average pattern"));

static TRANSLATOR: Lazy<Translator> = Lazy::new(|| Translator::new(TRANSLATIONS));

// == Word Matcher ==
/// Finds whole-word, ASCII case-insensitive occurrences of a phrase.
///
/// A word character is an ASCII letter, digit or `_`; every other byte,
/// including all non-ASCII text, counts as a word break.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    needle: Vec<u8>,
}

impl WordMatcher {
    /// Creates a matcher for `phrase`, compared case-insensitively.
    pub fn new(phrase: &str) -> Self {
        Self {
            needle: phrase.to_ascii_lowercase().into_bytes(),
        }
    }

    /// Replaces every non-overlapping match, scanning left to right.
    pub fn replace_all<'a>(&self, haystack: &'a str, replacement: &str) -> Cow<'a, str> {
        let bytes = haystack.as_bytes();
        let n = self.needle.len();
        if n == 0 || bytes.len() < n {
            return Cow::Borrowed(haystack);
        }

        let mut out = String::new();
        let mut copied = 0;
        let mut pos = 0;

        while pos + n <= bytes.len() {
            if self.matches_at(bytes, pos) {
                out.push_str(&haystack[copied..pos]);
                out.push_str(replacement);
                pos += n;
                copied = pos;
            } else {
                pos += 1;
            }
        }

        if copied == 0 {
            return Cow::Borrowed(haystack);
        }
        out.push_str(&haystack[copied..]);
        Cow::Owned(out)
    }

    fn matches_at(&self, bytes: &[u8], pos: usize) -> bool {
        let n = self.needle.len();
        let window = &bytes[pos..pos + n];
        if !window.eq_ignore_ascii_case(&self.needle) {
            return false;
        }

        let before = pos.checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(pos + n).copied();
        is_boundary(before, self.needle[0]) && is_boundary(after, self.needle[n - 1])
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// A word boundary sits between `edge` (inside the match) and `outside`.
fn is_boundary(outside: Option<u8>, edge: u8) -> bool {
    let outside_is_word = outside.map(is_word_byte).unwrap_or(false);
    outside_is_word != is_word_byte(edge)
}

// == Translator ==
/// Ordered phrase replacement rules.
#[derive(Debug, Clone)]
pub struct Translator {
    rules: Vec<(WordMatcher, &'static str)>,
}

impl Translator {
    /// Builds a translator whose rules apply in `table` order.
    pub fn new(table: &[(&str, &'static str)]) -> Self {
        Self {
            rules: table
                .iter()
                .map(|(source, target)| (WordMatcher::new(source), *target))
                .collect(),
        }
    }

    /// Translates one line.
    pub fn translate_line(&self, line: &str) -> String {
        if line.contains("Sampling") {
            let sampled = SAMPLING.replace(line, "正在采样 ${1} (${2}秒平均值)");
            return PACKETS_SAMPLED
                .replace(&sampled, "${1} 个数据包采样于 ${2} 秒")
                .into_owned();
        }

        if PACKETS_SAMPLED.is_match(line) {
            return PACKETS_SAMPLED
                .replace(line, "${1} 个数据包采样于 ${2} 秒")
                .into_owned();
        }

        if line.contains("Traffic average for") {
            return TRAFFIC_AVERAGE.replace(line, "流量平均值 - ${1}").into_owned();
        }

        self.rules
            .iter()
            .fold(line.to_string(), |acc, (matcher, target)| {
                match matcher.replace_all(&acc, target) {
                    Cow::Borrowed(_) => acc,
                    Cow::Owned(replaced) => replaced,
                }
            })
    }

    /// Translates multi-line text, keeping line breaks in place.
    pub fn translate(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| self.translate_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// == Built-in Table ==
/// Translates multi-line vnstat output with the built-in table.
pub fn translate(text: &str) -> String {
    TRANSLATOR.translate(text)
}

/// Translates a single line with the built-in table.
pub fn translate_line(line: &str) -> String {
    TRANSLATOR.translate_line(line)
}

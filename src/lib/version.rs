//! Multi-part version ordering for tool version banners.
//!
//! Versions are split into runs of digits and runs of other characters.
//! Numeric runs compare numerically, text runs lexically, and a numeric run
//! sorts before a text run. A version that is a prefix of another sorts first.
use std::{cmp::Ordering, fmt};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    Number(u64),
    Text(String),
}

/// Parsed version string.
#[derive(Debug, Clone)]
pub struct CliVersion {
    raw: String,
    segments: Vec<Segment>,
}

impl CliVersion {
    /// Parse a version such as `2.15.30` or `v2.1.0rc1`.
    ///
    /// Returns `None` for empty input or input that does not start with a digit.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let body = trimmed.strip_prefix('v').unwrap_or(trimmed);
        if !body.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut numeric = true;
        for ch in body.chars() {
            if matches!(ch, '.' | '-' | '+' | '_') {
                push_segment(&mut segments, &mut current, numeric);
                continue;
            }
            let is_digit = ch.is_ascii_digit();
            if !current.is_empty() && is_digit != numeric {
                push_segment(&mut segments, &mut current, numeric);
            }
            numeric = is_digit;
            current.push(ch);
        }
        push_segment(&mut segments, &mut current, numeric);

        Some(Self {
            raw: body.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True when `self` is at least `minimum`.
    pub fn satisfies(&self, minimum: &CliVersion) -> bool {
        self >= minimum
    }
}

fn push_segment(segments: &mut Vec<Segment>, current: &mut String, numeric: bool) {
    if current.is_empty() {
        return;
    }
    let text = std::mem::take(current);
    let segment = if numeric {
        text.parse::<u64>()
            .map(Segment::Number)
            .unwrap_or(Segment::Text(text))
    } else {
        Segment::Text(text)
    };
    segments.push(segment);
}

impl PartialEq for CliVersion {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for CliVersion {}

impl PartialOrd for CliVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CliVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments.cmp(&other.segments)
    }
}

impl fmt::Display for CliVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

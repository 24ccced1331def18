//! Flat-file text format for semester collections.
//!
//! ```text
//! Fall Semester
//! Math: 95/100
//! History: 40/50
//!
//! Spring Semester
//! ...
//! ```
//!
//! Each semester block is its header line, one `Name: earned/total` line per
//! class and a blank separator line. How a header line is recognised depends
//! on the [`HeaderStyle`].

use crate::domain::Semester;
use serde::{Deserialize, Serialize};

/// Token that marks a semester header in the substring style
pub const SEMESTER_MARKER: &str = "Semester";

/// Prefix of a semester header in the tagged style
pub const TAGGED_PREFIX: &str = "SEMESTER:";

/// How semester header lines are written and recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    /// The header is the bare semester name; any line containing
    /// `Semester` is read back as a header.
    #[default]
    Substring,

    /// The header is `SEMESTER:<name>`; only lines with that prefix are headers.
    Tagged,
}

impl HeaderStyle {
    fn header_line(&self, name: &str) -> String {
        match self {
            HeaderStyle::Substring => name.to_string(),
            HeaderStyle::Tagged => format!("{TAGGED_PREFIX}{name}"),
        }
    }

    /// The semester name if `line` is a header in this style
    fn parse_header<'a>(&self, line: &'a str) -> Option<&'a str> {
        match self {
            HeaderStyle::Substring => line.contains(SEMESTER_MARKER).then_some(line),
            HeaderStyle::Tagged => line.strip_prefix(TAGGED_PREFIX),
        }
    }

    /// Whether a semester called `name` is read back as the same header
    pub fn header_round_trips(&self, name: &str) -> bool {
        let line = self.header_line(name);
        self.parse_header(line.trim()) == Some(name)
    }

    /// Whether a class called `name` would be mistaken for a header on reload
    pub fn class_collides(&self, name: &str) -> bool {
        let line = format!("{name}: 0/0");
        self.parse_header(line.trim()).is_some()
    }

    /// Whether a class called `name` is read back as the same class line.
    ///
    /// Fails for names taken as headers, names containing `": "` and names
    /// with surrounding whitespace.
    pub fn class_round_trips(&self, name: &str) -> bool {
        if self.class_collides(name) {
            return false;
        }
        let line = format!("{name}: 0/0");
        matches!(parse_class_line(line.trim()), Ok((parsed, 0, 0)) if parsed == name)
    }
}

impl std::fmt::Display for HeaderStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderStyle::Substring => write!(f, "substring"),
            HeaderStyle::Tagged => write!(f, "tagged"),
        }
    }
}

impl std::str::FromStr for HeaderStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "substring" => Ok(HeaderStyle::Substring),
            "tagged" => Ok(HeaderStyle::Tagged),
            other => Err(format!("unknown header style: '{other}'")),
        }
    }
}

/// A line that could not be parsed during decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source text
    pub line_number: usize,
    pub text: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Not of the form `Name: earned/total`
    Malformed,
    /// `earned` or `total` is not an integer
    InvalidNumber,
    /// A class line with no semester header before it
    NoSemester,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Malformed => write!(f, "expected 'Name: earned/total'"),
            SkipReason::InvalidNumber => write!(f, "earned/total must be an integer"),
            SkipReason::NoSemester => write!(f, "class line before any semester header"),
        }
    }
}

impl std::fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {} ({})", self.line_number, self.text, self.reason)
    }
}

/// Result of decoding a whole file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub semesters: Vec<Semester>,
    pub skipped: Vec<SkippedLine>,
}

/// Encode one semester block, without the trailing separator
pub fn encode_semester(semester: &Semester, style: HeaderStyle) -> String {
    let mut out = style.header_line(&semester.name);
    out.push('\n');
    let lines: Vec<String> = semester.classes().iter().map(|c| c.to_string()).collect();
    out.push_str(&lines.join("\n"));
    out
}

/// Encode the full collection; each block is followed by a blank line
pub fn encode(semesters: &[Semester], style: HeaderStyle) -> String {
    let mut out = String::new();
    for semester in semesters {
        out.push_str(&encode_semester(semester, style));
        out.push_str("\n\n");
    }
    out
}

fn parse_class_line(line: &str) -> std::result::Result<(&str, i64, i64), SkipReason> {
    let mut parts = line.split(": ");
    let (name, scores) = match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(scores), None) => (name, scores),
        _ => return Err(SkipReason::Malformed),
    };

    let mut numbers = scores.split('/');
    let (earned, total) = match (numbers.next(), numbers.next(), numbers.next()) {
        (Some(earned), Some(total), None) => (earned, total),
        _ => return Err(SkipReason::Malformed),
    };

    let earned = earned.trim().parse().map_err(|_| SkipReason::InvalidNumber)?;
    let total = total.trim().parse().map_err(|_| SkipReason::InvalidNumber)?;
    Ok((name, earned, total))
}

/// Decode a whole file. Bad class lines are skipped and reported, never fatal.
pub fn decode(text: &str, style: HeaderStyle) -> Decoded {
    let mut decoded = Decoded::default();
    let mut current: Option<Semester> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = style.parse_header(line) {
            if let Some(done) = current.take() {
                decoded.semesters.push(done);
            }
            current = Some(Semester::new(name));
            continue;
        }

        let skip = |reason| SkippedLine {
            line_number: index + 1,
            text: line.to_string(),
            reason,
        };

        let Some(semester) = current.as_mut() else {
            decoded.skipped.push(skip(SkipReason::NoSemester));
            continue;
        };

        match parse_class_line(line) {
            Ok((name, earned, total)) => semester.add_class(name, earned, total),
            Err(reason) => decoded.skipped.push(skip(reason)),
        }
    }

    if let Some(done) = current {
        decoded.semesters.push(done);
    }
    decoded
}

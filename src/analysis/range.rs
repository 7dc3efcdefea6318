//! Contiguous range of `<major>.0` version labels

use std::sync::LazyLock;

use regex::Regex;

use crate::error::RangeError;

/// Accepts `14`, `14.0` or `14.5`; only the major part is kept
static VERSION_BOUND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:\.\d+)?$").expect("version bound regex is valid"));

/// Ordered, non-empty list of version labels, e.g. `["14.0", "15.0"]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    versions: Vec<String>,
}

impl VersionRange {
    /// Build the range from major version numbers (inclusive on both ends)
    pub fn new(start: u32, end: u32) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }

        Ok(Self {
            versions: (start..=end).map(|major| format!("{}.0", major)).collect(),
        })
    }

    /// Build the range from user-supplied labels such as `"14.0"` and `"17"`
    pub fn parse(start: &str, end: &str) -> Result<Self, RangeError> {
        Self::new(parse_major(start)?, parse_major(end)?)
    }

    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

fn parse_major(label: &str) -> Result<u32, RangeError> {
    let trimmed = label.trim();
    VERSION_BOUND_RE
        .captures(trimmed)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| RangeError::Malformed(label.to_string()))
}

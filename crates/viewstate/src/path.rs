//! Dotted controller paths.

use std::{fmt, str::FromStr};

use crate::error::{Result, ViewStateError};

/// First segment of every path; addresses the view state's root controller.
pub const ROOT_SEGMENT: &str = "page";
pub const PATH_SEPARATOR: char = '.';

/// Splits `raw` on `.` and checks that it is rooted at `page` with no empty
/// segments. The returned segments include the root.
pub fn split_and_validate_path(raw: &str) -> Result<Vec<String>> {
    let segments: Vec<String> = raw.split(PATH_SEPARATOR).map(str::to_owned).collect();

    if segments.first().map(String::as_str) != Some(ROOT_SEGMENT) {
        return Err(ViewStateError::InvalidPath {
            path: raw.to_owned(),
            reason: "path must start with 'page'",
        });
    }
    if segments.iter().any(String::is_empty) {
        return Err(ViewStateError::InvalidPath {
            path: raw.to_owned(),
            reason: "path contains an empty segment",
        });
    }

    Ok(segments)
}

/// A validated path. Always holds at least the root segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewPath {
    segments: Vec<String>,
}

impl ViewPath {
    pub fn parse(raw: &str) -> Result<Self> {
        split_and_validate_path(raw).map(|segments| Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// Slot names below the root, in descent order.
    pub fn slots(&self) -> &[String] {
        &self.segments[1..]
    }

    /// Splits off the last slot name from the slots leading to its parent.
    /// `None` for the root path, which has no enclosing slot.
    pub fn split_last(&self) -> Option<(&[String], &str)> {
        let (last, parents) = self.slots().split_last()?;
        Some((parents, last.as_str()))
    }
}

impl FromStr for ViewPath {
    type Err = ViewStateError;

    fn from_str(raw: &str) -> Result<Self> {
        Self::parse(raw)
    }
}

impl fmt::Display for ViewPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

#[cfg(test)]
#[path = "tests/path_tests.rs"]
mod tests;

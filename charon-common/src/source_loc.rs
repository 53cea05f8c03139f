//! Source location tracking for diagnostics
//!
//! Every tree node carries a `SourceLocation`; the backend only uses it to
//! point diagnostics at the offending construct.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in a source file (line and column are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    /// Create a location with filename
    pub fn new(filename: &str, line: u32, column: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
            column,
        }
    }

    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::new("<unknown>", 0, 0)
    }

    pub fn new_simple(line: u32, column: u32) -> Self {
        Self::new("<input>", line, column)
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::dummy()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A span in a source file (from start to end location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Create a span from a single location
    pub fn from_location(location: SourceLocation) -> Self {
        Self {
            end: location.clone(),
            start: location,
        }
    }

    pub fn dummy() -> Self {
        Self::from_location(SourceLocation::dummy())
    }
}

impl From<SourceLocation> for SourceSpan {
    fn from(location: SourceLocation) -> Self {
        Self::from_location(location)
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.filename != self.end.filename {
            write!(f, "{} to {}", self.start, self.end)
        } else if self.start.line == self.end.line {
            if self.start.column == self.end.column {
                write!(f, "{}", self.start)
            } else {
                write!(
                    f,
                    "{}:{}:{}-{}",
                    self.start.filename, self.start.line, self.start.column, self.end.column
                )
            }
        } else {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.start.filename, self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_display() {
        let loc = SourceLocation::new("main.ch", 42, 10);
        assert_eq!(format!("{}", loc), "main.ch:42:10");
    }

    #[test]
    fn test_point_span_displays_as_location() {
        let span = SourceSpan::from(SourceLocation::new("main.ch", 3, 7));
        assert_eq!(format!("{}", span), "main.ch:3:7");
    }

    #[test]
    fn test_source_span_same_line() {
        let span = SourceSpan::new(
            SourceLocation::new("main.ch", 1, 5),
            SourceLocation::new("main.ch", 1, 10),
        );
        assert_eq!(format!("{}", span), "main.ch:1:5-10");
    }

    #[test]
    fn test_source_span_different_lines() {
        let span = SourceSpan::new(
            SourceLocation::new("main.ch", 1, 5),
            SourceLocation::new("main.ch", 3, 10),
        );
        assert_eq!(format!("{}", span), "main.ch:1:5-3:10");
    }
}

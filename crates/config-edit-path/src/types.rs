//! Type definitions for field paths.

use std::fmt;

use crate::{CONTEXT_MARKER, SEGMENT_SEPARATOR};

/// A parsed field path.
///
/// `context_depth` is the length of the leading marker run (0 when the path
/// starts at the root). `segments` holds every segment after the marker run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath {
    pub context_depth: usize,
    pub segments: Vec<String>,
}

impl FieldPath {
    /// Returns true if the path starts from a remembered context.
    pub fn uses_context(&self) -> bool {
        self.context_depth > 0
    }

    /// Number of segments after the marker run.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if self.context_depth > 0 {
            for _ in 0..self.context_depth {
                write!(f, "{CONTEXT_MARKER}")?;
            }
            first = false;
        }
        for segment in &self.segments {
            if !first {
                write!(f, "{SEGMENT_SEPARATOR}")?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

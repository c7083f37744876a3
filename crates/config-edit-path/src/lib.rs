//! Field path grammar for text-driven config edits.
//!
//! A field path is a `.`-separated list of segments addressing a slot inside
//! a nested object graph. Segment 0 may instead be a run of context markers
//! (`^`, `^^`, ...) selecting a previously remembered location.
//!
//! Raw edit values carry an optional two-character operator suffix (`!+`,
//! `!-`, `!d`, `!n`, `!^`) which is split off with [`parse_operation`].
//!
//! # Example
//!
//! ```
//! use config_edit_path::{parse_field_path, parse_operation, EditOperation};
//!
//! let path = parse_field_path("^^.stats.3").unwrap();
//! assert_eq!(path.context_depth, 2);
//! assert_eq!(path.segments, vec!["stats", "3"]);
//!
//! let (op, value) = parse_operation("!weapon_part !+");
//! assert_eq!(op, EditOperation::Insert);
//! assert_eq!(value, "!weapon_part");
//! ```

pub mod types;
pub use types::FieldPath;

pub mod operation;
pub use operation::{parse_operation, EditOperation, OPERATORS};

pub mod validate;
pub use validate::{validate_segments, PathError, MAX_SEGMENTS};

/// Separator between path segments.
pub const SEGMENT_SEPARATOR: char = '.';

/// Character a context reference segment is made of.
pub const CONTEXT_MARKER: char = '^';

/// Terminal sequence segment meaning "one past the last element".
pub const INDEX_GLOB: &str = "*";

/// Prefix identifying a type tag in a raw value.
pub const TAG_PREFIX: char = '!';

/// Splits a field path into its raw segments without validating them.
///
/// ```
/// use config_edit_path::split_field_path;
///
/// assert_eq!(split_field_path("a.b.0"), vec!["a", "b", "0"]);
/// assert_eq!(split_field_path("a..b"), vec!["a", "", "b"]);
/// ```
pub fn split_field_path(path: &str) -> Vec<String> {
    path.split(SEGMENT_SEPARATOR).map(str::to_string).collect()
}

/// Joins segments back into a dotted field path.
pub fn format_field_path<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push(SEGMENT_SEPARATOR);
        }
        out.push_str(segment.as_ref());
    }
    out
}

/// Returns true if the segment consists solely of context markers.
///
/// ```
/// use config_edit_path::is_context_marker;
///
/// assert!(is_context_marker("^"));
/// assert!(is_context_marker("^^^"));
/// assert!(!is_context_marker(""));
/// assert!(!is_context_marker("^a"));
/// ```
pub fn is_context_marker(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c == CONTEXT_MARKER)
}

/// Number of context markers in a marker segment, `None` for any other segment.
pub fn context_depth(segment: &str) -> Option<usize> {
    if is_context_marker(segment) {
        Some(segment.len())
    } else {
        None
    }
}

/// Returns true for the append glob segment.
pub fn is_index_glob(segment: &str) -> bool {
    segment == INDEX_GLOB
}

/// Parses a sequence index segment.
///
/// Surrounding whitespace and a leading sign are accepted; negative or
/// non-numeric segments yield `None`.
///
/// ```
/// use config_edit_path::parse_index;
///
/// assert_eq!(parse_index("3"), Some(3));
/// assert_eq!(parse_index(" 12 "), Some(12));
/// assert_eq!(parse_index("+1"), Some(1));
/// assert_eq!(parse_index("-1"), None);
/// assert_eq!(parse_index("x"), None);
/// ```
pub fn parse_index(segment: &str) -> Option<usize> {
    let index: i32 = segment.trim().parse().ok()?;
    usize::try_from(index).ok()
}

/// Returns true if a raw value names a type tag (`!something`).
pub fn is_type_tag(value: &str) -> bool {
    value.starts_with(TAG_PREFIX)
}

/// Parses and validates a field path.
///
/// # Errors
///
/// See [`validate_segments`].
pub fn parse_field_path(path: &str) -> Result<FieldPath, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    let mut segments = split_field_path(path);
    validate_segments(&segments)?;
    let context_depth = match context_depth(&segments[0]) {
        Some(depth) => {
            segments.remove(0);
            depth
        }
        None => 0,
    };
    Ok(FieldPath {
        context_depth,
        segments,
    })
}

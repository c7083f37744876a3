//! Validation functions for field paths.

use thiserror::Error;

use crate::is_context_marker;

/// Maximum allowed number of segments in one path.
pub const MAX_SEGMENTS: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("field path is empty")]
    Empty,
    #[error("segment at step {position} is empty")]
    EmptySegment { position: usize },
    #[error("context marker {segment} is only allowed as the first segment (step {position})")]
    MisplacedContextMarker { segment: String, position: usize },
    #[error("field path has {count} segments, at most {MAX_SEGMENTS} are allowed")]
    TooLong { count: usize },
}

/// Validate raw path segments.
///
/// Positions in errors are 1-based.
///
/// # Errors
///
/// Returns an error if:
/// - there are no segments
/// - there are more than [`MAX_SEGMENTS`] segments
/// - any segment is empty
/// - a context marker run appears after the first segment
///
/// # Example
///
/// ```
/// use config_edit_path::{split_field_path, validate_segments};
///
/// validate_segments(&split_field_path("^.a.b")).unwrap();
/// validate_segments(&split_field_path("a.^")).unwrap_err();
/// ```
pub fn validate_segments(segments: &[String]) -> Result<(), PathError> {
    if segments.is_empty() {
        return Err(PathError::Empty);
    }
    if segments.len() > MAX_SEGMENTS {
        return Err(PathError::TooLong {
            count: segments.len(),
        });
    }
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            return Err(PathError::EmptySegment { position: i + 1 });
        }
        if i > 0 && is_context_marker(segment) {
            return Err(PathError::MisplacedContextMarker {
                segment: segment.clone(),
                position: i + 1,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_validate_simple() {
        assert!(validate_segments(&segments(&["a", "b"])).is_ok());
        assert!(validate_segments(&segments(&["^^", "b"])).is_ok());
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate_segments(&[]), Err(PathError::Empty));
        assert_eq!(
            validate_segments(&segments(&["a", ""])),
            Err(PathError::EmptySegment { position: 2 })
        );
    }

    #[test]
    fn test_validate_too_long() {
        let long: Vec<String> = (0..300).map(|i| format!("f{i}")).collect();
        assert_eq!(
            validate_segments(&long),
            Err(PathError::TooLong { count: 300 })
        );
    }

    #[test]
    fn test_validate_max_length() {
        let max: Vec<String> = (0..MAX_SEGMENTS).map(|i| format!("f{i}")).collect();
        assert!(validate_segments(&max).is_ok());
    }
}

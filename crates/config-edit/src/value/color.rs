//! Color literal parsing.
//!
//! Accepts the inside of a parenthesized literal: `r, g, b` (alpha 1) or
//! `r, g, b, a`, each channel a float.

use thiserror::Error;

use super::Color;
use crate::codec::parse_float;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected 3 or 4 color channels, found {found}")]
    ChannelCount { found: usize },
    #[error("channel {position} ({text:?}) is not a number")]
    Channel { position: usize, text: String },
}

/// Parses comma-separated color channels.
///
/// ```
/// use config_edit::value::{parse_color, Color};
///
/// assert_eq!(parse_color("1, 0.5, 0"), Ok(Color::rgb(1.0, 0.5, 0.0)));
/// assert!(parse_color("1, 0").is_err());
/// ```
pub fn parse_color(inner: &str) -> Result<Color, ColorParseError> {
    let parts: Vec<&str> = inner.split(',').collect();
    if !(3..=4).contains(&parts.len()) {
        return Err(ColorParseError::ChannelCount { found: parts.len() });
    }
    let mut channels = [0.0f32, 0.0, 0.0, 1.0];
    for (i, part) in parts.iter().enumerate() {
        channels[i] = parse_float(part).ok_or_else(|| ColorParseError::Channel {
            position: i + 1,
            text: part.trim().to_string(),
        })?;
    }
    let [r, g, b, a] = channels;
    Ok(Color::rgba(r, g, b, a))
}

//! Operator suffix grammar.
//!
//! A raw edit value may end with one fixed two-character operator token.
//! The first token in [`OPERATORS`] that the value ends with wins; the
//! tokens share no suffixes, so at most one can ever match.

use std::fmt;

/// The mutation an edit performs on its resolved slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditOperation {
    /// Replace the slot with the parsed value (no suffix).
    #[default]
    Overwrite,
    /// Insert a sequence element, map entry or set member.
    Insert,
    /// Remove a sequence element, map entry or set member.
    Remove,
    /// Reset the slot to its kind's default.
    DefaultValue,
    /// Set a reference slot to absent.
    NullValue,
    /// Remember the resolved slot as a context for following edits.
    SetContext,
}

/// Operator suffix table, in match order.
pub const OPERATORS: [(&str, EditOperation); 5] = [
    ("!+", EditOperation::Insert),
    ("!-", EditOperation::Remove),
    ("!d", EditOperation::DefaultValue),
    ("!n", EditOperation::NullValue),
    ("!^", EditOperation::SetContext),
];

impl EditOperation {
    /// The suffix token for this operation; `None` for [`EditOperation::Overwrite`].
    pub fn token(&self) -> Option<&'static str> {
        OPERATORS
            .iter()
            .find(|(_, op)| op == self)
            .map(|(token, _)| *token)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditOperation::Overwrite => "overwrite",
            EditOperation::Insert => "insert",
            EditOperation::Remove => "remove",
            EditOperation::DefaultValue => "default",
            EditOperation::NullValue => "null",
            EditOperation::SetContext => "set-context",
        }
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits the operator suffix off a raw value.
///
/// Returns the operation and the remaining value with trailing spaces
/// trimmed. Values without a known suffix are returned untouched as an
/// overwrite.
///
/// ```
/// use config_edit_path::{parse_operation, EditOperation};
///
/// assert_eq!(parse_operation("12"), (EditOperation::Overwrite, "12"));
/// assert_eq!(parse_operation("x !-"), (EditOperation::Remove, "x"));
/// assert_eq!(parse_operation("!d"), (EditOperation::DefaultValue, ""));
/// assert_eq!(parse_operation("!^"), (EditOperation::SetContext, ""));
/// ```
pub fn parse_operation(raw: &str) -> (EditOperation, &str) {
    for (token, op) in OPERATORS {
        if let Some(rest) = raw.strip_suffix(token) {
            return (op, rest.trim_end_matches(' '));
        }
    }
    (EditOperation::Overwrite, raw)
}

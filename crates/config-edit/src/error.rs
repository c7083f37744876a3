use config_edit_path::{EditOperation, PathError};
use thiserror::Error;

/// Fault category an edit failed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultClass {
    /// The path could not be walked.
    Structural,
    /// The raw value could not be parsed for the target kind.
    Value,
    /// The operation is not allowed on the target.
    Policy,
}

/// Why an edit was rejected.
///
/// Messages name the offending segment, key or value; the reporting session
/// adds the file, type and path.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditFault {
    // ── Structural ────────────────────────────────────────────────────────
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("root object is {found}, field paths start at a record")]
    RootNotRecord { found: String },
    #[error("can't proceed past {segment}, current target reference is null")]
    NullTarget { segment: String },
    #[error("index {segment} can't be parsed or is negative")]
    InvalidIndex { segment: String },
    #[error("index glob {segment} is only valid as the last segment")]
    MisplacedGlob { segment: String },
    #[error("can't proceed past {segment}, index is beyond end of list (size={len})")]
    IndexOutOfRange { segment: String, len: usize },
    #[error("{op} on index {segment} is out of bounds for list size {len}")]
    ElementOutOfRange {
        op: EditOperation,
        segment: String,
        len: usize,
    },
    #[error("only keys of types [string, int] are supported, map key type is {kind}")]
    UnsupportedKeyKind { kind: String },
    #[error("key {key} can't be converted to map key type {kind}")]
    InvalidKey { key: String, kind: String },
    #[error("key {key} doesn't exist in target map")]
    MissingKey { key: String },
    #[error("field {field} could not be found on type {type_name}")]
    UnknownField { field: String, type_name: String },
    #[error("can't proceed past {segment}, {kind} has no fields or elements")]
    NotAContainer { segment: String, kind: String },
    #[error("context {depth} requested but only {available} contexts are set")]
    ContextDepth { depth: usize, available: usize },
    #[error("context {path} no longer resolves to a value")]
    StaleContext { path: String },

    // ── Value ─────────────────────────────────────────────────────────────
    #[error("{kind} field can't be overwritten - can't parse raw value {raw:?}: {reason}")]
    InvalidValue {
        kind: String,
        raw: String,
        reason: String,
    },
    #[error("{enum_name} field can't be overwritten - {raw:?} is not a member")]
    UnknownEnumMember { enum_name: String, raw: String },

    // ── Policy ────────────────────────────────────────────────────────────
    #[error("value type {kind} cannot be set to null")]
    NullOnValueKind { kind: String },
    #[error("{op} is not supported on {kind}")]
    UnsupportedOperation { op: EditOperation, kind: String },
    #[error("string set exists - cannot replace it with a default value")]
    SetExists,
    #[error("string set is null - use !d to create it first")]
    SetMissing,
    #[error("default value for {kind} is null - likely missing a type tag")]
    NoDefaultInstance { kind: String },
    #[error("there is no type associated with tag {tag}")]
    UnknownTag { tag: String },
    #[error("tag {tag} type {tag_type} is not compatible with field type {field_type}")]
    IncompatibleTag {
        tag: String,
        tag_type: String,
        field_type: String,
    },
    #[error("{kind} has no string parsing implementation - try !d to fill it with a default instance")]
    NoParser { kind: String },
    #[error("context can only be set on lists, maps and records, target is {kind}")]
    ContextOnTerminal { kind: String },
    #[error("config {key} of type {type_name} can't be removed")]
    RemovedConfig { key: String, type_name: String },
}

impl EditFault {
    pub fn class(&self) -> FaultClass {
        match self {
            EditFault::Path(_)
            | EditFault::RootNotRecord { .. }
            | EditFault::NullTarget { .. }
            | EditFault::InvalidIndex { .. }
            | EditFault::MisplacedGlob { .. }
            | EditFault::IndexOutOfRange { .. }
            | EditFault::ElementOutOfRange { .. }
            | EditFault::UnsupportedKeyKind { .. }
            | EditFault::InvalidKey { .. }
            | EditFault::MissingKey { .. }
            | EditFault::UnknownField { .. }
            | EditFault::NotAContainer { .. }
            | EditFault::ContextDepth { .. }
            | EditFault::StaleContext { .. } => FaultClass::Structural,
            EditFault::InvalidValue { .. } | EditFault::UnknownEnumMember { .. } => {
                FaultClass::Value
            }
            EditFault::NullOnValueKind { .. }
            | EditFault::UnsupportedOperation { .. }
            | EditFault::SetExists
            | EditFault::SetMissing
            | EditFault::NoDefaultInstance { .. }
            | EditFault::UnknownTag { .. }
            | EditFault::IncompatibleTag { .. }
            | EditFault::NoParser { .. }
            | EditFault::ContextOnTerminal { .. }
            | EditFault::RemovedConfig { .. } => FaultClass::Policy,
        }
    }
}

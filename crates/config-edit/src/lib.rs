//! Path-addressed patching of typed config object graphs.
//!
//! An edit names a slot inside a config object with a dotted field path and
//! carries a raw text value with an optional operator suffix. A [`Session`]
//! walks the path against the object's schema, applies the operation and
//! reports what happened through a [`DiagnosticSink`].
//!
//! Paths may start with a context reference (`^`, `^^`, ...) to continue
//! from a slot an earlier edit remembered, so a script can fill a freshly
//! inserted entry without repeating its path.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use config_edit::schema::{Kind, RecordDef, TagRegistry};
//! use config_edit::value::{Record, Value};
//! use config_edit::{EditOutcome, EditSpec, MemorySink, Session, Settings};
//!
//! let stats = RecordDef::builder("Stats").field("hp", Kind::Int).build();
//! let unit = RecordDef::builder("Unit")
//!     .field("name", Kind::String)
//!     .field("stats", Kind::list(Kind::record(&stats)))
//!     .build();
//! let mut root = Value::Record(Record::new(&unit));
//!
//! let mut session = Session::with_sink(
//!     Settings::default(),
//!     Arc::new(TagRegistry::new()),
//!     MemorySink::new(),
//! );
//! let edits = [("stats", "!d"), ("stats.*", "!+"), ("^.hp", "40")];
//! for (path, value) in edits {
//!     let spec = EditSpec::new("Unit", "mech_light", path, value);
//!     assert!(!session.process_field_edit(&spec, &mut root).is_fault());
//! }
//!
//! let hp = root.as_record().and_then(|r| r.get("stats"))
//!     .and_then(Value::as_list)
//!     .and_then(|l| l[0].as_record())
//!     .and_then(|r| r.get("hp"));
//! assert_eq!(hp, Some(&Value::Int(40)));
//! ```

pub mod codec;
pub mod context;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod registry;
pub mod schema;
pub mod script;
pub mod session;
pub mod settings;
pub mod value;

mod apply;
mod walk;

pub use config_edit_path::{EditOperation, FieldPath, PathError};
pub use context::{ContextStack, Location, PathContext, Step};
pub use diagnostics::{Channel, Diagnostic, DiagnosticSink, LogSink, MemorySink, StepInfo};
pub use error::{EditFault, FaultClass};
pub use registry::ConfigRegistry;
pub use script::{EditScript, EditStep, ScriptError, ScriptReport};
pub use session::{EditOutcome, EditSpec, Session};
pub use settings::{Settings, SettingsError};
pub use walk::EditState;

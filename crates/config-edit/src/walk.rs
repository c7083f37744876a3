//! Path walking.
//!
//! The walker resolves every segment but the last without mutating
//! anything: it checks that each intermediate target exists and can be
//! descended into. The last segment is turned into a [`Slot`] which the
//! applier then mutates. Faults abort the edit before any write.

use config_edit_path::{
    format_field_path, is_index_glob, parse_field_path, parse_index, parse_operation,
    EditOperation, FieldPath, CONTEXT_MARKER,
};

use crate::codec::parse_int;
use crate::context::{ContextStack, Location, PathContext, Step};
use crate::diagnostics::{Channel, Diagnostic, DiagnosticSink, StepInfo, ATTEMPTS_TO_EDIT, EDITS};
use crate::error::EditFault;
use crate::schema::{Kind, TagRegistry};
use crate::session::{EditOutcome, EditSpec};
use crate::settings::Settings;
use crate::value::{MapKey, Value};

/// Cursor state of one edit, updated at every path step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditState {
    /// Pending operation. Insertions may switch it to an overwrite or a
    /// default-value reset once the new entry exists.
    pub op: EditOperation,
    /// Raw value with the operator suffix removed.
    pub value: String,
    /// Location of the current target.
    pub location: Location,
    /// Declared kind of the terminal slot, once reached.
    pub target_kind: Option<Kind>,
    pub segment: String,
    /// 0-based, counting segments contributed by a resolved context.
    pub segment_index: usize,
    pub segment_count: usize,
    pub at_end_of_path: bool,
    pub faulted: bool,
}

impl EditState {
    pub fn target_index(&self) -> Option<usize> {
        match self.location.last()? {
            Step::Index(i) => Some(*i),
            _ => None,
        }
    }

    pub fn target_key(&self) -> Option<&MapKey> {
        match self.location.last()? {
            Step::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn field_name(&self) -> Option<&str> {
        match self.location.last()? {
            Step::Field(name) => Some(name),
            _ => None,
        }
    }

    pub fn step_info(&self) -> Option<StepInfo> {
        if self.segment_count == 0 {
            return None;
        }
        Some(StepInfo {
            segment: self.segment.clone(),
            position: self.segment_index + 1,
            count: self.segment_count,
        })
    }
}

/// A resolved location and the declared kind of the slot there.
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    pub location: Location,
    pub kind: Kind,
}

/// The terminal slot of an edit, relative to its container.
#[derive(Debug, Clone)]
pub(crate) enum Slot {
    Field { name: String, kind: Kind },
    /// `None` is the append glob.
    Element { index: Option<usize>, kind: Kind },
    Entry { key: MapKey, kind: Kind },
}

pub(crate) struct Editor<'a> {
    pub(crate) spec: &'a EditSpec,
    pub(crate) settings: &'a Settings,
    pub(crate) tags: &'a TagRegistry,
    pub(crate) contexts: &'a mut ContextStack,
    sink: &'a mut dyn DiagnosticSink,
    pub(crate) state: EditState,
    /// Context segments followed by path segments.
    expanded: Vec<String>,
    /// Set once the edit continues or starts a context chain; pushes then
    /// stack instead of replacing.
    chained: bool,
}

impl<'a> Editor<'a> {
    pub(crate) fn new(
        spec: &'a EditSpec,
        settings: &'a Settings,
        tags: &'a TagRegistry,
        contexts: &'a mut ContextStack,
        sink: &'a mut dyn DiagnosticSink,
    ) -> Self {
        Self {
            spec,
            settings,
            tags,
            contexts,
            sink,
            state: EditState::default(),
            expanded: Vec::new(),
            chained: false,
        }
    }

    pub(crate) fn into_state(self) -> EditState {
        self.state
    }

    pub(crate) fn run(&mut self, root: &mut Value) -> EditOutcome {
        let (op, value) = parse_operation(&self.spec.value_raw);
        self.state.op = op;
        self.state.value = value.to_string();
        match self.walk(root) {
            Ok(outcome) => outcome,
            Err(fault) => {
                self.state.faulted = true;
                self.emit(Channel::Fault, ATTEMPTS_TO_EDIT, fault.to_string());
                EditOutcome::Faulted(fault)
            }
        }
    }

    fn walk(&mut self, root: &mut Value) -> Result<EditOutcome, EditFault> {
        let path = parse_field_path(&self.spec.field_path)?;
        let start = self.start(&path, root)?;
        let prefix = self.expanded.len();
        self.expanded.extend(path.segments.iter().cloned());
        self.state.segment_count = self.expanded.len();

        let Some((last, head)) = path.segments.split_last() else {
            return self.apply_at_context(root, start);
        };
        let mut cursor = start;
        for (i, segment) in head.iter().enumerate() {
            self.enter(prefix + i, segment);
            cursor = self.descend(root, cursor, segment)?;
        }
        self.enter(prefix + head.len(), last);
        let slot = self.address(root, &cursor, last, true)?;
        self.apply(root, cursor.location, slot)
    }

    /// Resolves where the walk begins: the root record, or a context.
    fn start(&mut self, path: &FieldPath, root: &Value) -> Result<Cursor, EditFault> {
        if !path.uses_context() {
            return match root {
                Value::Record(record) => Ok(Cursor {
                    location: Location::root(),
                    kind: Kind::record(record.def()),
                }),
                other => Err(EditFault::RootNotRecord {
                    found: other.variant_name().to_string(),
                }),
            };
        }

        let depth = path.context_depth;
        self.state.segment = CONTEXT_MARKER.to_string().repeat(depth);
        self.state.segment_count = path.len() + 1;
        let available = self.contexts.len();
        let context = self
            .contexts
            .select(depth)
            .ok_or(EditFault::ContextDepth { depth, available })?;
        self.chained = true;
        if context.location.is_root() || context.location.resolve(root).is_none() {
            return Err(stale(&context.location));
        }
        if available > depth {
            self.trace(format!(
                "context {depth} selected, discarded {} deeper contexts",
                available - depth
            ));
        }
        self.trace(format!("reuses context {depth} at {}", context.location));
        self.expanded = context.location.segments();
        Ok(Cursor {
            location: context.location,
            kind: context.kind,
        })
    }

    fn enter(&mut self, index: usize, segment: &str) {
        self.state.segment = segment.to_string();
        self.state.segment_index = index;
        self.state.at_end_of_path = index + 1 == self.state.segment_count;
    }

    fn descend(&mut self, root: &Value, cursor: Cursor, segment: &str) -> Result<Cursor, EditFault> {
        let (step, kind) = match self.address(root, &cursor, segment, false)? {
            Slot::Field { name, kind } => (Step::Field(name), kind),
            Slot::Element {
                index: Some(index),
                kind,
            } => (Step::Index(index), kind),
            Slot::Element { index: None, .. } => {
                return Err(EditFault::MisplacedGlob {
                    segment: segment.to_string(),
                })
            }
            Slot::Entry { key, kind } => (Step::Key(key), kind),
        };
        let location = cursor.location.child(step);
        self.state.location = location.clone();
        Ok(Cursor { location, kind })
    }

    /// Resolves `segment` against the target at `cursor`.
    ///
    /// Non-terminal segments must name an existing element or entry; the
    /// append glob is only accepted at the end.
    fn address(
        &self,
        root: &Value,
        cursor: &Cursor,
        segment: &str,
        terminal: bool,
    ) -> Result<Slot, EditFault> {
        let target = cursor
            .location
            .resolve(root)
            .ok_or_else(|| stale(&cursor.location))?;
        if target.is_null() {
            return Err(EditFault::NullTarget {
                segment: segment.to_string(),
            });
        }

        match (&cursor.kind, target) {
            (Kind::List(element), Value::List(list)) => {
                let kind = element.as_ref().clone();
                if is_index_glob(segment) {
                    if terminal {
                        return Ok(Slot::Element { index: None, kind });
                    }
                    return Err(EditFault::MisplacedGlob {
                        segment: segment.to_string(),
                    });
                }
                let index = parse_index(segment).ok_or_else(|| EditFault::InvalidIndex {
                    segment: segment.to_string(),
                })?;
                if !terminal && index >= list.len() {
                    return Err(EditFault::IndexOutOfRange {
                        segment: segment.to_string(),
                        len: list.len(),
                    });
                }
                Ok(Slot::Element {
                    index: Some(index),
                    kind,
                })
            }
            (Kind::Map(key_kind, value_kind), Value::Map(map)) => {
                let key = map_key(key_kind, segment)?;
                if !terminal && !map.contains_key(&key) {
                    return Err(EditFault::MissingKey {
                        key: key.to_string(),
                    });
                }
                Ok(Slot::Entry {
                    key,
                    kind: value_kind.as_ref().clone(),
                })
            }
            (_, Value::Record(record)) => {
                let field = record
                    .def()
                    .field(segment)
                    .ok_or_else(|| EditFault::UnknownField {
                        field: segment.to_string(),
                        type_name: record.type_name().to_string(),
                    })?;
                Ok(Slot::Field {
                    name: field.name.clone(),
                    kind: field.kind.clone(),
                })
            }
            (kind, _) => Err(EditFault::NotAContainer {
                segment: segment.to_string(),
                kind: kind.to_string(),
            }),
        }
    }

    /// Applies a context-only path (`^`, `^^: !d`, ...) to the context slot
    /// itself.
    fn apply_at_context(&mut self, root: &mut Value, start: Cursor) -> Result<EditOutcome, EditFault> {
        let (Some(parent), Some(step)) = (start.location.parent(), start.location.last()) else {
            return Err(stale(&start.location));
        };
        let count = self.state.segment_count;
        self.enter(count.saturating_sub(1), &step.to_string());
        let slot = match step.clone() {
            Step::Field(name) => Slot::Field {
                name,
                kind: start.kind,
            },
            Step::Index(index) => Slot::Element {
                index: Some(index),
                kind: start.kind,
            },
            Step::Key(key) => Slot::Entry {
                key,
                kind: start.kind,
            },
        };
        self.apply(root, parent, slot)
    }

    /// Remembers `location` as the newest context.
    ///
    /// An edit that did not start from a context begins a new chain, so the
    /// stack is cleared before its first push. A location already on top of
    /// the stack is not pushed again.
    pub(crate) fn push_context(&mut self, location: Location, kind: Kind) {
        if !self.chained {
            let discarded = self.contexts.len();
            self.contexts.clear();
            if discarded > 0 {
                self.trace(format!("new context chain, discarded {discarded} contexts"));
            }
            self.chained = true;
        }
        if self.contexts.top().map(|top| &top.location) == Some(&location) {
            let depth = self.contexts.len();
            self.trace(format!("context {depth} already set to {location}"));
            return;
        }
        let rendered = location.to_string();
        let depth = self.contexts.push(PathContext {
            location,
            kind,
            segment: self.state.segment.clone(),
        });
        self.trace(format!("context {depth} set to {rendered}"));
    }

    pub(crate) fn info(&mut self, detail: String) {
        self.emit(Channel::Info, EDITS, detail);
    }

    pub(crate) fn no_op(&mut self, detail: String) {
        self.emit(Channel::Info, ATTEMPTS_TO_EDIT, detail);
    }

    pub(crate) fn trace(&mut self, detail: String) {
        self.emit(Channel::Context, EDITS, detail);
    }

    fn emit(&mut self, channel: Channel, verb: &'static str, detail: String) {
        if !self.settings.channel_enabled(channel) {
            return;
        }
        let path = if self.expanded.is_empty() {
            self.spec.field_path.clone()
        } else {
            format_field_path(&self.expanded)
        };
        let mut diagnostic = Diagnostic::for_edit(channel, self.spec, verb, path, detail);
        if channel == Channel::Fault {
            diagnostic = diagnostic.with_step(self.state.step_info());
        }
        self.sink.emit(&diagnostic);
    }
}

pub(crate) fn stale(location: &Location) -> EditFault {
    EditFault::StaleContext {
        path: location.to_string(),
    }
}

fn map_key(key_kind: &Kind, segment: &str) -> Result<MapKey, EditFault> {
    match key_kind {
        Kind::String => Ok(MapKey::Str(segment.to_string())),
        Kind::Int => parse_int(segment)
            .map(MapKey::Int)
            .ok_or_else(|| EditFault::InvalidKey {
                key: segment.to_string(),
                kind: key_kind.to_string(),
            }),
        other => Err(EditFault::UnsupportedKeyKind {
            kind: other.to_string(),
        }),
    }
}

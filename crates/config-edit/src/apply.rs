//! Edit application.
//!
//! Dispatches on the resolved [`Slot`] and the pending operation. Lists and
//! maps handle insertion and removal themselves; everything else is a write
//! to the slot through [`Location::resolve_mut`].

use config_edit_path::{is_type_tag, EditOperation};
use indexmap::{IndexMap, IndexSet};

use crate::codec;
use crate::context::{Location, Step};
use crate::defaults::instantiate;
use crate::error::EditFault;
use crate::schema::Kind;
use crate::session::EditOutcome;
use crate::value::{MapKey, Record, Value};
use crate::walk::{stale, Editor, Slot};

// ── Container navigation ──────────────────────────────────────────────────

fn list_at<'v>(root: &'v mut Value, at: &Location) -> Result<&'v mut Vec<Value>, EditFault> {
    match at.resolve_mut(root) {
        Some(Value::List(list)) => Ok(list),
        _ => Err(stale(at)),
    }
}

fn map_at<'v>(root: &'v mut Value, at: &Location) -> Result<&'v mut IndexMap<MapKey, Value>, EditFault> {
    match at.resolve_mut(root) {
        Some(Value::Map(map)) => Ok(map),
        _ => Err(stale(at)),
    }
}

// ── Applicators ───────────────────────────────────────────────────────────

impl Editor<'_> {
    pub(crate) fn apply(
        &mut self,
        root: &mut Value,
        container: Location,
        slot: Slot,
    ) -> Result<EditOutcome, EditFault> {
        self.state.at_end_of_path = true;
        match slot {
            Slot::Field { name, kind } => self.edit_slot(root, container.child(Step::Field(name)), kind),
            Slot::Element { index, kind } => self.edit_element(root, container, index, kind),
            Slot::Entry { key, kind } => self.edit_entry(root, container, key, kind),
        }
    }

    fn edit_element(
        &mut self,
        root: &mut Value,
        at: Location,
        index: Option<usize>,
        kind: Kind,
    ) -> Result<EditOutcome, EditFault> {
        let op = self.state.op;
        let list = list_at(root, &at)?;
        let len = list.len();
        let in_bounds = index.filter(|i| *i < len);

        match op {
            EditOperation::Insert => {
                let entry = self.new_entry(&kind)?;
                let inserted = match in_bounds {
                    Some(i) => {
                        list.insert(i, entry);
                        i
                    }
                    None => {
                        list.push(entry);
                        len
                    }
                };
                self.contexts.shift_after_insert(&at, inserted);
                if inserted == len {
                    self.info(format!("added new {kind} entry to end of list"));
                } else {
                    self.info(format!("inserted new {kind} entry at index {inserted}"));
                }
                self.fill_inserted(root, at.child(Step::Index(inserted)), kind)
            }
            EditOperation::Remove => {
                let i = in_bounds.ok_or_else(|| self.out_of_range(op, len))?;
                list.remove(i);
                let discarded = self.contexts.shift_after_remove(&at, i);
                self.state.location = at.child(Step::Index(i));
                self.info(format!("removed entry at index {i}"));
                if discarded > 0 {
                    self.trace(format!("discarded {discarded} contexts inside removed entry"));
                }
                Ok(EditOutcome::Removed)
            }
            _ => {
                let i = in_bounds.ok_or_else(|| self.out_of_range(op, len))?;
                self.edit_slot(root, at.child(Step::Index(i)), kind)
            }
        }
    }

    fn edit_entry(
        &mut self,
        root: &mut Value,
        at: Location,
        key: MapKey,
        kind: Kind,
    ) -> Result<EditOutcome, EditFault> {
        let op = self.state.op;
        let map = map_at(root, &at)?;
        let exists = map.contains_key(&key);
        let location = at.child(Step::Key(key.clone()));

        match op {
            EditOperation::Insert if exists => {
                self.state.location = location;
                self.no_op(format!("key {key} already exists in target map, ignoring insert"));
                Ok(EditOutcome::NoOp)
            }
            EditOperation::Insert => {
                let entry = self.new_entry(&kind)?;
                map.insert(key.clone(), entry);
                self.info(format!("added key {key} to target map"));
                self.fill_inserted(root, location, kind)
            }
            _ if !exists => Err(EditFault::MissingKey {
                key: key.to_string(),
            }),
            EditOperation::Remove => {
                map.shift_remove(&key);
                let discarded = self.contexts.discard_within(&location, true);
                self.state.location = location;
                self.info(format!("removed key {key} from target map"));
                if discarded > 0 {
                    self.trace(format!("discarded {discarded} contexts inside removed entry"));
                }
                Ok(EditOutcome::Removed)
            }
            _ => self.edit_slot(root, location, kind),
        }
    }

    /// Default element for an insertion. Kinds without a default are only
    /// allowed when a value follows to fill the entry.
    fn new_entry(&self, kind: &Kind) -> Result<Value, EditFault> {
        match instantiate(kind) {
            Some(value) => Ok(value),
            None if self.state.value.trim().is_empty() => Err(EditFault::NoDefaultInstance {
                kind: kind.to_string(),
            }),
            None => Ok(Value::Null),
        }
    }

    /// Continues an insertion at the new entry.
    ///
    /// Without a value the entry stays at its default and, if it is a
    /// container, becomes the newest context. A type tag instantiates the
    /// tagged type; any other value is parsed into the entry.
    fn fill_inserted(&mut self, root: &mut Value, location: Location, kind: Kind) -> Result<EditOutcome, EditFault> {
        self.state.location = location.clone();
        self.state.target_kind = Some(kind.clone());
        if self.state.value.trim().is_empty() {
            if kind.is_structural() {
                self.push_context(location, kind);
            }
            return Ok(EditOutcome::Incomplete);
        }
        self.state.op = if kind != Kind::String && is_type_tag(&self.state.value) {
            EditOperation::DefaultValue
        } else {
            EditOperation::Overwrite
        };
        self.edit_slot(root, location, kind)
    }

    /// Applies the pending operation to a single slot.
    fn edit_slot(&mut self, root: &mut Value, location: Location, kind: Kind) -> Result<EditOutcome, EditFault> {
        let op = self.state.op;
        self.state.location = location.clone();
        self.state.target_kind = Some(kind.clone());

        match op {
            EditOperation::NullValue => {
                if kind.is_value_kind() {
                    return Err(EditFault::NullOnValueKind {
                        kind: kind.to_string(),
                    });
                }
                self.write(root, &location, Value::Null)?;
                self.info(format!("assigned null to {}", self.state.segment));
                return Ok(EditOutcome::Applied);
            }
            EditOperation::SetContext => {
                if kind.is_terminal() {
                    return Err(EditFault::ContextOnTerminal {
                        kind: kind.to_string(),
                    });
                }
                self.push_context(location, kind);
                return Ok(EditOutcome::ContextSet);
            }
            _ => {}
        }

        if kind == Kind::StringSet {
            return self.edit_string_set(root, location);
        }
        if matches!(op, EditOperation::Insert | EditOperation::Remove) {
            return Err(EditFault::UnsupportedOperation {
                op,
                kind: kind.to_string(),
            });
        }

        if kind.is_terminal() {
            let value = codec::decode(&kind, op, &self.state.value)?;
            let detail = format!("{kind} field modified with value {value}");
            self.write(root, &location, value)?;
            self.info(detail);
            return Ok(EditOutcome::Applied);
        }

        if op != EditOperation::DefaultValue {
            return Err(EditFault::NoParser {
                kind: kind.to_string(),
            });
        }
        let instance = self.default_instance(&kind)?;
        let detail = match &instance {
            Value::Record(record) => format!(
                "assigned new default {} to {}",
                record.type_name(),
                self.state.segment
            ),
            _ => format!("assigned new default {kind} to {}", self.state.segment),
        };
        self.write(root, &location, instance)?;
        self.info(detail);
        self.push_context(location, kind);
        Ok(EditOutcome::Applied)
    }

    fn edit_string_set(&mut self, root: &mut Value, location: Location) -> Result<EditOutcome, EditFault> {
        let op = self.state.op;
        if !matches!(
            op,
            EditOperation::Insert | EditOperation::Remove | EditOperation::DefaultValue
        ) {
            return Err(EditFault::UnsupportedOperation {
                op,
                kind: Kind::StringSet.to_string(),
            });
        }
        let value = self.state.value.clone();
        let slot = location.resolve_mut(root).ok_or_else(|| stale(&location))?;

        if op == EditOperation::DefaultValue {
            if !slot.is_null() {
                return Err(EditFault::SetExists);
            }
            *slot = Value::StringSet(IndexSet::new());
            self.info(format!("assigned new string set to {}", self.state.segment));
            return Ok(EditOutcome::Applied);
        }

        let Value::StringSet(set) = slot else {
            return Err(EditFault::SetMissing);
        };
        if op == EditOperation::Insert {
            if !set.insert(value.clone()) {
                self.no_op(format!("value {value} already exists in target set, ignoring insert"));
                return Ok(EditOutcome::NoOp);
            }
            self.info(format!("value {value} added to target set"));
        } else {
            if !set.shift_remove(&value) {
                self.no_op(format!("value {value} not found in target set, ignoring remove"));
                return Ok(EditOutcome::NoOp);
            }
            self.info(format!("value {value} removed from target set"));
        }
        Ok(EditOutcome::Applied)
    }

    /// Instance for a default-value reset of a container slot. A type tag
    /// picks a concrete record type assignable to the slot.
    fn default_instance(&self, kind: &Kind) -> Result<Value, EditFault> {
        let value = &self.state.value;
        if is_type_tag(value) {
            let def = self.tags.lookup(value).ok_or_else(|| EditFault::UnknownTag {
                tag: value.clone(),
            })?;
            if !kind.accepts(def) {
                return Err(EditFault::IncompatibleTag {
                    tag: value.clone(),
                    tag_type: def.name().to_string(),
                    field_type: kind.to_string(),
                });
            }
            return Ok(Value::Record(Record::new(def)));
        }
        instantiate(kind).ok_or_else(|| EditFault::NoDefaultInstance {
            kind: kind.to_string(),
        })
    }

    /// Replaces the value at `location`. Contexts inside the old value no
    /// longer exist afterwards.
    fn write(&mut self, root: &mut Value, location: &Location, value: Value) -> Result<(), EditFault> {
        let slot = location.resolve_mut(root).ok_or_else(|| stale(location))?;
        *slot = value;
        let discarded = self.contexts.discard_within(location, false);
        if discarded > 0 {
            self.trace(format!("discarded {discarded} contexts inside replaced {location}"));
        }
        Ok(())
    }

    fn out_of_range(&self, op: EditOperation, len: usize) -> EditFault {
        EditFault::ElementOutOfRange {
            op,
            segment: self.state.segment.clone(),
            len,
        }
    }
}

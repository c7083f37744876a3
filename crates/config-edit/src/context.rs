//! Locations and the context stack.
//!
//! A [`Location`] is the list of steps from the root object to a slot. The
//! context stack stores locations rather than references into the graph, so
//! every entry is re-resolved against the current graph when used. Entries
//! are rebased when a list they point into is shifted by an insert or a
//! remove.

use std::fmt;

use config_edit_path::SEGMENT_SEPARATOR;

use crate::schema::Kind;
use crate::value::{MapKey, Value};

/// One step from a container to a child slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    Field(String),
    Index(usize),
    Key(MapKey),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Field(name) => f.write_str(name),
            Step::Index(i) => write!(f, "{i}"),
            Step::Key(key) => write!(f, "{key}"),
        }
    }
}

/// Path of steps from the root object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    steps: Vec<Step>,
}

impl Location {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn child(&self, step: Step) -> Location {
        let mut steps = self.steps.clone();
        steps.push(step);
        Location { steps }
    }

    pub fn parent(&self) -> Option<Location> {
        let (_, head) = self.steps.split_last()?;
        Some(Location {
            steps: head.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// True if `self` is `other` or lies below it.
    pub fn starts_with(&self, other: &Location) -> bool {
        self.steps.starts_with(&other.steps)
    }

    /// True if `self` lies strictly below `other`.
    pub fn is_inside(&self, other: &Location) -> bool {
        self.steps.len() > other.steps.len() && self.starts_with(other)
    }

    /// Rendered step texts, for path reconstruction.
    pub fn segments(&self) -> Vec<String> {
        self.steps.iter().map(Step::to_string).collect()
    }

    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for step in &self.steps {
            current = child(current, step)?;
        }
        Some(current)
    }

    pub fn resolve_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        let mut current = root;
        for step in &self.steps {
            current = child_mut(current, step)?;
        }
        Some(current)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEGMENT_SEPARATOR}")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl From<Vec<Step>> for Location {
    fn from(steps: Vec<Step>) -> Self {
        Location { steps }
    }
}

fn child<'a>(value: &'a Value, step: &Step) -> Option<&'a Value> {
    match (value, step) {
        (Value::Record(record), Step::Field(name)) => record.get(name),
        (Value::List(list), Step::Index(i)) => list.get(*i),
        (Value::Map(map), Step::Key(key)) => map.get(key),
        _ => None,
    }
}

fn child_mut<'a>(value: &'a mut Value, step: &Step) -> Option<&'a mut Value> {
    match (value, step) {
        (Value::Record(record), Step::Field(name)) => record.get_mut(name),
        (Value::List(list), Step::Index(i)) => list.get_mut(*i),
        (Value::Map(map), Step::Key(key)) => map.get_mut(key),
        _ => None,
    }
}

/// A remembered slot edits can continue from.
#[derive(Debug, Clone, PartialEq)]
pub struct PathContext {
    pub location: Location,
    /// Declared kind of the slot.
    pub kind: Kind,
    /// Path segment the slot was resolved from.
    pub segment: String,
}

impl PathContext {
    pub fn index(&self) -> Option<usize> {
        match self.location.last()? {
            Step::Index(i) => Some(*i),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&MapKey> {
        match self.location.last()? {
            Step::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self.location.last()? {
            Step::Field(name) => Some(name),
            _ => None,
        }
    }
}

/// Stack of remembered contexts, addressed 1-based from the bottom.
#[derive(Debug, Clone, Default)]
pub struct ContextStack {
    entries: Vec<PathContext>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PathContext] {
        &self.entries
    }

    pub fn top(&self) -> Option<&PathContext> {
        self.entries.last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pushes a context and returns the new depth.
    pub fn push(&mut self, context: PathContext) -> usize {
        self.entries.push(context);
        self.entries.len()
    }

    /// Context at 1-based `depth`.
    pub fn get(&self, depth: usize) -> Option<&PathContext> {
        self.entries.get(depth.checked_sub(1)?)
    }

    /// Selects the context at `depth`, discarding every deeper entry.
    ///
    /// Leaves the stack untouched when `depth` is out of range.
    pub fn select(&mut self, depth: usize) -> Option<PathContext> {
        let context = self.get(depth)?.clone();
        self.entries.truncate(depth);
        Some(context)
    }

    /// Shifts entries pointing at or past `index` of the list at `sequence`
    /// up by one.
    pub fn shift_after_insert(&mut self, sequence: &Location, index: usize) {
        for entry in &mut self.entries {
            if let Some(location) = bump_index(sequence, index, &entry.location) {
                entry.location = location;
            }
        }
    }

    /// Rebases entries after element `index` of the list at `sequence` was
    /// removed.
    ///
    /// Entries inside the removed element are discarded along with every
    /// entry above them; entries past it shift down by one. Returns the
    /// number of discarded entries.
    pub fn shift_after_remove(&mut self, sequence: &Location, index: usize) -> usize {
        let removed = sequence.child(Step::Index(index));
        let discarded = self.discard_within(&removed, true);
        for entry in &mut self.entries {
            if let Some(location) = lower_index(sequence, index, &entry.location) {
                entry.location = location;
            }
        }
        discarded
    }

    /// Discards the first entry inside `slot` (or at it, when `inclusive`)
    /// and every entry above it. Returns the number of discarded entries.
    pub fn discard_within(&mut self, slot: &Location, inclusive: bool) -> usize {
        let hit = self.entries.iter().position(|entry| {
            if inclusive {
                entry.location.starts_with(slot)
            } else {
                entry.location.is_inside(slot)
            }
        });
        match hit {
            Some(position) => {
                let discarded = self.entries.len() - position;
                self.entries.truncate(position);
                discarded
            }
            None => 0,
        }
    }
}

/// Increments the index step of `location` that addresses the list at
/// `sequence`, if it is at or past `index`.
fn bump_index(sequence: &Location, index: usize, location: &Location) -> Option<Location> {
    let at = sequence.len();
    if !location.is_inside(sequence) {
        return None;
    }
    match location.steps[at] {
        Step::Index(i) if i >= index => {
            let mut steps = location.steps.clone();
            steps[at] = Step::Index(i + 1);
            Some(Location { steps })
        }
        _ => None,
    }
}

/// Decrements the index step of `location` that addresses the list at
/// `sequence`, if it is past `index`.
fn lower_index(sequence: &Location, index: usize, location: &Location) -> Option<Location> {
    let at = sequence.len();
    if !location.is_inside(sequence) {
        return None;
    }
    match location.steps[at] {
        Step::Index(i) if i > index => {
            let mut steps = location.steps.clone();
            steps[at] = Step::Index(i - 1);
            Some(Location { steps })
        }
        _ => None,
    }
}

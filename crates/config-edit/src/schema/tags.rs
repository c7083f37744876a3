//! Type tag registry.

use std::sync::Arc;

use indexmap::IndexMap;

use super::RecordDef;
use config_edit_path::TAG_PREFIX;

/// Maps `!tag` strings to concrete record types.
///
/// Tags are stored with their leading `!`; [`TagRegistry::register`] adds it
/// when missing.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: IndexMap<String, Arc<RecordDef>>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `def` under `tag`, returning the previous registration.
    pub fn register(&mut self, tag: &str, def: &Arc<RecordDef>) -> Option<Arc<RecordDef>> {
        self.tags.insert(normalize(tag), Arc::clone(def))
    }

    /// Chainable form of [`TagRegistry::register`].
    pub fn with(mut self, tag: &str, def: &Arc<RecordDef>) -> Self {
        self.register(tag, def);
        self
    }

    pub fn lookup(&self, tag: &str) -> Option<&Arc<RecordDef>> {
        self.tags.get(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<RecordDef>)> {
        self.tags.iter().map(|(tag, def)| (tag.as_str(), def))
    }

    /// One `tag: Type` line per registration.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (tag, def) in &self.tags {
            out.push_str(tag);
            out.push_str(": ");
            out.push_str(def.name());
            out.push('\n');
        }
        out
    }
}

fn normalize(tag: &str) -> String {
    if tag.starts_with(TAG_PREFIX) {
        tag.to_string()
    } else {
        format!("{TAG_PREFIX}{tag}")
    }
}

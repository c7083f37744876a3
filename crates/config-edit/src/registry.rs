//! Registry of loaded config objects.

use indexmap::IndexMap;

use crate::diagnostics::DiagnosticSink;
use crate::script::{EditScript, ScriptReport};
use crate::session::{EditSpec, Session};
use crate::value::Value;

/// Config objects by type name and file key.
#[derive(Debug, Clone, Default)]
pub struct ConfigRegistry {
    types: IndexMap<String, IndexMap<String, Value>>,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a config, returning the one previously stored under the same
    /// type and key.
    pub fn insert(
        &mut self,
        type_name: impl Into<String>,
        key: impl Into<String>,
        value: Value,
    ) -> Option<Value> {
        self.types
            .entry(type_name.into())
            .or_default()
            .insert(key.into(), value)
    }

    pub fn get(&self, type_name: &str, key: &str) -> Option<&Value> {
        self.types.get(type_name)?.get(key)
    }

    pub fn get_mut(&mut self, type_name: &str, key: &str) -> Option<&mut Value> {
        self.types.get_mut(type_name)?.get_mut(key)
    }

    pub fn keys<'a>(&'a self, type_name: &str) -> impl Iterator<Item = &'a str> {
        self.types
            .get(type_name)
            .into_iter()
            .flat_map(|configs| configs.keys().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.types.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds the key a config object is stored under by identity, not by
    /// value: `target` must be a reference into this registry.
    pub fn find_key(&self, type_name: &str, target: &Value) -> Option<&str> {
        self.types
            .get(type_name)?
            .iter()
            .find(|(_, value)| std::ptr::eq(*value, target))
            .map(|(key, _)| key.as_str())
    }

    /// Returns `key` unless it is empty, in which case the key `target` is
    /// stored under is looked up. Falls back to the empty key.
    pub fn resolve_file_key(&self, type_name: &str, target: &Value, key: &str) -> String {
        if !key.is_empty() {
            return key.to_string();
        }
        self.find_key(type_name, target)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Returns a copy of `spec` whose blank file key is replaced by the key
    /// `target` is stored under.
    ///
    /// Resolve with a shared borrow before taking `target` mutably for
    /// [`Session::process_field_edit`]. A key that cannot be found stays
    /// blank, and the session then tells files apart by object identity.
    pub fn resolve_spec(&self, spec: &EditSpec, target: &Value) -> EditSpec {
        if !spec.file_key.is_empty() {
            return spec.clone();
        }
        let file_key = self.resolve_file_key(&spec.type_name, target, &spec.file_key);
        if !file_key.is_empty() {
            log::trace!("resolved blank file key to {file_key} for type {}", spec.type_name);
        }
        EditSpec {
            file_key,
            ..spec.clone()
        }
    }

    /// Applies `script` to the config `base.type_name` / `base.file_key`.
    ///
    /// Returns `None` when no such config is registered. A blank key names no
    /// config; resolve it first with [`ConfigRegistry::resolve_spec`].
    pub fn apply_script<S: DiagnosticSink>(
        &mut self,
        session: &mut Session<S>,
        script: &EditScript,
        base: &EditSpec,
    ) -> Option<ScriptReport> {
        let root = self.get_mut(&base.type_name, &base.file_key)?;
        Some(session.apply_script(script, base, root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ConfigRegistry {
        let mut registry = ConfigRegistry::new();
        registry.insert("Unit", "mech_a", Value::Int(1));
        registry.insert("Unit", "mech_b", Value::Int(1));
        registry.insert("Part", "arm", Value::Int(2));
        registry
    }

    #[test]
    fn find_key_uses_identity() {
        let registry = registry();
        let target = registry.get("Unit", "mech_b").unwrap();
        assert_eq!(registry.find_key("Unit", target), Some("mech_b"));

        let copy = target.clone();
        assert_eq!(registry.find_key("Unit", &copy), None);
        assert_eq!(registry.find_key("Part", target), None);
    }

    #[test]
    fn resolve_file_key_prefers_given_key() {
        let registry = registry();
        let target = registry.get("Unit", "mech_a").unwrap();
        assert_eq!(registry.resolve_file_key("Unit", target, "explicit"), "explicit");
        assert_eq!(registry.resolve_file_key("Unit", target, ""), "mech_a");
        assert_eq!(registry.resolve_file_key("Unit", &Value::Null, ""), "");
    }

    #[test]
    fn resolve_spec_fills_blank_key() {
        let registry = registry();
        let target = registry.get("Unit", "mech_b").unwrap();

        let spec = EditSpec::new("Unit", "", "level", "1");
        let resolved = registry.resolve_spec(&spec, target);
        assert_eq!(resolved.file_key, "mech_b");
        assert_eq!(resolved.field_path, "level");

        let keyed = EditSpec::new("Unit", "explicit", "level", "1");
        assert_eq!(registry.resolve_spec(&keyed, target), keyed);

        let stray = Value::Int(1);
        assert_eq!(registry.resolve_spec(&spec, &stray).file_key, "");
    }

    #[test]
    fn keys_and_len() {
        let registry = registry();
        assert_eq!(registry.keys("Unit").collect::<Vec<_>>(), vec!["mech_a", "mech_b"]);
        assert_eq!(registry.keys("Missing").count(), 0);
        assert_eq!(registry.len(), 3);
    }
}

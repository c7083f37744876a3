//! Record definition builder.
//!
//! Provides a fluent API for declaring record field tables.

use std::sync::Arc;

use indexmap::IndexMap;

use super::{FieldDef, InterfaceDef, Kind, RecordDef};
use crate::value::Value;

/// Builder for [`RecordDef`].
///
/// ```
/// use config_edit::schema::{Kind, RecordDef};
///
/// let base = RecordDef::builder("Part")
///     .field("name", Kind::String)
///     .build();
/// let weapon = RecordDef::builder("WeaponPart")
///     .extends(&base)
///     .field("damage", Kind::Float)
///     .build();
///
/// assert_eq!(weapon.len(), 2);
/// assert!(weapon.is_a("Part"));
/// ```
#[derive(Debug)]
pub struct RecordDefBuilder {
    name: String,
    supertypes: Vec<String>,
    fields: IndexMap<String, FieldDef>,
}

impl RecordDefBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supertypes: Vec::new(),
            fields: IndexMap::new(),
        }
    }

    /// Inherits every field of `base` and makes the record assignable to it.
    pub fn extends(mut self, base: &RecordDef) -> Self {
        for field in base.fields() {
            self.fields.insert(field.name.clone(), field.clone());
        }
        self.add_supertype(base.name());
        for name in base.supertypes() {
            self.add_supertype(name);
        }
        self
    }

    pub fn implements(mut self, interface: &InterfaceDef) -> Self {
        self.add_supertype(interface.name());
        self
    }

    /// Declares a field starting at its kind's zero value.
    ///
    /// Redeclaring a field replaces its kind but keeps its position.
    pub fn field(self, name: impl Into<String>, kind: Kind) -> Self {
        self.insert(name.into(), kind, None)
    }

    /// Declares a field with an explicit initial value.
    pub fn field_with(self, name: impl Into<String>, kind: Kind, initial: impl Into<Value>) -> Self {
        self.insert(name.into(), kind, Some(initial.into()))
    }

    pub fn build(self) -> Arc<RecordDef> {
        Arc::new(RecordDef {
            name: self.name,
            supertypes: self.supertypes,
            fields: self.fields,
        })
    }

    fn insert(mut self, name: String, kind: Kind, initial: Option<Value>) -> Self {
        self.fields.insert(
            name.clone(),
            FieldDef {
                name,
                kind,
                initial,
            },
        );
        self
    }

    fn add_supertype(&mut self, name: &str) {
        if name != self.name && !self.supertypes.iter().any(|s| s == name) {
            self.supertypes.push(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declaration_order() {
        let def = RecordDef::builder("Stats")
            .field("hp", Kind::Int)
            .field("armor", Kind::Float)
            .field("speed", Kind::Float)
            .build();
        let names: Vec<&str> = def.fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["hp", "armor", "speed"]);
        assert_eq!(def.field_index("speed"), Some(2));
    }

    #[test]
    fn extends_is_transitive() {
        let iface = InterfaceDef::new("IPart");
        let base = RecordDef::builder("Part").implements(&iface).build();
        let mid = RecordDef::builder("WeaponPart").extends(&base).build();
        let leaf = RecordDef::builder("Cannon").extends(&mid).build();

        assert_eq!(leaf.supertypes(), &["WeaponPart", "Part", "IPart"]);
        assert!(leaf.is_a("IPart"));
    }

    #[test]
    fn redeclared_field_keeps_position() {
        let def = RecordDef::builder("A")
            .field("x", Kind::Int)
            .field("y", Kind::Int)
            .field_with("x", Kind::Float, 2.5f32)
            .build();
        assert_eq!(def.field_index("x"), Some(0));
        let x = def.field("x").unwrap();
        assert_eq!(x.kind, Kind::Float);
        assert_eq!(x.initial, Some(Value::Float(2.5)));
    }
}

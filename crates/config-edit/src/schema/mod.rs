//! Kinds and record definitions.
//!
//! Every slot in an object graph has a declared [`Kind`]. Records carry an
//! explicit field table ([`RecordDef`]) which is the lookup used when a path
//! segment names a field; nothing is discovered at runtime.

pub mod builder;
pub mod tags;

pub use builder::RecordDefBuilder;
pub use tags::TagRegistry;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::value::Value;

/// Declared type of a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    String,
    Bool,
    Int,
    Float,
    Vector2,
    Vector3,
    Vector4,
    Color,
    Enum(Arc<EnumDef>),
    StringSet,
    List(Box<Kind>),
    /// Key kind, value kind.
    Map(Box<Kind>, Box<Kind>),
    Record(Arc<RecordDef>),
    Interface(Arc<InterfaceDef>),
}

impl Kind {
    pub fn list(element: Kind) -> Self {
        Kind::List(Box::new(element))
    }

    pub fn map(key: Kind, value: Kind) -> Self {
        Kind::Map(Box::new(key), Box::new(value))
    }

    pub fn record(def: &Arc<RecordDef>) -> Self {
        Kind::Record(Arc::clone(def))
    }

    pub fn interface(def: &Arc<InterfaceDef>) -> Self {
        Kind::Interface(Arc::clone(def))
    }

    pub fn enumeration(def: &Arc<EnumDef>) -> Self {
        Kind::Enum(Arc::clone(def))
    }

    /// Value kinds can never hold an absent value.
    pub fn is_value_kind(&self) -> bool {
        matches!(
            self,
            Kind::Bool
                | Kind::Int
                | Kind::Float
                | Kind::Vector2
                | Kind::Vector3
                | Kind::Vector4
                | Kind::Color
                | Kind::Enum(_)
        )
    }

    /// Terminal kinds are edited through the value codec; paths stop at them.
    pub fn is_terminal(&self) -> bool {
        !self.is_structural()
    }

    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Kind::List(_) | Kind::Map(_, _) | Kind::Record(_) | Kind::Interface(_)
        )
    }

    /// Whether map entries keyed by this kind can be addressed by a path.
    pub fn is_supported_key(&self) -> bool {
        matches!(self, Kind::String | Kind::Int)
    }

    /// Whether a record of type `def` can be stored in a slot of this kind.
    pub fn accepts(&self, def: &RecordDef) -> bool {
        match self {
            Kind::Record(declared) => def.is_a(declared.name()),
            Kind::Interface(declared) => def.is_a(declared.name()),
            _ => false,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::String => f.write_str("string"),
            Kind::Bool => f.write_str("bool"),
            Kind::Int => f.write_str("int"),
            Kind::Float => f.write_str("float"),
            Kind::Vector2 => f.write_str("Vector2"),
            Kind::Vector3 => f.write_str("Vector3"),
            Kind::Vector4 => f.write_str("Vector4"),
            Kind::Color => f.write_str("Color"),
            Kind::Enum(def) => f.write_str(def.name()),
            Kind::StringSet => f.write_str("set<string>"),
            Kind::List(element) => write!(f, "list<{element}>"),
            Kind::Map(key, value) => write!(f, "map<{key}, {value}>"),
            Kind::Record(def) => f.write_str(def.name()),
            Kind::Interface(def) => f.write_str(def.name()),
        }
    }
}

/// A named field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub kind: Kind,
    /// Value a freshly constructed record starts with. `None` means the
    /// kind's zero value.
    pub initial: Option<Value>,
}

/// Field table of a record type.
#[derive(Debug)]
pub struct RecordDef {
    name: String,
    supertypes: Vec<String>,
    fields: IndexMap<String, FieldDef>,
}

impl RecordDef {
    pub fn builder(name: impl Into<String>) -> RecordDefBuilder {
        RecordDefBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the base records and interfaces this record can stand in for.
    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True if this record is `name` or derives from / implements it.
    pub fn is_a(&self, name: &str) -> bool {
        self.name == name || self.supertypes.iter().any(|s| s == name)
    }
}

impl PartialEq for RecordDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Abstract kind; slots of this kind are filled through type tags.
#[derive(Debug, PartialEq, Eq)]
pub struct InterfaceDef {
    name: String,
}

impl InterfaceDef {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { name: name.into() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Enumeration with ordered member names.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDef {
    name: String,
    members: Vec<String>,
}

impl EnumDef {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Member with the lowest ordinal.
    ///
    /// Treating it as the default assumes the enum's first member is also its
    /// logical zero; nothing enforces that.
    pub fn default_member(&self) -> Option<&str> {
        self.members.first().map(String::as_str)
    }

    /// Case-sensitive member lookup.
    pub fn member(&self, name: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.as_str() == name)
            .map(String::as_str)
    }
}

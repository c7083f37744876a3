//! The object graph edits are applied to.

pub mod color;
pub mod vector;

pub use color::{parse_color, ColorParseError};
pub use vector::{Color, Vector2, Vector3, Vector4};

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::defaults::zero_value;
use crate::schema::RecordDef;

/// Key of a map entry. Only string and int keyed maps are addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
    Str(String),
    Int(i32),
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Str(s) => f.write_str(s),
            MapKey::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::Str(s.to_string())
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        MapKey::Str(s)
    }
}

impl From<i32> for MapKey {
    fn from(i: i32) -> Self {
        MapKey::Int(i)
    }
}

/// A node of a config object graph.
///
/// `Null` is the absent value of reference kinds (strings, sets, lists,
/// maps, records).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    String(String),
    Bool(bool),
    Int(i32),
    Float(f32),
    Vector2(Vector2),
    Vector3(Vector3),
    Vector4(Vector4),
    Color(Color),
    /// Enum member name.
    Enum(String),
    StringSet(IndexSet<String>),
    List(Vec<Value>),
    Map(IndexMap<MapKey, Value>),
    Record(Record),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, for messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Vector2(_) => "Vector2",
            Value::Vector3(_) => "Vector3",
            Value::Vector4(_) => "Vector4",
            Value::Color(_) => "Color",
            Value::Enum(_) => "enum",
            Value::StringSet(_) => "set",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&IndexSet<String>> {
        match self {
            Value::StringSet(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<MapKey, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::String(s) | Value::Enum(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Vector2(v) => write!(f, "{v}"),
            Value::Vector3(v) => write!(f, "{v}"),
            Value::Vector4(v) => write!(f, "{v}"),
            Value::Color(c) => write!(f, "{c}"),
            Value::StringSet(set) => {
                f.write_str("{")?;
                for (i, item) in set.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(item)?;
                }
                f.write_str("}")
            }
            Value::List(list) => write!(f, "list[{}]", list.len()),
            Value::Map(map) => write!(f, "map[{}]", map.len()),
            Value::Record(record) => f.write_str(record.type_name()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f)
    }
}

impl From<Vector2> for Value {
    fn from(v: Vector2) -> Self {
        Value::Vector2(v)
    }
}

impl From<Vector3> for Value {
    fn from(v: Vector3) -> Self {
        Value::Vector3(v)
    }
}

impl From<Vector4> for Value {
    fn from(v: Vector4) -> Self {
        Value::Vector4(v)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl From<Vec<Value>> for Value {
    fn from(list: Vec<Value>) -> Self {
        Value::List(list)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

/// An instance of a record type.
///
/// Holds one value per field of its [`RecordDef`], in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    def: Arc<RecordDef>,
    values: Vec<Value>,
}

impl Record {
    /// Constructs a record with every field at its initial value.
    pub fn new(def: &Arc<RecordDef>) -> Self {
        let values = def
            .fields()
            .map(|field| {
                field
                    .initial
                    .clone()
                    .unwrap_or_else(|| zero_value(&field.kind))
            })
            .collect();
        Self {
            def: Arc::clone(def),
            values,
        }
    }

    pub fn def(&self) -> &Arc<RecordDef> {
        &self.def
    }

    pub fn type_name(&self) -> &str {
        self.def.name()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(self.def.field_index(field)?)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        let index = self.def.field_index(field)?;
        self.values.get_mut(index)
    }

    /// Replaces a field value, returning the old one. Unknown fields are
    /// left alone and `None` is returned.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Option<Value> {
        let slot = self.get_mut(field)?;
        Some(std::mem::replace(slot, value.into()))
    }

    /// Chainable form of [`Record::set`].
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.def
            .fields()
            .map(|field| field.name.as_str())
            .zip(self.values.iter())
    }
}

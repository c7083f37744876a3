//! Default instances and zero values per kind.

use indexmap::{IndexMap, IndexSet};

use crate::schema::Kind;
use crate::value::{Color, Record, Value, Vector2, Vector3, Vector4};

/// Builds the default instance for a kind.
///
/// Returns `None` for kinds with no constructible default: interfaces and
/// enums without members.
///
/// ```
/// use config_edit::defaults::instantiate;
/// use config_edit::schema::Kind;
/// use config_edit::value::Value;
///
/// assert_eq!(instantiate(&Kind::String), Some(Value::String(String::new())));
/// assert_eq!(instantiate(&Kind::list(Kind::Int)), Some(Value::List(Vec::new())));
/// ```
pub fn instantiate(kind: &Kind) -> Option<Value> {
    let value = match kind {
        Kind::String => Value::String(String::new()),
        Kind::Bool => Value::Bool(false),
        Kind::Int => Value::Int(0),
        Kind::Float => Value::Float(0.0),
        Kind::Vector2 => Value::Vector2(Vector2::ZERO),
        Kind::Vector3 => Value::Vector3(Vector3::ZERO),
        Kind::Vector4 => Value::Vector4(Vector4::ZERO),
        Kind::Color => Value::Color(Color::default()),
        Kind::Enum(def) => Value::Enum(def.default_member()?.to_string()),
        Kind::StringSet => Value::StringSet(IndexSet::new()),
        Kind::List(_) => Value::List(Vec::new()),
        Kind::Map(_, _) => Value::Map(IndexMap::new()),
        Kind::Record(def) => Value::Record(Record::new(def)),
        Kind::Interface(_) => return None,
    };
    Some(value)
}

/// The value an uninitialised field of this kind holds.
///
/// Value kinds get their default instance; reference kinds are absent.
pub fn zero_value(kind: &Kind) -> Value {
    if kind.is_value_kind() {
        instantiate(kind).unwrap_or_default()
    } else {
        Value::Null
    }
}

//! Raw text to typed value conversion for terminal kinds.
//!
//! String sets are not handled here; their insert/remove semantics live in
//! the applier.

use config_edit_path::EditOperation;

use crate::error::EditFault;
use crate::schema::Kind;
use crate::value::{parse_color, Color, Value, Vector2, Vector3, Vector4};

/// Parses an invariant-culture integer. Surrounding whitespace and a leading
/// sign are accepted.
pub fn parse_int(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

/// Parses an invariant-culture float with optional exponent.
pub fn parse_float(raw: &str) -> Option<f32> {
    raw.trim().parse().ok()
}

/// Converts an operator-stripped raw value into a value of `kind`.
///
/// Under [`EditOperation::DefaultValue`] the raw text is never consulted and
/// the kind's reset value is returned.
///
/// # Errors
///
/// Value faults for unparsable input; [`EditFault::NoParser`] for
/// structural kinds and string sets.
///
/// ```
/// use config_edit::codec::decode;
/// use config_edit::schema::Kind;
/// use config_edit::value::{Value, Vector3};
/// use config_edit_path::EditOperation;
///
/// let v = decode(&Kind::Vector3, EditOperation::Overwrite, "(1,2,3)").unwrap();
/// assert_eq!(v, Value::Vector3(Vector3::new(1.0, 2.0, 3.0)));
/// assert!(decode(&Kind::Vector3, EditOperation::Overwrite, "(1,2)").is_err());
/// ```
pub fn decode(kind: &Kind, op: EditOperation, raw: &str) -> Result<Value, EditFault> {
    let reset = op == EditOperation::DefaultValue;
    let value = match kind {
        Kind::String if reset => Value::Null,
        Kind::String => Value::String(raw.to_string()),
        Kind::Bool => Value::Bool(!reset && raw.eq_ignore_ascii_case("true")),
        Kind::Int if reset => Value::Int(0),
        Kind::Int => Value::Int(parse_int(raw).ok_or_else(|| invalid(kind, raw, "not an integer"))?),
        Kind::Float if reset => Value::Float(0.0),
        Kind::Float => Value::Float(parse_float(raw).ok_or_else(|| invalid(kind, raw, "not a number"))?),
        Kind::Vector2 if reset => Value::Vector2(Vector2::ZERO),
        Kind::Vector2 => Value::Vector2(components::<2>(kind, raw)?.into()),
        Kind::Vector3 if reset => Value::Vector3(Vector3::ZERO),
        Kind::Vector3 => Value::Vector3(components::<3>(kind, raw)?.into()),
        Kind::Vector4 if reset => Value::Vector4(Vector4::ZERO),
        Kind::Vector4 => Value::Vector4(components::<4>(kind, raw)?.into()),
        Kind::Color if reset => Value::Color(Color::BLACK),
        Kind::Color => {
            let inner = parenthesized(kind, raw)?;
            Value::Color(parse_color(inner).map_err(|e| invalid(kind, raw, e))?)
        }
        Kind::Enum(def) if reset => {
            let member = def.default_member().ok_or_else(|| EditFault::NoDefaultInstance {
                kind: kind.to_string(),
            })?;
            Value::Enum(member.to_string())
        }
        Kind::Enum(def) => {
            let member = def.member(raw).ok_or_else(|| EditFault::UnknownEnumMember {
                enum_name: def.name().to_string(),
                raw: raw.to_string(),
            })?;
            Value::Enum(member.to_string())
        }
        Kind::StringSet | Kind::List(_) | Kind::Map(_, _) | Kind::Record(_) | Kind::Interface(_) => {
            return Err(EditFault::NoParser {
                kind: kind.to_string(),
            })
        }
    };
    Ok(value)
}

fn invalid(kind: &Kind, raw: &str, reason: impl ToString) -> EditFault {
    EditFault::InvalidValue {
        kind: kind.to_string(),
        raw: raw.to_string(),
        reason: reason.to_string(),
    }
}

fn parenthesized<'a>(kind: &Kind, raw: &'a str) -> Result<&'a str, EditFault> {
    raw.strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| invalid(kind, raw, "missing parentheses"))
}

fn components<const N: usize>(kind: &Kind, raw: &str) -> Result<[f32; N], EditFault> {
    let inner = parenthesized(kind, raw)?;
    let parts: Vec<&str> = inner.split(',').collect();
    if parts.len() != N {
        return Err(invalid(
            kind,
            raw,
            format!("expected {} components, found {}", N, parts.len()),
        ));
    }
    let mut out = [0.0f32; N];
    for (i, (slot, part)) in out.iter_mut().zip(&parts).enumerate() {
        *slot = parse_float(part)
            .ok_or_else(|| invalid(kind, raw, format!("component {} is not a number", i + 1)))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaultClass;
    use crate::schema::EnumDef;

    const SET: EditOperation = EditOperation::Overwrite;
    const RESET: EditOperation = EditOperation::DefaultValue;

    #[test]
    fn strings() {
        assert_eq!(decode(&Kind::String, SET, " a b "), Ok(Value::from(" a b ")));
        assert_eq!(decode(&Kind::String, RESET, "ignored"), Ok(Value::Null));
    }

    #[test]
    fn bools() {
        assert_eq!(decode(&Kind::Bool, SET, "TRUE"), Ok(Value::Bool(true)));
        assert_eq!(decode(&Kind::Bool, SET, "yes"), Ok(Value::Bool(false)));
        assert_eq!(decode(&Kind::Bool, RESET, "true"), Ok(Value::Bool(false)));
    }

    #[test]
    fn numbers() {
        assert_eq!(decode(&Kind::Int, SET, " -12 "), Ok(Value::Int(-12)));
        assert_eq!(decode(&Kind::Int, RESET, "garbage"), Ok(Value::Int(0)));
        assert_eq!(decode(&Kind::Float, SET, "1.5e2"), Ok(Value::Float(150.0)));

        let fault = decode(&Kind::Int, SET, "1.5").unwrap_err();
        assert_eq!(fault.class(), FaultClass::Value);
        assert!(decode(&Kind::Float, SET, "1,5").is_err());
    }

    #[test]
    fn vectors() {
        assert_eq!(
            decode(&Kind::Vector2, SET, "( 1 , -2 )"),
            Ok(Value::Vector2(Vector2::new(1.0, -2.0)))
        );
        assert_eq!(
            decode(&Kind::Vector4, RESET, "nonsense"),
            Ok(Value::Vector4(Vector4::ZERO))
        );

        let missing = decode(&Kind::Vector3, SET, "1,2,3").unwrap_err();
        assert!(missing.to_string().contains("missing parentheses"));
        let arity = decode(&Kind::Vector3, SET, "(1,2,3,4)").unwrap_err();
        assert!(arity.to_string().contains("expected 3 components, found 4"));
        assert!(decode(&Kind::Vector2, SET, "(1,x)").is_err());
    }

    #[test]
    fn colors() {
        assert_eq!(
            decode(&Kind::Color, SET, "(1, 0, 0)"),
            Ok(Value::Color(Color::rgb(1.0, 0.0, 0.0)))
        );
        assert_eq!(decode(&Kind::Color, RESET, ""), Ok(Value::Color(Color::BLACK)));

        let fault = decode(&Kind::Color, SET, "(1, 0)").unwrap_err();
        assert_eq!(fault.class(), FaultClass::Value);
        assert!(fault.to_string().contains("expected 3 or 4 color channels"));
    }

    #[test]
    fn enums() {
        let def = EnumDef::new("Rarity", ["Common", "Rare", "Epic"]);
        let kind = Kind::enumeration(&def);
        assert_eq!(decode(&kind, SET, "Epic"), Ok(Value::Enum("Epic".into())));
        assert_eq!(decode(&kind, RESET, "Epic"), Ok(Value::Enum("Common".into())));
        assert_eq!(
            decode(&kind, SET, "epic"),
            Err(EditFault::UnknownEnumMember {
                enum_name: "Rarity".into(),
                raw: "epic".into()
            })
        );
    }

    #[test]
    fn structural_kinds_have_no_parser() {
        let fault = decode(&Kind::list(Kind::Int), SET, "[1,2]").unwrap_err();
        assert_eq!(fault.class(), FaultClass::Policy);
        assert!(decode(&Kind::StringSet, SET, "a").is_err());
    }
}

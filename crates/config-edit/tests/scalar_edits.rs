mod common;

use common::*;
use config_edit::value::{Color, Value, Vector2, Vector3, Vector4};
use config_edit::{EditFault, EditOutcome, FaultClass};

#[test]
fn test_overwrite_every_terminal_kind() {
    let fx = schema();
    let mut root = unit(&fx);
    let mut s = session(&fx);

    let edits = [
        ("name", "Heavy Mech"),
        ("level", "12"),
        ("mass", " 2.5 "),
        ("active", "True"),
        ("anchor", "(1, 2)"),
        ("offset", "(1,2,3)"),
        ("bounds", "(1, 2, 3, 4)"),
        ("tint", "(1, 0.5, 0, 0.25)"),
        ("rarity", "Epic"),
        ("stats.hp", "250"),
    ];
    for (path, value) in edits {
        assert_eq!(edit(&mut s, &mut root, path, value), EditOutcome::Applied, "{path}");
    }

    assert_eq!(at(&root, "name"), &Value::from("Heavy Mech"));
    assert_eq!(at(&root, "level"), &Value::Int(12));
    assert_eq!(at(&root, "mass"), &Value::Float(2.5));
    assert_eq!(at(&root, "active"), &Value::Bool(true));
    assert_eq!(at(&root, "anchor"), &Value::Vector2(Vector2::new(1.0, 2.0)));
    assert_eq!(at(&root, "offset"), &Value::Vector3(Vector3::new(1.0, 2.0, 3.0)));
    assert_eq!(at(&root, "bounds"), &Value::Vector4(Vector4::new(1.0, 2.0, 3.0, 4.0)));
    assert_eq!(at(&root, "tint"), &Value::Color(Color::rgba(1.0, 0.5, 0.0, 0.25)));
    assert_eq!(at(&root, "rarity"), &Value::Enum("Epic".into()));
    assert_eq!(at(&root, "stats.hp"), &Value::Int(250));
    assert!(!s.is_faulted());
}

#[test]
fn test_bool_accepts_only_true() {
    let fx = schema();
    let mut root = unit(&fx);
    let mut s = session(&fx);

    edit(&mut s, &mut root, "active", "TRUE");
    assert_eq!(at(&root, "active"), &Value::Bool(true));
    assert_eq!(edit(&mut s, &mut root, "active", "yes"), EditOutcome::Applied);
    assert_eq!(at(&root, "active"), &Value::Bool(false));
}

#[test]
fn test_default_value_resets_without_reading_value() {
    let fx = schema();
    let mut root = unit(&fx);
    let mut s = session(&fx);

    edit(&mut s, &mut root, "offset", "(4, 5, 6)");
    edit(&mut s, &mut root, "rarity", "Rare");
    edit(&mut s, &mut root, "active", "true");

    for path in ["level", "mass", "active", "offset", "tint", "rarity", "name"] {
        assert_eq!(edit(&mut s, &mut root, path, "garbage !d"), EditOutcome::Applied, "{path}");
    }
    assert_eq!(at(&root, "level"), &Value::Int(0));
    assert_eq!(at(&root, "mass"), &Value::Float(0.0));
    assert_eq!(at(&root, "active"), &Value::Bool(false));
    assert_eq!(at(&root, "offset"), &Value::Vector3(Vector3::ZERO));
    assert_eq!(at(&root, "tint"), &Value::Color(Color::BLACK));
    assert_eq!(at(&root, "rarity"), &Value::Enum("Common".into()));
    assert_eq!(at(&root, "name"), &Value::Null);
}

#[test]
fn test_unparseable_values_leave_field_unchanged() {
    let fx = schema();
    let mut root = unit(&fx);
    let mut s = lenient_session(&fx);

    let cases = [
        ("level", "abc"),
        ("level", "1.5"),
        ("mass", "heavy"),
        ("offset", "(1,2)"),
        ("offset", "1,2,3"),
        ("offset", "(1,x,3)"),
        ("tint", "(1, 1)"),
    ];
    for (path, value) in cases {
        let outcome = edit(&mut s, &mut root, path, value);
        assert_eq!(fault(&outcome).class(), FaultClass::Value, "{path}: {value}");
    }

    assert_eq!(at(&root, "level"), &Value::Int(3));
    assert_eq!(at(&root, "mass"), &Value::Float(0.0));
    assert_eq!(at(&root, "offset"), &Value::Vector3(Vector3::ZERO));
    assert_eq!(at(&root, "tint"), &Value::Color(Color::default()));
}

#[test]
fn test_enum_members_match_exactly() {
    let fx = schema();
    let mut root = unit(&fx);
    let mut s = lenient_session(&fx);

    let outcome = edit(&mut s, &mut root, "rarity", "epic");
    assert_eq!(
        outcome,
        EditOutcome::Faulted(EditFault::UnknownEnumMember {
            enum_name: "Rarity".into(),
            raw: "epic".into(),
        })
    );
    assert_eq!(at(&root, "rarity"), &Value::Enum("Common".into()));

    assert_eq!(edit(&mut s, &mut root, "rarity", "Rare"), EditOutcome::Applied);
    assert_eq!(at(&root, "rarity"), &Value::Enum("Rare".into()));
}

#[test]
fn test_null_only_on_reference_kinds() {
    let fx = schema();
    let mut root = unit(&fx);
    let mut s = lenient_session(&fx);

    let outcome = edit(&mut s, &mut root, "level", "!n");
    assert!(matches!(fault(&outcome), EditFault::NullOnValueKind { .. }));
    assert_eq!(fault(&outcome).class(), FaultClass::Policy);
    assert_eq!(at(&root, "level"), &Value::Int(3));

    assert_eq!(edit(&mut s, &mut root, "name", "!n"), EditOutcome::Applied);
    assert_eq!(at(&root, "name"), &Value::Null);

    assert_eq!(edit(&mut s, &mut root, "stats", "!n"), EditOutcome::Applied);
    assert_eq!(at(&root, "stats"), &Value::Null);
}

#[test]
fn test_operations_rejected_on_terminal_fields() {
    let fx = schema();
    let mut root = unit(&fx);
    let mut s = lenient_session(&fx);

    for value in ["5 !+", "!-"] {
        let outcome = edit(&mut s, &mut root, "level", value);
        assert!(matches!(fault(&outcome), EditFault::UnsupportedOperation { .. }));
    }
    let outcome = edit(&mut s, &mut root, "tint", "!^");
    assert!(matches!(fault(&outcome), EditFault::ContextOnTerminal { .. }));
    assert_eq!(at(&root, "level"), &Value::Int(3));
}

#[test]
fn test_structural_overwrite_needs_default_value() {
    let fx = schema();
    let mut root = unit(&fx);
    let mut s = lenient_session(&fx);

    let outcome = edit(&mut s, &mut root, "stats", "5");
    assert!(matches!(fault(&outcome), EditFault::NoParser { .. }));
    assert_eq!(at(&root, "stats.hp"), &Value::Int(100));

    assert_eq!(edit(&mut s, &mut root, "stats", "!d"), EditOutcome::Applied);
    assert_eq!(at(&root, "stats.hp"), &Value::Int(0));
    assert_eq!(at(&root, "stats.speed"), &Value::Float(1.0));
}

#[test]
fn test_structural_faults_name_the_segment() {
    let fx = schema();
    let mut root = unit(&fx);
    let mut s = lenient_session(&fx);

    let outcome = edit(&mut s, &mut root, "stats.hpp", "1");
    assert_eq!(
        outcome,
        EditOutcome::Faulted(EditFault::UnknownField {
            field: "hpp".into(),
            type_name: "Stats".into(),
        })
    );

    let outcome = edit(&mut s, &mut root, "level.x", "1");
    assert!(matches!(fault(&outcome), EditFault::NotAContainer { segment, .. } if segment == "x"));

    let outcome = edit(&mut s, &mut root, "core.name", "x");
    assert!(matches!(fault(&outcome), EditFault::NullTarget { segment } if segment == "name"));

    let outcome = edit(&mut s, &mut root, "stats..hp", "1");
    assert!(matches!(fault(&outcome), EditFault::Path(_)));

    for outcome in [
        edit(&mut s, &mut root, "stats.hpp", "1"),
        edit(&mut s, &mut root, "core.name", "x"),
    ] {
        assert_eq!(fault(&outcome).class(), FaultClass::Structural);
    }
}

#[test]
fn test_root_must_be_a_record() {
    let fx = schema();
    let mut root = Value::Int(1);
    let mut s = session(&fx);

    let outcome = edit(&mut s, &mut root, "level", "2");
    assert!(matches!(fault(&outcome), EditFault::RootNotRecord { .. }));
}

#[test]
fn test_empty_path_or_value_is_ignored() {
    let fx = schema();
    let mut root = unit(&fx);
    let before = root.clone();
    let mut s = session(&fx);

    assert_eq!(edit(&mut s, &mut root, "", "5"), EditOutcome::Ignored);
    assert_eq!(edit(&mut s, &mut root, "level", ""), EditOutcome::Ignored);
    assert_eq!(root, before);
    assert!(s.sink().faults().is_empty());
}

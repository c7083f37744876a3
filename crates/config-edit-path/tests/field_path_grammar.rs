use config_edit_path::{
    context_depth, is_type_tag, parse_field_path, parse_index, parse_operation, EditOperation,
    FieldPath, PathError,
};

#[test]
fn test_context_path_keeps_tail_segments() {
    let path = parse_field_path("^^^.effects.*").unwrap();
    assert_eq!(
        path,
        FieldPath {
            context_depth: 3,
            segments: vec!["effects".to_string(), "*".to_string()],
        }
    );
    assert_eq!(path.to_string(), "^^^.effects.*");
}

#[test]
fn test_marker_like_field_names_are_plain_segments() {
    let path = parse_field_path("a^.b").unwrap();
    assert_eq!(path.context_depth, 0);
    assert_eq!(context_depth("a^"), None);
}

#[test]
fn test_trailing_separator_is_an_empty_segment() {
    assert_eq!(
        parse_field_path("stats."),
        Err(PathError::EmptySegment { position: 2 })
    );
    assert_eq!(
        parse_field_path("^."),
        Err(PathError::EmptySegment { position: 2 })
    );
}

#[test]
fn test_index_parsing_matches_invariant_integer_rules() {
    assert_eq!(parse_index("0"), Some(0));
    assert_eq!(parse_index("007"), Some(7));
    assert_eq!(parse_index("-0"), Some(0));
    assert_eq!(parse_index("1.5"), None);
    assert_eq!(parse_index("99999999999"), None);
}

#[test]
fn test_operator_and_tag_combination() {
    let (op, value) = parse_operation("!effect_damage !d");
    assert_eq!(op, EditOperation::DefaultValue);
    assert!(is_type_tag(value));

    let (op, value) = parse_operation("plain");
    assert_eq!(op, EditOperation::Overwrite);
    assert!(!is_type_tag(value));
}

#[test]
fn test_empty_value_after_operator() {
    let (op, value) = parse_operation(" !+");
    assert_eq!(op, EditOperation::Insert);
    assert_eq!(value, "");
}

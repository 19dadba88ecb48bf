use columnio_core::{
    ColumnPath, LogicalType, MessageType, PrimitiveKind, PrimitiveType, Repetition, SchemaError,
    Type,
};
use columnio_parser::{ParseError, parse_message_type};

const DOCUMENT: &str = "
message Document {
  required int64 DocId;
  optional group Links {
    repeated int64 Backward;
    repeated int64 Forward;
  }
  repeated group Name {
    repeated group Language {
      required binary Code (UTF8);
      optional binary Country (UTF8);
    }
    optional binary Url (UTF8);
  }
}
";

#[test]
fn parses_nested_document_schema() -> Result<(), ParseError> {
    let schema = parse_message_type(DOCUMENT)?;

    assert_eq!(schema.name, "Document");
    let paths: Vec<String> = schema.leaf_paths().iter().map(|p| p.join(".")).collect();
    assert_eq!(
        paths,
        vec![
            "DocId",
            "Links.Backward",
            "Links.Forward",
            "Name.Language.Code",
            "Name.Language.Country",
            "Name.Url",
        ]
    );
    assert_eq!(
        schema.type_at(&["Name", "Language", "Code"]),
        Some(&Type::Primitive(
            PrimitiveType::new("Code", Repetition::Required, PrimitiveKind::Binary)
                .with_logical(LogicalType::Utf8)
        ))
    );
    Ok(())
}

#[test]
fn rendered_schema_parses_back() -> Result<(), ParseError> {
    let schema = parse_message_type(DOCUMENT)?;
    assert_eq!(parse_message_type(&schema.to_string())?, schema);
    Ok(())
}

#[test]
fn single_line_schema_with_parameters() -> Result<(), ParseError> {
    let schema = parse_message_type(
        "message m { required fixed_len_byte_array(12) amount (DECIMAL(20, 4)); optional int96 ts; }",
    )?;

    let expected = MessageType::new(
        "m",
        vec![
            PrimitiveType::new(
                "amount",
                Repetition::Required,
                PrimitiveKind::FixedLenByteArray(12),
            )
            .with_logical(LogicalType::Decimal {
                precision: 20,
                scale: 4,
            })
            .into(),
            Type::primitive("ts", Repetition::Optional, PrimitiveKind::Int96),
        ],
    );
    assert_eq!(schema, expected);
    Ok(())
}

#[test]
fn comments_are_ignored() -> Result<(), ParseError> {
    let schema = parse_message_type(
        "# header comment
message m {
  required int32 a; // trailing comment
  optional group b (MAP) {
    repeated group key_value (MAP_KEY_VALUE) {
      required binary key (UTF8);
      optional int64 value;
    }
  }
}",
    )?;
    assert_eq!(schema.leaf_count(), 3);
    assert_eq!(schema.field("b").and_then(Type::logical), Some(LogicalType::Map));
    Ok(())
}

#[test]
fn unknown_primitive_reports_line() {
    let err = parse_message_type("message m {\n  required int33 a;\n}").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { line: 2, .. }), "{err}");
}

#[test]
fn missing_semicolon_is_rejected() {
    let err = parse_message_type("message m {\n  required int32 a\n}").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }), "{err}");
}

#[test]
fn unclosed_message_is_rejected() {
    let err = parse_message_type("message m {\n  required int32 a;\n").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }), "{err}");
}

#[test]
fn statement_after_message_is_rejected() {
    let err = parse_message_type("message m { required int32 a; } required int32 b;").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }), "{err}");
}

#[test]
fn keyword_prefix_is_not_a_keyword() {
    assert!(parse_message_type("message m { requiredx int32 a; }").is_err());
    assert!(parse_message_type("message m { required int32x a; }").is_err());
}

#[test]
fn duplicate_fields_surface_as_schema_error() {
    let err =
        parse_message_type("message m { required int32 a; optional int64 a; }").unwrap_err();
    assert_eq!(
        err,
        ParseError::Schema(SchemaError::Malformed {
            path: ColumnPath::from("a"),
            detail: "duplicate field name 'a'".to_string(),
        })
    );
}

#[test]
fn empty_input_is_rejected() {
    assert!(matches!(
        parse_message_type("  \n // nothing\n"),
        Err(ParseError::Syntax { line: 1, .. })
    ));
}

#[test]
fn out_of_range_parameters_are_rejected() {
    let long = parse_message_type("message m { required fixed_len_byte_array(4294967297) x; }");
    assert!(matches!(long, Err(ParseError::Schema(_))), "{long:?}");

    let decimal = parse_message_type("message m { required int64 x (DECIMAL(300,200)); }");
    assert!(matches!(decimal, Err(ParseError::Schema(_))), "{decimal:?}");

    let mismatched = parse_message_type("message m { optional boolean flag (UTF8); }");
    assert!(matches!(mismatched, Err(ParseError::Schema(_))), "{mismatched:?}");
}

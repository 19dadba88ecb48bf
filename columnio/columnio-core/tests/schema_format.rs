use columnio_core::{
    GroupType, LogicalType, MessageType, PrimitiveKind, PrimitiveType, Repetition, Type,
    format_message_type,
};

#[test]
fn nested_group_is_rendered_as_indented_block() -> Result<(), std::fmt::Error> {
    let message = MessageType::new(
        "doc",
        vec![
            Type::primitive("id", Repetition::Required, PrimitiveKind::Int64),
            GroupType::new(
                "links",
                Repetition::Optional,
                vec![
                    Type::primitive("backward", Repetition::Repeated, PrimitiveKind::Int64),
                    PrimitiveType::new("title", Repetition::Optional, PrimitiveKind::Binary)
                        .with_logical(LogicalType::Utf8)
                        .into(),
                ],
            )
            .into(),
        ],
    );

    let text = format_message_type(&message)?;
    let expected = "\
message doc {
  required int64 id;
  optional group links {
    repeated int64 backward;
    optional binary title (UTF8);
  }
}
";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn fixed_len_and_decimal_render_their_parameters() -> Result<(), std::fmt::Error> {
    let message = MessageType::new(
        "m",
        vec![
            PrimitiveType::new(
                "price",
                Repetition::Required,
                PrimitiveKind::FixedLenByteArray(16),
            )
            .with_logical(LogicalType::Decimal {
                precision: 38,
                scale: 9,
            })
            .into(),
            GroupType::new(
                "tags",
                Repetition::Optional,
                vec![Type::primitive(
                    "element",
                    Repetition::Repeated,
                    PrimitiveKind::Binary,
                )],
            )
            .with_logical(LogicalType::List)
            .into(),
        ],
    );

    let text = format_message_type(&message)?;
    assert!(text.contains("required fixed_len_byte_array(16) price (DECIMAL(38,9));"));
    assert!(text.contains("optional group tags (LIST) {"));
    Ok(())
}

#[test]
fn display_matches_formatter() -> Result<(), std::fmt::Error> {
    let message = MessageType::new(
        "m",
        vec![Type::primitive("a", Repetition::Required, PrimitiveKind::Int32)],
    );
    assert_eq!(message.to_string(), format_message_type(&message)?);
    Ok(())
}

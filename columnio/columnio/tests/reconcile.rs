use columnio::{
    ColumnIoError, ColumnIoFactory, MatchedNode, is_widening,
    core::{
        ColumnPath, GroupType, LogicalType, MessageType, PrimitiveKind, PrimitiveType, Repetition,
        SchemaError, Type,
    },
    reconcile,
};

fn full() -> MessageType {
    MessageType::new(
        "m",
        vec![
            Type::primitive("a", Repetition::Required, PrimitiveKind::Int32),
            Type::group(
                "b",
                Repetition::Required,
                vec![
                    PrimitiveType::new("c", Repetition::Optional, PrimitiveKind::Binary)
                        .with_logical(LogicalType::Utf8)
                        .into(),
                    Type::primitive("d", Repetition::Repeated, PrimitiveKind::Int64),
                ],
            ),
            Type::primitive("f", Repetition::Optional, PrimitiveKind::Float),
        ],
    )
}

fn lenient() -> ColumnIoFactory {
    ColumnIoFactory::builder().strict_type_checking(false).build()
}

#[test]
fn missing_field_is_a_schema_mismatch() {
    let requested = MessageType::new(
        "m",
        vec![Type::group(
            "b",
            Repetition::Required,
            vec![Type::primitive("x", Repetition::Optional, PrimitiveKind::Int32)],
        )],
    );

    let err = reconcile(&full(), &requested, true).unwrap_err();
    assert!(
        matches!(&err, ColumnIoError::SchemaMismatch { path, .. } if path == &ColumnPath::from("b.x")),
        "{err}"
    );
}

#[test]
fn repetition_mismatch_is_a_schema_mismatch() {
    let requested = MessageType::new(
        "m",
        vec![Type::primitive("a", Repetition::Repeated, PrimitiveKind::Int32)],
    );

    for factory in [ColumnIoFactory::new(), lenient()] {
        let err = factory.column_io(&full(), &requested).unwrap_err();
        assert!(
            matches!(err, ColumnIoError::SchemaMismatch { .. }),
            "{err}"
        );
    }
}

#[test]
fn group_requested_as_primitive_always_conflicts() {
    let requested = MessageType::new(
        "m",
        vec![Type::primitive("b", Repetition::Required, PrimitiveKind::Int32)],
    );

    for factory in [ColumnIoFactory::new(), lenient()] {
        let err = factory.column_io(&full(), &requested).unwrap_err();
        assert_eq!(
            err,
            ColumnIoError::TypeConflict {
                path: ColumnPath::from("b"),
                requested: "int32".to_string(),
                full: "group".to_string(),
            }
        );
    }
}

#[test]
fn lenient_checking_accepts_documented_widenings() -> Result<(), ColumnIoError> {
    let requested = MessageType::new(
        "m",
        vec![
            Type::primitive("a", Repetition::Required, PrimitiveKind::Int64),
            Type::primitive("f", Repetition::Optional, PrimitiveKind::Double),
        ],
    );

    let tree = lenient().column_io(&full(), &requested)?;

    let a = tree.leaf(0).unwrap();
    assert!(a.is_widened());
    assert_eq!(a.descriptor().declared().kind, PrimitiveKind::Int64);
    assert_eq!(a.descriptor().physical(), PrimitiveKind::Int32);
    let f = tree.leaf(1).unwrap();
    assert_eq!(f.descriptor().physical(), PrimitiveKind::Float);
    assert_eq!(f.descriptor().declared().kind, PrimitiveKind::Double);
    Ok(())
}

#[test]
fn lenient_checking_still_rejects_narrowing() {
    let requested = MessageType::new(
        "m",
        vec![Type::group(
            "b",
            Repetition::Required,
            vec![Type::primitive("d", Repetition::Repeated, PrimitiveKind::Int32)],
        )],
    );

    let err = lenient().column_io(&full(), &requested).unwrap_err();
    assert!(matches!(err, ColumnIoError::TypeConflict { .. }), "{err}");
    assert!(!is_widening(PrimitiveKind::Int64, PrimitiveKind::Int32));
    assert!(!is_widening(
        PrimitiveKind::FixedLenByteArray(4),
        PrimitiveKind::FixedLenByteArray(8)
    ));
}

#[test]
fn missing_logical_annotation_is_resolved_from_full_schema() -> Result<(), ColumnIoError> {
    let requested = MessageType::new(
        "m",
        vec![Type::group(
            "b",
            Repetition::Required,
            vec![Type::primitive("c", Repetition::Optional, PrimitiveKind::Binary)],
        )],
    );

    let matched = reconcile(&full(), &requested, true)?;
    let MatchedNode::Group(b) = &matched.fields()[0] else {
        panic!("expected group, got {:?}", matched.fields()[0]);
    };
    let MatchedNode::Primitive(c) = &b.fields()[0] else {
        panic!("expected primitive, got {:?}", b.fields()[0]);
    };
    assert_eq!(c.declared().logical, Some(LogicalType::Utf8));
    assert_eq!(c.physical(), PrimitiveKind::Binary);
    assert!(!c.is_widened());
    Ok(())
}

#[test]
fn conflicting_logical_annotation_is_rejected_in_both_modes() {
    let requested = MessageType::new(
        "m",
        vec![Type::group(
            "b",
            Repetition::Required,
            vec![
                PrimitiveType::new("c", Repetition::Optional, PrimitiveKind::Binary)
                    .with_logical(LogicalType::Json)
                    .into(),
            ],
        )],
    );

    let expected = ColumnIoError::TypeConflict {
        path: ColumnPath::from("b.c"),
        requested: "binary (JSON)".to_string(),
        full: "binary (UTF8)".to_string(),
    };
    assert_eq!(reconcile(&full(), &requested, true), Err(expected.clone()));
    assert_eq!(reconcile(&full(), &requested, false), Err(expected));
}

#[test]
fn lenient_checking_rejects_reinterpreting_annotation() {
    let full = MessageType::new(
        "m",
        vec![
            PrimitiveType::new("day", Repetition::Required, PrimitiveKind::Int32)
                .with_logical(LogicalType::Date)
                .into(),
        ],
    );
    let requested = MessageType::new(
        "m",
        vec![
            PrimitiveType::new("day", Repetition::Required, PrimitiveKind::Int32)
                .with_logical(LogicalType::Decimal {
                    precision: 9,
                    scale: 2,
                })
                .into(),
        ],
    );

    let err = lenient().column_io(&full, &requested).unwrap_err();
    assert_eq!(
        err,
        ColumnIoError::TypeConflict {
            path: ColumnPath::from("day"),
            requested: "int32 (DECIMAL(9,2))".to_string(),
            full: "int32 (DATE)".to_string(),
        }
    );
}

#[test]
fn lenient_checking_may_add_a_missing_annotation() -> Result<(), ColumnIoError> {
    let full = MessageType::new(
        "m",
        vec![Type::primitive("raw", Repetition::Optional, PrimitiveKind::Binary)],
    );
    let requested = MessageType::new(
        "m",
        vec![
            PrimitiveType::new("raw", Repetition::Optional, PrimitiveKind::Binary)
                .with_logical(LogicalType::Json)
                .into(),
        ],
    );

    assert!(matches!(
        reconcile(&full, &requested, true),
        Err(ColumnIoError::TypeConflict { .. })
    ));
    let tree = lenient().column_io(&full, &requested)?;
    assert_eq!(
        tree.leaf(0).unwrap().descriptor().declared().logical,
        Some(LogicalType::Json)
    );
    Ok(())
}

#[test]
fn inherited_annotation_must_fit_the_widened_kind() -> Result<(), ColumnIoError> {
    let full = MessageType::new(
        "m",
        vec![
            PrimitiveType::new("day", Repetition::Required, PrimitiveKind::Int32)
                .with_logical(LogicalType::Date)
                .into(),
            PrimitiveType::new("price", Repetition::Required, PrimitiveKind::Int32)
                .with_logical(LogicalType::Decimal {
                    precision: 9,
                    scale: 2,
                })
                .into(),
        ],
    );

    let day_as_int64 = MessageType::new(
        "m",
        vec![Type::primitive("day", Repetition::Required, PrimitiveKind::Int64)],
    );
    assert!(matches!(
        lenient().column_io(&full, &day_as_int64),
        Err(ColumnIoError::TypeConflict { .. })
    ));

    let price_as_double = MessageType::new(
        "m",
        vec![Type::primitive("price", Repetition::Required, PrimitiveKind::Double)],
    );
    assert!(matches!(
        lenient().column_io(&full, &price_as_double),
        Err(ColumnIoError::TypeConflict { .. })
    ));

    let price_as_int64 = MessageType::new(
        "m",
        vec![Type::primitive("price", Repetition::Required, PrimitiveKind::Int64)],
    );
    let tree = lenient().column_io(&full, &price_as_int64)?;
    let declared = tree.leaf(0).unwrap().descriptor().declared();
    assert_eq!(declared.kind, PrimitiveKind::Int64);
    assert_eq!(
        declared.logical,
        Some(LogicalType::Decimal {
            precision: 9,
            scale: 2
        })
    );
    Ok(())
}

#[test]
fn lenient_checking_widens_int32_to_double() -> Result<(), ColumnIoError> {
    let requested = MessageType::new(
        "m",
        vec![Type::primitive("a", Repetition::Required, PrimitiveKind::Double)],
    );

    assert!(matches!(
        ColumnIoFactory::new().column_io(&full(), &requested),
        Err(ColumnIoError::TypeConflict { .. })
    ));
    let tree = lenient().column_io(&full(), &requested)?;
    let a = tree.leaf(0).unwrap();
    assert!(a.is_widened());
    assert_eq!(a.descriptor().physical(), PrimitiveKind::Int32);
    assert_eq!(a.descriptor().declared().kind, PrimitiveKind::Double);
    assert!(is_widening(PrimitiveKind::Int32, PrimitiveKind::Double));
    Ok(())
}

#[test]
fn fixed_len_byte_array_length_must_match_even_when_lenient() {
    let full = MessageType::new(
        "m",
        vec![Type::primitive(
            "id",
            Repetition::Required,
            PrimitiveKind::FixedLenByteArray(16),
        )],
    );
    let requested = MessageType::new(
        "m",
        vec![Type::primitive(
            "id",
            Repetition::Required,
            PrimitiveKind::FixedLenByteArray(8),
        )],
    );

    let err = lenient().column_io(&full, &requested).unwrap_err();
    assert_eq!(
        err,
        ColumnIoError::TypeConflict {
            path: ColumnPath::from("id"),
            requested: "fixed_len_byte_array(8)".to_string(),
            full: "fixed_len_byte_array(16)".to_string(),
        }
    );
}

#[test]
fn malformed_inputs_are_reported_before_matching() {
    let duplicated = MessageType::new(
        "m",
        vec![
            Type::primitive("a", Repetition::Required, PrimitiveKind::Int32),
            Type::primitive("a", Repetition::Required, PrimitiveKind::Int32),
        ],
    );

    let err = reconcile(&full(), &duplicated, true).unwrap_err();
    assert!(
        matches!(err, ColumnIoError::MalformedSchema(SchemaError::Malformed { .. })),
        "{err}"
    );

    let empty_group = MessageType::new(
        "m",
        vec![GroupType::new("b", Repetition::Required, vec![]).into()],
    );
    assert!(matches!(
        reconcile(&empty_group, &empty_group, true),
        Err(ColumnIoError::MalformedSchema(_))
    ));
}

#[test]
fn matched_schema_is_isomorphic_to_request() -> Result<(), ColumnIoError> {
    let requested = MessageType::new(
        "projection",
        vec![
            Type::primitive("a", Repetition::Required, PrimitiveKind::Int32),
            Type::primitive("f", Repetition::Optional, PrimitiveKind::Float),
        ],
    );

    let matched = reconcile(&full(), &requested, true)?;
    assert_eq!(matched.name(), "projection");
    let names: Vec<&str> = matched.fields().iter().map(MatchedNode::name).collect();
    assert_eq!(names, vec!["a", "f"]);
    Ok(())
}

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use arrow::datatypes::{
    DECIMAL128_MAX_PRECISION, DECIMAL256_MAX_PRECISION, DataType, Field, Schema, TimeUnit,
};
use columnio::{
    ColumnIo, MessageColumnIo, PrimitiveColumnIo,
    core::{LogicalType, PrimitiveKind, PrimitiveType, Repetition},
};

use crate::error::ArrowSchemaError;

/// Field metadata key holding a leaf column's maximum repetition level.
pub const MAX_REPETITION_LEVEL_KEY: &str = "columnio.max_repetition_level";
/// Field metadata key holding a leaf column's maximum definition level.
pub const MAX_DEFINITION_LEVEL_KEY: &str = "columnio.max_definition_level";

// ---------------------------------------------------------------------------
// Nested conversion
// ---------------------------------------------------------------------------

/// Converts a column I/O tree into a nested Arrow `Schema` mirroring its groups.
///
/// # Errors
///
/// Returns [`ArrowSchemaError::Unrepresentable`] if a leaf type has no Arrow
/// counterpart (see [`primitive_to_datatype`]).
pub fn message_column_io_to_arrow_schema(
    tree: &MessageColumnIo,
) -> Result<Schema, ArrowSchemaError> {
    let arrow_fields = tree
        .children()
        .iter()
        .map(column_io_to_arrow_field)
        .collect::<Result<Vec<Field>, _>>()?;
    Ok(Schema::new(arrow_fields))
}

fn column_io_to_arrow_field(node: &ColumnIo) -> Result<Field, ArrowSchemaError> {
    let data_type = match node {
        ColumnIo::Group(group) => {
            let arrow_fields = group
                .children()
                .iter()
                .map(column_io_to_arrow_field)
                .collect::<Result<Vec<Field>, _>>()?;
            DataType::Struct(arrow_fields.into())
        }
        ColumnIo::Primitive(leaf) => primitive_to_datatype(leaf.descriptor().declared())?,
    };

    Ok(match node.info().repetition() {
        Repetition::Required => Field::new(node.name(), data_type, false),
        Repetition::Optional => Field::new(node.name(), data_type, true),
        Repetition::Repeated => Field::new(
            node.name(),
            DataType::List(Arc::new(Field::new("item", data_type, false))),
            false,
        ),
    })
}

// ---------------------------------------------------------------------------
// Flat conversion, one field per leaf column
// ---------------------------------------------------------------------------

/// One Arrow field per leaf column, in column order.
///
/// Field names are the leaf paths joined with `separator` (defaults to
/// `'.'` when `None`). A field is nullable when the column's maximum
/// definition level is non-zero; both levels are attached as metadata
/// under [`MAX_REPETITION_LEVEL_KEY`] and [`MAX_DEFINITION_LEVEL_KEY`].
///
/// # Errors
///
/// Returns [`ArrowSchemaError::PathCollision`] if two leaves join to the
/// same name, or [`ArrowSchemaError::Unrepresentable`] for a leaf type with
/// no Arrow counterpart.
pub fn leaf_fields(
    tree: &MessageColumnIo,
    separator: Option<char>,
) -> Result<Vec<Field>, ArrowSchemaError> {
    let sep = separator.unwrap_or('.').to_string();
    let fields = tree
        .leaves()
        .iter()
        .map(|leaf| leaf_to_arrow_field(leaf, &sep))
        .collect::<Result<Vec<Field>, _>>()?;

    let mut seen_names: HashSet<&str> = HashSet::with_capacity(fields.len());
    for f in &fields {
        if !seen_names.insert(f.name()) {
            return Err(ArrowSchemaError::PathCollision(f.name().clone()));
        }
    }

    Ok(fields)
}

fn leaf_to_arrow_field(leaf: &PrimitiveColumnIo, sep: &str) -> Result<Field, ArrowSchemaError> {
    let descriptor = leaf.descriptor();
    let metadata = HashMap::from([
        (
            MAX_REPETITION_LEVEL_KEY.to_string(),
            descriptor.max_repetition_level().to_string(),
        ),
        (
            MAX_DEFINITION_LEVEL_KEY.to_string(),
            descriptor.max_definition_level().to_string(),
        ),
    ]);
    Ok(Field::new(
        leaf.path().join(sep),
        primitive_to_datatype(descriptor.declared())?,
        descriptor.max_definition_level() > 0,
    )
    .with_metadata(metadata))
}

// ---------------------------------------------------------------------------
// Primitive type mapping
// ---------------------------------------------------------------------------

/// Arrow type for a leaf column, taking its logical annotation into account.
///
/// # Errors
///
/// Returns [`ArrowSchemaError::Unrepresentable`] for decimals beyond
/// Arrow's 76 digits and for fixed-length arrays longer than `i32::MAX`.
pub fn primitive_to_datatype(ty: &PrimitiveType) -> Result<DataType, ArrowSchemaError> {
    let data_type = match (ty.kind, ty.logical) {
        (PrimitiveKind::Boolean, _) => DataType::Boolean,
        (PrimitiveKind::Int32, Some(LogicalType::Date)) => DataType::Date32,
        (PrimitiveKind::Int32, Some(LogicalType::TimeMillis)) => {
            DataType::Time32(TimeUnit::Millisecond)
        }
        (PrimitiveKind::Int64, Some(LogicalType::TimestampMillis)) => DataType::Timestamp(
            TimeUnit::Millisecond,
            Some(Arc::from(crate::TIMESTAMP_TZ)),
        ),
        (
            PrimitiveKind::Int32 | PrimitiveKind::Int64 | PrimitiveKind::FixedLenByteArray(_),
            Some(LogicalType::Decimal { precision, scale }),
        ) => decimal_datatype(ty, precision, scale)?,
        (PrimitiveKind::Int32, _) => DataType::Int32,
        (PrimitiveKind::Int64, _) => DataType::Int64,
        (PrimitiveKind::Int96, _) => DataType::Timestamp(TimeUnit::Nanosecond, None),
        (PrimitiveKind::Float, _) => DataType::Float32,
        (PrimitiveKind::Double, _) => DataType::Float64,
        (
            PrimitiveKind::Binary,
            Some(LogicalType::Utf8 | LogicalType::Enum | LogicalType::Json),
        ) => DataType::Utf8,
        (PrimitiveKind::Binary, _) => DataType::Binary,
        (PrimitiveKind::FixedLenByteArray(len), _) => {
            let len = i32::try_from(len).map_err(|_| unrepresentable(ty, "length exceeds i32"))?;
            DataType::FixedSizeBinary(len)
        }
    };
    Ok(data_type)
}

fn decimal_datatype(
    ty: &PrimitiveType,
    precision: u32,
    scale: u32,
) -> Result<DataType, ArrowSchemaError> {
    let precision = u8::try_from(precision)
        .ok()
        .filter(|p| (1..=DECIMAL256_MAX_PRECISION).contains(p))
        .ok_or_else(|| unrepresentable(ty, "decimal precision out of range"))?;
    let scale = i8::try_from(scale)
        .ok()
        .filter(|s| u8::try_from(*s).is_ok_and(|s| s <= precision))
        .ok_or_else(|| unrepresentable(ty, "decimal scale out of range"))?;
    if precision <= DECIMAL128_MAX_PRECISION {
        Ok(DataType::Decimal128(precision, scale))
    } else {
        Ok(DataType::Decimal256(precision, scale))
    }
}

fn unrepresentable(ty: &PrimitiveType, detail: &str) -> ArrowSchemaError {
    ArrowSchemaError::Unrepresentable {
        name: ty.name.clone(),
        detail: detail.to_string(),
    }
}

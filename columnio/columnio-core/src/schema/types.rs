use std::{
    collections::HashSet,
    fmt::{Display, Formatter, Result},
};

use crate::{error::SchemaError, path::ColumnPath};

/// Per-field cardinality contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repetition {
    /// Exactly one value.
    Required,
    /// Zero or one value.
    Optional,
    /// Zero or more values.
    Repeated,
}

impl Repetition {
    pub fn keyword(&self) -> &'static str {
        match self {
            Repetition::Required => "required",
            Repetition::Optional => "optional",
            Repetition::Repeated => "repeated",
        }
    }
}

impl Display for Repetition {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.keyword())
    }
}

/// Physical storage kind of a leaf column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Int32,
    Int64,
    Int96,
    Float,
    Double,
    Binary,
    /// Byte array with a fixed length in bytes.
    FixedLenByteArray(usize),
}

impl PrimitiveKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Int96 => "int96",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Binary => "binary",
            PrimitiveKind::FixedLenByteArray(_) => "fixed_len_byte_array",
        }
    }
}

impl PrimitiveKind {
    /// Largest decimal precision a value of this kind can hold, or `None`
    /// when the kind cannot carry a decimal at all. `binary` is unbounded.
    pub fn max_decimal_precision(&self) -> Option<u32> {
        match self {
            PrimitiveKind::Int32 => Some(9),
            PrimitiveKind::Int64 => Some(18),
            PrimitiveKind::FixedLenByteArray(len) => Some(fixed_len_max_precision(*len)),
            PrimitiveKind::Binary => Some(u32::MAX),
            _ => None,
        }
    }
}

/// Decimal digits of the largest signed value stored in `len` bytes.
fn fixed_len_max_precision(len: usize) -> u32 {
    if len == 0 {
        return 0;
    }
    let bits = len as f64 * 8.0 - 1.0;
    (bits * std::f64::consts::LOG10_2).floor() as u32
}

impl Display for PrimitiveKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            PrimitiveKind::FixedLenByteArray(len) => write!(f, "fixed_len_byte_array({len})"),
            other => f.write_str(other.type_name()),
        }
    }
}

/// Optional annotation describing how a physical type is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Utf8,
    Enum,
    Json,
    Bson,
    Map,
    MapKeyValue,
    List,
    Decimal { precision: u32, scale: u32 },
    Date,
    TimeMillis,
    TimestampMillis,
}

impl Display for LogicalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            LogicalType::Utf8 => f.write_str("UTF8"),
            LogicalType::Enum => f.write_str("ENUM"),
            LogicalType::Json => f.write_str("JSON"),
            LogicalType::Bson => f.write_str("BSON"),
            LogicalType::Map => f.write_str("MAP"),
            LogicalType::MapKeyValue => f.write_str("MAP_KEY_VALUE"),
            LogicalType::List => f.write_str("LIST"),
            LogicalType::Decimal { precision, scale } => write!(f, "DECIMAL({precision},{scale})"),
            LogicalType::Date => f.write_str("DATE"),
            LogicalType::TimeMillis => f.write_str("TIME_MILLIS"),
            LogicalType::TimestampMillis => f.write_str("TIMESTAMP_MILLIS"),
        }
    }
}

impl LogicalType {
    /// `true` for annotations that belong on a group rather than a leaf.
    pub fn is_group_annotation(&self) -> bool {
        matches!(
            self,
            LogicalType::Map | LogicalType::MapKeyValue | LogicalType::List
        )
    }

    /// Whether this annotation may be attached to a leaf of `kind`.
    pub fn applies_to(&self, kind: PrimitiveKind) -> bool {
        annotation_problem(kind, *self).is_none()
    }
}

fn annotation_problem(kind: PrimitiveKind, logical: LogicalType) -> Option<String> {
    let fits = match logical {
        LogicalType::Utf8 | LogicalType::Enum | LogicalType::Json | LogicalType::Bson => {
            kind == PrimitiveKind::Binary
        }
        LogicalType::Date | LogicalType::TimeMillis => kind == PrimitiveKind::Int32,
        LogicalType::TimestampMillis => kind == PrimitiveKind::Int64,
        LogicalType::Map | LogicalType::MapKeyValue | LogicalType::List => false,
        LogicalType::Decimal { precision, scale } => {
            if precision == 0 {
                return Some("decimal precision must be at least 1".to_string());
            }
            if scale > precision {
                return Some(format!("decimal scale {scale} exceeds precision {precision}"));
            }
            match kind.max_decimal_precision() {
                None => false,
                Some(max) if precision > max => {
                    return Some(format!(
                        "decimal precision {precision} does not fit in {kind} (max {max})"
                    ));
                }
                Some(_) => true,
            }
        }
    };
    (!fits).then(|| format!("{logical} cannot annotate {kind}"))
}

/// Leaf field of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveType {
    pub name: String,
    pub repetition: Repetition,
    pub kind: PrimitiveKind,
    pub logical: Option<LogicalType>,
}

impl PrimitiveType {
    pub fn new(name: impl Into<String>, repetition: Repetition, kind: PrimitiveKind) -> Self {
        Self {
            name: name.into(),
            repetition,
            kind,
            logical: None,
        }
    }

    pub fn with_logical(mut self, logical: LogicalType) -> Self {
        self.logical = Some(logical);
        self
    }
}

/// Composite field of a schema holding an ordered list of child fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupType {
    pub name: String,
    pub repetition: Repetition,
    pub logical: Option<LogicalType>,
    pub fields: Vec<Type>,
}

impl GroupType {
    pub fn new(name: impl Into<String>, repetition: Repetition, fields: Vec<Type>) -> Self {
        Self {
            name: name.into(),
            repetition,
            logical: None,
            fields,
        }
    }

    pub fn with_logical(mut self, logical: LogicalType) -> Self {
        self.logical = Some(logical);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Type> {
        find_field(&self.fields, name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }
}

/// A schema node: either a leaf or a group.
///
/// The set of variants is closed; every walk over a schema matches on it
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Primitive(PrimitiveType),
    Group(GroupType),
}

impl Type {
    pub fn primitive(name: impl Into<String>, repetition: Repetition, kind: PrimitiveKind) -> Self {
        Type::Primitive(PrimitiveType::new(name, repetition, kind))
    }

    pub fn group(name: impl Into<String>, repetition: Repetition, fields: Vec<Type>) -> Self {
        Type::Group(GroupType::new(name, repetition, fields))
    }

    pub fn name(&self) -> &str {
        match self {
            Type::Primitive(p) => &p.name,
            Type::Group(g) => &g.name,
        }
    }

    pub fn repetition(&self) -> Repetition {
        match self {
            Type::Primitive(p) => p.repetition,
            Type::Group(g) => g.repetition,
        }
    }

    pub fn logical(&self) -> Option<LogicalType> {
        match self {
            Type::Primitive(p) => p.logical,
            Type::Group(g) => g.logical,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    pub fn as_group(&self) -> Option<&GroupType> {
        match self {
            Type::Group(g) => Some(g),
            Type::Primitive(_) => None,
        }
    }

    pub fn as_primitive(&self) -> Option<&PrimitiveType> {
        match self {
            Type::Primitive(p) => Some(p),
            Type::Group(_) => None,
        }
    }

    /// Human readable type label used in diagnostics (`group` or the primitive kind).
    pub fn type_label(&self) -> String {
        match self {
            Type::Primitive(p) => p.kind.to_string(),
            Type::Group(_) => "group".to_string(),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Type::Primitive(_) => 1,
            Type::Group(g) => g.fields.iter().map(Type::leaf_count).sum(),
        }
    }
}

impl From<PrimitiveType> for Type {
    fn from(value: PrimitiveType) -> Self {
        Type::Primitive(value)
    }
}

impl From<GroupType> for Type {
    fn from(value: GroupType) -> Self {
        Type::Group(value)
    }
}

/// Root of a schema. Its repetition is implicitly "exactly one".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageType {
    pub name: String,
    pub fields: Vec<Type>,
}

impl MessageType {
    pub fn new(name: impl Into<String>, fields: Vec<Type>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Type> {
        find_field(&self.fields, name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    /// Look up a node by its path below the root.
    pub fn type_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&Type> {
        let (first, rest) = path.split_first()?;
        let mut current = self.field(first.as_ref())?;
        for name in rest {
            current = current.as_group()?.field(name.as_ref())?;
        }
        Some(current)
    }

    /// Number of primitive fields reachable from the root.
    pub fn leaf_count(&self) -> usize {
        self.fields.iter().map(Type::leaf_count).sum()
    }

    /// Paths of all primitive fields in depth-first, left-to-right order.
    pub fn leaf_paths(&self) -> Vec<ColumnPath> {
        let mut out = Vec::with_capacity(self.leaf_count());
        for field in &self.fields {
            collect_leaf_paths(field, &ColumnPath::root(), &mut out);
        }
        out
    }

    /// Check the structural invariants of the schema.
    ///
    /// Returns the first violation found in depth-first order: an empty
    /// field name, duplicate sibling names, a nested group without fields,
    /// a `fixed_len_byte_array` length outside `1..=i32::MAX`, or a logical
    /// annotation that does not fit its node (including decimal precision
    /// and scale out of range for the primitive kind).
    pub fn validate(&self) -> std::result::Result<(), SchemaError> {
        validate_fields(&self.fields, &ColumnPath::root())
    }
}

fn find_field<'a>(fields: &'a [Type], name: &str) -> Option<&'a Type> {
    fields.iter().find(|f| f.name() == name)
}

fn collect_leaf_paths(ty: &Type, parent: &ColumnPath, out: &mut Vec<ColumnPath>) {
    let path = parent.child(ty.name());
    match ty {
        Type::Primitive(_) => out.push(path),
        Type::Group(g) => {
            for child in &g.fields {
                collect_leaf_paths(child, &path, out);
            }
        }
    }
}

fn validate_fields(fields: &[Type], parent: &ColumnPath) -> std::result::Result<(), SchemaError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(fields.len());
    for field in fields {
        let path = parent.child(field.name());
        if field.name().is_empty() {
            return Err(SchemaError::malformed(parent.clone(), "field with empty name"));
        }
        if !seen.insert(field.name()) {
            return Err(SchemaError::malformed(
                path,
                format!("duplicate field name '{}'", field.name()),
            ));
        }
        match field {
            Type::Primitive(p) => validate_primitive(p, path)?,
            Type::Group(g) => {
                if g.fields.is_empty() {
                    return Err(SchemaError::malformed(path, "group has no fields"));
                }
                if let Some(logical) = g.logical
                    && !logical.is_group_annotation()
                {
                    return Err(SchemaError::malformed(
                        path,
                        format!("{logical} cannot annotate a group"),
                    ));
                }
                validate_fields(&g.fields, &path)?;
            }
        }
    }
    Ok(())
}

fn validate_primitive(
    p: &PrimitiveType,
    path: ColumnPath,
) -> std::result::Result<(), SchemaError> {
    if let PrimitiveKind::FixedLenByteArray(len) = p.kind
        && (len == 0 || i32::try_from(len).is_err())
    {
        return Err(SchemaError::malformed(
            path,
            format!("fixed_len_byte_array length {len} out of range"),
        ));
    }
    if let Some(logical) = p.logical
        && let Some(problem) = annotation_problem(p.kind, logical)
    {
        return Err(SchemaError::malformed(path, problem));
    }
    Ok(())
}

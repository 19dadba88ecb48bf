//! Schema reconciliation: matches a requested projection against the full schema.
//!
//! The walk is driven by the requested schema. Each requested node is looked
//! up by name among the children of the corresponding full-schema group and
//! checked against it:
//!
//! 1. **Missing**: no same-named node in the full schema: `SchemaMismatch`.
//!    Requested siblings must keep their relative order from the full
//!    schema, so leaves stay in physical column order: `SchemaMismatch`.
//! 2. **Shape**: group requested where the full schema has a primitive (or
//!    the other way round): `TypeConflict`, whatever the checking mode.
//! 3. **Repetition**: markers must be equal: `SchemaMismatch`.
//! 4. **Primitive kind**: must be equal under strict type checking. Without
//!    it, the widenings listed in [`is_widening`] are accepted and every other
//!    difference is still a `TypeConflict`.
//! 5. **Logical annotation**: a missing requested annotation is filled in from
//!    the full schema, and must still fit the requested kind. Without strict
//!    type checking a requested annotation may be added where the full schema
//!    has none. Any other difference is a `TypeConflict`.
//!
//! Full-schema fields the projection does not name are pruned.

use columnio_core::{
    ColumnPath, GroupType, LogicalType, MessageType, PrimitiveKind, PrimitiveType, Repetition,
    Type,
};
use tracing::debug;

use crate::error::ColumnIoError;

/// Requested schema annotated with the full-schema metadata the builder needs.
///
/// Isomorphic to the requested schema: same names, same order.
///
/// Only [`reconcile`] creates one, so a matched schema handed to
/// [`build`](crate::build) has always been checked against its full schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedSchema {
    pub(crate) name: String,
    pub(crate) fields: Vec<MatchedNode>,
}

impl MatchedSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[MatchedNode] {
        &self.fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchedNode {
    Group(MatchedGroup),
    Primitive(MatchedPrimitive),
}

impl MatchedNode {
    pub fn name(&self) -> &str {
        match self {
            MatchedNode::Group(g) => &g.name,
            MatchedNode::Primitive(p) => &p.declared.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedGroup {
    pub(crate) name: String,
    pub(crate) repetition: Repetition,
    pub(crate) logical: Option<LogicalType>,
    pub(crate) fields: Vec<MatchedNode>,
}

impl MatchedGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn repetition(&self) -> Repetition {
        self.repetition
    }

    /// Annotation resolved against the full schema.
    pub fn logical(&self) -> Option<LogicalType> {
        self.logical
    }

    pub fn fields(&self) -> &[MatchedNode] {
        &self.fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPrimitive {
    pub(crate) declared: PrimitiveType,
    pub(crate) physical: PrimitiveKind,
}

impl MatchedPrimitive {
    /// Type as requested, with the logical annotation resolved.
    pub fn declared(&self) -> &PrimitiveType {
        &self.declared
    }

    /// Kind stored in the full schema.
    pub fn physical(&self) -> PrimitiveKind {
        self.physical
    }

    /// `true` when the requested kind is a widening of the stored kind.
    pub fn is_widened(&self) -> bool {
        self.declared.kind != self.physical
    }
}

/// Stored kinds that may be read as a wider requested kind when strict type
/// checking is off.
pub fn is_widening(physical: PrimitiveKind, requested: PrimitiveKind) -> bool {
    matches!(
        (physical, requested),
        (PrimitiveKind::Int32, PrimitiveKind::Int64)
            | (PrimitiveKind::Int32, PrimitiveKind::Double)
            | (PrimitiveKind::Float, PrimitiveKind::Double)
    )
}

/// Match `requested` against `full`.
///
/// Both schemas are validated first; any error aborts the whole reconciliation.
pub fn reconcile(
    full: &MessageType,
    requested: &MessageType,
    strict_type_checking: bool,
) -> Result<MatchedSchema, ColumnIoError> {
    full.validate()?;
    requested.validate()?;

    let reconciler = Reconciler {
        strict_type_checking,
    };
    let fields =
        reconciler.reconcile_fields(&full.fields, &requested.fields, &ColumnPath::root())?;

    Ok(MatchedSchema {
        name: requested.name.clone(),
        fields,
    })
}

struct Reconciler {
    strict_type_checking: bool,
}

impl Reconciler {
    fn reconcile_fields(
        &self,
        full: &[Type],
        requested: &[Type],
        parent: &ColumnPath,
    ) -> Result<Vec<MatchedNode>, ColumnIoError> {
        let mut out = Vec::with_capacity(requested.len());
        let mut previous: Option<(usize, &str)> = None;
        for req in requested {
            let path = parent.child(req.name());
            let full_index = full
                .iter()
                .position(|f| f.name() == req.name())
                .ok_or_else(|| ColumnIoError::SchemaMismatch {
                    path: path.clone(),
                    detail: "field not found in full schema".to_string(),
                })?;
            if let Some((previous_index, previous_name)) = previous
                && full_index < previous_index
            {
                return Err(ColumnIoError::SchemaMismatch {
                    path,
                    detail: format!(
                        "requested after '{previous_name}' but stored before it in the full schema"
                    ),
                });
            }
            previous = Some((full_index, req.name()));
            out.push(self.reconcile_type(&full[full_index], req, path)?);
        }

        for pruned in full
            .iter()
            .filter(|f| !requested.iter().any(|r| r.name() == f.name()))
        {
            debug!(path = %parent.child(pruned.name()), "pruned column subtree");
        }

        Ok(out)
    }

    fn reconcile_type(
        &self,
        full: &Type,
        requested: &Type,
        path: ColumnPath,
    ) -> Result<MatchedNode, ColumnIoError> {
        if full.is_primitive() != requested.is_primitive() {
            return Err(ColumnIoError::TypeConflict {
                path,
                requested: requested.type_label(),
                full: full.type_label(),
            });
        }

        if full.repetition() != requested.repetition() {
            return Err(ColumnIoError::SchemaMismatch {
                path,
                detail: format!(
                    "requested as {} but full schema declares {}",
                    requested.repetition(),
                    full.repetition()
                ),
            });
        }

        match (full, requested) {
            (Type::Group(f), Type::Group(r)) => self.reconcile_group(f, r, path),
            (Type::Primitive(f), Type::Primitive(r)) => self.reconcile_primitive(f, r, path),
            _ => unreachable!("shape mismatch is rejected above"),
        }
    }

    fn reconcile_group(
        &self,
        full: &GroupType,
        requested: &GroupType,
        path: ColumnPath,
    ) -> Result<MatchedNode, ColumnIoError> {
        let conflict = || ColumnIoError::TypeConflict {
            path: path.clone(),
            requested: describe_group(requested.logical),
            full: describe_group(full.logical),
        };
        let logical = self.resolve_logical(full.logical, requested.logical, &conflict)?;
        let fields = self.reconcile_fields(&full.fields, &requested.fields, &path)?;

        Ok(MatchedNode::Group(MatchedGroup {
            name: requested.name.clone(),
            repetition: requested.repetition,
            logical,
            fields,
        }))
    }

    fn reconcile_primitive(
        &self,
        full: &PrimitiveType,
        requested: &PrimitiveType,
        path: ColumnPath,
    ) -> Result<MatchedNode, ColumnIoError> {
        if requested.kind != full.kind {
            if self.strict_type_checking || !is_widening(full.kind, requested.kind) {
                return Err(ColumnIoError::TypeConflict {
                    path,
                    requested: requested.kind.to_string(),
                    full: full.kind.to_string(),
                });
            }
            debug!(
                path = %path,
                physical = %full.kind,
                requested = %requested.kind,
                "accepted primitive widening"
            );
        }

        let conflict = || ColumnIoError::TypeConflict {
            path: path.clone(),
            requested: describe(requested.kind, requested.logical),
            full: describe(full.kind, full.logical),
        };
        let logical = self.resolve_logical(full.logical, requested.logical, &conflict)?;
        // An annotation inherited across a widening must still fit the wider kind.
        if let Some(inherited) = logical
            && !inherited.applies_to(requested.kind)
        {
            return Err(conflict());
        }

        Ok(MatchedNode::Primitive(MatchedPrimitive {
            declared: PrimitiveType {
                name: requested.name.clone(),
                repetition: requested.repetition,
                kind: requested.kind,
                logical,
            },
            physical: full.kind,
        }))
    }

    /// Annotations never change what a stored value means: only an
    /// annotation the full schema lacks may be added, and only when strict
    /// type checking is off.
    fn resolve_logical(
        &self,
        full: Option<LogicalType>,
        requested: Option<LogicalType>,
        conflict: impl Fn() -> ColumnIoError,
    ) -> Result<Option<LogicalType>, ColumnIoError> {
        match (full, requested) {
            (full, None) => Ok(full),
            (Some(f), Some(r)) if f == r => Ok(Some(r)),
            (None, Some(r)) if !self.strict_type_checking => Ok(Some(r)),
            (_, Some(_)) => Err(conflict()),
        }
    }
}

fn describe(kind: PrimitiveKind, logical: Option<LogicalType>) -> String {
    match logical {
        Some(logical) => format!("{kind} ({logical})"),
        None => kind.to_string(),
    }
}

fn describe_group(logical: Option<LogicalType>) -> String {
    match logical {
        Some(logical) => format!("group ({logical})"),
        None => "group".to_string(),
    }
}

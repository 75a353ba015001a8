//! Stencil validation against a field catalog.
//!
//! [`validate`] runs once before plan compilation. It type-checks every
//! expression's location against the catalog, checks vertical extents and
//! interval ordering, enforces write-before-read for temporaries, and
//! derives the stencil's external read/write sets.

use crate::ast::{Expr, StencilDef};
use floe_core::{FieldDef, FieldId, FieldSet, Location, VerticalExtent};
use floe_mesh::Marker;
use std::fmt;

/// Derived facts about a validated stencil.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StencilInfo {
    /// Fields read from outside the stencil (temporaries excluded).
    pub reads: FieldSet,
    /// Fields written for consumption outside the stencil
    /// (temporaries excluded).
    pub writes: FieldSet,
}

/// Errors from stencil validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    /// The stencil has no blocks.
    EmptyStencil {
        /// Offending stencil.
        stencil: String,
    },
    /// A block has no statements.
    EmptyBlock {
        /// Offending stencil.
        stencil: String,
        /// Index of the empty block.
        block: usize,
    },
    /// A referenced field is not in the catalog.
    UnknownField {
        /// Offending stencil.
        stencil: String,
        /// The missing ID.
        field: FieldId,
    },
    /// The same field is declared temporary twice.
    DuplicateTemporary {
        /// Offending stencil.
        stencil: String,
        /// The repeated ID.
        field: FieldId,
    },
    /// Two subexpressions live on different element kinds.
    LocationMismatch {
        /// Offending stencil.
        stencil: String,
        /// Location required by the surrounding context.
        expected: Location,
        /// Location actually found.
        found: Location,
        /// Field or construct where the conflict surfaced.
        context: String,
    },
    /// A surface field is assigned an expression reading column data.
    VerticalMismatch {
        /// Offending stencil.
        stencil: String,
        /// The surface-extent target.
        target: String,
    },
    /// A temporary is read before any assignment to it.
    ReadBeforeWrite {
        /// Offending stencil.
        stencil: String,
        /// The prematurely read temporary.
        field: String,
    },
    /// A block interval's markers are reversed.
    ReversedInterval {
        /// Offending stencil.
        stencil: String,
        /// Lower marker as written.
        lo: Marker,
        /// Upper marker as written.
        hi: Marker,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStencil { stencil } => write!(f, "stencil '{stencil}' has no blocks"),
            Self::EmptyBlock { stencil, block } => {
                write!(f, "stencil '{stencil}': block {block} has no statements")
            }
            Self::UnknownField { stencil, field } => {
                write!(f, "stencil '{stencil}': field {field} is not in the catalog")
            }
            Self::DuplicateTemporary { stencil, field } => {
                write!(
                    f,
                    "stencil '{stencil}': field {field} declared temporary twice"
                )
            }
            Self::LocationMismatch {
                stencil,
                expected,
                found,
                context,
            } => write!(
                f,
                "stencil '{stencil}': {context} is {found}-located where {expected} is required"
            ),
            Self::VerticalMismatch { stencil, target } => write!(
                f,
                "stencil '{stencil}': surface field '{target}' assigned from column data"
            ),
            Self::ReadBeforeWrite { stencil, field } => write!(
                f,
                "stencil '{stencil}': temporary '{field}' read before assignment"
            ),
            Self::ReversedInterval { stencil, lo, hi } => {
                write!(f, "stencil '{stencil}': interval [{lo}:{hi}] is reversed")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a stencil against a field catalog and derive its
/// [`StencilInfo`].
pub fn validate(def: &StencilDef, fields: &[FieldDef]) -> Result<StencilInfo, ValidationError> {
    let ctx = Ctx {
        stencil: &def.name,
        fields,
    };

    if def.blocks.is_empty() {
        return Err(ValidationError::EmptyStencil {
            stencil: def.name.clone(),
        });
    }

    let mut temporaries = FieldSet::empty();
    for &temp in &def.temporaries {
        ctx.lookup(temp)?;
        if temporaries.contains(temp) {
            return Err(ValidationError::DuplicateTemporary {
                stencil: def.name.clone(),
                field: temp,
            });
        }
        temporaries.insert(temp);
    }

    let mut reads = FieldSet::empty();
    let mut writes = FieldSet::empty();
    let mut assigned = FieldSet::empty();

    for (block_index, block) in def.blocks.iter().enumerate() {
        if block.stmts.is_empty() {
            return Err(ValidationError::EmptyBlock {
                stencil: def.name.clone(),
                block: block_index,
            });
        }
        if !block.interval.is_ordered() {
            return Err(ValidationError::ReversedInterval {
                stencil: def.name.clone(),
                lo: block.interval.lo,
                hi: block.interval.hi,
            });
        }

        for stmt in &block.stmts {
            let target_def = ctx.lookup(stmt.target)?;

            let inferred = ctx.infer_location(&stmt.value)?;
            if let Some(found) = inferred {
                if found != target_def.location {
                    return Err(ValidationError::LocationMismatch {
                        stencil: def.name.clone(),
                        expected: target_def.location,
                        found,
                        context: format!("value assigned to '{}'", target_def.name),
                    });
                }
            }

            let mut stmt_reads = FieldSet::empty();
            stmt.value.collect_fields(&mut stmt_reads);

            if target_def.extent == VerticalExtent::Surface {
                for read in &stmt_reads {
                    if ctx.lookup(read)?.extent == VerticalExtent::Column {
                        return Err(ValidationError::VerticalMismatch {
                            stencil: def.name.clone(),
                            target: target_def.name.clone(),
                        });
                    }
                }
            }

            for read in &stmt_reads {
                ctx.lookup(read)?;
                if temporaries.contains(read) {
                    if !assigned.contains(read) {
                        return Err(ValidationError::ReadBeforeWrite {
                            stencil: def.name.clone(),
                            field: ctx.lookup(read)?.name.clone(),
                        });
                    }
                } else {
                    reads.insert(read);
                }
            }

            if temporaries.contains(stmt.target) {
                assigned.insert(stmt.target);
            } else {
                writes.insert(stmt.target);
            }
        }
    }

    Ok(StencilInfo { reads, writes })
}

struct Ctx<'a> {
    stencil: &'a str,
    fields: &'a [FieldDef],
}

impl Ctx<'_> {
    fn lookup(&self, field: FieldId) -> Result<&FieldDef, ValidationError> {
        self.fields
            .get(field.0 as usize)
            .ok_or_else(|| ValidationError::UnknownField {
                stencil: self.stencil.to_string(),
                field,
            })
    }

    /// Infer the location of an expression, or `None` for pure literals.
    fn infer_location(&self, expr: &Expr) -> Result<Option<Location>, ValidationError> {
        match expr {
            Expr::Lit(_) => Ok(None),
            Expr::Field(id) => Ok(Some(self.lookup(*id)?.location)),
            Expr::Neg(inner) => self.infer_location(inner),
            Expr::Bin { lhs, rhs, .. } => {
                let l = self.infer_location(lhs)?;
                let r = self.infer_location(rhs)?;
                match (l, r) {
                    (Some(a), Some(b)) if a != b => Err(ValidationError::LocationMismatch {
                        stencil: self.stencil.to_string(),
                        expected: a,
                        found: b,
                        context: "binary operand".to_string(),
                    }),
                    (Some(a), _) => Ok(Some(a)),
                    (None, other) => Ok(other),
                }
            }
            Expr::SumOver { conn, body } => {
                if let Some(found) = self.infer_location(body)? {
                    if found != conn.source {
                        return Err(ValidationError::LocationMismatch {
                            stencil: self.stencil.to_string(),
                            expected: conn.source,
                            found,
                            context: format!("body of sum_over({conn})"),
                        });
                    }
                }
                Ok(Some(conn.target))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{assign, field, lit, sum_over};
    use crate::builder::StencilBuilder;
    use floe_core::Location;

    const KH: FieldId = FieldId(0);
    const INV: FieldId = FieldId(1);
    const THETA: FieldId = FieldId(2);
    const Z_TEMP: FieldId = FieldId(3);
    const TMP: FieldId = FieldId(4);

    fn catalog() -> Vec<FieldDef> {
        vec![
            FieldDef::column("kh_smag_e", Location::Vertex),
            FieldDef::surface("inv_dual_edge_length", Location::Vertex),
            FieldDef::column("theta_v", Location::Cell),
            FieldDef::column("z_temp", Location::Cell),
            FieldDef::column("tmp", Location::Vertex),
        ]
    }

    fn staged() -> StencilDef {
        StencilBuilder::new("staged")
            .temporary(TMP)
            .upward_across(
                Marker::Nudging,
                Marker::Halo,
                vec![
                    assign(
                        TMP,
                        sum_over(Location::Vertex.over(Location::Cell), field(THETA)),
                    ),
                    assign(
                        Z_TEMP,
                        sum_over(
                            Location::Cell.over(Location::Vertex),
                            field(KH) * field(INV) * field(TMP),
                        ),
                    ),
                ],
            )
            .build()
    }

    #[test]
    fn staged_program_validates() {
        let info = validate(&staged(), &catalog()).unwrap();
        let reads: Vec<FieldId> = info.reads.iter().collect();
        assert_eq!(reads, vec![KH, INV, THETA]);
        let writes: Vec<FieldId> = info.writes.iter().collect();
        assert_eq!(writes, vec![Z_TEMP]);
    }

    #[test]
    fn literal_fill_has_no_location_requirement() {
        let def = StencilBuilder::new("fill")
            .upward_across(
                Marker::LateralBoundary,
                Marker::End,
                vec![assign(Z_TEMP, lit(0.0))],
            )
            .build();
        let info = validate(&def, &catalog()).unwrap();
        assert!(info.reads.is_empty());
    }

    #[test]
    fn counting_neighbors_with_literal_body() {
        // sum_over with a literal body counts neighbors; body has no
        // location so any source kind is acceptable.
        let def = StencilBuilder::new("degree")
            .upward_across(
                Marker::LateralBoundary,
                Marker::End,
                vec![assign(
                    Z_TEMP,
                    sum_over(Location::Cell.over(Location::Vertex), lit(1.0)),
                )],
            )
            .build();
        assert!(validate(&def, &catalog()).is_ok());
    }

    #[test]
    fn rejects_target_location_mismatch() {
        // Vertex-located reduction assigned to a cell field.
        let def = StencilBuilder::new("bad_target")
            .upward_across(
                Marker::Nudging,
                Marker::Halo,
                vec![assign(
                    Z_TEMP,
                    sum_over(Location::Vertex.over(Location::Cell), field(THETA)),
                )],
            )
            .build();
        assert!(matches!(
            validate(&def, &catalog()).unwrap_err(),
            ValidationError::LocationMismatch { .. }
        ));
    }

    #[test]
    fn rejects_mixed_location_operands() {
        let def = StencilBuilder::new("bad_mix")
            .upward_across(
                Marker::Nudging,
                Marker::Halo,
                vec![assign(THETA, field(THETA) * field(KH))],
            )
            .build();
        assert!(matches!(
            validate(&def, &catalog()).unwrap_err(),
            ValidationError::LocationMismatch { .. }
        ));
    }

    #[test]
    fn rejects_reduction_body_at_wrong_location() {
        // Body must be cell-located for Vertex > Cell.
        let def = StencilBuilder::new("bad_body")
            .upward_across(
                Marker::Nudging,
                Marker::Halo,
                vec![assign(
                    TMP,
                    sum_over(Location::Vertex.over(Location::Cell), field(KH)),
                )],
            )
            .build();
        assert!(matches!(
            validate(&def, &catalog()).unwrap_err(),
            ValidationError::LocationMismatch { .. }
        ));
    }

    #[test]
    fn rejects_surface_target_reading_columns() {
        let def = StencilBuilder::new("bad_vertical")
            .upward_across(
                Marker::Nudging,
                Marker::Halo,
                vec![assign(INV, field(KH))],
            )
            .build();
        assert!(matches!(
            validate(&def, &catalog()).unwrap_err(),
            ValidationError::VerticalMismatch { .. }
        ));
    }

    #[test]
    fn rejects_temporary_read_before_write() {
        let def = StencilBuilder::new("premature")
            .temporary(TMP)
            .upward_across(
                Marker::Nudging,
                Marker::Halo,
                vec![assign(
                    Z_TEMP,
                    sum_over(Location::Cell.over(Location::Vertex), field(TMP)),
                )],
            )
            .build();
        assert!(matches!(
            validate(&def, &catalog()).unwrap_err(),
            ValidationError::ReadBeforeWrite { .. }
        ));
    }

    #[test]
    fn rejects_unknown_field_and_empty_shapes() {
        let def = StencilBuilder::new("unknown")
            .upward_across(
                Marker::Nudging,
                Marker::Halo,
                vec![assign(FieldId(99), lit(1.0))],
            )
            .build();
        assert!(matches!(
            validate(&def, &catalog()).unwrap_err(),
            ValidationError::UnknownField { .. }
        ));

        let empty = StencilBuilder::new("empty").build();
        assert!(matches!(
            validate(&empty, &catalog()).unwrap_err(),
            ValidationError::EmptyStencil { .. }
        ));

        let hollow = StencilBuilder::new("hollow")
            .upward_across(Marker::Nudging, Marker::Halo, vec![])
            .build();
        assert!(matches!(
            validate(&hollow, &catalog()).unwrap_err(),
            ValidationError::EmptyBlock { .. }
        ));
    }

    #[test]
    fn rejects_reversed_interval() {
        let def = StencilBuilder::new("reversed")
            .upward_across(Marker::Halo, Marker::Nudging, vec![assign(Z_TEMP, lit(0.0))])
            .build();
        assert!(matches!(
            validate(&def, &catalog()).unwrap_err(),
            ValidationError::ReversedInterval { .. }
        ));
    }

    #[test]
    fn rejects_duplicate_temporary() {
        let def = StencilBuilder::new("dup")
            .temporary(TMP)
            .temporary(TMP)
            .upward_across(
                Marker::Nudging,
                Marker::Halo,
                vec![assign(TMP, lit(0.0))],
            )
            .build();
        assert!(matches!(
            validate(&def, &catalog()).unwrap_err(),
            ValidationError::DuplicateTemporary { .. }
        ));
    }
}

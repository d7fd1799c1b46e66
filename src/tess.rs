// polytess: sweep-line polygon tessellation
// License: MIT
//
// The public tessellator: contour intake, pipeline orchestration, and
// the winding rules. The heavy lifting lives in the sweep and mono
// modules; this file owns the state they share.

use tracing::debug;

use crate::dict::Dict;
use crate::error::TessError;
use crate::geom::Real;
use crate::mesh::{EdgeId, Mesh, VertId, V_HEAD};
use crate::pool::Pool;
use crate::priorityq::PriorityQ;
use crate::sweep::ActiveRegion;

pub mod output;
pub mod project;

/// Decides interior membership from a winding number.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WindingRule {
    /// Odd winding number.
    Odd,
    /// Any nonzero winding number.
    NonZero,
    /// Strictly positive winding number.
    Positive,
    /// Strictly negative winding number.
    Negative,
    /// Winding number with absolute value of at least two.
    AbsGeqTwo,
}

impl WindingRule {
    #[inline]
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            WindingRule::Odd => winding & 1 != 0,
            WindingRule::NonZero => winding != 0,
            WindingRule::Positive => winding > 0,
            WindingRule::Negative => winding < 0,
            WindingRule::AbsGeqTwo => winding >= 2 || winding <= -2,
        }
    }
}

/// An indexed triangle set. Every three consecutive entries of
/// `indices` form one triangle; all of them are in range for
/// `vertices`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tessellation {
    pub indices: Vec<u32>,
    pub vertices: Vec<[Real; 3]>,
}

impl Tessellation {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Largest accepted coordinate magnitude. The bound keeps products of
/// coordinate differences finite in the predicate arithmetic.
pub const MAX_COORD: Real = 1e18;

fn validate_point(p: &[Real; 3]) -> Result<(), TessError> {
    for &c in p {
        if !c.is_finite() {
            return Err(TessError::InvalidInput("coordinate is NaN or infinite"));
        }
        if !(-MAX_COORD..=MAX_COORD).contains(&c) {
            return Err(TessError::InvalidInput(
                "coordinate magnitude beyond supported range",
            ));
        }
    }
    Ok(())
}

/// The tessellator. Feed it contours, then call
/// [`tessellate`](Self::tessellate); all intermediate storage lives
/// here and is recycled between calls.
pub struct Tessellator {
    pub(crate) mesh: Mesh,
    pub(crate) winding_rule: WindingRule,

    // Sweep state.
    pub(crate) dict: Dict,
    pub(crate) pq: PriorityQ,
    pub(crate) regions: Pool<ActiveRegion>,
    pub(crate) event: VertId,

    // Sweep-plane bounding box, set by projection.
    pub(crate) bmin: [Real; 2],
    pub(crate) bmax: [Real; 2],

    /// First intake error, reported when the pipeline runs.
    pub(crate) error: Option<TessError>,
}

impl Tessellator {
    pub fn new() -> Self {
        Tessellator {
            mesh: Mesh::new(),
            winding_rule: WindingRule::Odd,
            dict: Dict::new(),
            pq: PriorityQ::new(),
            regions: Pool::new(),
            event: VertId::NONE,
            bmin: [0.0; 2],
            bmax: [0.0; 2],
            error: None,
        }
    }

    /// Add one closed contour; the last point connects back to the
    /// first implicitly. Coordinates are validated here, before any
    /// mesh mutation.
    pub fn add_contour(&mut self, points: &[[Real; 3]]) -> Result<(), TessError> {
        for p in points {
            if let Err(err) = validate_point(p) {
                self.error = Some(err);
                return Err(err);
            }
        }

        let mut e = EdgeId::NONE;
        for p in points {
            if e.is_none() {
                e = self.mesh.make_edge();
                self.mesh.splice(e, e.sym());
            } else {
                self.mesh.split_edge(e);
                e = self.mesh[e].lnext;
            }

            let org = self.mesh[e].org;
            self.mesh[org].coords = *p;
            self.mesh[e].winding = 1;
            self.mesh[e.sym()].winding = -1;
        }
        Ok(())
    }

    /// Tessellate everything added so far into triangles selected by
    /// `rule`. Consumes the accumulated contours; the tessellator is
    /// empty again afterwards. An empty contour set is not an error.
    pub fn tessellate(&mut self, rule: WindingRule) -> Result<Tessellation, TessError> {
        if let Some(err) = self.error {
            self.reset();
            return Err(err);
        }
        self.winding_rule = rule;

        if self.mesh[V_HEAD].next == V_HEAD {
            self.reset();
            return Ok(Tessellation::default());
        }

        if let Err(err) = self.project_polygon() {
            self.reset();
            return Err(err);
        }

        self.compute_interior();
        self.mesh.discard_exterior();
        self.mesh.check();
        self.mesh.triangulate_interior();
        self.mesh.check();

        let out = self.assemble_output();
        debug!(
            "tessellated {} triangles over {} vertices",
            out.triangle_count(),
            out.vertices.len()
        );
        self.reset();
        Ok(out)
    }

    fn reset(&mut self) {
        self.mesh = Mesh::new();
        self.dict = Dict::new();
        self.pq = PriorityQ::new();
        self.regions.clear();
        self.event = VertId::NONE;
        self.bmin = [0.0; 2];
        self.bmax = [0.0; 2];
        self.error = None;
    }
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}

/// Tessellate a set of closed contours into triangles.
///
/// Convenience wrapper over [`Tessellator`] for the one-shot case:
///
/// ```
/// use polytess::{tessellate, WindingRule};
///
/// let square = vec![
///     [0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [1.0, 1.0, 0.0],
///     [0.0, 1.0, 0.0],
/// ];
/// let out = tessellate(&[square], WindingRule::Positive).unwrap();
/// assert_eq!(out.triangle_count(), 2);
/// ```
pub fn tessellate<C>(contours: &[C], rule: WindingRule) -> Result<Tessellation, TessError>
where
    C: AsRef<[[Real; 3]]>,
{
    let mut tess = Tessellator::new();
    for contour in contours {
        tess.add_contour(contour.as_ref())?;
    }
    tess.tessellate(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winding_rule_truth_table() {
        let cases = [
            (WindingRule::Odd, vec![-3, -1, 1, 3]),
            (WindingRule::NonZero, vec![-2, -1, 1, 2]),
            (WindingRule::Positive, vec![1, 2, 3]),
            (WindingRule::Negative, vec![-3, -2, -1]),
            (WindingRule::AbsGeqTwo, vec![-3, -2, 2, 3]),
        ];
        for (rule, inside) in cases {
            for w in -3..=3 {
                assert_eq!(
                    rule.is_inside(w),
                    inside.contains(&w),
                    "{:?} winding {}",
                    rule,
                    w
                );
            }
        }
    }

    #[test]
    fn empty_contour_set_is_not_an_error() {
        let out = tessellate::<Vec<[Real; 3]>>(&[], WindingRule::Positive).unwrap();
        assert!(out.is_empty());
        assert!(out.vertices.is_empty());
    }

    #[test]
    fn nan_coordinate_is_rejected_at_intake() {
        let mut tess = Tessellator::new();
        let bad = [[0.0, 0.0, 0.0], [Real::NAN, 1.0, 0.0]];
        assert_eq!(
            tess.add_contour(&bad),
            Err(TessError::InvalidInput("coordinate is NaN or infinite"))
        );
        // The error sticks to the pipeline run as well.
        assert!(tess.tessellate(WindingRule::Odd).is_err());
    }

    #[test]
    fn oversized_coordinate_is_rejected() {
        let out = tessellate(
            &[vec![[-2e37, 0.0, 0.0], [0.0, 5.0, 0.0], [1e37, -5.0, 0.0]]],
            WindingRule::Positive,
        );
        assert_eq!(
            out,
            Err(TessError::InvalidInput(
                "coordinate magnitude beyond supported range"
            ))
        );
    }

    #[test]
    fn tessellator_is_reusable_after_error() {
        let mut tess = Tessellator::new();
        tess.add_contour(&[[Real::INFINITY, 0.0, 0.0]]).unwrap_err();
        tess.tessellate(WindingRule::Odd).unwrap_err();

        tess.add_contour(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ])
        .unwrap();
        let out = tess.tessellate(WindingRule::NonZero).unwrap();
        assert_eq!(out.triangle_count(), 1);
    }
}

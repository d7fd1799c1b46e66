// polytess: sweep-line polygon tessellation
// License: MIT
//
// Projection of the 3-D input onto the 2-D sweep plane: fit a plane
// normal, pick the sweep axes, set every vertex's (s, t), and flip the
// orientation if the projected contours come out with negative signed
// area. Z is informational from here on; the sweep only sees (s, t).

use crate::error::TessError;
use crate::geom::Real;
use crate::mesh::{Mesh, F_HEAD, V_HEAD};
use crate::tess::Tessellator;

fn dot(u: &[Real; 3], v: &[Real; 3]) -> Real {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}

fn long_axis(v: &[Real; 3]) -> usize {
    let mut i = 0;
    if v[1].abs() > v[0].abs() {
        i = 1;
    }
    if v[2].abs() > v[i].abs() {
        i = 2;
    }
    i
}

fn short_axis(v: &[Real; 3]) -> usize {
    let mut i = 0;
    if v[1].abs() < v[0].abs() {
        i = 1;
    }
    if v[2].abs() < v[i].abs() {
        i = 2;
    }
    i
}

/// Fit a plane normal to the input: take the diameter along the widest
/// coordinate axis as one chord and the vertex maximizing the cross
/// product with it as the other. Degenerate (collinear or single-point)
/// input falls back to an axis direction.
fn compute_normal(mesh: &Mesh) -> [Real; 3] {
    let first = mesh[V_HEAD].next;
    if first == V_HEAD {
        return [0.0, 0.0, 1.0];
    }

    let mut min_val = mesh[first].coords;
    let mut max_val = mesh[first].coords;
    let mut min_vert = [first; 3];
    let mut max_vert = [first; 3];

    let mut v = first;
    while v != V_HEAD {
        for i in 0..3 {
            let c = mesh[v].coords[i];
            if c < min_val[i] {
                min_val[i] = c;
                min_vert[i] = v;
            }
            if c > max_val[i] {
                max_val[i] = c;
                max_vert[i] = v;
            }
        }
        v = mesh[v].next;
    }

    // Widest axis gives the first chord.
    let mut i = 0;
    if max_val[1] - min_val[1] > max_val[0] - min_val[0] {
        i = 1;
    }
    if max_val[2] - min_val[2] > max_val[i] - min_val[i] {
        i = 2;
    }
    if min_val[i] >= max_val[i] {
        // All points coincide.
        return [0.0, 0.0, 1.0];
    }

    let v1 = min_vert[i];
    let v2 = max_vert[i];
    let c1 = mesh[v1].coords;
    let c2 = mesh[v2].coords;
    let d1 = [c1[0] - c2[0], c1[1] - c2[1], c1[2] - c2[2]];

    let mut norm = [0.0; 3];
    let mut max_len2: Real = 0.0;
    let mut v = mesh[V_HEAD].next;
    while v != V_HEAD {
        let c = mesh[v].coords;
        let d2 = [c[0] - c2[0], c[1] - c2[1], c[2] - c2[2]];
        let tn = [
            d1[1] * d2[2] - d1[2] * d2[1],
            d1[2] * d2[0] - d1[0] * d2[2],
            d1[0] * d2[1] - d1[1] * d2[0],
        ];
        let tl2 = tn[0] * tn[0] + tn[1] * tn[1] + tn[2] * tn[2];
        if tl2 > max_len2 {
            max_len2 = tl2;
            norm = tn;
        }
        v = mesh[v].next;
    }

    if max_len2 <= 0.0 {
        // Collinear input; any perpendicular axis will do.
        norm = [0.0, 0.0, 0.0];
        norm[short_axis(&d1)] = 1.0;
    }
    norm
}

/// The normal was chosen automatically, so pick the orientation that
/// makes the sum of the signed contour areas non-negative: flip every t
/// if it came out negative.
fn check_orientation(mesh: &mut Mesh) {
    let mut area: Real = 0.0;
    let mut f = mesh[F_HEAD].next;
    while f != F_HEAD {
        let e_start = mesh[f].an_edge;
        if !e_start.is_none() && mesh[e_start].winding > 0 {
            let mut e = e_start;
            loop {
                let org = mesh[e].org;
                let dst = mesh.dst(e);
                area += (mesh[org].s - mesh[dst].s) * (mesh[org].t + mesh[dst].t);
                e = mesh[e].lnext;
                if e == e_start {
                    break;
                }
            }
        }
        f = mesh[f].next;
    }

    if area < 0.0 {
        let mut v = mesh[V_HEAD].next;
        while v != V_HEAD {
            mesh[v].t = -mesh[v].t;
            v = mesh[v].next;
        }
    }
}

impl Tessellator {
    /// Project every vertex onto the sweep plane and compute the (s, t)
    /// bounding box. Fails only when the arithmetic exhausts the float
    /// range on inputs that passed intake validation.
    pub(crate) fn project_polygon(&mut self) -> Result<(), TessError> {
        let norm = compute_normal(&self.mesh);
        if !norm.iter().all(|c| c.is_finite()) {
            return Err(TessError::NumericExhaustion("plane-fit normal overflowed"));
        }

        let i = long_axis(&norm);
        let mut s_unit = [0.0; 3];
        let mut t_unit = [0.0; 3];
        s_unit[(i + 1) % 3] = 1.0;
        t_unit[(i + 2) % 3] = if norm[i] > 0.0 { 1.0 } else { -1.0 };

        let mut v = self.mesh[V_HEAD].next;
        while v != V_HEAD {
            let c = self.mesh[v].coords;
            self.mesh[v].s = dot(&c, &s_unit);
            self.mesh[v].t = dot(&c, &t_unit);
            v = self.mesh[v].next;
        }
        check_orientation(&mut self.mesh);

        let mut first = true;
        let mut v = self.mesh[V_HEAD].next;
        while v != V_HEAD {
            let (s, t) = self.mesh.st(v);
            if first {
                self.bmin = [s, t];
                self.bmax = [s, t];
                first = false;
            } else {
                self.bmin[0] = self.bmin[0].min(s);
                self.bmax[0] = self.bmax[0].max(s);
                self.bmin[1] = self.bmin[1].min(t);
                self.bmax[1] = self.bmax[1].max(t);
            }
            v = self.mesh[v].next;
        }

        if !(self.bmin[0].is_finite()
            && self.bmin[1].is_finite()
            && self.bmax[0].is_finite()
            && self.bmax[1].is_finite())
        {
            return Err(TessError::NumericExhaustion("sweep bounding box overflowed"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::EdgeId;

    fn mesh_with_points(points: &[[Real; 3]]) -> Mesh {
        let mut m = Mesh::new();
        let mut e = EdgeId::NONE;
        for p in points {
            if e.is_none() {
                e = m.make_edge();
                m.splice(e, e.sym());
            } else {
                m.split_edge(e);
                e = m[e].lnext;
            }
            let org = m[e].org;
            m[org].coords = *p;
            m[e].winding = 1;
            m[e.sym()].winding = -1;
        }
        m
    }

    #[test]
    fn normal_of_xy_polygon_is_z() {
        let m = mesh_with_points(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]);
        let n = compute_normal(&m);
        assert_eq!(long_axis(&n), 2);
    }

    #[test]
    fn normal_of_xz_polygon_is_y() {
        let m = mesh_with_points(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
        ]);
        let n = compute_normal(&m);
        assert_eq!(long_axis(&n), 1);
    }

    #[test]
    fn collinear_input_gets_a_fallback_normal() {
        let m = mesh_with_points(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 2.0, 0.0]]);
        let n = compute_normal(&m);
        assert!(n.iter().any(|&c| c != 0.0));
    }

    #[test]
    fn coincident_points_get_the_default_normal() {
        let m = mesh_with_points(&[[2.0, 2.0, 2.0]; 4]);
        assert_eq!(compute_normal(&m), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn long_axis_picks_dominant_component() {
        assert_eq!(long_axis(&[0.0, 0.0, 1.0]), 2);
        assert_eq!(long_axis(&[-5.0, 2.0, 1.0]), 0);
        assert_eq!(long_axis(&[0.0, -3.0, 1.0]), 1);
    }
}

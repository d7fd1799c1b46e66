// polytess: sweep-line polygon tessellation
// License: MIT
//
// Geometric predicates over sweep-plane coordinates. Every function here
// works on projected (s, t) pairs; none of them compares floats with a
// tolerance. Signs are taken as-is and structural repairs in the sweep
// handle whatever the predicates report as degenerate.

/// Coordinate type used throughout the tessellator.
pub type Real = f32;

/// Sweep-plane position of a vertex.
pub type Coord = (Real, Real);

/// Lexicographic order on (s, t). Defines the sweep order.
#[inline]
pub fn vert_leq(u: Coord, v: Coord) -> bool {
    u.0 < v.0 || (u.0 == v.0 && u.1 <= v.1)
}

/// Exact coordinate equality.
#[inline]
pub fn vert_eq(u: Coord, v: Coord) -> bool {
    u.0 == v.0 && u.1 == v.1
}

/// Lexicographic order on (t, s); the transposed twin of [`vert_leq`].
#[inline]
pub fn trans_leq(u: Coord, v: Coord) -> bool {
    u.1 < v.1 || (u.1 == v.1 && u.0 <= v.0)
}

/// Given u, v, w with `vert_leq(u, v)` and `vert_leq(v, w)`, returns the
/// signed t-distance from the line uw to v, evaluated at v.s.
///
/// The two gaps `v.s - u.s` and `w.s - v.s` are kept separate and the
/// convex combination is anchored at the nearer endpoint, so the result
/// is exact (zero, no cancellation) when v lies on uw. Returns 0 for a
/// vertical uw.
pub fn edge_eval(u: Coord, v: Coord, w: Coord) -> Real {
    // Callers may stretch the ordering precondition in degenerate cases;
    // the sign stays meaningful, so no assert here.

    let gap_l = v.0 - u.0;
    let gap_r = w.0 - v.0;

    if gap_l + gap_r > 0.0 {
        if gap_l < gap_r {
            (v.1 - u.1) + (u.1 - w.1) * (gap_l / (gap_l + gap_r))
        } else {
            (v.1 - w.1) + (w.1 - u.1) * (gap_r / (gap_l + gap_r))
        }
    } else {
        0.0
    }
}

/// Sign-consistent twin of [`edge_eval`]: same sign, cheaper to compute,
/// scaled by the span w.s - u.s relative to the true distance. Only the
/// sign is meaningful to callers.
pub fn edge_sign(u: Coord, v: Coord, w: Coord) -> Real {
    // Callers may stretch the ordering precondition in degenerate cases;
    // the sign stays meaningful, so no assert here.

    let gap_l = v.0 - u.0;
    let gap_r = w.0 - v.0;

    if gap_l + gap_r > 0.0 {
        (v.1 - w.1) * gap_l + (v.1 - u.1) * gap_r
    } else {
        0.0
    }
}

/// [`edge_eval`] with s and t transposed; preconditions use [`trans_leq`].
pub fn trans_eval(u: Coord, v: Coord, w: Coord) -> Real {
    let gap_l = v.1 - u.1;
    let gap_r = w.1 - v.1;

    if gap_l + gap_r > 0.0 {
        if gap_l < gap_r {
            (v.0 - u.0) + (u.0 - w.0) * (gap_l / (gap_l + gap_r))
        } else {
            (v.0 - w.0) + (w.0 - u.0) * (gap_r / (gap_l + gap_r))
        }
    } else {
        0.0
    }
}

/// [`edge_sign`] with s and t transposed.
pub fn trans_sign(u: Coord, v: Coord, w: Coord) -> Real {
    let gap_l = v.1 - u.1;
    let gap_r = w.1 - v.1;

    if gap_l + gap_r > 0.0 {
        (v.0 - w.0) * gap_l + (v.0 - u.0) * gap_r
    } else {
        0.0
    }
}

/// True if u, v, w wind counter-clockwise (collinear counts as CCW).
#[inline]
pub fn vert_ccw(u: Coord, v: Coord, w: Coord) -> bool {
    u.0 * (v.1 - w.1) + v.0 * (w.1 - u.1) + w.0 * (u.1 - v.1) >= 0.0
}

/// L1 distance between two sweep-plane positions.
#[inline]
pub fn vert_l1_dist(u: Coord, v: Coord) -> Real {
    (u.0 - v.0).abs() + (u.1 - v.1).abs()
}

/// Stable interpolation: (a·y + b·x)/(a + b), with negative weights
/// clamped to zero and the division anchored at the dominant weight.
/// Falls back to the midpoint when both weights vanish. The result is
/// always within [min(x, y), max(x, y)].
pub fn interpolate(mut a: Real, x: Real, mut b: Real, y: Real) -> Real {
    if a < 0.0 {
        a = 0.0;
    }
    if b < 0.0 {
        b = 0.0;
    }
    if a <= b {
        if b == 0.0 {
            x / 2.0 + y / 2.0
        } else {
            x + (y - x) * (a / (a + b))
        }
    } else {
        y + (x - y) * (b / (a + b))
    }
}

/// Intersection of the segments (o1, d1) and (o2, d2).
///
/// The segments must be non-parallel and overlap in s. The result is
/// clamped into the intersection of the two s-ranges and the two
/// t-ranges, which the sweep relies on even when the arithmetic would
/// place the point slightly outside.
pub fn edge_intersect(o1: Coord, d1: Coord, o2: Coord, d2: Coord) -> Coord {
    // s-coordinate: order all four endpoints by vert_leq so that the
    // interpolation weights come out non-negative.
    let (mut a, mut b, mut c, mut d) = (o1, d1, o2, d2);

    if !vert_leq(a, b) {
        std::mem::swap(&mut a, &mut b);
    }
    if !vert_leq(c, d) {
        std::mem::swap(&mut c, &mut d);
    }
    if !vert_leq(a, c) {
        std::mem::swap(&mut a, &mut c);
        std::mem::swap(&mut b, &mut d);
    }

    let s = if !vert_leq(c, b) {
        // Technically no overlap; fall back to the midpoint of the gap.
        c.0 / 2.0 + b.0 / 2.0
    } else if vert_leq(b, d) {
        let mut z1 = edge_eval(a, c, b);
        let mut z2 = edge_eval(c, b, d);
        if z1 + z2 < 0.0 {
            z1 = -z1;
            z2 = -z2;
        }
        interpolate(z1, c.0, z2, b.0)
    } else {
        let mut z1 = edge_sign(a, c, b);
        let mut z2 = -edge_sign(a, d, b);
        if z1 + z2 < 0.0 {
            z1 = -z1;
            z2 = -z2;
        }
        interpolate(z1, c.0, z2, d.0)
    };

    // t-coordinate: same construction under the transposed order.
    let (mut a, mut b, mut c, mut d) = (o1, d1, o2, d2);

    if !trans_leq(a, b) {
        std::mem::swap(&mut a, &mut b);
    }
    if !trans_leq(c, d) {
        std::mem::swap(&mut c, &mut d);
    }
    if !trans_leq(a, c) {
        std::mem::swap(&mut a, &mut c);
        std::mem::swap(&mut b, &mut d);
    }

    let t = if !trans_leq(c, b) {
        c.1 / 2.0 + b.1 / 2.0
    } else if trans_leq(b, d) {
        let mut z1 = trans_eval(a, c, b);
        let mut z2 = trans_eval(c, b, d);
        if z1 + z2 < 0.0 {
            z1 = -z1;
            z2 = -z2;
        }
        interpolate(z1, c.1, z2, b.1)
    } else {
        let mut z1 = trans_sign(a, c, b);
        let mut z2 = -trans_sign(a, d, b);
        if z1 + z2 < 0.0 {
            z1 = -z1;
            z2 = -z2;
        }
        interpolate(z1, c.1, z2, d.1)
    };

    (s, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vert_leq_is_lexicographic() {
        assert!(vert_leq((0.0, 0.0), (1.0, 0.0)));
        assert!(vert_leq((0.0, 0.0), (0.0, 1.0)));
        assert!(vert_leq((0.0, 0.0), (0.0, 0.0)));
        assert!(!vert_leq((1.0, 0.0), (0.0, 5.0)));
    }

    #[test]
    fn trans_leq_is_transposed() {
        assert!(trans_leq((5.0, 0.0), (0.0, 1.0)));
        assert!(trans_leq((0.0, 0.0), (1.0, 0.0)));
        assert!(!trans_leq((0.0, 1.0), (0.0, 0.0)));
    }

    #[test]
    fn edge_eval_measures_distance_above_chord() {
        // v sits one unit above the midpoint of the horizontal chord uw.
        let r = edge_eval((0.0, 0.0), (0.5, 1.0), (1.0, 0.0));
        assert!((r - 1.0).abs() < 1e-6, "got {}", r);
    }

    #[test]
    fn edge_eval_zero_on_chord() {
        let r = edge_eval((0.0, 0.0), (0.5, 0.5), (1.0, 1.0));
        assert_eq!(r, 0.0);
    }

    #[test]
    fn edge_eval_vertical_chord_is_zero() {
        let r = edge_eval((0.0, 0.0), (0.0, 0.5), (0.0, 1.0));
        assert_eq!(r, 0.0);
    }

    #[test]
    fn edge_sign_matches_edge_eval_sign() {
        let cases = [
            ((0.0, 0.0), (0.5, 1.0), (1.0, 0.0)),
            ((0.0, 0.0), (0.5, -1.0), (1.0, 0.0)),
            ((-1.0, 2.0), (0.0, 0.0), (3.0, 1.0)),
            ((0.0, 0.0), (0.5, 0.5), (1.0, 1.0)),
        ];
        for (u, v, w) in cases {
            let sign = edge_sign(u, v, w);
            let eval = edge_eval(u, v, w);
            assert_eq!(
                sign > 0.0,
                eval > 0.0,
                "sign mismatch for {:?} {:?} {:?}",
                u,
                v,
                w
            );
            assert_eq!(sign == 0.0, eval == 0.0);
        }
    }

    #[test]
    fn edge_sign_antisymmetric_under_mirroring() {
        // Reading the same three points swept from the other side must
        // flip the sign.
        let u = (-1.0, 0.25);
        let v = (0.0, 1.0);
        let w = (1.0, 0.5);
        let forward = edge_sign(u, v, w);
        let mirrored = edge_sign((-w.0, w.1), (-v.0, v.1), (-u.0, u.1));
        assert_eq!(forward.signum(), mirrored.signum());
        assert!((forward.abs() - mirrored.abs()).abs() < 1e-6);
    }

    #[test]
    fn interpolate_midpoint_on_zero_weights() {
        let r = interpolate(0.0, 0.0, 0.0, 1.0);
        assert!((r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn interpolate_weighted() {
        // (b*x + a*y) / (a+b) = (1*0 + 1*2) / 2 = 1
        let r = interpolate(1.0, 0.0, 1.0, 2.0);
        assert!((r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn interpolate_clamps_negative_weights() {
        let r = interpolate(-3.0, 0.0, 1.0, 2.0);
        assert_eq!(r, 0.0);
    }

    #[test]
    fn interpolate_stays_in_range() {
        let r = interpolate(1e-30, 1.0, 1e30, 2.0);
        assert!((1.0..=2.0).contains(&r));
    }

    #[test]
    fn edge_intersect_crossing_diagonals() {
        let (s, t) = edge_intersect((0.0, 0.0), (1.0, 1.0), (0.0, 1.0), (1.0, 0.0));
        assert!((s - 0.5).abs() < 1e-5, "s={}", s);
        assert!((t - 0.5).abs() < 1e-5, "t={}", t);
    }

    #[test]
    fn edge_intersect_stays_in_both_envelopes() {
        let o1 = (0.0, 0.0);
        let d1 = (4.0, 1.0);
        let o2 = (1.0, 2.0);
        let d2 = (3.0, -2.0);
        let (s, t) = edge_intersect(o1, d1, o2, d2);
        assert!((1.0..=3.0).contains(&s), "s={}", s);
        assert!((-2.0..=1.0).contains(&t), "t={}", t);
    }

    #[test]
    fn vert_ccw_basic() {
        assert!(vert_ccw((0.0, 0.0), (1.0, 0.0), (0.5, 1.0)));
        assert!(!vert_ccw((0.0, 0.0), (0.5, 1.0), (1.0, 0.0)));
        // Three identical points count as CCW (degenerate).
        assert!(vert_ccw((2.0, 2.0), (2.0, 2.0), (2.0, 2.0)));
    }

    #[test]
    fn vert_l1_dist_basic() {
        assert_eq!(vert_l1_dist((0.0, 0.0), (1.0, 2.0)), 3.0);
    }
}

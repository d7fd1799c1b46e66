// Self-intersecting input: the sweep introduces Steiner vertices at
// interior crossings and the winding rules pick the filled regions.

mod helpers;

use helpers::{assert_area, contour2d, pentagram, total_area, verify_ccw, verify_valid};
use polytess::{tessellate, WindingRule};

#[test]
fn bowtie_odd_fills_both_lobes() {
    let bowtie = contour2d(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]);
    let out = tessellate(&[bowtie], WindingRule::Odd).unwrap();

    verify_valid(&out);
    // A Steiner vertex appears at the crossing (1, 1).
    assert!(out.vertices.contains(&[1.0, 1.0, 0.0]));
    assert_eq!(out.vertices.len(), 5);
    assert_area(&out, 2.0, "bowtie odd");
}

#[test]
fn bowtie_positive_fills_one_lobe() {
    let bowtie = contour2d(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]);
    let out = tessellate(&[bowtie], WindingRule::Positive).unwrap();

    verify_valid(&out);
    assert_area(&out, 1.0, "bowtie positive");
}

#[test]
fn bowtie_nonzero_keeps_both_lobes() {
    // The lobes wind +1 and -1; NonZero accepts either sign.
    let bowtie = contour2d(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]);
    let out = tessellate(&[bowtie], WindingRule::NonZero).unwrap();

    verify_valid(&out);
    assert_area(&out, 2.0, "bowtie nonzero");
}

#[test]
fn pentagram_odd_excludes_the_core() {
    let star = pentagram(0.0, 0.0, 100.0);
    let odd = tessellate(&[star.clone()], WindingRule::Odd).unwrap();
    let nonzero = tessellate(&[star], WindingRule::NonZero).unwrap();

    verify_valid(&odd);
    verify_valid(&nonzero);
    verify_ccw(&odd);
    verify_ccw(&nonzero);

    // Five Steiner vertices join the five input points.
    assert_eq!(odd.vertices.len(), 10);
    assert_eq!(nonzero.vertices.len(), 10);

    // The core pentagon winds twice: even, so Odd drops it and NonZero
    // keeps it.
    let odd_area = total_area(&odd);
    let nonzero_area = total_area(&nonzero);
    assert!(odd_area > 0.0);
    assert!(
        nonzero_area > odd_area,
        "core pentagon missing: odd {} vs nonzero {}",
        odd_area,
        nonzero_area
    );

    // The difference is exactly the core pentagon (circumradius r/φ²,
    // area ≈ 0.3469·r²) against the five points (≈ 0.7756·r²).
    let core = nonzero_area - odd_area;
    assert!(
        (core / odd_area - 0.447).abs() < 0.01,
        "core/points ratio {}",
        core / odd_area
    );
}

#[test]
fn pentagram_abs_geq_two_is_the_core_only() {
    let star = pentagram(0.0, 0.0, 100.0);
    let core = tessellate(&[star.clone()], WindingRule::AbsGeqTwo).unwrap();
    let odd = tessellate(&[star.clone()], WindingRule::Odd).unwrap();
    let nonzero = tessellate(&[star], WindingRule::NonZero).unwrap();

    verify_valid(&core);
    let sum = total_area(&core) + total_area(&odd);
    assert!(
        (sum - total_area(&nonzero)).abs() < 1e-2 * sum,
        "core + points should equal the filled pentagram"
    );
}

#[test]
fn overlapping_triangles_union() {
    let a = contour2d(&[(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)]);
    let b = contour2d(&[(0.0, 2.0), (4.0, 2.0), (2.0, -1.0)]);
    let out = tessellate(&[a, b], WindingRule::NonZero).unwrap();

    verify_valid(&out);
    // Union area, checked against the inclusion-exclusion by the Odd
    // rule (symmetric difference).
    let odd = tessellate(
        &[
            contour2d(&[(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)]),
            contour2d(&[(0.0, 2.0), (4.0, 2.0), (2.0, -1.0)]),
        ],
        WindingRule::Odd,
    )
    .unwrap();
    assert!(total_area(&out) > total_area(&odd));
}

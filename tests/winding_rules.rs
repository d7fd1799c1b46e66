// Winding-rule selection over nested and overlapping contours, with
// exact area accounting.

mod helpers;

use helpers::{assert_area, contour2d, verify_valid};
use polytess::{tessellate, Tessellation, TessError, WindingRule};

const ALL_RULES: [WindingRule; 5] = [
    WindingRule::Odd,
    WindingRule::NonZero,
    WindingRule::Positive,
    WindingRule::Negative,
    WindingRule::AbsGeqTwo,
];

/// Three nested squares: outer 6x6 CCW, middle 4x4 CW, inner 2x2 CCW.
/// Winding numbers outside-in: 0, 1, 0, 1.
fn nested_squares(rule: WindingRule) -> Result<Tessellation, TessError> {
    let outer = contour2d(&[(-3.0, -3.0), (3.0, -3.0), (3.0, 3.0), (-3.0, 3.0)]);
    let middle = contour2d(&[(-2.0, -2.0), (-2.0, 2.0), (2.0, 2.0), (2.0, -2.0)]);
    let inner = contour2d(&[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]);
    tessellate(&[outer, middle, inner], rule)
}

#[test]
fn nested_squares_odd() {
    let out = nested_squares(WindingRule::Odd).unwrap();
    verify_valid(&out);
    // The winding-1 ring (36 - 16) plus the winding-1 inner square (4).
    assert_area(&out, 24.0, "nested odd");
}

#[test]
fn nested_squares_nonzero() {
    let out = nested_squares(WindingRule::NonZero).unwrap();
    verify_valid(&out);
    assert_area(&out, 24.0, "nested nonzero");
}

#[test]
fn nested_squares_positive() {
    let out = nested_squares(WindingRule::Positive).unwrap();
    verify_valid(&out);
    assert_area(&out, 24.0, "nested positive");
}

#[test]
fn nested_squares_negative_is_empty() {
    let out = nested_squares(WindingRule::Negative).unwrap();
    verify_valid(&out);
    assert!(out.is_empty(), "no region winds negative");
}

#[test]
fn nested_squares_abs_geq_two_is_empty() {
    let out = nested_squares(WindingRule::AbsGeqTwo).unwrap();
    verify_valid(&out);
    assert!(out.is_empty(), "no region reaches |winding| 2");
}

/// Two overlapping CCW squares; the 1x1 overlap has winding 2.
fn overlapping_squares(rule: WindingRule) -> Tessellation {
    let a = contour2d(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
    let b = contour2d(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
    tessellate(&[a, b], rule).unwrap()
}

#[test]
fn overlapping_squares_odd_excludes_overlap() {
    let out = overlapping_squares(WindingRule::Odd);
    verify_valid(&out);
    assert_area(&out, 6.0, "overlap odd");
}

#[test]
fn overlapping_squares_nonzero_is_the_union() {
    let out = overlapping_squares(WindingRule::NonZero);
    verify_valid(&out);
    assert_area(&out, 7.0, "overlap nonzero");
}

#[test]
fn overlapping_squares_abs_geq_two_is_the_intersection() {
    let out = overlapping_squares(WindingRule::AbsGeqTwo);
    verify_valid(&out);
    assert_area(&out, 1.0, "overlap abs>=2");
}

#[test]
fn coincident_squares_double_the_winding() {
    let square = contour2d(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
    let out = tessellate(&[square.clone(), square], WindingRule::AbsGeqTwo).unwrap();
    verify_valid(&out);
    assert_area(&out, 16.0, "coincident squares abs>=2");
}

#[test]
fn coincident_squares_cancel_under_odd() {
    let square = contour2d(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
    let out = tessellate(&[square.clone(), square], WindingRule::Odd).unwrap();
    verify_valid(&out);
    assert!(out.is_empty(), "winding 2 everywhere is even");
}

#[test]
fn every_rule_handles_a_concave_star() {
    let star = helpers::star(5, 0.0, 0.0, 100.0, 40.0);
    let mut areas = Vec::new();
    for rule in ALL_RULES {
        let out = tessellate(&[star.clone()], rule).unwrap();
        verify_valid(&out);
        areas.push(helpers::total_area(&out));
    }
    // A simple CCW polygon: Odd, NonZero, and Positive agree exactly;
    // Negative and AbsGeqTwo select nothing.
    assert!(areas[0] > 0.0);
    assert!((areas[0] - areas[1]).abs() < 1e-2);
    assert!((areas[0] - areas[2]).abs() < 1e-2);
    assert_eq!(areas[3], 0.0);
    assert_eq!(areas[4], 0.0);
}

// Boundary rejection: bad coordinates fail the whole call with an
// error and no output.

mod helpers;

use helpers::contour2d;
use polytess::{tessellate, TessError, WindingRule};

#[test]
fn nan_quad_is_rejected() {
    let quad = vec![
        [f32::NAN, f32::NAN, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ];
    let err = tessellate(&[quad], WindingRule::Positive).unwrap_err();
    assert!(matches!(err, TessError::InvalidInput(_)));
}

#[test]
fn infinite_coordinate_is_rejected() {
    let tri = vec![
        [0.0, 0.0, 0.0],
        [f32::INFINITY, 0.0, 0.0],
        [0.0, 1.0, 0.0],
    ];
    let err = tessellate(&[tri], WindingRule::Odd).unwrap_err();
    assert!(matches!(err, TessError::InvalidInput(_)));
}

#[test]
fn overflow_triangle_is_rejected() {
    let tri = vec![
        [-2e37, 0.0, 0.0],
        [0.0, 5.0, 0.0],
        [1e37, -5.0, 0.0],
    ];
    let err = tessellate(&[tri], WindingRule::Positive).unwrap_err();
    assert!(matches!(err, TessError::InvalidInput(_)));
}

#[test]
fn bad_contour_poisons_the_whole_call() {
    let good = contour2d(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    let bad = vec![[0.0, f32::NAN, 0.0]];
    assert!(tessellate(&[good, bad], WindingRule::Positive).is_err());
}

#[test]
fn nan_z_is_rejected_too() {
    // Z is informational but still validated at the boundary.
    let tri = vec![
        [0.0, 0.0, f32::NAN],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
    ];
    assert!(tessellate(&[tri], WindingRule::Positive).is_err());
}

#[test]
fn error_reports_are_displayable() {
    let err = tessellate(&[vec![[f32::NAN, 0.0, 0.0]]], WindingRule::Odd).unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("invalid input"), "message was {:?}", msg);
}

// Shared test utilities for the polytess integration tests.

#![allow(dead_code)]

use polytess::Tessellation;

/// Lift a 2-D point list into the z = 0 plane.
pub fn contour2d(points: &[(f32, f32)]) -> Vec<[f32; 3]> {
    points.iter().map(|&(x, y)| [x, y, 0.0]).collect()
}

/// Signed area of a triangle in the xy plane.
pub fn triangle_area(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> f32 {
    0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]))
}

/// Sum of absolute triangle areas (xy projection).
pub fn total_area(out: &Tessellation) -> f32 {
    out.indices
        .chunks_exact(3)
        .map(|tri| {
            triangle_area(
                out.vertices[tri[0] as usize],
                out.vertices[tri[1] as usize],
                out.vertices[tri[2] as usize],
            )
            .abs()
        })
        .sum()
}

/// Sum of signed triangle areas (xy projection).
pub fn total_signed_area(out: &Tessellation) -> f32 {
    out.indices
        .chunks_exact(3)
        .map(|tri| {
            triangle_area(
                out.vertices[tri[0] as usize],
                out.vertices[tri[1] as usize],
                out.vertices[tri[2] as usize],
            )
        })
        .sum()
}

pub fn assert_area(out: &Tessellation, expected: f32, label: &str) {
    let area = total_area(out);
    let tolerance = 1e-3 * expected.abs().max(1.0);
    assert!(
        (area - expected).abs() < tolerance,
        "{}: expected area ~{}, got {}",
        label,
        expected,
        area
    );
}

/// Structural validity: finite vertices, in-range indices, no triangle
/// referencing the same vertex twice.
pub fn verify_valid(out: &Tessellation) {
    assert_eq!(out.indices.len() % 3, 0, "index count must be a multiple of 3");
    for (i, v) in out.vertices.iter().enumerate() {
        for &c in v {
            assert!(c.is_finite(), "vertex {} has non-finite component {}", i, c);
        }
    }
    for (t, tri) in out.indices.chunks_exact(3).enumerate() {
        for &idx in tri {
            assert!(
                (idx as usize) < out.vertices.len(),
                "triangle {} index {} out of range ({} vertices)",
                t,
                idx,
                out.vertices.len()
            );
        }
        assert!(
            tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2],
            "triangle {} has repeated vertices: {:?}",
            t,
            tri
        );
    }
}

/// All output triangles read CCW in the xy plane. Valid whenever the
/// input's overall orientation is CCW (so projection does not flip t).
pub fn verify_ccw(out: &Tessellation) {
    for (t, tri) in out.indices.chunks_exact(3).enumerate() {
        let area = triangle_area(
            out.vertices[tri[0] as usize],
            out.vertices[tri[1] as usize],
            out.vertices[tri[2] as usize],
        );
        assert!(area >= -1e-2, "triangle {} is CW (signed area {})", t, area);
    }
}

/// Regular n-gon, CCW.
pub fn regular_polygon(sides: usize, cx: f32, cy: f32, radius: f32) -> Vec<[f32; 3]> {
    (0..sides)
        .map(|i| {
            let angle = 2.0 * std::f32::consts::PI * i as f32 / sides as f32;
            [cx + radius * angle.cos(), cy + radius * angle.sin(), 0.0]
        })
        .collect()
}

/// Simple (non-self-intersecting) star: alternating outer and inner
/// radii, CCW.
pub fn star(points: usize, cx: f32, cy: f32, outer: f32, inner: f32) -> Vec<[f32; 3]> {
    (0..points * 2)
        .map(|i| {
            let angle = std::f32::consts::PI * i as f32 / points as f32;
            let r = if i % 2 == 0 { outer } else { inner };
            [cx + r * angle.cos(), cy + r * angle.sin(), 0.0]
        })
        .collect()
}

/// Self-intersecting five-pointed star (pentagram): the five pentagon
/// vertices connected every-second, winding twice around the center.
pub fn pentagram(cx: f32, cy: f32, radius: f32) -> Vec<[f32; 3]> {
    (0..5)
        .map(|k| {
            let angle = 4.0 * std::f32::consts::PI * k as f32 / 5.0;
            [cx + radius * angle.cos(), cy + radius * angle.sin(), 0.0]
        })
        .collect()
}

/// Treat every output triangle as its own contour, e.g. to re-tessellate
/// a result.
pub fn triangles_as_contours(out: &Tessellation) -> Vec<Vec<[f32; 3]>> {
    out.indices
        .chunks_exact(3)
        .map(|tri| {
            tri.iter()
                .map(|&i| out.vertices[i as usize])
                .collect::<Vec<_>>()
        })
        .collect()
}

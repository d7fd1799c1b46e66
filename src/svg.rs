// polytess: sweep-line polygon tessellation
// License: MIT
//
// Debug SVG writer: draws the output triangles over the input contours.
// Strictly a consumer of the public output arrays; nothing in the core
// depends on it.

use std::io::{self, Write};

use crate::geom::Real;
use crate::tess::Tessellation;

/// Triangle fills cycle through a fixed palette so diffs of debug
/// output stay stable between runs.
const FILLS: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#9c755f",
];

/// Render a tessellation and its input contours as an SVG document.
/// Only x and y are drawn; z is dropped.
pub fn write_svg<W, C>(out: &mut W, contours: &[C], tess: &Tessellation) -> io::Result<()>
where
    W: Write,
    C: AsRef<[[Real; 3]]>,
{
    let (min_x, min_y, max_x, max_y) = bounds(contours, tess);
    let padding: Real = 10.0;
    let width = max_x - min_x + 2.0 * padding;
    let height = max_y - min_y + 2.0 * padding;

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        width,
        height,
        min_x - padding,
        min_y - padding,
        width,
        height
    )?;

    writeln!(out, r#"  <g stroke="black" stroke-width="1">"#)?;
    for (i, tri) in tess.indices.chunks_exact(3).enumerate() {
        let a = tess.vertices[tri[0] as usize];
        let b = tess.vertices[tri[1] as usize];
        let c = tess.vertices[tri[2] as usize];
        writeln!(
            out,
            r#"    <polygon points="{},{} {},{} {},{}" fill="{}" fill-opacity="0.6"/>"#,
            a[0],
            a[1],
            b[0],
            b[1],
            c[0],
            c[1],
            FILLS[i % FILLS.len()]
        )?;
    }
    writeln!(out, "  </g>")?;

    writeln!(out, r#"  <g stroke="blue" stroke-width="2" fill="none">"#)?;
    for contour in contours {
        let pts = contour.as_ref();
        if pts.is_empty() {
            continue;
        }
        write!(out, r#"    <path d=""#)?;
        for (i, p) in pts.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            write!(out, "{} {} {} ", cmd, p[0], p[1])?;
        }
        writeln!(out, r#"Z"/>"#)?;
    }
    writeln!(out, "  </g>")?;

    writeln!(out, "</svg>")
}

fn bounds<C: AsRef<[[Real; 3]]>>(
    contours: &[C],
    tess: &Tessellation,
) -> (Real, Real, Real, Real) {
    let mut min_x = Real::MAX;
    let mut min_y = Real::MAX;
    let mut max_x = Real::MIN;
    let mut max_y = Real::MIN;
    let mut any = false;

    let points = contours
        .iter()
        .flat_map(|c| c.as_ref().iter())
        .chain(tess.vertices.iter());
    for p in points {
        min_x = min_x.min(p[0]);
        min_y = min_y.min(p[1]);
        max_x = max_x.max(p[0]);
        max_y = max_y.max(p[1]);
        any = true;
    }

    if any {
        (min_x, min_y, max_x, max_y)
    } else {
        (0.0, 0.0, 0.0, 0.0)
    }
}

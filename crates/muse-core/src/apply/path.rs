//! SVG path data for the supported shapes.

use crate::design::ShapeKind;

/// Path data for `kind`, drawn in a `width` x `height` box anchored at the origin.
pub fn shape_path(kind: ShapeKind, width: u32, height: u32) -> String {
    match kind {
        ShapeKind::Rectangle => rectangle_path(width, height),
        ShapeKind::Circle => circle_path(width, height),
        ShapeKind::Triangle => triangle_path(width, height),
    }
}

pub fn rectangle_path(width: u32, height: u32) -> String {
    format!("M 0,0 L {w},0 L {w},{h} L 0,{h} Z", w = width, h = height)
}

/// Ellipse inscribed in the box, closed with two half arcs.
pub fn circle_path(width: u32, height: u32) -> String {
    let rx = half(width);
    let ry = half(height);
    format!(
        "M 0,{ry} A {rx},{ry} 0 1,0 {w},{ry} A {rx},{ry} 0 1,0 0,{ry} Z",
        rx = rx,
        ry = ry,
        w = width
    )
}

/// Isosceles triangle with its apex centered on the top edge.
pub fn triangle_path(width: u32, height: u32) -> String {
    format!(
        "M {apex},0 L {w},{h} L 0,{h} Z",
        apex = half(width),
        w = width,
        h = height
    )
}

/// `n / 2` printed without a trailing `.0` for even values.
fn half(n: u32) -> f64 {
    f64::from(n) / 2.0
}

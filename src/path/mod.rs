mod circle;
mod curve;
mod svg;

pub use circle::Circle;
pub use curve::Curve;
pub use svg::{SvgLineError, SvgPathError, parse_svg_path, parse_svg_paths};

use crate::geometry::Point;
use std::fmt::Debug;

/// A 2D curve that can be sampled by arclength.
pub trait Path: Debug + Send + Sync {
    /// The total length of the curve.
    fn total_length(&self) -> f64;

    /// The point found after travelling `length` units along the curve.
    ///
    /// Lengths outside `[0, total_length]` are clamped to the curve's endpoints.
    fn point_at_length(&self, length: f64) -> Point;
}

impl<P: Path + ?Sized> Path for Box<P> {
    fn total_length(&self) -> f64 {
        (**self).total_length()
    }

    fn point_at_length(&self, length: f64) -> Point {
        (**self).point_at_length(length)
    }
}

/// Compute the positions `count` evenly spread elements take on a path.
///
/// Element `i` (1-indexed) sits at `i / (count + 1)` of the path's length, so no element lands on
/// either endpoint. Every point is multiplied by `scale`.
pub fn layout_targets(path: &dyn Path, count: usize, scale: f64) -> Vec<Point> {
    let length = path.total_length();
    (1..=count)
        .map(|ordinal| {
            let fraction = ordinal as f64 / (count + 1) as f64;
            path.point_at_length(length * fraction).scale(scale)
        })
        .collect()
}

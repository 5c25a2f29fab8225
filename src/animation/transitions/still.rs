use super::Transition;
use crate::geometry::Point;

/// Still transition - No intermediate keyframes, elements glide straight to their target
pub struct Still;

impl Transition for Still {
    fn keyframes(&mut self, _x: f64, _y: f64) -> Vec<Point> {
        Vec::new()
    }
}

use super::Transition;
use crate::geometry::Point;

/// Turn transition - Swings every element through the diagonal before it settles
pub struct Turn;

impl Transition for Turn {
    fn keyframes(&mut self, _x: f64, y: f64) -> Vec<Point> {
        vec![Point::new(y, y)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goes_through_diagonal() {
        assert_eq!(Turn.keyframes(3.0, 7.0), vec![Point::new(7.0, 7.0)]);
    }
}

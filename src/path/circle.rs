use super::Path;
use crate::geometry::Point;
use std::f64::consts::TAU;

/// A full circle, starting at angle 0 (the rightmost point) and sweeping with increasing angle.
///
/// Since the y axis points down this looks clockwise on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius: radius.abs() }
    }
}

impl Path for Circle {
    fn total_length(&self) -> f64 {
        TAU * self.radius
    }

    fn point_at_length(&self, length: f64) -> Point {
        if self.radius == 0.0 {
            return self.center;
        }
        let length = length.clamp(0.0, self.total_length());
        let angle = length / self.radius;
        self.center + Point::new(angle.cos(), angle.sin()) * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn quarter_turns() {
        let circle = Circle::new(Point::new(50.0, 50.0), 10.0);
        let quarter = circle.total_length() / 4.0;

        let right = circle.point_at_length(0.0);
        assert_abs_diff_eq!(right.x, 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(right.y, 50.0, epsilon = 1e-9);

        let bottom = circle.point_at_length(quarter);
        assert_abs_diff_eq!(bottom.x, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bottom.y, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_radius() {
        let circle = Circle::new(Point::new(1.0, 1.0), 0.0);
        assert_eq!(circle.total_length(), 0.0);
        assert_eq!(circle.point_at_length(5.0), Point::new(1.0, 1.0));
    }
}

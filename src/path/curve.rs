use super::Path;
use crate::geometry::Point;
use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathEl, PathSeg};

/// Accuracy of arclength computations on curved segments, in surface units.
const ARCLEN_ACCURACY: f64 = 1e-6;

#[derive(Clone, Debug)]
struct Segment {
    curve: PathSeg,
    length: f64,
    end_length: f64,
}

/// A path made of lines and Bézier segments, measured by arclength.
///
/// A curve built from several sub-paths skips the jump between them, and the jump does not count
/// towards the total length.
#[derive(Clone, Debug, Default)]
pub struct Curve {
    segments: Vec<Segment>,
    first_point: Option<Point>,
}

impl Curve {
    pub fn from_bez_path(path: &BezPath) -> Self {
        let first_point = match path.elements().first() {
            Some(PathEl::MoveTo(point)) => Some(Point::from(*point)),
            _ => None,
        };
        let mut total = 0.0;
        let segments = path
            .segments()
            .map(|curve| {
                let length = curve.arclen(ARCLEN_ACCURACY);
                total += length;
                Segment { curve, length, end_length: total }
            })
            .collect();
        Self { segments, first_point }
    }

    /// Straight segments going through every point in order.
    pub fn polyline<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut path = BezPath::new();
        let mut points = points.into_iter();
        if let Some(first) = points.next() {
            path.move_to(first);
            for point in points {
                path.line_to(point);
            }
        }
        Self::from_bez_path(&path)
    }

    /// A straight line between two points.
    pub fn line(from: Point, to: Point) -> Self {
        Self::polyline([from, to])
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl Path for Curve {
    fn total_length(&self) -> f64 {
        self.segments.last().map(|s| s.end_length).unwrap_or(0.0)
    }

    fn point_at_length(&self, length: f64) -> Point {
        let total = self.total_length();
        if !(total.is_finite() && total > 0.0) {
            return self.first_point.unwrap_or(Point::ORIGIN);
        }
        let length = if length.is_nan() { 0.0 } else { length.clamp(0.0, total) };
        // The first segment that ends at or after the requested length contains it.
        let index = self.segments.partition_point(|s| s.end_length < length).min(self.segments.len() - 1);
        let segment = &self.segments[index];
        if segment.length == 0.0 {
            return segment.curve.start().into();
        }
        let within = (length - (segment.end_length - segment.length)).clamp(0.0, segment.length);
        let t = segment.curve.inv_arclen(within, ARCLEN_ACCURACY);
        segment.curve.eval(t).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn square() -> Curve {
        Curve::polyline([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 0.0),
        ])
    }

    #[test]
    fn length() {
        assert_abs_diff_eq!(square().total_length(), 40.0);
        assert_eq!(square().segment_count(), 4);
    }

    #[rstest]
    #[case(0.0, Point::new(0.0, 0.0))]
    #[case(5.0, Point::new(5.0, 0.0))]
    #[case(10.0, Point::new(10.0, 0.0))]
    #[case(15.0, Point::new(10.0, 5.0))]
    #[case(25.0, Point::new(5.0, 10.0))]
    #[case(40.0, Point::new(0.0, 0.0))]
    fn points_along_square(#[case] length: f64, #[case] expected: Point) {
        let point = square().point_at_length(length);
        assert_abs_diff_eq!(point.x, expected.x, epsilon = 1e-9);
        assert_abs_diff_eq!(point.y, expected.y, epsilon = 1e-9);
    }

    #[rstest]
    #[case(-5.0, Point::new(0.0, 0.0))]
    #[case(100.0, Point::new(10.0, 0.0))]
    #[case(f64::NAN, Point::new(0.0, 0.0))]
    fn lengths_are_clamped(#[case] length: f64, #[case] expected: Point) {
        let line = Curve::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(line.point_at_length(length), expected);
    }

    #[test]
    fn subpath_gaps_are_not_measured() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.move_to((100.0, 100.0));
        path.line_to((100.0, 110.0));
        let curve = Curve::from_bez_path(&path);
        assert_abs_diff_eq!(curve.total_length(), 20.0);
        assert_eq!(curve.point_at_length(15.0), Point::new(100.0, 105.0));
    }

    #[test]
    fn cubic_segments_are_measured_by_arclength() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        // Control points on the line keep the curve on it.
        path.curve_to((2.0, 0.0), (8.0, 0.0), (10.0, 0.0));
        let curve = Curve::from_bez_path(&path);
        assert_abs_diff_eq!(curve.total_length(), 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(curve.point_at_length(5.0).x, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn degenerate_paths() {
        assert_eq!(Curve::default().total_length(), 0.0);
        assert_eq!(Curve::default().point_at_length(3.0), Point::ORIGIN);

        let single = Curve::polyline([Point::new(3.0, 4.0)]);
        assert_eq!(single.total_length(), 0.0);
        assert_eq!(single.point_at_length(1.0), Point::new(3.0, 4.0));

        let collapsed = Curve::line(Point::new(2.0, 2.0), Point::new(2.0, 2.0));
        assert_eq!(collapsed.point_at_length(0.0), Point::new(2.0, 2.0));
    }

    #[test]
    fn unbounded_lengths_do_not_panic() {
        let curve = Curve::polyline([
            Point::new(1.0, 2.0),
            Point::new(f64::INFINITY, 0.0),
            Point::new(f64::INFINITY, 0.0),
        ]);
        assert!(!curve.total_length().is_finite());
        assert_eq!(curve.point_at_length(10.0), Point::new(1.0, 2.0));
        assert_eq!(crate::path::layout_targets(&curve, 3, 1.0), vec![Point::new(1.0, 2.0); 3]);
    }
}

use super::{Curve, Path};
use kurbo::{BezPath, PathEl, SvgParseError};

/// Errors that can occur when parsing SVG path data
#[derive(thiserror::Error, Debug)]
pub enum SvgPathError {
    #[error("path data must start with a moveto command, found '{0}'")]
    MissingMoveTo(char),

    #[error("malformed path data: {0}")]
    Malformed(#[from] SvgParseError),

    #[error("path data holds a coordinate or length that is not finite")]
    InvalidNumber,
}

/// A path that failed to parse in a file holding one path per line.
#[derive(thiserror::Error, Debug)]
#[error("line {line}: {source}")]
pub struct SvgLineError {
    pub line: usize,
    #[source]
    pub source: SvgPathError,
}

/// Parse a list of paths, one per line. Empty lines and lines starting with `#` are ignored.
pub fn parse_svg_paths(contents: &str) -> Result<Vec<Curve>, SvgLineError> {
    contents
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, data)| parse_svg_path(data).map_err(|source| SvgLineError { line, source }))
        .collect()
}

/// Parse the contents of an SVG `d` attribute.
///
/// Empty path data yields an empty curve. Elliptical arcs are converted into cubic segments.
pub fn parse_svg_path(data: &str) -> Result<Curve, SvgPathError> {
    if let Some(first) = data.trim_start().chars().next() {
        if !matches!(first, 'M' | 'm') {
            return Err(SvgPathError::MissingMoveTo(first));
        }
    }
    let path = BezPath::from_svg(data)?;
    if !path.elements().iter().all(is_finite) {
        return Err(SvgPathError::InvalidNumber);
    }
    let curve = Curve::from_bez_path(&path);
    // Finite coordinates far apart can still add up to an infinite length.
    if !curve.total_length().is_finite() {
        return Err(SvgPathError::InvalidNumber);
    }
    Ok(curve)
}

fn is_finite(element: &PathEl) -> bool {
    match *element {
        PathEl::MoveTo(point) | PathEl::LineTo(point) => point.is_finite(),
        PathEl::QuadTo(control, point) => control.is_finite() && point.is_finite(),
        PathEl::CurveTo(first, second, point) => first.is_finite() && second.is_finite() && point.is_finite(),
        PathEl::ClosePath => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;
    use std::f64::consts::PI;

    fn length(data: &str) -> f64 {
        parse_svg_path(data).expect("invalid path").total_length()
    }

    #[rstest]
    #[case::absolute_lines("M0 0 L10 0 L10 10", 20.0)]
    #[case::relative_lines("m5 5 l10 0 l0 10", 20.0)]
    #[case::implicit_lineto("M0 0 10 0 10 10", 20.0)]
    #[case::horizontal_vertical("M0 0 H10 V10 h-10 v-10", 40.0)]
    #[case::closepath("M0 0 h10 v10 h-10 z", 40.0)]
    #[case::commas("M0,0 L3,4", 5.0)]
    #[case::exponent("M0 0 L1e1 0", 10.0)]
    #[case::subpaths("M0 0 h10 M50 50 h10", 20.0)]
    #[case::empty("", 0.0)]
    #[case::move_only("M3 3", 0.0)]
    fn lengths(#[case] data: &str, #[case] expected: f64) {
        assert_abs_diff_eq!(length(data), expected, epsilon = 1e-9);
    }

    #[test]
    fn smooth_cubic_reflects_control() {
        let path = parse_svg_path("M0 0 C0 10 10 10 10 0 S20 -10 20 0").expect("invalid path");
        // The second half mirrors the first, so it sits below the x axis at its midpoint.
        let total = path.total_length();
        let first = path.point_at_length(total * 0.25);
        let second = path.point_at_length(total * 0.75);
        assert!(first.y > 0.0);
        assert!(second.y < 0.0);
        assert_abs_diff_eq!(first.y, -second.y, epsilon = 0.01);
    }

    #[test]
    fn quadratic_curves() {
        let path = parse_svg_path("M0 0 Q5 10 10 0 T20 0").expect("invalid path");
        let end = path.point_at_length(path.total_length());
        assert_abs_diff_eq!(end.x, 20.0, epsilon = 1e-6);
        assert_abs_diff_eq!(end.y, 0.0, epsilon = 1e-6);
        assert!(path.point_at_length(path.total_length() * 0.25).y > 0.0);
        assert!(path.point_at_length(path.total_length() * 0.75).y < 0.0);
    }

    #[test]
    fn semicircle_arc() {
        let path = parse_svg_path("M0 0 A10 10 0 0 1 20 0").expect("invalid path");
        assert_abs_diff_eq!(path.total_length(), PI * 10.0, epsilon = 0.05);
        let top = path.point_at_length(path.total_length() / 2.0);
        assert_abs_diff_eq!(top.x, 10.0, epsilon = 0.05);
        assert_abs_diff_eq!(top.y, -10.0, epsilon = 0.05);
    }

    #[test]
    fn small_radii_are_scaled_up() {
        let path = parse_svg_path("M0 0 A1 1 0 0 1 20 0").expect("invalid path");
        assert_abs_diff_eq!(path.total_length(), PI * 10.0, epsilon = 0.05);
    }

    #[test]
    fn paths_file() {
        let contents = "# shapes\nM0 0 h10\n\n  M0 0 v5  \n";
        let paths = parse_svg_paths(contents).expect("invalid paths");
        assert_eq!(paths.len(), 2);
        assert_abs_diff_eq!(paths[1].total_length(), 5.0);

        let error = parse_svg_paths("M0 0 h1\nh1").unwrap_err();
        assert_eq!(error.line, 2);
        assert!(matches!(error.source, SvgPathError::MissingMoveTo('h')));
        assert_eq!(error.to_string(), "line 2: path data must start with a moveto command, found 'h'");
    }

    #[rstest]
    #[case("L10 10", 'L')]
    #[case("  10 10", '1')]
    fn missing_moveto(#[case] data: &str, #[case] found: char) {
        assert!(matches!(parse_svg_path(data), Err(SvgPathError::MissingMoveTo(c)) if c == found));
    }

    #[rstest]
    #[case("M0 0 X")]
    #[case("M0 0 L5")]
    fn malformed(#[case] data: &str) {
        assert!(matches!(parse_svg_path(data), Err(SvgPathError::Malformed(_))));
    }

    #[rstest]
    #[case::overflowing_number("M0 0 L1e400 0 L1e400 0")]
    #[case::overflowing_length("M-1e308 0 L1e308 0")]
    fn non_finite_paths_are_rejected(#[case] data: &str) {
        assert!(matches!(parse_svg_path(data), Err(SvgPathError::InvalidNumber)));
    }

    #[test]
    fn starts_where_the_data_starts() {
        let path = parse_svg_path("M3 4 l3 4").expect("invalid path");
        assert_eq!(path.point_at_length(0.0), Point::new(3.0, 4.0));
        assert_eq!(path.point_at_length(5.0), Point::new(6.0, 8.0));
    }
}

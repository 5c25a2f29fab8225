/// An RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend towards `other`, `amount = 0` yields `self` and `amount = 1` yields `other`.
    pub fn blend(self, other: Color, amount: f32) -> Color {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| (from as f32 + (to as f32 - from as f32) * amount).round() as u8;
        Color::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        crossterm::style::Color::Rgb { r: color.r, g: color.g, b: color.b }
    }
}

/// Convert HSL to RGB color
/// H: hue (0-360), S: saturation (0-100), L: lightness (0-100)
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    let s = s / 100.0;
    let l = l / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Color::new(((r + m) * 255.0) as u8, ((g + m) * 255.0) as u8, ((b + m) * 255.0) as u8)
}

/// Generate a rainbow color for a given position
/// total: total number of positions, index: current position (0-based)
pub fn rainbow_color(index: usize, total: usize) -> Color {
    let hue = (index as f32 / total.max(1) as f32) * 360.0;
    hsl_to_rgb(hue, 100.0, 50.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, Color::new(255, 0, 0))]
    #[case(120.0, Color::new(0, 255, 0))]
    #[case(240.0, Color::new(0, 0, 255))]
    fn primary_hues(#[case] hue: f32, #[case] expected: Color) {
        assert_eq!(hsl_to_rgb(hue, 100.0, 50.0), expected);
    }

    #[test]
    fn blend() {
        let white = Color::new(255, 255, 255);
        assert_eq!(Color::BLACK.blend(white, 0.0), Color::BLACK);
        assert_eq!(Color::BLACK.blend(white, 1.0), white);
        assert_eq!(Color::BLACK.blend(white, 0.5), Color::new(128, 128, 128));
    }

    #[test]
    fn rainbow_starts_red() {
        assert_eq!(rainbow_color(0, 10), Color::new(255, 0, 0));
        assert_eq!(rainbow_color(0, 0), Color::new(255, 0, 0));
    }
}

//! Draws text boxes onto a terminal.

mod color;

pub use color::{Color, hsl_to_rgb, rainbow_color};

use crate::config::RenderConfig;
use crate::element::{TextBox, VisualElement};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use serde::Deserialize;
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

/// The color elements are drawn with before their opacity is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Palette {
    /// Hues spread over the elements in creation order.
    #[default]
    Rainbow,

    /// The same light grey for every element.
    Mono,
}

impl Palette {
    fn color(&self, index: usize, total: usize) -> Color {
        match self {
            Palette::Rainbow => rainbow_color(index, total),
            Palette::Mono => Color::new(220, 220, 220),
        }
    }
}

/// A piece of text to be drawn at a terminal cell.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    pub column: u16,
    pub row: u16,
    pub text: String,
    pub color: Color,
}

/// Turn elements into draw commands for a terminal of `columns` by `rows` cells.
///
/// Positions are converted from pixels to cells using the configured cell size. Elements that
/// start outside the terminal are skipped and the rest are cut at the right edge.
pub fn plan_frame(elements: &[TextBox], config: &RenderConfig, columns: u16, rows: u16) -> Vec<DrawCommand> {
    let total = elements.len();
    elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| {
            let position = element.position();
            let column = (position.x / config.cell_width).round();
            let row = (position.y / config.cell_height).round();
            if column < 0.0 || row < 0.0 || column >= columns as f64 || row >= rows as f64 {
                return None;
            }
            let column = column as u16;
            let text = clip(&element.content(), (columns - column) as usize);
            if text.is_empty() {
                return None;
            }
            let color = Color::BLACK.blend(config.palette.color(index, total), element.opacity());
            Some(DrawCommand { column, row: row as u16, text, color })
        })
        .collect()
}

fn clip(text: &str, max_width: usize) -> String {
    let mut width = 0;
    text.chars()
        .take_while(|c| {
            width += c.width().unwrap_or(0);
            width <= max_width
        })
        .collect()
}

/// Draws frames onto a terminal.
pub struct TerminalRenderer<W: Write> {
    output: W,
    config: RenderConfig,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(output: W, config: RenderConfig) -> Self {
        Self { output, config }
    }

    /// Clear the screen and draw every element.
    pub fn render(&mut self, elements: &[TextBox], columns: u16, rows: u16) -> io::Result<()> {
        queue!(self.output, Clear(ClearType::All))?;
        for command in plan_frame(elements, &self.config, columns, rows) {
            queue!(
                self.output,
                MoveTo(command.column, command.row),
                SetForegroundColor(command.color.into()),
                Print(command.text)
            )?;
        }
        queue!(self.output, ResetColor)?;
        self.output.flush()
    }

    /// Draw a line of text on the last row, such as a status line.
    pub fn status(&mut self, text: &str, columns: u16, rows: u16) -> io::Result<()> {
        let text = clip(text, columns as usize);
        queue!(self.output, MoveTo(0, rows.saturating_sub(1)), ResetColor, Print(text))?;
        self.output.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn element(content: &str, x: f64, y: f64) -> TextBox {
        let element = TextBox::new(content);
        element.set_position(Point::new(x, y));
        element
    }

    fn config(palette: Palette) -> RenderConfig {
        RenderConfig { cell_width: 10.0, cell_height: 20.0, palette, ..Default::default() }
    }

    #[test]
    fn pixels_to_cells() {
        let elements = [element("12", 34.0, 41.0)];
        let commands = plan_frame(&elements, &config(Palette::Mono), 80, 24);
        assert_eq!(
            commands,
            vec![DrawCommand { column: 3, row: 2, text: "12".into(), color: Color::new(220, 220, 220) }]
        );
    }

    #[test]
    fn clipping() {
        let elements = [element("a", -20.0, 0.0), element("b", 0.0, 500.0), element("long", 780.0, 0.0)];
        let commands = plan_frame(&elements, &config(Palette::Mono), 80, 24);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].text, "lo");
    }

    #[test]
    fn wide_characters_are_clipped_by_width() {
        assert_eq!(clip("ｱｱ", 2), "ｱｱ");
        assert_eq!(clip("日本", 3), "日");
    }

    #[test]
    fn opacity_dims_color() {
        let elements = [element("x", 0.0, 0.0)];
        elements[0].animate(
            crate::animation::Effect::Opacity(crate::animation::Keyframes::new(vec![0.5]).unwrap()),
            crate::animation::Timing::once(std::time::Duration::from_secs(1)),
            None,
        );
        let commands = plan_frame(&elements, &config(Palette::Mono), 80, 24);
        assert_eq!(commands[0].color, Color::new(110, 110, 110));
    }

    #[test]
    fn render_writes_text() {
        let elements = [element("hey", 0.0, 0.0)];
        let mut output = Vec::new();
        TerminalRenderer::new(&mut output, config(Palette::Rainbow)).render(&elements, 10, 10).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("hey"));
    }
}

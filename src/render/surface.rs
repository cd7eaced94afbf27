//! Drawing primitives the painter targets
//!
//! Coordinates are surface pixels: a grid cell `(x, y)` covers
//! `(x * cell_size, y * cell_size)` with side `cell_size`.

/// Colors used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Red,
    White,
}

/// Something the game can be painted onto
pub trait Surface {
    /// Fill the rectangle with top-left corner `(px, py)`
    fn fill_rect(&mut self, px: i32, py: i32, width: u32, height: u32, color: Color);

    /// Draw `text` with its baseline starting at `(px, py)`
    fn draw_text(&mut self, px: i32, py: i32, text: &str, color: Color);
}

/// Surface that records every call, for tests and headless runs
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        px: i32,
        py: i32,
        width: u32,
        height: u32,
        color: Color,
    },
    Text {
        px: i32,
        py: i32,
        text: String,
        color: Color,
    },
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangles filled with `color`, as `(px, py)` corners
    pub fn filled(&self, color: Color) -> Vec<(i32, i32)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { px, py, color: c, .. } if *c == color => Some((*px, *py)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, px: i32, py: i32, width: u32, height: u32, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            px,
            py,
            width,
            height,
            color,
        });
    }

    fn draw_text(&mut self, px: i32, py: i32, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            px,
            py,
            text: text.to_string(),
            color,
        });
    }
}

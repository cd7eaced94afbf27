use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color as TermColor, Modifier, Style},
    widgets::Widget,
};

use super::painter::Painter;
use super::surface::{Color, Surface};
use crate::game::GameState;

/// Terminal columns used for one grid cell, so cells come out roughly square
pub const COLUMNS_PER_CELL: u16 = 2;

impl From<Color> for TermColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Green => TermColor::Green,
            Color::Red => TermColor::Red,
            Color::White => TermColor::White,
        }
    }
}

/// [`Surface`] over a region of a ratatui [`Buffer`].
///
/// Pixels are folded back to grid cells; everything outside `area` is clipped.
pub struct TerminalSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    cell_size: u32,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, cell_size: u32) -> Self {
        Self {
            buf,
            area,
            cell_size: cell_size.max(1),
        }
    }

    fn to_cell(&self, px: i32) -> i64 {
        i64::from(px).div_euclid(i64::from(self.cell_size))
    }

    /// Terminal (column, row) for a grid cell, if it lands inside the area
    fn locate(&self, cell_x: i64, cell_y: i64) -> Option<(u16, u16)> {
        let column = i64::from(self.area.x) + cell_x * i64::from(COLUMNS_PER_CELL);
        let row = i64::from(self.area.y) + cell_y;
        let inside = cell_x >= 0
            && cell_y >= 0
            && column + i64::from(COLUMNS_PER_CELL) <= i64::from(self.area.right())
            && row < i64::from(self.area.bottom());
        inside.then(|| (column as u16, row as u16))
    }
}

impl Surface for TerminalSurface<'_> {
    fn fill_rect(&mut self, px: i32, py: i32, width: u32, height: u32, color: Color) {
        if width == 0 || height == 0 {
            return;
        }
        let first_x = self.to_cell(px);
        let first_y = self.to_cell(py);
        let last_x = self.to_cell(px.saturating_add((width - 1) as i32));
        let last_y = self.to_cell(py.saturating_add((height - 1) as i32));
        let style = Style::default().fg(color.into());

        for cell_y in first_y..=last_y {
            for cell_x in first_x..=last_x {
                let Some((column, row)) = self.locate(cell_x, cell_y) else {
                    continue;
                };
                if let Some(cell) = self.buf.cell_mut((column, row)) {
                    cell.set_symbol("■").set_style(style);
                }
                if let Some(cell) = self.buf.cell_mut((column + 1, row)) {
                    cell.set_symbol(" ").set_style(style);
                }
            }
        }
    }

    fn draw_text(&mut self, px: i32, py: i32, text: &str, color: Color) {
        let cell_x = self.to_cell(px).max(0);
        let cell_y = self.to_cell(py);
        let Some((column, row)) = self.locate(cell_x, cell_y) else {
            return;
        };
        let room = self.area.right().saturating_sub(column) as usize;
        let style = Style::default()
            .fg(color.into())
            .add_modifier(Modifier::BOLD);
        self.buf.set_stringn(column, row, text, room, style);
    }
}

/// Widget drawing the board through the [`Painter`]
pub struct BoardWidget<'a> {
    state: &'a GameState,
    painter: Painter,
}

impl<'a> BoardWidget<'a> {
    pub fn new(state: &'a GameState, painter: Painter) -> Self {
        Self { state, painter }
    }

    /// Terminal size (columns, rows) needed to show the whole grid
    pub fn size_hint(state: &GameState) -> (u16, u16) {
        let columns = u16::try_from(state.grid_width)
            .unwrap_or(u16::MAX)
            .saturating_mul(COLUMNS_PER_CELL);
        let rows = u16::try_from(state.grid_height).unwrap_or(u16::MAX);
        (columns, rows)
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut surface = TerminalSurface::new(buf, area, self.painter.cell_size());
        self.painter.paint(self.state, &mut surface);
    }
}

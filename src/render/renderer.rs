use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::painter::Painter;
use super::terminal::BoardWidget;
use crate::game::GameState;
use crate::metrics::GameMetrics;

pub struct Renderer {
    painter: Painter,
}

impl Renderer {
    pub fn new(cell_size: u32) -> Self {
        Self {
            painter: Painter::new(cell_size),
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let (columns, rows) = BoardWidget::size_hint(state);
        let border_style = if state.is_game_over() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::White)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(border_style)
            .title(" Snake ");
        let board_area = centered(chunks[1], columns.saturating_add(2), rows.saturating_add(2));
        let inner = block.inner(board_area);
        frame.render_widget(block, board_area);
        frame.render_widget(BoardWidget::new(state, self.painter), inner);

        frame.render_widget(self.render_controls(state), chunks[2]);
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(state.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'_> {
        let line = if state.is_game_over() {
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ])
        } else {
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Phase, Position, Snake};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buf.cell((x, y)).map(|cell| cell.symbol()).unwrap_or(" "));
            }
            text.push('\n');
        }
        text
    }

    fn small_state() -> GameState {
        GameState::new(
            Snake::new(Position::new(2, 2), Direction::Right),
            Some(Position::new(5, 5)),
            12,
            12,
        )
    }

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered(area, 20, 10);
        assert_eq!(rect, Rect::new(40, 20, 20, 10));

        let rect = centered(area, 300, 300);
        assert_eq!(rect, area);
    }

    #[test]
    fn test_render_running_game() {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        let renderer = Renderer::new(10);
        let metrics = GameMetrics::new();
        let state = small_state();

        terminal
            .draw(|frame| renderer.render(frame, &state, &metrics))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Length: 1"));
        assert!(text.contains("■"));
        assert!(text.contains("WASD"));
        assert!(!text.contains("Game Over!"));
    }

    #[test]
    fn test_render_game_over() {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        let renderer = Renderer::new(10);
        let metrics = GameMetrics::new();
        let mut state = small_state();
        state.phase = Phase::GameOver;

        terminal
            .draw(|frame| renderer.render(frame, &state, &metrics))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Game Over!"));
        assert!(text.contains("Enter"));
        assert!(!text.contains("■"));
    }
}

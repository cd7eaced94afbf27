use super::surface::{Color, Surface};
use crate::game::{GameState, Position};

pub const SNAKE_COLOR: Color = Color::Green;
pub const FOOD_COLOR: Color = Color::Red;
pub const TEXT_COLOR: Color = Color::White;

pub const GAME_OVER_TEXT: &str = "Game Over!";

/// Horizontal pull of the game over text so it sits roughly centered
const GAME_OVER_TEXT_OFFSET: i32 = 40;

/// Paints a [`GameState`] onto any [`Surface`]. Reads state only.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    cell_size: u32,
}

impl Painter {
    pub fn new(cell_size: u32) -> Self {
        Self { cell_size }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn paint<S: Surface + ?Sized>(&self, state: &GameState, surface: &mut S) {
        if state.is_game_over() {
            let cell = self.cell_size as i32;
            let px = state.grid_width as i32 * cell / 2 - GAME_OVER_TEXT_OFFSET;
            let py = state.grid_height as i32 * cell / 2;
            surface.draw_text(px, py, GAME_OVER_TEXT, TEXT_COLOR);
            return;
        }

        for &segment in state.snake.segments() {
            self.fill_cell(surface, segment, SNAKE_COLOR);
        }
        if let Some(food) = state.food {
            self.fill_cell(surface, food, FOOD_COLOR);
        }
    }

    fn fill_cell<S: Surface + ?Sized>(&self, surface: &mut S, pos: Position, color: Color) {
        let cell = self.cell_size as i32;
        surface.fill_rect(
            pos.x * cell,
            pos.y * cell,
            self.cell_size,
            self.cell_size,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Phase, Snake};
    use crate::render::surface::{DrawCommand, RecordingSurface};

    fn sample_state() -> GameState {
        GameState::new(
            Snake::from_segments(
                vec![Position::new(3, 2), Position::new(2, 2)],
                Direction::Right,
            ),
            Some(Position::new(7, 1)),
            60,
            40,
        )
    }

    #[test]
    fn test_paints_snake_and_food() {
        let mut surface = RecordingSurface::new();
        Painter::new(10).paint(&sample_state(), &mut surface);

        assert_eq!(surface.filled(SNAKE_COLOR), vec![(30, 20), (20, 20)]);
        assert_eq!(surface.filled(FOOD_COLOR), vec![(70, 10)]);
        assert!(surface.texts().is_empty());
        assert!(surface.commands.iter().all(|command| matches!(
            command,
            DrawCommand::FillRect { width: 10, height: 10, .. }
        )));
    }

    #[test]
    fn test_no_food_drawn_when_absent() {
        let mut state = sample_state();
        state.food = None;
        let mut surface = RecordingSurface::new();
        Painter::new(10).paint(&state, &mut surface);

        assert!(surface.filled(FOOD_COLOR).is_empty());
        assert_eq!(surface.filled(SNAKE_COLOR).len(), 2);
    }

    #[test]
    fn test_game_over_draws_only_text() {
        let mut state = sample_state();
        state.phase = Phase::GameOver;
        let mut surface = RecordingSurface::new();
        Painter::new(10).paint(&state, &mut surface);

        assert_eq!(
            surface.commands,
            vec![DrawCommand::Text {
                px: 260,
                py: 200,
                text: GAME_OVER_TEXT.to_string(),
                color: TEXT_COLOR,
            }]
        );
    }
}

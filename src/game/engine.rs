use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{CollisionType, GameState, Phase, Position, Snake},
};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food and grew by one segment
    Ate,
    /// The move was blocked and the game is now over
    Collided(CollisionType),
    /// The game was already over; nothing changed
    Halted,
}

/// The game engine that applies the rules to a [`GameState`]
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine, seeded from `config.seed` when present
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game: a one-segment snake heading right, away from the walls
    pub fn reset(&mut self) -> GameState {
        let margin = self.config.spawn_margin as i32;
        let width = self.config.grid_width as i32;
        let height = self.config.grid_height as i32;

        let start = Position::new(
            self.rng.gen_range(margin..width - margin),
            self.rng.gen_range(margin..height - margin),
        );

        let mut state = GameState::new(
            Snake::new(start, Direction::Right),
            None,
            self.config.grid_width,
            self.config.grid_height,
        );
        state.food = self.spawn_food(&state);

        info!(
            "New game on {}x{} grid, snake at ({}, {})",
            width, height, start.x, start.y
        );
        state
    }

    /// Pick a food cell not covered by the snake.
    ///
    /// Tries `max_food_attempts` uniform samples over the whole grid, then falls
    /// back to a uniform choice among the free cells. Returns `None` only when
    /// the snake covers every cell.
    pub fn spawn_food(&mut self, state: &GameState) -> Option<Position> {
        for _ in 0..self.config.max_food_attempts {
            let pos = Position::new(
                self.rng.gen_range(0..state.grid_width) as i32,
                self.rng.gen_range(0..state.grid_height) as i32,
            );
            if !state.is_occupied_by_snake(pos) {
                return Some(pos);
            }
        }

        debug!(
            "No free cell after {} samples, scanning the grid",
            self.config.max_food_attempts
        );
        let food = state.free_cells().choose(&mut self.rng).copied();
        if food.is_none() {
            warn!("Snake fills the grid, no food placed");
        }
        food
    }

    /// Advance the game by one tick
    pub fn step(&mut self, state: &mut GameState) -> StepOutcome {
        if state.is_game_over() {
            return StepOutcome::Halted;
        }

        let new_head = state.snake.next_head();

        if let Some(collision) = self.check_collision(state, new_head) {
            state.phase = Phase::GameOver;
            info!(
                "Game over ({:?}) with score {} and length {} after {} steps",
                collision,
                state.score,
                state.snake.len(),
                state.steps
            );
            return StepOutcome::Collided(collision);
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        if ate_food {
            state.score += 1;
            state.food = self.spawn_food(state);
            StepOutcome::Ate
        } else {
            StepOutcome::Moved
        }
    }

    /// Request a new heading. Returns whether the turn was accepted.
    pub fn turn(&self, state: &mut GameState, direction: Direction) -> bool {
        if state.snake.direction.accepts_turn(direction) {
            state.snake.direction = direction;
            true
        } else {
            false
        }
    }

    /// Apply one player action. Returns whether the state changed.
    pub fn apply(&mut self, state: &mut GameState, action: Action) -> bool {
        match action {
            Action::Turn(direction) => self.turn(state, direction),
            Action::Confirm if state.is_game_over() => {
                *state = self.reset();
                true
            }
            Action::Confirm => false,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail still counts: it has not moved out of the way yet
        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(config: GameConfig, seed: u64) -> GameEngine {
        GameEngine::new(config.with_seed(seed))
    }

    fn state_with(
        segments: Vec<Position>,
        direction: Direction,
        food: Option<Position>,
    ) -> GameState {
        GameState::new(Snake::from_segments(segments, direction), food, 60, 40)
    }

    #[test]
    fn test_reset() {
        let mut engine = seeded(GameConfig::default(), 1);
        let state = engine.reset();

        assert!(!state.is_game_over());
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.direction, Direction::Right);
        let food = state.food.expect("food placed");
        assert!(!state.is_occupied_by_snake(food));
    }

    #[test]
    fn test_reset_keeps_margin() {
        for seed in 0..200 {
            let mut engine = seeded(GameConfig::default(), seed);
            let head = engine.reset().snake.head();
            assert!((5..55).contains(&head.x), "x = {}", head.x);
            assert!((5..35).contains(&head.y), "y = {}", head.y);
        }
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = seeded(GameConfig::default(), 42).reset();
        let b = seeded(GameConfig::default(), 42).reset();
        assert_eq!(a, b);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = seeded(GameConfig::default(), 3);
        let mut state = state_with(
            vec![Position::new(10, 10)],
            Direction::Right,
            Some(Position::new(30, 30)),
        );

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.segments(), &[Position::new(11, 10)]);
        assert_eq!(state.food, Some(Position::new(30, 30)));
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = seeded(GameConfig::default(), 4);
        let mut state = state_with(
            vec![Position::new(10, 10)],
            Direction::Right,
            Some(Position::new(11, 10)),
        );

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::Ate);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.head(), Position::new(11, 10));
        assert_eq!(state.snake.len(), 2);
        let food = state.food.expect("new food placed");
        assert!(!state.is_occupied_by_snake(food));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = seeded(GameConfig::default(), 5);
        let mut state = state_with(
            vec![Position::new(0, 5)],
            Direction::Left,
            Some(Position::new(5, 5)),
        );
        let before = state.snake.clone();

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::Collided(CollisionType::Wall));
        assert!(state.is_game_over());
        assert_eq!(state.snake, before);
        assert_eq!(state.steps, 0);
    }

    #[test]
    fn test_wall_collision_on_far_edges() {
        let mut engine = seeded(GameConfig::default(), 6);

        let mut state = state_with(vec![Position::new(59, 3)], Direction::Right, None);
        assert_eq!(
            engine.step(&mut state),
            StepOutcome::Collided(CollisionType::Wall)
        );

        let mut state = state_with(vec![Position::new(3, 39)], Direction::Down, None);
        assert_eq!(
            engine.step(&mut state),
            StepOutcome::Collided(CollisionType::Wall)
        );
    }

    #[test]
    fn test_self_collision() {
        let mut engine = seeded(GameConfig::default(), 7);
        let mut state = state_with(
            vec![Position::new(5, 5), Position::new(6, 5), Position::new(7, 5)],
            Direction::Right,
            Some(Position::new(20, 20)),
        );
        let before = state.snake.clone();

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::Collided(CollisionType::SelfCollision));
        assert!(state.is_game_over());
        assert_eq!(state.snake, before);
    }

    #[test]
    fn test_moving_into_tail_collides() {
        let mut engine = seeded(GameConfig::default(), 8);
        // Head at (5,5) with the tail right of it at (6,5)
        let mut state = state_with(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
            ],
            Direction::Right,
            None,
        );

        assert_eq!(
            engine.step(&mut state),
            StepOutcome::Collided(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_step_after_game_over_is_halted() {
        let mut engine = seeded(GameConfig::default(), 9);
        let mut state = engine.reset();
        state.phase = Phase::GameOver;
        let before = state.clone();

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::Halted);
        assert_eq!(state, before);
    }

    #[test]
    fn test_turn_rules() {
        let engine = seeded(GameConfig::default(), 10);
        let mut state = state_with(vec![Position::new(10, 10)], Direction::Right, None);

        // Same axis: reversal and repeat are rejected
        assert!(!engine.turn(&mut state, Direction::Left));
        assert!(!engine.turn(&mut state, Direction::Right));
        assert_eq!(state.snake.direction, Direction::Right);

        assert!(engine.turn(&mut state, Direction::Up));
        assert_eq!(state.snake.direction, Direction::Up);

        assert!(!engine.turn(&mut state, Direction::Down));
        assert_eq!(state.snake.direction, Direction::Up);

        assert!(engine.turn(&mut state, Direction::Left));
        assert_eq!(state.snake.direction, Direction::Left);
    }

    #[test]
    fn test_turn_does_not_end_game() {
        let engine = seeded(GameConfig::default(), 11);
        let mut state = state_with(vec![Position::new(0, 0)], Direction::Right, None);
        engine.turn(&mut state, Direction::Up);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_confirm_restarts_only_after_game_over() {
        let mut engine = seeded(GameConfig::default(), 12);
        let mut state = state_with(
            vec![Position::new(5, 5), Position::new(6, 5), Position::new(7, 5)],
            Direction::Up,
            None,
        );

        assert!(!engine.apply(&mut state, Action::Confirm));
        assert_eq!(state.snake.len(), 3);

        state.phase = Phase::GameOver;
        state.score = 12;
        assert!(engine.apply(&mut state, Action::Confirm));
        assert!(!state.is_game_over());
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_restart_is_always_fresh() {
        let mut engine = seeded(GameConfig::default(), 13);
        for _ in 0..50 {
            let mut state = engine.reset();
            state.phase = Phase::GameOver;
            engine.apply(&mut state, Action::Confirm);
            assert_eq!(state.snake.len(), 1);
            assert_eq!(state.snake.direction, Direction::Right);
            assert_eq!(state.phase, Phase::Running);
        }
    }

    #[test]
    fn test_food_never_on_snake() {
        for seed in 0..100 {
            let mut engine = seeded(GameConfig::small(), seed);
            // A snake snaking through most of the top rows
            let mut segments = Vec::new();
            for y in 0..8 {
                for x in 0..12 {
                    let x = if y % 2 == 0 { x } else { 11 - x };
                    segments.push(Position::new(x, y));
                }
            }
            let state = GameState::new(
                Snake::from_segments(segments, Direction::Left),
                None,
                12,
                12,
            );

            for _ in 0..20 {
                let food = engine.spawn_food(&state).expect("free cells remain");
                assert!(state.is_in_bounds(food));
                assert!(!state.is_occupied_by_snake(food));
            }
        }
    }

    #[test]
    fn test_food_falls_back_to_free_cell() {
        let mut config = GameConfig::small();
        config.max_food_attempts = 1;
        let mut engine = seeded(config, 14);

        let last_free = Position::new(11, 11);
        let segments: Vec<Position> = (0..12)
            .flat_map(|y| (0..12).map(move |x| Position::new(x, y)))
            .filter(|pos| *pos != last_free)
            .collect();
        let state = GameState::new(
            Snake::from_segments(segments, Direction::Left),
            None,
            12,
            12,
        );

        for _ in 0..10 {
            assert_eq!(engine.spawn_food(&state), Some(last_free));
        }
    }

    #[test]
    fn test_no_food_when_grid_is_full() {
        let mut engine = seeded(GameConfig::small(), 15);
        let segments: Vec<Position> = (0..12)
            .flat_map(|y| (0..12).map(move |x| Position::new(x, y)))
            .collect();
        let state = GameState::new(
            Snake::from_segments(segments, Direction::Left),
            None,
            12,
            12,
        );

        assert_eq!(engine.spawn_food(&state), None);
    }
}

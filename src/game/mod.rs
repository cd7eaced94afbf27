//! Core game rules for Snake
//!
//! This module holds the state and the rules that change it, without any I/O,
//! terminal or rendering dependencies. Hosts drive it through [`GameEngine`].

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Axis, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepOutcome};
pub use state::{CollisionType, GameState, Phase, Position, Snake};

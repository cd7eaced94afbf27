//! Grid Snake - a single-player snake game for the terminal
//!
//! This library provides:
//! - Core game rules with no I/O (game module)
//! - Drawing through a small surface abstraction (render module)
//! - Keyboard mapping (input module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;

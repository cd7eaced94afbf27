//! Drawing the game
//!
//! [`Painter`] turns a game state into fill/text calls on a [`Surface`].
//! [`TerminalSurface`] backs that with a ratatui buffer, and [`Renderer`]
//! lays out the whole frame around it.

pub mod painter;
pub mod renderer;
pub mod surface;
pub mod terminal;

pub use painter::Painter;
pub use renderer::Renderer;
pub use surface::{Color, DrawCommand, RecordingSurface, Surface};
pub use terminal::{BoardWidget, TerminalSurface};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Size of one cell in surface pixels
    pub cell_size: u32,
    /// Distance kept from every wall when placing a new snake
    pub spawn_margin: usize,
    /// Milliseconds between simulation ticks
    pub tick_ms: u64,
    /// Random food samples tried before scanning for free cells
    pub max_food_attempts: usize,
    /// Fixed RNG seed; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 60,
            grid_height: 40,
            cell_size: 10,
            spawn_margin: 5,
            tick_ms: 100,
            max_food_attempts: 256,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(12, 12)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Check that a game can be started with this configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell_size must be positive");
        ensure!(self.tick_ms > 0, "tick_ms must be positive");
        ensure!(
            self.max_food_attempts > 0,
            "max_food_attempts must be positive"
        );
        let min = self.spawn_margin.saturating_mul(2);
        ensure!(
            self.grid_width > min && self.grid_height > min,
            "grid {}x{} leaves no spawn area with a margin of {}",
            self.grid_width,
            self.grid_height,
            self.spawn_margin
        );
        // Each cell takes two terminal columns
        ensure!(
            self.grid_width <= MAX_GRID_WIDTH && self.grid_height <= MAX_GRID_HEIGHT,
            "grid {}x{} exceeds the {}x{} terminal limit",
            self.grid_width,
            self.grid_height,
            MAX_GRID_WIDTH,
            MAX_GRID_HEIGHT
        );
        ensure!(
            self.surface_size().is_some(),
            "a {}x{} grid of {} pixel cells overflows the drawing surface",
            self.grid_width,
            self.grid_height,
            self.cell_size
        );
        Ok(())
    }

    /// Pixel size of the drawing surface (width, height), `None` if it does
    /// not fit in `i32` surface coordinates
    pub fn surface_size(&self) -> Option<(i32, i32)> {
        let cell = i32::try_from(self.cell_size).ok()?;
        let extent = |cells: usize| i32::try_from(cells).ok()?.checked_mul(cell);
        Some((extent(self.grid_width)?, extent(self.grid_height)?))
    }
}

/// Largest grid width whose board still fits in a `u16` column count
pub const MAX_GRID_WIDTH: usize = (u16::MAX / 2) as usize;
pub const MAX_GRID_HEIGHT: usize = u16::MAX as usize;

//! Configuration types for the simulation.

use crate::{Direction, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Field geometry, given in pixels and divided into square cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Width of the field in pixels
    pub field_width: i32,
    /// Height of the field in pixels
    pub field_height: i32,
    /// Edge length of one cell in pixels
    pub cell_size: i32,
}

impl FieldConfig {
    /// Number of cells along the x axis
    pub fn columns(&self) -> i32 {
        if self.cell_size <= 0 {
            return 0;
        }
        self.field_width / self.cell_size
    }

    /// Number of cells along the y axis
    pub fn rows(&self) -> i32 {
        if self.cell_size <= 0 {
            return 0;
        }
        self.field_height / self.cell_size
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_size <= 0 {
            return Err(Error::Validation(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        let (columns, rows) = (self.columns(), self.rows());
        if columns <= 0 || rows <= 0 {
            return Err(Error::InvalidDimension { columns, rows });
        }
        Ok(())
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            field_width: 45 * 16,
            field_height: 45 * 16,
            cell_size: 8,
        }
    }
}

/// How many overdue ticks a single frame may perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatchUpPolicy {
    /// At most one step per frame; leftover debt carries into later frames
    #[default]
    SingleStep,
    /// Step until the accumulator is positive again, bounded by `max_catch_up_steps`
    Full,
}

/// Fixed-timestep clock parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Time between two simulation steps (milliseconds); zero steps every frame
    pub tick_interval_ms: u64,
    pub catch_up: CatchUpPolicy,
    /// Upper bound on steps per frame under `CatchUpPolicy::Full`
    pub max_catch_up_steps: u32,
}

impl ClockConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_catch_up_steps == 0 {
            return Err(Error::Validation(
                "max_catch_up_steps must be at least 1".to_string(),
            ));
        }
        if i64::try_from(self.tick_interval_ms).is_err() {
            return Err(Error::Validation(format!(
                "tick_interval_ms {} is too large",
                self.tick_interval_ms
            )));
        }
        Ok(())
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 0,
            catch_up: CatchUpPolicy::SingleStep,
            max_catch_up_steps: 64,
        }
    }
}

/// Where and how the ant is placed when a run starts from scratch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartConfig {
    /// Offset from the field centre along x
    pub offset_x: i32,
    /// Offset from the field centre along y
    pub offset_y: i32,
    pub direction: Direction,
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            offset_x: -8,
            offset_y: 0,
            direction: Direction::Down,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub field: FieldConfig,
    pub clock: ClockConfig,
    pub start: StartConfig,
    /// Fraction of the field sampled by a fill (0.0 to 1.0)
    pub fill_density: f64,
    /// Random seed for reproducible fills
    pub seed: u64,
    /// Name of the game loop driving the simulation
    pub loop_name: String,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        self.field.validate()?;
        self.clock.validate()?;
        validate_density(self.fill_density)?;
        if self.start.direction == Direction::None {
            return Err(Error::Validation(
                "start direction must be a cardinal direction".to_string(),
            ));
        }
        if self.loop_name.trim().is_empty() {
            return Err(Error::Validation("loop_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!(
            columns = config.field.columns(),
            rows = config.field.rows(),
            tick_interval_ms = config.clock.tick_interval_ms,
            "Loaded simulation config"
        );
        Ok(config)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            clock: ClockConfig::default(),
            start: StartConfig::default(),
            fill_density: 1.0 / 20.0,
            seed: 0,
            loop_name: "Ant Loop".to_string(),
        }
    }
}

/// Check that a fill density is a finite fraction in `[0, 1]`
pub fn validate_density(density: f64) -> Result<()> {
    if !density.is_finite() || !(0.0..=1.0).contains(&density) {
        return Err(Error::Validation(format!(
            "fill density must be within [0, 1], got {}",
            density
        )));
    }
    Ok(())
}

//! Langton's Ant on a toroidal grid.
//!
//! Each step moves the ant one cell forward, flips the cell it lands on and
//! turns the ant according to the cell's previous state: an unmarked cell turns
//! it right, a marked cell turns it left.

use crate::grid::Grid;
use ant_core::{
    validate_density, AntState, Cell, CellChange, Direction, Error, FieldConfig, Position,
    Result, RunState,
};
use rand::Rng;
use tracing::{debug, info, trace};

pub struct Automaton {
    grid: Grid,
    ant: AntState,
    run_state: RunState,
    step_count: u64,
}

impl Automaton {
    /// Ant at the origin facing `Direction::None`, stopped
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            ant: AntState::default(),
            run_state: RunState::Stopped,
            step_count: 0,
        }
    }

    pub fn from_config(config: &FieldConfig) -> Result<Self> {
        Ok(Self::new(Grid::from_config(config)?))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ant(&self) -> AntState {
        self.ant
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn columns(&self) -> i32 {
        self.grid.columns()
    }

    pub fn rows(&self) -> i32 {
        self.grid.rows()
    }

    /// Place the ant directly; the position is wrapped onto the field
    pub fn set_ant(&mut self, ant: AntState) {
        self.ant = AntState::new(self.grid.wrap(ant.position), ant.direction);
    }

    /// Perform exactly one step of the rule and report the flipped cell
    pub fn step(&mut self) -> CellChange {
        let (dx, dy) = self.ant.direction.delta();
        let position = self.wrap_step(self.ant.position.offset(dx, dy));
        self.ant.position = position;

        let cell = self.grid.flip(position);
        match cell {
            // Was unmarked
            Cell::Marked => self.turn_right(),
            // Was marked
            Cell::Unmarked => self.turn_left(),
        }

        self.step_count += 1;
        trace!(
            step = self.step_count,
            x = position.x,
            y = position.y,
            marked = cell.is_marked(),
            direction = ?self.ant.direction,
            "Ant stepped"
        );

        CellChange { position, cell }
    }

    /// Steps move by one cell, so a single correction per axis suffices
    fn wrap_step(&self, pos: Position) -> Position {
        let mut wrapped = pos;
        if wrapped.x < 0 {
            wrapped.x = self.columns() - 1;
        } else if wrapped.x >= self.columns() {
            wrapped.x = 0;
        }
        if wrapped.y < 0 {
            wrapped.y = self.rows() - 1;
        } else if wrapped.y >= self.rows() {
            wrapped.y = 0;
        }
        wrapped
    }

    pub fn turn_left(&mut self) {
        self.ant.direction = self.ant.direction.turned_left();
    }

    pub fn turn_right(&mut self) {
        self.ant.direction = self.ant.direction.turned_right();
    }

    /// Clear the field and the step counter and stop the run. The ant stays put.
    ///
    /// Returns the cells that were marked before the reset.
    pub fn reset(&mut self) -> Vec<CellChange> {
        let changes: Vec<CellChange> = self
            .grid
            .iter()
            .filter(|(_, cell)| cell.is_marked())
            .map(|(position, _)| CellChange {
                position,
                cell: Cell::Unmarked,
            })
            .collect();
        self.grid.clear();
        self.step_count = 0;
        self.run_state = RunState::Stopped;
        info!(
            columns = self.columns(),
            rows = self.rows(),
            cleared = changes.len(),
            "Automaton reset"
        );
        changes
    }

    /// Mark `floor(cells * density)` uniformly sampled cells, with replacement.
    ///
    /// Returns the cells that actually changed; repeated or already marked
    /// picks are no-ops.
    pub fn randomize<R: Rng>(
        &mut self,
        density: f64,
        rng: &mut R,
    ) -> Result<Vec<CellChange>> {
        validate_density(density)?;
        let samples = (self.grid.len() as f64 * density).floor() as usize;

        let mut changes = Vec::new();
        for _ in 0..samples {
            let row = rng.gen_range(0..self.rows());
            let column = rng.gen_range(0..self.columns());
            let position = Position::new(column, row);
            if self.grid.set(position, Cell::Marked) {
                changes.push(CellChange {
                    position,
                    cell: Cell::Marked,
                });
            }
        }

        info!(
            samples = samples,
            newly_marked = changes.len(),
            "Randomized field"
        );
        Ok(changes)
    }

    /// Begin or resume a run.
    ///
    /// From `Stopped` the ant is placed at `origin` (wrapped) facing
    /// `direction` and the step counter is cleared; returns `true`. A fresh
    /// run needs a cardinal direction. From `Paused` the run resumes
    /// untouched. A running automaton is left alone.
    pub fn start(&mut self, origin: Position, direction: Direction) -> Result<bool> {
        match self.run_state {
            RunState::Stopped => {
                if !direction.is_cardinal() {
                    return Err(Error::Validation(format!(
                        "cannot start facing {:?}",
                        direction
                    )));
                }
                self.set_ant(AntState::new(origin, direction));
                self.step_count = 0;
                self.run_state = RunState::Running;
                info!(
                    x = self.ant.position.x,
                    y = self.ant.position.y,
                    direction = ?direction,
                    "Run started"
                );
                Ok(true)
            }
            RunState::Paused => {
                self.run_state = RunState::Running;
                info!(step = self.step_count, "Run resumed");
                Ok(false)
            }
            RunState::Running => {
                debug!("Start ignored, already running");
                Ok(false)
            }
        }
    }

    /// `Running` to `Paused`; returns whether the state changed
    pub fn pause(&mut self) -> bool {
        if self.run_state != RunState::Running {
            debug!(state = ?self.run_state, "Pause ignored, not running");
            return false;
        }
        self.run_state = RunState::Paused;
        info!(step = self.step_count, "Run paused");
        true
    }
}

//! Simulation driver: run-state gating, tick accounting and the change feed.

use crate::automaton::Automaton;
use crate::clock::SimulationClock;
use crate::scheduler::FrameListener;
use ant_core::{AntState, CellChange, Position, Result, RunState, SimulationConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, instrument};

pub struct Simulation {
    automaton: Automaton,
    clock: SimulationClock,
    config: SimulationConfig,
    rng: ChaCha8Rng,
    // Diffs not yet picked up by the renderer; coalesced to one entry per
    // cell once it outgrows twice the field size
    pending: Vec<CellChange>,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let automaton = Automaton::from_config(&config.field)?;
        let clock = SimulationClock::from_config(&config.clock)?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        debug!(
            columns = automaton.columns(),
            rows = automaton.rows(),
            seed = config.seed,
            "Simulation created"
        );

        Ok(Self {
            automaton,
            clock,
            config,
            rng,
            pending: Vec::new(),
        })
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn ant(&self) -> AntState {
        self.automaton.ant()
    }

    pub fn step_count(&self) -> u64 {
        self.automaton.step_count()
    }

    pub fn run_state(&self) -> RunState {
        self.automaton.run_state()
    }

    /// Where a fresh run places the ant, before wrapping
    pub fn start_origin(&self) -> Position {
        Position::new(
            self.automaton.columns() / 2 + self.config.start.offset_x,
            self.automaton.rows() / 2 + self.config.start.offset_y,
        )
    }

    /// Start a fresh run, or resume a paused one
    pub fn start(&mut self) -> Result<()> {
        let origin = self.start_origin();
        if self.automaton.start(origin, self.config.start.direction)? {
            self.clock.rearm();
        }
        Ok(())
    }

    pub fn pause(&mut self) {
        self.automaton.pause();
    }

    /// Stop the run and clear the field; every cleared cell is fed as unmarked
    pub fn reset(&mut self) {
        let cleared = self.automaton.reset();
        self.record(cleared);
    }

    /// Fill the field using the configured density
    pub fn randomize(&mut self) -> Result<usize> {
        self.randomize_with(self.config.fill_density)
    }

    /// Fill the field with an explicit density; returns the number of newly marked cells
    pub fn randomize_with(&mut self, density: f64) -> Result<usize> {
        let changes = self.automaton.randomize(density, &mut self.rng)?;
        let marked = changes.len();
        self.record(changes);
        Ok(marked)
    }

    /// Applies from the next accumulation cycle on
    pub fn set_tick_interval(&mut self, tick_interval: Duration) -> Result<()> {
        self.clock.set_tick_interval(tick_interval)
    }

    /// Hand all pending cell changes to the caller, oldest first.
    ///
    /// Hosts should drain once per frame. Left undrained, the feed is folded
    /// down to the latest state of each touched cell, so replaying it still
    /// reproduces the field.
    pub fn drain_changes(&mut self) -> Vec<CellChange> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_changes(&self) -> &[CellChange] {
        &self.pending
    }

    /// Advance by the given frame time; returns the number of steps taken
    #[instrument(level = "debug", skip(self), fields(step = self.automaton.step_count()))]
    pub fn update(&mut self, elapsed: Duration) -> Result<u32> {
        if !self.automaton.run_state().is_stepping() {
            return Ok(0);
        }

        let due = self.clock.advance(elapsed)?;
        let mut changes = Vec::with_capacity(due as usize);
        for _ in 0..due {
            changes.push(self.automaton.step());
        }
        self.record(changes);

        if due > 1 {
            debug!(steps = due, "Caught up on overdue ticks");
        }
        if due > 0 && self.automaton.step_count() % 1000 == 0 {
            info!(step = self.automaton.step_count(), "Step milestone");
        }
        Ok(due)
    }

    fn record(&mut self, changes: Vec<CellChange>) {
        self.pending.extend(changes);
        if self.pending.len() > self.automaton.grid().len() * 2 {
            self.coalesce_pending();
        }
    }

    /// Keep only the latest change per cell, in the order those were made
    fn coalesce_pending(&mut self) {
        let before = self.pending.len();
        let mut seen = HashSet::new();
        let mut latest: Vec<CellChange> = self
            .pending
            .drain(..)
            .rev()
            .filter(|change| seen.insert(change.position))
            .collect();
        latest.reverse();
        self.pending = latest;
        debug!(
            before = before,
            after = self.pending.len(),
            "Coalesced undelivered changes"
        );
    }
}

impl FrameListener for Simulation {
    fn on_update(&mut self, elapsed: Duration) -> Result<()> {
        self.update(elapsed).map(|_| ())
    }
}

//! Fixed-timestep accumulator that turns frame time into simulation ticks.

use ant_core::{CatchUpPolicy, ClockConfig, Error, Result};
use chrono::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct SimulationClock {
    tick_interval: Duration,
    time_remaining: Duration,
    policy: CatchUpPolicy,
    max_catch_up_steps: u32,
}

impl SimulationClock {
    pub fn new(
        tick_interval: std::time::Duration,
        policy: CatchUpPolicy,
        max_catch_up_steps: u32,
    ) -> Result<Self> {
        if max_catch_up_steps == 0 {
            return Err(Error::Validation(
                "max_catch_up_steps must be at least 1".to_string(),
            ));
        }
        let tick_interval = Duration::from_std(tick_interval)?;
        Ok(Self {
            tick_interval,
            time_remaining: tick_interval,
            policy,
            max_catch_up_steps,
        })
    }

    pub fn from_config(config: &ClockConfig) -> Result<Self> {
        config.validate()?;
        Self::new(
            std::time::Duration::from_millis(config.tick_interval_ms),
            config.catch_up,
            config.max_catch_up_steps,
        )
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Time until the next tick; negative while ticks are overdue
    pub fn time_remaining(&self) -> Duration {
        self.time_remaining
    }

    pub fn policy(&self) -> CatchUpPolicy {
        self.policy
    }

    pub fn max_catch_up_steps(&self) -> u32 {
        self.max_catch_up_steps
    }

    /// Start a fresh accumulation cycle
    pub fn rearm(&mut self) {
        self.time_remaining = self.tick_interval;
    }

    /// Change the tick interval for future cycles; the pending countdown is kept
    pub fn set_tick_interval(&mut self, tick_interval: std::time::Duration) -> Result<()> {
        self.tick_interval = Duration::from_std(tick_interval)?;
        debug!(
            tick_interval_ms = self.tick_interval.num_milliseconds(),
            "Tick interval changed"
        );
        Ok(())
    }

    pub fn set_policy(&mut self, policy: CatchUpPolicy) {
        self.policy = policy;
    }

    /// Consume `elapsed` frame time and return the number of ticks now due.
    ///
    /// Every tick replenishes the countdown by one interval, so leftover
    /// negative time carries into the next frame. `SingleStep` yields at most
    /// one tick per call; `Full` keeps going until the countdown is positive
    /// or `max_catch_up_steps` is reached. Debt beyond `max_catch_up_steps`
    /// intervals is dropped.
    pub fn advance(&mut self, elapsed: std::time::Duration) -> Result<u32> {
        let elapsed = Duration::from_std(elapsed)?;
        self.time_remaining = self
            .time_remaining
            .checked_sub(&elapsed)
            .ok_or_else(|| Error::DurationOutOfRange("accumulator underflow".to_string()))?;

        let budget = match self.policy {
            CatchUpPolicy::SingleStep => 1,
            CatchUpPolicy::Full => self.max_catch_up_steps,
        };

        if self.tick_interval.is_zero() {
            // Nothing to accumulate; every frame is due
            self.time_remaining = Duration::zero();
            return Ok(budget);
        }

        let mut steps = 0;
        while self.time_remaining <= Duration::zero() && steps < budget {
            self.time_remaining = self
                .time_remaining
                .checked_add(&self.tick_interval)
                .ok_or_else(|| Error::DurationOutOfRange("accumulator overflow".to_string()))?;
            steps += 1;
        }

        if self.debt_exceeds_limit() {
            warn!(
                debt_ms = -self.time_remaining.num_milliseconds(),
                tick_interval_ms = self.tick_interval.num_milliseconds(),
                steps = steps,
                "Dropping overdue ticks"
            );
            self.rearm();
        }

        Ok(steps)
    }

    fn debt_exceeds_limit(&self) -> bool {
        if self.time_remaining > Duration::zero() {
            return false;
        }
        if self.policy == CatchUpPolicy::Full {
            // Full catch-up ran out of budget
            return true;
        }
        let debt = (-self.time_remaining).num_nanoseconds();
        let limit = self
            .tick_interval
            .num_nanoseconds()
            .and_then(|tick| tick.checked_mul(i64::from(self.max_catch_up_steps)));
        match (debt, limit) {
            (Some(debt), Some(limit)) => debt > limit,
            (None, _) => true,
            (Some(_), None) => false,
        }
    }
}

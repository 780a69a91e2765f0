//! Frame-driven game loop.
//!
//! A host surface calls [`GameLoop::on_frame`] once per display refresh with
//! the wall-clock time since the previous frame. The loop hands that time to
//! its single [`FrameListener`] every frame; whether anything happens in
//! response is up to the listener.

use ant_core::{Error, Result, SurfaceId};
use std::time::{Duration, Instant};
use tracing::{info, instrument, trace};

/// Receives the elapsed time of every frame
pub trait FrameListener {
    fn on_update(&mut self, elapsed: Duration) -> Result<()>;
}

impl<F> FrameListener for F
where
    F: FnMut(Duration) -> Result<()>,
{
    fn on_update(&mut self, elapsed: Duration) -> Result<()> {
        self(elapsed)
    }
}

pub struct GameLoop<L> {
    name: String,
    listener: L,
    target: Option<SurfaceId>,
    frame_count: u64,
    last_elapsed: Duration,
}

impl<L: FrameListener> GameLoop<L> {
    pub fn new(name: impl Into<String>, listener: L) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::Validation("game loop name must not be empty".to_string()));
        }
        Ok(Self {
            name,
            listener,
            target: None,
            frame_count: 0,
            last_elapsed: Duration::ZERO,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Option<SurfaceId> {
        self.target
    }

    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn last_elapsed(&self) -> Duration {
        self.last_elapsed
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    /// Start receiving frames from `target`
    pub fn attach(&mut self, target: SurfaceId) -> Result<()> {
        if let Some(current) = self.target {
            return Err(Error::AlreadyAttached(format!(
                "game loop '{}' is already attached to surface {}",
                self.name, current
            )));
        }
        self.target = Some(target);
        info!(game_loop = %self.name, surface = %target, "Game loop attached");
        Ok(())
    }

    /// Stop receiving frames; returns the surface that was attached
    pub fn detach(&mut self) -> Result<SurfaceId> {
        let target = self.target.take().ok_or_else(|| {
            Error::NotAttached(format!("game loop '{}' has no surface", self.name))
        })?;
        info!(
            game_loop = %self.name,
            surface = %target,
            frames = self.frame_count,
            "Game loop detached"
        );
        Ok(target)
    }

    /// Deliver one frame to the listener
    #[instrument(level = "trace", skip(self), fields(game_loop = %self.name))]
    pub fn on_frame(&mut self, elapsed: Duration) -> Result<()> {
        if self.target.is_none() {
            return Err(Error::NotAttached(format!(
                "game loop '{}' received a frame while detached",
                self.name
            )));
        }
        self.frame_count += 1;
        self.last_elapsed = elapsed;
        trace!(frame = self.frame_count, elapsed_us = elapsed.as_micros() as u64, "Frame");
        self.listener.on_update(elapsed)
    }

    /// Measure the time since the timer's last mark and deliver it as a frame
    pub fn pump(&mut self, timer: &mut FrameTimer) -> Result<()> {
        let elapsed = timer.mark();
        self.on_frame(elapsed)
    }
}

/// Wall-clock time between consecutive frames
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last: Instant,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time since the previous mark (or creation)
    pub fn mark(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

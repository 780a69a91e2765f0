//! Langton's Ant simulation engine.
//!
//! A [`GameLoop`] receives frame times from a host surface and forwards them
//! to a [`Simulation`], which converts them into discrete [`Automaton`] steps
//! through a fixed-timestep [`SimulationClock`]. Renderers consume the
//! resulting cell changes with [`Simulation::drain_changes`].

pub mod automaton;
pub mod clock;
pub mod grid;
pub mod scheduler;
pub mod simulation;

pub use automaton::Automaton;
pub use clock::SimulationClock;
pub use grid::Grid;
pub use scheduler::{FrameListener, FrameTimer, GameLoop};
pub use simulation::Simulation;

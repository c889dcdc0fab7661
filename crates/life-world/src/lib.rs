//! Game of Life engine.
//!
//! A bounded grid of on/off cells, the generation step, named patterns and a
//! simulation driver that counts generations and spots repeating states.

pub mod grid;
pub mod patterns;
pub mod simulation;

pub use grid::{next_state, GridEngine};
pub use patterns::{default_seed, Pattern, PATTERNS};
pub use simulation::{Cycle, Simulation, StepReport};

//! A fixed-size, edge-clamped cellular automaton with configurable birth/survival rules.

pub mod cell;
pub mod driver;
pub mod engine;
pub mod error;
pub mod grid;
pub mod pos;
pub mod rules;

pub use cell::Cell;
pub use driver::{Driver, Pace, RunFlag};
pub use engine::{Generation, StateView, evolve};
pub use error::{Error, Result};
pub use grid::{Grid, GridWindow};
pub use pos::Pos2;
pub use rules::{NamedRule, RuleSet};

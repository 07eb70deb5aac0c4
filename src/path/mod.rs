//! Vector path generation from a captured point sequence.

mod builder;
mod command;
mod strategy;

pub use builder::{PathBuilder, VectorPath};
pub use command::PathCommand;
pub use strategy::PathStrategy;

//! File-backed persistence of game snapshots.

mod repository;

pub use repository::{JsonGameRepository, SavedGame};

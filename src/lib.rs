//! # connect-x
//!
//! A generalized connect-N engine: boards of any size, rectangular or
//! wrapping horizontally (cylinder), a configurable line length, and three
//! computer opponents up to a depth-limited alpha-beta search.
//!
//! ## Modules
//!
//! - [`game`]: Board, legality checks, line detection, players, game state machine, snapshots
//! - [`ai`]: Position evaluator and the Easy / Medium / Hard strategies
//! - [`storage`]: JSON-file repository for saved games
//! - [`ui`]: Terminal front-end
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod storage;
pub mod ui;

//! Terminal UI for playing connect-N against people or the computer.

mod app;
mod game_view;

pub use app::App;

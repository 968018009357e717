pub mod config;
pub mod engine;
pub mod export;
pub mod fields;
pub mod format;
pub mod tui;

pub use engine::{compute, Inputs, Results};

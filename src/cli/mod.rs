//! CLI module for bankbuddy
//!
//! Command-line argument parsing for the front-end binary.

pub mod args;

pub use args::{Args, Commands};

//! pixi-discover - Python environment discovery for pixi
//!
//! Finds a working pixi executable for a directory, caches what it
//! reports, and enumerates the environments it manages together with
//! their interpreters.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod pixi;
pub mod ui;

#[cfg(test)]
mod testing;

pub use error::{DiscoverError, DiscoverResult};

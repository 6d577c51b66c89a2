//! Application orchestration and main event loop.
//!
//! This module owns the core application lifecycle:
//! - Initialization (config loading, first listing, terminal setup)
//! - Event loop (keys, shell output, git history)
//! - Editor handoff and input gating
//! - UI rendering delegation
//!
//! The app is structured around a single `App` struct that holds
//! all state. Events are processed sequentially in the main loop.

mod gate;
mod handoff;
mod input;
mod render;
mod runner;
mod state;

pub use runner::run;

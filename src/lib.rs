//! # Sunfocus Library
//!
//! Time and event core of two low-power watch faces: a solar event face showing
//! the next sunrise or sunset, and an interval timer face cycling focus, break and
//! long-break intervals.
//!
//! ## Architecture
//!
//! - **Time**: `time` module with UTC/local conversion and the [`time::Clock`] seam
//! - **Geographic**: `geo` module with the digit-editable coordinate model, the
//!   location register and the solar event resolver
//! - **Timer**: `timer` module with the interval timer state machine and its
//!   one-shot wake port
//! - **State**: `state` module persisting the location register across restarts
//! - **Configuration**: `config` module for TOML-based settings
//! - **Commands**: `commands` module for the CLI subcommands (sun, location, timer)
//! - **Infrastructure**: argument parsing, constants and logging

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod common;
pub mod config;
pub mod geo;
pub mod state;
pub mod time;
pub mod timer;

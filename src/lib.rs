//! # WellNUS - a command-line wellness assistant
//!
//! WellNUS runs an interactive loop on stdin with two features:
//!
//! - **Atomic habits** (`hb`): track small habits and how often you did them,
//!   saved to a plain text file in the data directory
//! - **Focus timer** (`ft`): a session of work and break countdowns that tick
//!   in the background while you keep typing commands
//!
//! ## Quick Start
//!
//! ```text
//! $ wellnus
//! hb
//! hb add --name Read 10 pages
//! hb update --id 1 --by 2
//! hb list
//! hb exit
//! ft
//! start
//! check
//! home
//! exit
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Main menu
//! - [`cli`]: Command-line arguments
//! - [`command`]: Argument parsing, the command contract and dispatch
//! - [`config`]: Configuration loading
//! - [`error`]: Error types and result aliases
//! - [`focus`]: Countdowns, sessions and the focus commands
//! - [`habit`]: Habits and the habit commands
//! - [`storage`]: Line codec and data files
//! - [`ui`]: Output sinks
//! - [`validation`]: Argument and payload checks

pub mod app;

/// Command-line interface definitions using clap.
pub mod cli;

pub mod command;

/// Configuration loading and management.
///
/// Handles the `wellnus.toml` configuration file and the data directory.
pub mod config;

/// Error types and result aliases.
///
/// Defines `WellnusError` enum and `Result<T>` type alias.
pub mod error;

pub mod focus;
pub mod habit;
pub mod logging;

/// File-based storage layer.
///
/// Reads and writes records as `--key value` lines.
pub mod storage;

pub mod ui;

/// Input validation utilities.
///
/// Checks argument counts, keys, payloads and habit descriptions.
pub mod validation;

#![forbid(unsafe_code)]

//! `megapanel`: a command-line host for `megapanel-layout`.
//!
//! Loads a JSON menu, builds panel layouts and prints them as JSON on
//! stdout. Logs go to stderr.

pub mod build;
pub mod cli;
pub mod error;
pub mod logging;
pub mod menu;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{CliError, Result};

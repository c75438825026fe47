//! CLI, configuration file and metadata file support
//!
//! This crate provides the `pickerkit` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod metadata;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};

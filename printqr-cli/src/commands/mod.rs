//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific subcommand.

pub mod edit;
pub mod generate;
pub mod info;
pub mod init;

// printqr-cli/src/lib.rs
//
// Library portion of the pqr binary. Contains argument definitions and
// command logic so integration tests can reach them.

pub mod cli;
pub mod commands;
pub mod prompt;
pub mod terminal;

pub use cli::{Cli, Commands, GenerateArgs};
pub use commands::generate::{run_generate, SettingsSource};

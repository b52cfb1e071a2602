// printqr-cli/src/commands/init.rs
//
// Creates the user data directory and writes the default configuration.

use std::fs;

use anyhow::Result;
use printqr_core::config::{self, Config};

use crate::cli::InitArgs;
use crate::terminal;

pub fn run_init(args: &InitArgs) -> Result<()> {
    let dir = config::user_data_dir()?;
    fs::create_dir_all(&dir)?;

    let path = config::user_config_path()?;
    if path.exists() && !args.force {
        terminal::print_warning(&format!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        ));
        return Ok(());
    }

    fs::write(&path, Config::default_file_contents())?;
    terminal::print_success(&format!(
        "Configuration written to {}",
        terminal::display_path(&path)
    ));
    Ok(())
}

// printqr-cli/src/commands/edit.rs
//
// Opens the user configuration in $EDITOR, creating it first if missing.

use std::env;
use std::fs;
use std::process::Command;

use anyhow::{bail, Context, Result};
use printqr_core::config::{self, Config};

use crate::terminal;

const FALLBACK_EDITOR: &str = "vi";

pub fn run_edit() -> Result<()> {
    let path = config::user_config_path()?;
    if !path.exists() {
        fs::create_dir_all(config::user_data_dir()?)?;
        fs::write(&path, Config::default_file_contents())?;
        terminal::print_info("Created", path.display());
    }

    let editor = env::var("EDITOR").unwrap_or_else(|_| FALLBACK_EDITOR.to_string());
    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("failed to launch editor '{editor}'"))?;
    if !status.success() {
        bail!("editor '{editor}' exited with {status}");
    }

    // Surface syntax errors right away instead of at the next generate.
    if let Err(e) = Config::load(true) {
        terminal::print_warning(&format!("configuration has problems: {e}"));
    }
    Ok(())
}

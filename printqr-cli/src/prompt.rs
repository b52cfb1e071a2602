// printqr-cli/src/prompt.rs
//
// Line-based interactive prompts built on `console::Term`. Every prompt
// goes through the shared terminal so the preview loop can clear and
// redraw consistently.

use anyhow::Result;
use console::{style, Term};
use printqr_core::settings::Setting;

use crate::terminal;

/// Whether stdin/stdout are attached to a terminal. When they are not,
/// prompting and the preview loop are skipped entirely.
pub fn is_interactive() -> bool {
    Term::stdout().is_term()
}

/// Prints the prompt and reads one trimmed line.
pub fn read_line(term: &Term, prompt: &str) -> Result<String> {
    term.write_str(prompt)?;
    let line = term.read_line()?;
    Ok(line.trim().to_string())
}

/// Prompts for one setting value. The current value is offered as the
/// default; an empty answer keeps it. Re-asks until the input parses for
/// the setting's kind.
pub fn setting_value(term: &Term, setting: &mut Setting) -> Result<()> {
    let label = setting.label();
    loop {
        let current = if setting.is_empty() {
            setting.placeholder()
        } else {
            setting.display_value()
        };
        let prompt = format!("  {} {}: ", label, style(format!("[{current}]")).dim());
        let input = read_line(term, &prompt)?;
        if input.is_empty() {
            return Ok(());
        }
        match setting.update_text(&input) {
            Ok(()) => return Ok(()),
            Err(e) => terminal::print_warning(&e.to_string()),
        }
    }
}

/// Prompts until the answer matches one of the options (case-insensitive).
pub fn choice(term: &Term, prompt: &str, options: &[char]) -> Result<char> {
    loop {
        let input = read_line(term, prompt)?;
        let answer = input.chars().next().map(|c| c.to_ascii_uppercase());
        if let Some(c) = answer {
            if options.contains(&c) {
                return Ok(c);
            }
        }
        let allowed: String = options.iter().map(|c| c.to_string()).collect::<Vec<_>>().join("/");
        terminal::print_warning(&format!("Please answer one of: {allowed}"));
    }
}

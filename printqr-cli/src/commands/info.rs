// printqr-cli/src/commands/info.rs
//
// Reference tables: the available template fields and the strftime syntax
// for date templates, with live examples rendered through chrono.

use anyhow::Result;
use printqr_core::settings::{self, Category, PrintSettings};

use crate::cli::InfoTopic;
use crate::terminal;

pub fn run_info(topic: &InfoTopic) -> Result<()> {
    match topic {
        InfoTopic::Fields => print_fields(),
        InfoTopic::Date => {
            print_date_reference();
            Ok(())
        }
    }
}

/// One row per print setting: template field, compact name, value type,
/// and the prompt label.
fn print_fields() -> Result<()> {
    let settings = PrintSettings::load()?;
    terminal::print_heading("Template Fields");

    let field_width = settings
        .iter()
        .map(|s| s.placeholder_with_unit().len())
        .max()
        .unwrap_or(0);

    for category in Category::ALL {
        terminal::print_section(&settings::title_case(category.as_str()));
        for setting in settings.iter().filter(|s| s.category == category) {
            println!(
                "  {:field_width$}  {:2}  {:7}  {}",
                setting.placeholder_with_unit(),
                setting.compact_name.as_deref().unwrap_or(""),
                setting.kind.expected(),
                setting.label(),
            );
        }
    }

    println!();
    println!("Fields are usable in filename and caption templates, with {{{{ and }}}}");
    println!("as literal braces. The date is also available as {{date}}.");
    Ok(())
}

const DATE_CODES: [(&str, &str); 10] = [
    ("%Y", "year, four digits"),
    ("%y", "year, two digits"),
    ("%m", "month, zero-padded"),
    ("%b", "month, abbreviated name"),
    ("%d", "day of month, zero-padded"),
    ("%e", "day of month, space-padded"),
    ("%H", "hour, 24-hour clock"),
    ("%M", "minute, zero-padded"),
    ("%j", "day of year"),
    ("%%", "literal percent sign"),
];

fn print_date_reference() {
    terminal::print_heading("Date Template Reference");

    let now = chrono::Local::now();
    for (code, description) in DATE_CODES {
        println!("  {:3}  {:28} {}", code, description, now.format(code));
    }

    println!();
    terminal::print_info("Default", "%Y-%m-%d");
    terminal::print_info("Example", now.format("%Y-%m-%d"));
}

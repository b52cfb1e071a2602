// printqr-cli/src/commands/generate.rs
//
// Shared implementation of the three generating subcommands: prompts,
// args and encoded. Builds the settings from the chosen source, runs the
// preview/revise loop, and writes the label artifacts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::Term;
use log::debug;
use printqr_core::caption::{self, CaptionFont, FontFit};
use printqr_core::config::{self, Config};
use printqr_core::settings::{self, Category, PrintSettings};
use printqr_core::{artifacts, encode, qr, template};

use crate::cli::GenerateArgs;
use crate::{prompt, terminal};

/// Where the setting values come from.
pub enum SettingsSource {
    Prompts,
    Flags(Vec<(&'static str, String)>),
    File(PathBuf),
}

pub fn run_generate(args: &GenerateArgs, source: SettingsSource, debug_mode: bool) -> Result<()> {
    let mut config = Config::load(true).context("failed to load configuration")?;
    apply_overrides(&mut config, args);
    validate_templates(&config)?;

    let mut settings = PrintSettings::load()?;
    if !args.ignore_defaults {
        config
            .apply_print_settings(&mut settings)
            .context("invalid [print-settings] in configuration")?;
    }

    let term = Term::stdout();
    let interactive = prompt::is_interactive();

    match &source {
        SettingsSource::Prompts => {
            if interactive {
                prompt_settings(&term, &mut settings)?;
            }
        }
        SettingsSource::Flags(entries) => {
            for (path, text) in entries {
                let setting = settings
                    .get_mut(path)
                    .with_context(|| format!("unknown setting '{path}'"))?;
                setting.update_text(text)?;
            }
        }
        SettingsSource::File(path) => {
            let table = encode::read_settings_file(path)?;
            settings.update_from_table(&table)?;
        }
    }

    if config.options.add_date {
        settings.stamp_date(&config.templates.date)?;
    }

    // Preview until confirmed; skipped when not attached to a terminal.
    while interactive {
        show_preview(&term, &config, &settings, debug_mode)?;
        let answer = prompt::choice(&term, "Continue or revise? [C/R]: ", &['C', 'R'])?;
        if answer == 'C' {
            break;
        }
        prompt_settings(&term, &mut settings)?;
        if config.options.add_date {
            settings.stamp_date(&config.templates.date)?;
        }
    }

    let rendered = render_label(&config, &settings)?;

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let record = encode::dump(&settings)?;
    let paths = artifacts::write_artifacts(
        &rendered.label,
        &record,
        &output_dir,
        &rendered.basename,
        config.qr.format,
        history_target()?.as_deref(),
    )?;

    if let Some(fit) = rendered.fit {
        if fit.reduced {
            terminal::print_warning(&format!(
                "caption text did not fit at size {}; reduced to {}",
                config.caption.font_size_max, fit.size
            ));
        }
    }

    terminal::print_success(&format!(
        "Label saved to {}",
        terminal::display_path(&paths.image)
    ));
    terminal::print_success(&format!(
        "Settings record saved to {}",
        terminal::display_path(&paths.record)
    ));
    if let Some(history) = &paths.history {
        debug!("History updated at {}", history.display());
    }

    Ok(())
}

/// CLI flags override the configured options and templates.
fn apply_overrides(config: &mut Config, args: &GenerateArgs) {
    if let Some(encoding) = args.encoding {
        config.options.encoding = encoding.into();
    }
    if let Some(add_caption) = args.caption_override() {
        config.options.add_caption = add_caption;
    }
    if let Some(add_date) = args.date_override() {
        config.options.add_date = add_date;
    }
    if args.add_units {
        config.options.add_units = true;
    }
    if let Some(template) = &args.date_template {
        config.templates.date = template.clone();
    }
    if let Some(template) = &args.filename_template {
        config.templates.filename = template.clone();
    }
    if let Some(lines) = &args.caption_template {
        if let [line_one, line_two] = lines.as_slice() {
            config.templates.caption_line_one = line_one.clone();
            config.templates.caption_line_two = line_two.clone();
        }
    }
}

/// Templates are checked before any prompting so a typo fails fast.
fn validate_templates(config: &Config) -> Result<()> {
    settings::validate_date_template(&config.templates.date)?;
    let probe = PrintSettings::load()?;
    let context = probe.template_context();
    template::validate(&config.templates.filename, &context)?;
    template::validate(&config.templates.caption_line_one, &context)?;
    template::validate(&config.templates.caption_line_two, &context)?;
    Ok(())
}

/// Prompts for every setting, grouped by category. The date is stamped
/// automatically and never prompted for.
fn prompt_settings(term: &Term, settings: &mut PrintSettings) -> Result<()> {
    for category in Category::ALL {
        terminal::print_section(&settings::title_case(category.as_str()));
        for setting in settings.iter_mut() {
            if setting.category != category || setting.path() == "misc-date" {
                continue;
            }
            prompt::setting_value(term, setting)?;
        }
    }
    Ok(())
}

struct RenderedLabel {
    label: printqr_core::image::GrayImage,
    basename: String,
    fit: Option<FontFit>,
}

fn render_label(config: &Config, settings: &PrintSettings) -> Result<RenderedLabel> {
    let payload = encode::encode(settings, config.options.encoding, config.options.add_units)?;
    let symbol = qr::build(&payload, &config.qr)?;
    let image = symbol.to_image(&config.qr);
    let context = settings.template_context();

    let (label, fit) = if config.options.add_caption {
        let line_one = template::render(&config.templates.caption_line_one, &context)?;
        let line_two = template::render(&config.templates.caption_line_two, &context)?;
        let font = CaptionFont::load(&config.caption)?;
        let (label, fit) = caption::compose(
            &image,
            &line_one,
            &line_two,
            &font,
            &config.caption,
            config.qr.border_px(),
        )?;
        (label, Some(fit))
    } else {
        (image, None)
    };

    let basename = artifacts::generate_basename(
        &config.templates.filename,
        &context,
        &config.templates.filename_transforms,
    )?;

    Ok(RenderedLabel {
        label,
        basename,
        fit,
    })
}

fn show_preview(
    term: &Term,
    config: &Config,
    settings: &PrintSettings,
    debug_mode: bool,
) -> Result<()> {
    if !debug_mode {
        term.clear_screen()?;
    }

    let payload = encode::encode(settings, config.options.encoding, config.options.add_units)?;
    let symbol = qr::build(&payload, &config.qr)?;
    let context = settings.template_context();

    terminal::print_heading("Label Preview");
    println!("{}", symbol.to_unicode());

    if config.options.add_caption {
        let line_one = template::render(&config.templates.caption_line_one, &context)?;
        let line_two = template::render(&config.templates.caption_line_two, &context)?;
        terminal::print_info("Caption", format!("{line_one} / {line_two}"));
    }

    let basename = artifacts::generate_basename(
        &config.templates.filename,
        &context,
        &config.templates.filename_transforms,
    )?;
    terminal::print_info(
        "File",
        format!("{basename}.{}", config.qr.format.extension()),
    );
    terminal::print_info(
        "Symbol",
        format!(
            "version {}, {} modules",
            symbol.version_number(),
            symbol.module_count()
        ),
    );
    terminal::print_info(
        "Payload",
        format!("{} ({} bytes)", config.options.encoding, payload.len()),
    );
    println!("{payload}");
    println!();

    Ok(())
}

/// History is only mirrored once `pqr init` has created the data directory.
fn history_target() -> Result<Option<PathBuf>> {
    let path = config::history_path()?;
    let exists = path.parent().map(Path::is_dir).unwrap_or(false);
    Ok(exists.then_some(path))
}

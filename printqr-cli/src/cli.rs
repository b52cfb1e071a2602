// printqr-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use printqr_core::Encoding;

#[derive(Parser, Debug)]
#[command(
    name = "pqr",
    author,
    version,
    disable_version_flag = true,
    about = "pqr: QR-code labels for 3D-print filament spools",
    long_about = "Generates printable QR-code labels carrying filament print settings, \
                  with a caption line and a TOML record sidecar."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging and keep the screen between previews
    #[arg(short = 'd', long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fill in print settings interactively, one prompt per setting
    Prompts(PromptsArgs),
    /// Fill in print settings from command-line flags
    Args(ArgsCommand),
    /// Fill in print settings from a TOML or JSON file
    Encoded(EncodedArgs),
    /// Create the user configuration file
    Init(InitArgs),
    /// Open the user configuration file in $EDITOR
    Edit,
    /// Print reference tables
    Info(InfoArgs),
}

#[derive(Args, Debug)]
pub struct PromptsArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,
}

#[derive(Args, Debug)]
pub struct EncodedArgs {
    /// Settings file to read (.toml or .json)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(subcommand)]
    pub topic: InfoTopic,
}

#[derive(Subcommand, Debug)]
pub enum InfoTopic {
    /// List every print setting with its template field name
    Fields,
    /// Show the date template syntax with live examples
    Date,
}

/// Flags shared by the three generating subcommands.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Directory to write the label image and record into
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Start from empty settings instead of configured defaults
    #[arg(long, default_value_t = false)]
    pub ignore_defaults: bool,

    /// Payload encoding for the QR data
    #[arg(short = 'e', long, value_name = "ENCODING", value_enum)]
    pub encoding: Option<EncodingArg>,

    /// Render the caption under the QR code
    #[arg(long, overrides_with = "no_caption")]
    pub add_caption: bool,

    /// Skip the caption
    #[arg(long, overrides_with = "add_caption")]
    pub no_caption: bool,

    /// Stamp the current date into the settings
    #[arg(long, overrides_with = "no_date")]
    pub add_date: bool,

    /// Skip the date stamp
    #[arg(long, overrides_with = "add_date")]
    pub no_date: bool,

    /// Include unit symbols in the encoded payload
    #[arg(long, default_value_t = false)]
    pub add_units: bool,

    /// strftime-style template for the stamped date
    #[arg(long, value_name = "TEMPLATE")]
    pub date_template: Option<String>,

    /// Template for the output file name (without extension)
    #[arg(long, value_name = "TEMPLATE")]
    pub filename_template: Option<String>,

    /// Templates for the two caption lines
    #[arg(long, num_args = 2, value_names = ["LINE_ONE", "LINE_TWO"])]
    pub caption_template: Option<Vec<String>>,
}

impl GenerateArgs {
    /// Three-state reading of a `--add-x`/`--no-x` flag pair.
    pub fn caption_override(&self) -> Option<bool> {
        flag_pair(self.add_caption, self.no_caption)
    }

    pub fn date_override(&self) -> Option<bool> {
        flag_pair(self.add_date, self.no_date)
    }
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Mirror of [`printqr_core::Encoding`] that clap can parse.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingArg {
    /// TOML tables, scannable by other tools
    Toml,
    /// Line-based format tuned for small QR symbols
    Compact,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Toml => Encoding::Toml,
            EncodingArg::Compact => Encoding::Compact,
        }
    }
}

/// One flag per print setting. The date is excluded; it is driven by
/// `--add-date` and `--date-template`.
#[derive(Args, Debug)]
pub struct ArgsCommand {
    /// Filament name
    #[arg(long, value_name = "NAME")]
    pub filament_name: Option<String>,

    /// Filament brand
    #[arg(long, value_name = "BRAND")]
    pub filament_brand: Option<String>,

    /// Filament material
    #[arg(long, value_name = "MATERIAL")]
    pub filament_material: Option<String>,

    /// Printer name
    #[arg(long, value_name = "NAME")]
    pub printer_name: Option<String>,

    /// Nozzle size in mm
    #[arg(long, value_name = "MM")]
    pub printer_nozzle_size: Option<f64>,

    /// Nozzle type
    #[arg(long, value_name = "TYPE")]
    pub printer_nozzle_type: Option<String>,

    /// Slicer name
    #[arg(long, value_name = "NAME")]
    pub slicer_name: Option<String>,

    /// Layer height in mm
    #[arg(long, value_name = "MM")]
    pub slicer_layer_height: Option<f64>,

    /// Nozzle temperature in °C
    #[arg(long, value_name = "DEG")]
    pub slicer_nozzle_temp: Option<i64>,

    /// Bed temperature in °C
    #[arg(long, value_name = "DEG")]
    pub slicer_bed_temp: Option<i64>,

    /// Max volumetric speed in mm³/s
    #[arg(long, value_name = "SPEED")]
    pub slicer_max_volumetric_speed: Option<i64>,

    /// Print time
    #[arg(long, value_name = "TIME")]
    pub slicer_print_time: Option<String>,

    /// Free-form notes
    #[arg(long, value_name = "NOTES")]
    pub misc_notes: Option<String>,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

impl ArgsCommand {
    /// Collects the set flags as `(setting path, text value)` pairs in
    /// catalog order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = Vec::new();

        macro_rules! push {
            ($field:ident, $path:expr) => {
                if let Some(value) = &self.$field {
                    entries.push(($path, value.to_string()));
                }
            };
        }

        push!(filament_name, "filament-name");
        push!(filament_brand, "filament-brand");
        push!(filament_material, "filament-material");
        push!(printer_name, "printer-name");
        push!(printer_nozzle_size, "printer-nozzle-size");
        push!(printer_nozzle_type, "printer-nozzle-type");
        push!(slicer_name, "slicer-name");
        push!(slicer_layer_height, "slicer-layer-height");
        push!(slicer_nozzle_temp, "slicer-nozzle-temp");
        push!(slicer_bed_temp, "slicer-bed-temp");
        push!(slicer_max_volumetric_speed, "slicer-max-volumetric-speed");
        push!(slicer_print_time, "slicer-print-time");
        push!(misc_notes, "misc-notes");

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_prompts_with_shared_flags() {
        let cli = Cli::parse_from([
            "pqr", "prompts", "-o", "/tmp/labels", "-e", "compact", "--no-caption",
        ]);
        match cli.command {
            Commands::Prompts(args) => {
                assert_eq!(args.generate.output, Some(PathBuf::from("/tmp/labels")));
                assert_eq!(args.generate.encoding, Some(EncodingArg::Compact));
                assert_eq!(args.generate.caption_override(), Some(false));
                assert_eq!(args.generate.date_override(), None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn later_flag_wins_in_a_pair() {
        let cli = Cli::parse_from(["pqr", "prompts", "--no-caption", "--add-caption"]);
        match cli.command {
            Commands::Prompts(args) => {
                assert_eq!(args.generate.caption_override(), Some(true));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn args_entries_follow_catalog_order() {
        let cli = Cli::parse_from([
            "pqr",
            "args",
            "--slicer-nozzle-temp",
            "215",
            "--filament-name",
            "Galaxy Black",
            "--printer-nozzle-size",
            "0.4",
        ]);
        match cli.command {
            Commands::Args(args) => {
                let entries = args.entries();
                assert_eq!(
                    entries,
                    vec![
                        ("filament-name", "Galaxy Black".to_string()),
                        ("printer-nozzle-size", "0.4".to_string()),
                        ("slicer-nozzle-temp", "215".to_string()),
                    ]
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn caption_template_takes_two_values() {
        let cli = Cli::parse_from([
            "pqr",
            "prompts",
            "--caption-template",
            "{filament-name}",
            "{filament-material}",
        ]);
        match cli.command {
            Commands::Prompts(args) => {
                assert_eq!(
                    args.generate.caption_template,
                    Some(vec![
                        "{filament-name}".to_string(),
                        "{filament-material}".to_string()
                    ])
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_temperature() {
        assert!(Cli::try_parse_from(["pqr", "args", "--slicer-nozzle-temp", "warm"]).is_err());
    }
}

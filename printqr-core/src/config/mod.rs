//! Layered configuration for label generation.
//!
//! Built-in defaults are embedded as TOML and deep-merged with the first
//! user file found: `./pqr.toml`, then `~/.pqr/config.toml`. The
//! `[print-settings]` table pre-fills default values for the print-setting
//! registry and is validated against the catalog.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::artifacts::StringTransform;
use crate::encode::Encoding;
use crate::error::{CoreError, CoreResult};
use crate::settings::PrintSettings;

const DEFAULTS_TOML: &str = include_str!("defaults.toml");

pub const USER_DATA_DIR_NAME: &str = ".pqr";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOCAL_CONFIG_FILE_NAME: &str = "pqr.toml";
pub const HISTORY_FILE_NAME: &str = "history.toml";

pub const QR_VERSION_MIN: u8 = 1;
pub const QR_VERSION_MAX: u8 = 40;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub options: Options,
    pub templates: Templates,
    pub qr: QrStyle,
    pub caption: CaptionStyle,
    /// Default print-setting values, validated against the catalog.
    #[serde(default)]
    pub print_settings: toml::Table,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Options {
    pub add_caption: bool,
    pub add_date: bool,
    pub add_units: bool,
    pub encoding: Encoding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Templates {
    pub filename: String,
    pub caption_line_one: String,
    pub caption_line_two: String,
    /// strftime template used to stamp the date setting.
    pub date: String,
    #[serde(default)]
    pub filename_transforms: Vec<StringTransform>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct QrStyle {
    pub format: ImageFormat,
    pub version: QrVersion,
    pub error_correction: ErrorCorrection,
    /// Pixel size of one QR module.
    pub module_size: u32,
    /// Quiet-zone width in modules.
    pub border: u32,
}

impl QrStyle {
    /// Quiet-zone thickness in pixels, also used as the caption margin.
    pub fn border_px(&self) -> u32 {
        self.border * self.module_size
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CaptionStyle {
    pub font_size_max: u32,
    pub padding_top: u32,
    pub padding_bottom: u32,
    pub line_spacing: u32,
    /// Optional path to a TTF font overriding the embedded one.
    #[serde(default)]
    pub font: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

/// QR symbol version: fixed 1..=40 or fit-to-data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrVersion {
    Auto,
    Fixed(u8),
}

impl fmt::Display for QrVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QrVersion::Auto => f.write_str("auto"),
            QrVersion::Fixed(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for QrVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QrVersion::Auto => serializer.serialize_str("auto"),
            QrVersion::Fixed(n) => serializer.serialize_u8(*n),
        }
    }
}

impl<'de> Deserialize<'de> for QrVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u8),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(QrVersion::Fixed(n)),
            Raw::Text(s) if s == "auto" => Ok(QrVersion::Auto),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "QR version must be 'auto' or {QR_VERSION_MIN}-{QR_VERSION_MAX}, got '{s}'"
            ))),
        }
    }
}

impl Config {
    /// Built-in defaults only.
    pub fn defaults() -> CoreResult<Config> {
        let config: Config = toml::from_str(DEFAULTS_TOML)
            .map_err(|e| CoreError::ConfigValidation(format!("built-in defaults: {e}")))?;
        Ok(config)
    }

    /// Loads configuration, merging the user file over the defaults when
    /// `use_user` is set.
    pub fn load(use_user: bool) -> CoreResult<Config> {
        let mut table: toml::Table = toml::from_str(DEFAULTS_TOML)
            .map_err(|e| CoreError::ConfigValidation(format!("built-in defaults: {e}")))?;

        if use_user {
            if let Some(path) = find_user_file() {
                let text = fs::read_to_string(&path).map_err(|e| CoreError::ConfigRead {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                let user: toml::Table =
                    toml::from_str(&text).map_err(|e| CoreError::ConfigRead {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                merge_tables(&mut table, user);
            }
        }

        let config: Config = toml::Value::Table(table)
            .try_into()
            .map_err(|e| CoreError::ConfigValidation(e.to_string()))?;
        config.validate()?;
        config.validate_print_settings(&PrintSettings::load()?)?;
        Ok(config)
    }

    /// Structural validation beyond what serde enforces.
    pub fn validate(&self) -> CoreResult<()> {
        if let QrVersion::Fixed(n) = self.qr.version {
            if !(QR_VERSION_MIN..=QR_VERSION_MAX).contains(&n) {
                return Err(CoreError::ConfigValidation(format!(
                    "qr.version must be {QR_VERSION_MIN}-{QR_VERSION_MAX}, got {n}"
                )));
            }
        }
        if self.qr.module_size == 0 {
            return Err(CoreError::ConfigValidation(
                "qr.module-size must be at least 1".to_string(),
            ));
        }
        if self.caption.font_size_max == 0 {
            return Err(CoreError::ConfigValidation(
                "caption.font-size-max must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks the `[print-settings]` overrides against the catalog without
    /// touching the live registry.
    pub fn validate_print_settings(&self, settings: &PrintSettings) -> CoreResult<()> {
        let mut probe = settings.clone();
        probe.update_from_table(&self.print_settings)
    }

    /// Applies the `[print-settings]` defaults to the registry.
    pub fn apply_print_settings(&self, settings: &mut PrintSettings) -> CoreResult<()> {
        settings.update_from_table(&self.print_settings)
    }

    /// Contents written by `pqr init`: a short banner over the defaults.
    pub fn default_file_contents() -> String {
        let banner = "\
# pqr user configuration
#
# Values here override the built-in defaults. Any key left out keeps its
# default. The [print-settings] table pre-fills prompt defaults; run
# `pqr info fields` for the available keys.
";
        format!("{banner}\n{DEFAULTS_TOML}")
    }
}

/// First user config file found: `./pqr.toml`, then `~/.pqr/config.toml`.
pub fn find_user_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    let user = user_config_path().ok()?;
    if user.exists() {
        return Some(user);
    }
    None
}

/// User data directory (`~/.pqr`).
pub fn user_data_dir() -> CoreResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(USER_DATA_DIR_NAME))
        .ok_or_else(|| {
            CoreError::ConfigValidation("could not determine the home directory".to_string())
        })
}

pub fn user_config_path() -> CoreResult<PathBuf> {
    Ok(user_data_dir()?.join(CONFIG_FILE_NAME))
}

pub fn history_path() -> CoreResult<PathBuf> {
    Ok(user_data_dir()?.join(HISTORY_FILE_NAME))
}

fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(override_table)) => {
                merge_tables(base_table, override_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

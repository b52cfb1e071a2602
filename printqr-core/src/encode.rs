//! QR payload encodings.
//!
//! Two serialization styles pack the settings into the QR payload: a
//! structured TOML form and a compact line-oriented form. A third, full
//! TOML form (including empty values) is used for the record sidecar and
//! history files.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::settings::PrintSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Toml,
    Compact,
}

impl Encoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Toml => "toml",
            Encoding::Compact => "compact",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "toml" => Ok(Encoding::Toml),
            "compact" => Ok(Encoding::Compact),
            other => Err(CoreError::Encode(format!("unknown encoding '{other}'"))),
        }
    }
}

/// Reads a structured settings file, picking the parser by extension.
/// JSON parses straight into a TOML table since both are self-describing.
pub fn read_settings_file(path: &Path) -> CoreResult<toml::Table> {
    let text = fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&text)
            .map_err(|e| CoreError::Encode(format!("{}: {e}", path.display()))),
        Some("json") => serde_json::from_str(&text)
            .map_err(|e| CoreError::Encode(format!("{}: {e}", path.display()))),
        _ => Err(CoreError::Encode(format!(
            "{}: expected a .toml or .json file",
            path.display()
        ))),
    }
}

/// Encodes the settings into the QR payload.
pub fn encode(settings: &PrintSettings, encoding: Encoding, with_units: bool) -> CoreResult<String> {
    match encoding {
        Encoding::Toml => encode_toml(settings, with_units, true),
        Encoding::Compact => Ok(encode_compact(settings, with_units)),
    }
}

/// Full TOML record of the settings, empty values included and no units.
/// This is what the sidecar and history files hold, and it round-trips
/// through [`PrintSettings::update_from_table`].
pub fn dump(settings: &PrintSettings) -> CoreResult<String> {
    encode_toml(settings, false, false)
}

fn encode_toml(settings: &PrintSettings, with_units: bool, filter_empty: bool) -> CoreResult<String> {
    let mut root = toml::Table::new();

    for setting in settings.iter() {
        if filter_empty && setting.is_empty() {
            continue;
        }
        // Values with a unit become strings when units are requested;
        // everything else keeps its native type.
        let value = if with_units && setting.unit.is_some() {
            toml::Value::String(setting.value_with_unit())
        } else {
            setting.value().to_toml()
        };
        let entry = root
            .entry(setting.category.as_str().to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        if let Some(table) = entry.as_table_mut() {
            table.insert(setting.name.clone(), value);
        }
    }

    // Filtering can leave behind empty category tables.
    if filter_empty {
        root.retain(|_, entries| entries.as_table().is_some_and(|t| !t.is_empty()));
    }

    toml::to_string(&root).map_err(|e| CoreError::Encode(e.to_string()))
}

// Empty values are not removed from the compact format beyond skipping the
// line: empty category headers still emit a placeholder so the payload can
// be parsed back into structured data.
fn encode_compact(settings: &PrintSettings, with_units: bool) -> String {
    let mut lines = Vec::new();

    for setting in settings.iter() {
        if setting.is_empty() {
            if setting.is_header() {
                lines.push(setting.category.placeholder());
            }
            continue;
        }

        let value = if with_units {
            setting.value_with_unit()
        } else {
            setting.display_value()
        };

        match &setting.compact_name {
            Some(compact) => lines.push(format!("  {compact}={value}")),
            None => lines.push(value),
        }
    }

    lines.join("\n")
}

//! Print-setting registry: typed, unit-aware key/value pairs grouped into
//! categories.
//!
//! The registry is loaded from an embedded catalog and holds the current
//! value of every setting. Settings are addressed by a fully qualified path
//! (`category-name`, e.g. `slicer-nozzle-temp`); the snake_case spelling is
//! accepted everywhere a path is read.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Embedded built-in catalog. Order here is presentation order.
const CATALOG_TOML: &str = include_str!("catalog.toml");

/// Placeholder shown for settings without a value in rendered templates.
pub const MISSING_VALUE: &str = "?";

/// Bare alias for `misc-date` in template contexts.
pub const DATE_KEY: &str = "date";

/// Context map for `{field}` template rendering: path -> display value.
pub type TemplateContext = BTreeMap<String, String>;

// ---- Categories and units ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Filament,
    Printer,
    Slicer,
    Misc,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Filament,
        Category::Printer,
        Category::Slicer,
        Category::Misc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Filament => "filament",
            Category::Printer => "printer",
            Category::Slicer => "slicer",
            Category::Misc => "misc",
        }
    }

    /// Header line emitted for an empty category name in the compact
    /// encoding, keeping the payload mechanically parseable.
    pub fn placeholder(self) -> String {
        format!("[{}]", self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::UnknownSetting(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "mm³/s")]
    Flow,
    #[serde(rename = "mm")]
    Length,
    #[serde(rename = "°C")]
    Temperature,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Flow => "mm³/s",
            Unit::Length => "mm",
            Unit::Temperature => "°C",
        }
    }
}

// ---- Values ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Str,
    Int,
    Float,
}

impl ValueKind {
    /// Human description used in error messages and prompts.
    pub fn expected(self) -> &'static str {
        match self {
            ValueKind::Str => "text",
            ValueKind::Int => "an integer",
            ValueKind::Float => "a number",
        }
    }
}

/// A typed setting value. The empty value is `""`/`0`/`0.0` per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn empty(kind: ValueKind) -> Value {
        match kind {
            ValueKind::Str => Value::Str(String::new()),
            ValueKind::Int => Value::Int(0),
            ValueKind::Float => Value::Float(0.0),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::Str,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Value::Str(s) => s.is_empty(),
            Value::Int(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
        }
    }

    /// Parses text input per the declared kind. Empty or whitespace-only
    /// input yields the empty value.
    pub fn parse(kind: ValueKind, input: &str) -> Option<Value> {
        let input = input.trim();
        if input.is_empty() {
            return Some(Value::empty(kind));
        }
        match kind {
            ValueKind::Str => Some(Value::Str(input.to_string())),
            ValueKind::Int => input.parse::<i64>().ok().map(Value::Int),
            ValueKind::Float => input.parse::<f64>().ok().map(Value::Float),
        }
    }

    /// Converts a TOML value if it matches the declared kind. Integers are
    /// accepted for float settings.
    pub fn from_toml(kind: ValueKind, value: &toml::Value) -> Option<Value> {
        match (kind, value) {
            (ValueKind::Str, toml::Value::String(s)) => Some(Value::Str(s.trim().to_string())),
            (ValueKind::Int, toml::Value::Integer(i)) => Some(Value::Int(*i)),
            (ValueKind::Float, toml::Value::Float(f)) => Some(Value::Float(*f)),
            (ValueKind::Float, toml::Value::Integer(i)) => Some(Value::Float(*i as f64)),
            _ => None,
        }
    }

    pub fn to_toml(&self) -> toml::Value {
        match self {
            Value::Str(s) => toml::Value::String(s.clone()),
            Value::Int(i) => toml::Value::Integer(*i),
            Value::Float(f) => toml::Value::Float(*f),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Str(String::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
        }
    }
}

// ---- Settings ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Setting {
    pub name: String,
    pub category: Category,
    pub kind: ValueKind,
    /// Two-letter abbreviation used by the compact encoding. Settings
    /// without one print as a bare value (or a category header line).
    #[serde(default)]
    pub compact_name: Option<String>,
    #[serde(default)]
    pub unit: Option<Unit>,
    #[serde(default)]
    pub description: String,
    #[serde(skip)]
    value: Value,
}

impl Setting {
    /// Fully qualified kebab-case path, e.g. `slicer-nozzle-temp`.
    pub fn path(&self) -> String {
        format!("{}-{}", self.category, self.name)
    }

    /// `{path}` template field for this setting.
    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.path())
    }

    /// `{path}` template field with the unit symbol appended.
    pub fn placeholder_with_unit(&self) -> String {
        match self.unit {
            Some(unit) => format!("{{{}}}{}", self.path(), unit.symbol()),
            None => self.placeholder(),
        }
    }

    /// Category name settings act as bare header lines in the compact
    /// encoding.
    pub fn is_header(&self) -> bool {
        self.name == "name"
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn display_value(&self) -> String {
        self.value.to_string()
    }

    pub fn value_with_unit(&self) -> String {
        match self.unit {
            Some(unit) => format!("{}{}", self.value, unit.symbol()),
            None => self.value.to_string(),
        }
    }

    /// Title-cased description with the unit symbol, used as a prompt label
    /// and in the reference table.
    pub fn label(&self) -> String {
        let title = title_case(&self.description);
        match self.unit {
            Some(unit) => format!("{} in {}", title, unit.symbol()),
            None => title,
        }
    }

    pub fn clear(&mut self) {
        self.value = Value::empty(self.kind);
    }

    /// Replaces the value, enforcing the declared kind.
    pub fn set_value(&mut self, value: Value) -> CoreResult<()> {
        if value.kind() != self.kind {
            return Err(CoreError::SettingValue {
                path: self.path(),
                expected: self.kind.expected(),
            });
        }
        self.value = value;
        Ok(())
    }

    /// Parses and stores text input. Empty input clears the setting.
    pub fn update_text(&mut self, input: &str) -> CoreResult<()> {
        match Value::parse(self.kind, input) {
            Some(value) => {
                self.value = value;
                Ok(())
            }
            None => Err(CoreError::SettingValue {
                path: self.path(),
                expected: self.kind.expected(),
            }),
        }
    }
}

// ---- Registry ----

/// The full set of print settings, in catalog order.
#[derive(Debug, Clone)]
pub struct PrintSettings {
    settings: Vec<Setting>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(rename = "setting")]
    settings: Vec<Setting>,
}

impl PrintSettings {
    /// Loads the embedded catalog with every value empty.
    pub fn load() -> CoreResult<Self> {
        let catalog: CatalogFile = toml::from_str(CATALOG_TOML)
            .map_err(|e| CoreError::ConfigValidation(format!("built-in catalog: {e}")))?;
        let mut settings = catalog.settings;
        for setting in &mut settings {
            setting.clear();
        }
        Ok(PrintSettings { settings })
    }

    pub fn get(&self, path: &str) -> Option<&Setting> {
        let path = snake_to_kebab(path);
        self.settings.iter().find(|s| s.path() == path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut Setting> {
        let path = snake_to_kebab(path);
        self.settings.iter_mut().find(|s| s.path() == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Setting> {
        self.settings.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Setting> {
        self.settings.iter_mut()
    }

    pub fn clear_all(&mut self) {
        for setting in &mut self.settings {
            setting.clear();
        }
    }

    /// Applies a nested `category.name = value` table, rejecting unknown
    /// paths and type mismatches.
    pub fn update_from_table(&mut self, data: &toml::Table) -> CoreResult<()> {
        for (category, entries) in data {
            let category: Category = category.parse()?;
            let entries = entries.as_table().ok_or_else(|| {
                CoreError::ConfigValidation(format!(
                    "'{category}' must be a table of settings"
                ))
            })?;
            for (name, value) in entries {
                let path = format!("{}-{}", category, snake_to_kebab(name));
                let setting = self
                    .get_mut(&path)
                    .ok_or_else(|| CoreError::UnknownSetting(path.clone()))?;
                let value = Value::from_toml(setting.kind, value).ok_or_else(|| {
                    CoreError::SettingValue {
                        path: path.clone(),
                        expected: setting.kind.expected(),
                    }
                })?;
                setting.set_value(value)?;
            }
        }
        Ok(())
    }

    /// Renders the current date with a strftime template into `misc-date`.
    pub fn stamp_date(&mut self, template: &str) -> CoreResult<()> {
        let date = render_date(template)?;
        self.set_date(&date)
    }

    pub fn set_date(&mut self, date: &str) -> CoreResult<()> {
        let setting = self
            .get_mut("misc-date")
            .ok_or_else(|| CoreError::UnknownSetting("misc-date".to_string()))?;
        setting.update_text(date)
    }

    pub fn date(&self) -> Option<&Setting> {
        self.get("misc-date")
    }

    /// Builds the template context: every path maps to its display value,
    /// with empty values shown as `?`. The date is exposed under both
    /// `misc-date` and bare `date`.
    pub fn template_context(&self) -> TemplateContext {
        let mut context = TemplateContext::new();
        for setting in &self.settings {
            let value = if setting.is_empty() {
                MISSING_VALUE.to_string()
            } else {
                setting.display_value()
            };
            if setting.name == DATE_KEY {
                context.insert(DATE_KEY.to_string(), value.clone());
            }
            context.insert(setting.path(), value);
        }
        context
    }
}

// ---- Path and date helpers ----

pub fn snake_to_kebab(s: &str) -> String {
    s.replace('_', "-")
}

/// Renders the current local date with a strftime template, rejecting
/// templates chrono cannot parse.
pub fn render_date(template: &str) -> CoreResult<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(template).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(CoreError::DateTemplate(template.to_string()));
    }
    Ok(Local::now().format_with_items(items.into_iter()).to_string())
}

/// Checks a strftime template without rendering it.
pub fn validate_date_template(template: &str) -> CoreResult<()> {
    render_date(template).map(|_| ())
}

/// Title-cases each whitespace-separated word.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

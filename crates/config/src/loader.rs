//! Loading and validation of theme configuration documents.
//!
//! The canonical document nests `colors` and `fontFamily` under a `theme`
//! object; the flat shape with both at top level is also accepted. Unknown
//! keys are ignored so the schema can grow without breaking older readers.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::color::{Color, ColorError};
use crate::model::{FontStack, ThemeConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {path}: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    /// The generator would have no markup to scan.
    #[error("`content` must list at least one file glob")]
    EmptyContent,
    #[error("`content` entry {index} is blank")]
    BlankContentEntry { index: usize },
    #[error("color `{name}`: {source}")]
    Color {
        name: String,
        #[source]
        source: ColorError,
    },
    /// A font role with no faces would generate an empty `font-family` rule.
    #[error("font family `{role}` has no fonts")]
    EmptyFontStack { role: String },
}

/// Load a configuration document from a JSON string.
pub fn load_str(input: &str) -> Result<ThemeConfig, ConfigError> {
    let raw: RawDocument = serde_json::from_str(input)?;
    validate(raw)
}

/// Load a configuration document from raw bytes.
pub fn load_slice(data: &[u8]) -> Result<ThemeConfig, ConfigError> {
    let raw: RawDocument = serde_json::from_slice(data)?;
    validate(raw)
}

/// Load a configuration document from a file.
pub fn load_path(path: impl AsRef<Path>) -> Result<ThemeConfig, ConfigError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|error| ConfigError::Io {
        path: path.to_owned(),
        error,
    })?;
    load_slice(&data)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDocument {
    content: Vec<String>,
    theme: Option<RawTheme>,
    colors: Option<RawColorMap>,
    #[serde(rename = "fontFamily")]
    font_family: Option<RawFontMap>,
    plugins: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTheme {
    colors: Option<RawColorMap>,
    #[serde(rename = "fontFamily")]
    font_family: Option<RawFontMap>,
}

fn validate(raw: RawDocument) -> Result<ThemeConfig, ConfigError> {
    if raw.content.is_empty() {
        return Err(ConfigError::EmptyContent);
    }
    for (index, glob) in raw.content.iter().enumerate() {
        if glob.trim().is_empty() {
            return Err(ConfigError::BlankContentEntry { index });
        }
    }

    // The `theme` block wins over flat keys, field by field.
    let (raw_colors, raw_fonts) = match raw.theme {
        Some(theme) => (
            theme.colors.or(raw.colors),
            theme.font_family.or(raw.font_family),
        ),
        None => (raw.colors, raw.font_family),
    };

    let mut colors = BTreeMap::new();
    for (name, value) in raw_colors.map(|m| m.0).unwrap_or_default() {
        let color = value
            .parse::<Color>()
            .map_err(|source| ConfigError::Color {
                name: name.clone(),
                source,
            })?;
        colors.insert(name, color);
    }

    let mut font_family = BTreeMap::new();
    for (role, names) in raw_fonts.map(|m| m.0).unwrap_or_default() {
        if names.is_empty() {
            return Err(ConfigError::EmptyFontStack { role });
        }
        font_family.insert(role, FontStack::new(names));
    }

    Ok(ThemeConfig {
        content: raw.content,
        colors,
        font_family,
        plugins: raw.plugins,
    })
}

/// Palette map that rejects duplicate keys instead of silently keeping the
/// last value. A duplicate key in a hand-maintained palette is always an
/// editing mistake.
#[derive(Debug)]
struct RawColorMap(BTreeMap<String, String>);

impl<'de> Deserialize<'de> for RawColorMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = RawColorMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of color names to color literals")
            }

            fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
                collect_unique(access, "color").map(RawColorMap)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

#[derive(Debug)]
struct RawFontMap(BTreeMap<String, Vec<String>>);

impl<'de> Deserialize<'de> for RawFontMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = RawFontMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of font roles to font name lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
                collect_unique(access, "font family").map(RawFontMap)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

fn collect_unique<'de, A, V>(mut access: A, what: &str) -> Result<BTreeMap<String, V>, A::Error>
where
    A: MapAccess<'de>,
    V: Deserialize<'de>,
{
    let mut map = BTreeMap::new();
    while let Some((key, value)) = access.next_entry::<String, V>()? {
        if map.contains_key(&key) {
            return Err(serde::de::Error::custom(format!(
                "duplicate {what} key `{key}`"
            )));
        }
        map.insert(key, value);
    }
    Ok(map)
}

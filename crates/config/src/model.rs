use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::Color;

/// An ordered font fallback list. The first entry is the preferred face;
/// the generator emits the rest as fallbacks in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FontStack(Vec<String>);

impl FontStack {
    pub fn new(names: Vec<String>) -> Self {
        FontStack(names)
    }

    pub fn from_names<'a, I: IntoIterator<Item = &'a str>>(names: I) -> Self {
        FontStack(names.into_iter().map(str::to_owned).collect())
    }

    pub fn preferred(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The theme configuration record consumed by the style generator.
///
/// Loaded once per build via [`crate::loader`], read-only afterwards.
/// `Deserialize` is deliberately not derived: the loader is the only way
/// to construct a record from a document, so every record in circulation
/// has passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeConfig {
    /// File-path globs naming the markup files scanned for class usage.
    pub content: Vec<String>,
    /// Palette: unique color names mapped to CSS color literals.
    pub colors: BTreeMap<String, Color>,
    /// Font roles (e.g. "sans") mapped to ordered fallback stacks.
    #[serde(rename = "fontFamily")]
    pub font_family: BTreeMap<String, FontStack>,
    /// Plugin references, applied in order. Usually empty.
    pub plugins: Vec<String>,
}

impl ThemeConfig {
    /// Look up a palette color by name.
    pub fn color(&self, name: &str) -> Option<&Color> {
        self.colors.get(name)
    }

    /// Look up a font stack by role name.
    pub fn font_stack(&self, role: &str) -> Option<&FontStack> {
        self.font_family.get(role)
    }

    /// The palette shipped with the report mail template, used when no
    /// config document is present next to the template.
    pub fn builtin() -> Self {
        let colors = [
            ("black", "#000000"),
            ("dark-grey", "#1E1E1E"),
            ("green", "#7AAC2B"),
            ("light-grey", "#333333"),
            ("red", "#D32F2F"),
            ("super-light-grey", "#EEEEEE"),
            ("white", "#ffffff"),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_owned(), Color::hex_literal(value)))
        .collect();

        let font_family = [("sans".to_owned(), FontStack::from_names(["Roboto", "sans-serif"]))]
            .into_iter()
            .collect();

        ThemeConfig {
            content: vec!["template.html".to_owned()],
            colors,
            font_family,
            plugins: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_palette_lookup() {
        let theme = ThemeConfig::builtin();
        assert_eq!(theme.color("green").map(Color::as_str), Some("#7AAC2B"));
        assert_eq!(theme.color("super-light-grey").map(Color::as_str), Some("#EEEEEE"));
        assert!(theme.color("serif").is_none());
        assert_eq!(theme.colors.len(), 7);
    }

    #[test]
    fn builtin_font_stack() {
        let theme = ThemeConfig::builtin();
        let sans = theme.font_stack("sans").unwrap();
        assert_eq!(sans.preferred(), Some("Roboto"));
        assert_eq!(sans.names(), ["Roboto", "sans-serif"]);
        assert!(theme.font_stack("serif").is_none());
    }

    #[test]
    fn serializes_with_camel_case_font_family() {
        let theme = ThemeConfig::builtin();
        let json = serde_json::to_value(&theme).unwrap();
        assert!(json.get("fontFamily").is_some());
        assert_eq!(json["fontFamily"]["sans"][0], "Roboto");
        assert_eq!(json["colors"]["red"], "#D32F2F");
        assert_eq!(json["plugins"].as_array().map(Vec::len), Some(0));
    }
}

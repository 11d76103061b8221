//! Visual theme for the document shell.
//!
//! Defaults reproduce the built-in report style; any subset can be
//! overridden from a TOML file via [`Theme::load`].

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Theme {
    pub page: PageTheme,
    pub body: BodyTheme,
    pub headings: HeadingTheme,
    pub code: CodeTheme,
    pub table: TableTheme,
    pub toc: TocTheme,
}

impl Theme {
    /// Load a theme from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|source| Error::ThemeRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::ThemeParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Printed page geometry, fed to the `@page` rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageTheme {
    pub size: String,
    pub margin: String,
}

impl Default for PageTheme {
    fn default() -> Self {
        Self {
            size: "A4".to_string(),
            margin: "2cm".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BodyTheme {
    pub font_family: String,
    pub line_height: String,
    pub text_color: String,
    /// Color of `<hr>` separators.
    pub rule_color: String,
}

impl Default for BodyTheme {
    fn default() -> Self {
        Self {
            font_family: "'Arial', sans-serif".to_string(),
            line_height: "1.6".to_string(),
            text_color: "#333".to_string(),
            rule_color: "#667eea".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeadingTheme {
    pub h1_color: String,
    pub h2_color: String,
    pub h3_color: String,
}

impl Default for HeadingTheme {
    fn default() -> Self {
        Self {
            h1_color: "#667eea".to_string(),
            h2_color: "#764ba2".to_string(),
            h3_color: "#555".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CodeTheme {
    pub background: String,
    pub font_family: String,
}

impl Default for CodeTheme {
    fn default() -> Self {
        Self {
            background: "#f4f4f4".to_string(),
            font_family: "'Courier New', monospace".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TableTheme {
    pub header_background: String,
    pub header_text: String,
    pub border_color: String,
    pub stripe_background: String,
}

impl Default for TableTheme {
    fn default() -> Self {
        Self {
            header_background: "#667eea".to_string(),
            header_text: "white".to_string(),
            border_color: "#ddd".to_string(),
            stripe_background: "#f9f9f9".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TocTheme {
    pub link_color: String,
    /// When true the outline ends with a page break.
    pub paginate: bool,
}

impl Default for TocTheme {
    fn default() -> Self {
        Self {
            link_color: "#667eea".to_string(),
            paginate: true,
        }
    }
}

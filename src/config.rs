use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::block::TokenClass;
use crate::error::Error;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub code: CodeConfig,
    pub theme: ThemeConfig,
    pub callout: CalloutConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CodeConfig {
    pub background: String,
    pub show_language: bool,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            background: "#f6f8fa".to_string(),
            show_language: true,
        }
    }
}

/// Colours for highlighted code, one per token class.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub comment: String,
    pub string: String,
    pub decorator: String,
    pub number: String,
    pub keyword: String,
    pub boolean: String,
    pub builtin: String,
    pub function: String,
    pub class: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            comment: "#6a737d".to_string(),
            string: "#032f62".to_string(),
            decorator: "#6f42c1".to_string(),
            number: "#005cc5".to_string(),
            keyword: "#d73a49".to_string(),
            boolean: "#005cc5".to_string(),
            builtin: "#e36209".to_string(),
            function: "#6f42c1".to_string(),
            class: "#22863a".to_string(),
        }
    }
}

impl ThemeConfig {
    pub fn color_for(&self, class: TokenClass) -> &str {
        match class {
            TokenClass::Comment => &self.comment,
            TokenClass::String => &self.string,
            TokenClass::Decorator => &self.decorator,
            TokenClass::Number => &self.number,
            TokenClass::Keyword => &self.keyword,
            TokenClass::Boolean => &self.boolean,
            TokenClass::Builtin => &self.builtin,
            TokenClass::Function => &self.function,
            TokenClass::Class => &self.class,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CalloutConfig {
    pub fill: String,
    pub stroke: String,
}

impl Default for CalloutConfig {
    fn default() -> Self {
        Self {
            fill: "#fff8e1".to_string(),
            stroke: "#f0b429".to_string(),
        }
    }
}

impl Config {
    /// The configuration bundled with the crate.
    pub fn compiled_default() -> Self {
        // Validated by build.rs
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found or invalid.
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("using default config, {}: {}", path.display(), e);
                Self::compiled_default()
            }
        }
    }

    /// Load config from a TOML file, failing if it can't be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_matches_struct_defaults() {
        let config = Config::compiled_default();
        let defaults = ThemeConfig::default();
        assert_eq!(config.theme.keyword, defaults.keyword);
        assert_eq!(config.callout.fill, CalloutConfig::default().fill);
        assert!(config.code.show_language);
        assert!(!config.page.numbers);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: Config = toml::from_str("[theme]\nkeyword = \"#ff0000\"\n").unwrap();
        assert_eq!(config.theme.color_for(TokenClass::Keyword), "#ff0000");
        assert_eq!(config.theme.color_for(TokenClass::Comment), "#6a737d");
        assert_eq!(config.code.background, "#f6f8fa");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("/nonexistent/lessonmark.toml"));
        assert_eq!(config.callout.stroke, "#f0b429");
    }

    #[test]
    fn strict_load_reports_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/lessonmark.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}

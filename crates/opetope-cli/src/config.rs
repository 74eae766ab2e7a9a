//! The optional TOML configuration file.
//!
//! ```toml
//! [render]
//! format = "text"        # text | tex | json
//! print_contexts = true
//! ```
//!
//! Command-line flags take precedence over the file.

use crate::cli::RenderArgs;
use opetope_kernel::Style;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Tex,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub format: Format,

    #[serde(flatten)]
    pub style: Style,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, String> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {path}: {e}"))?;
        Self::parse(&raw).map_err(|e| format!("invalid config {path}: {e}"))
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    /// Output format and style after applying command-line overrides.
    pub fn resolve(&self, args: &RenderArgs) -> (Format, Style) {
        let format = if args.json {
            Format::Json
        } else if args.tex {
            Format::Tex
        } else {
            self.render.format
        };
        let style = Style {
            print_contexts: self.render.style.print_contexts && !args.no_contexts,
        };
        (format, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.render.format, Format::Text);
        assert!(config.render.style.print_contexts);
    }

    #[test]
    fn render_section() {
        let config = Config::parse("[render]\nformat = \"json\"\nprint_contexts = false\n").unwrap();
        assert_eq!(config.render.format, Format::Json);
        assert!(!config.render.style.print_contexts);
    }

    #[test]
    fn flags_override_file() {
        let config = Config::parse("[render]\nformat = \"tex\"\n").unwrap();
        let (format, style) = config.resolve(&RenderArgs::default());
        assert_eq!(format, Format::Tex);
        assert!(style.print_contexts);

        let args = RenderArgs {
            json: true,
            no_contexts: true,
            ..RenderArgs::default()
        };
        let (format, style) = config.resolve(&args);
        assert_eq!(format, Format::Json);
        assert!(!style.print_contexts);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Config::parse("[render]\nformat = \"pdf\"\n").is_err());
        assert!(Config::parse("[output]\nformat = \"text\"\n").is_err());
    }
}

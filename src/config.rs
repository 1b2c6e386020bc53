use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CDN host targeted when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://img-cdn-cmore.b17g.services/";

/// File extension of the generated image path: "img" (default) or "jpg".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Img,
    Jpg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Img => "img",
            OutputFormat::Jpg => "jpg",
        }
    }
}

/// Converter configuration, typically read from a small TOML file.
///
/// ```toml
/// base_url = "https://example.com/images/"
/// output_format = "jpg"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Destination base URL. `None` targets [`DEFAULT_BASE_URL`]; an explicitly
    /// empty value makes every build fail with `MissingBaseUrl`.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Extension appended to the format id.
    #[serde(default)]
    pub output_format: OutputFormat,
}

impl ConverterConfig {
    pub fn from_toml_str(data: &str) -> Result<Self> {
        toml::from_str(data).context("invalid converter config")
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg = Self::from_toml_str(&data)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!("loaded converter config from {}", path.display());
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ConverterConfig::default();
        assert_eq!(cfg.base_url, None);
        assert_eq!(cfg.output_format, OutputFormat::Img);
    }

    #[test]
    fn extensions() {
        assert_eq!(OutputFormat::Img.extension(), "img");
        assert_eq!(OutputFormat::Jpg.extension(), "jpg");
    }

    #[test]
    fn config_toml_empty_uses_defaults() {
        let cfg = ConverterConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ConverterConfig::default());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            base_url = "https://example.com/foo"
            output_format = "jpg"
        "#;
        let cfg = ConverterConfig::from_toml_str(toml).unwrap();
        assert_eq!(cfg.base_url.as_deref(), Some("https://example.com/foo"));
        assert_eq!(cfg.output_format, OutputFormat::Jpg);
    }

    #[test]
    fn config_toml_unknown_format_rejected() {
        assert!(ConverterConfig::from_toml_str("output_format = \"png\"").is_err());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ConverterConfig {
            base_url: Some("https://example.com/".to_string()),
            output_format: OutputFormat::Jpg,
        };
        let toml = cfg.to_toml_string().unwrap();
        assert_eq!(ConverterConfig::from_toml_str(&toml).unwrap(), cfg);
    }
}

//! Configuration module for breadcrumb building
//!
//! This module provides the construction-time options of the builder and
//! renderer, and the site config file that bundles them with a module
//! registry definition.

use crate::registry::{ModuleRegistry, RegistryDefinition};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported config file extension: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Options for the home node, fallbacks, segment filtering and rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadcrumbOptions {
    /// Display text of the home node
    pub home_text: String,

    /// Target of the home node
    pub home_url: String,

    /// Icon of the home node
    pub home_icon: String,

    /// Visual joiner between rendered nodes
    pub separator: String,

    /// Selector of the mount point
    pub container_selector: String,

    /// Project/root directory names dropped from every path
    pub noise_dirs: Vec<String>,

    /// Icon for modules without a registry entry
    pub default_module_icon: String,

    /// Icon for pages without a registry entry or icon
    pub default_page_icon: String,
}

impl Default for BreadcrumbOptions {
    fn default() -> Self {
        Self {
            home_text: "Home".to_string(),
            home_url: "../index.html".to_string(),
            home_icon: "🏠".to_string(),
            separator: "›".to_string(),
            container_selector: ".breadcrumb-container".to_string(),
            noise_dirs: vec![
                "a_hr_project".to_string(),
                "hr_project".to_string(),
                "project".to_string(),
            ],
            default_module_icon: "📁".to_string(),
            default_page_icon: "📄".to_string(),
        }
    }
}

impl BreadcrumbOptions {
    /// Set home text (builder pattern)
    pub fn with_home_text(mut self, text: impl Into<String>) -> Self {
        self.home_text = text.into();
        self
    }

    /// Set home url (builder pattern)
    pub fn with_home_url(mut self, url: impl Into<String>) -> Self {
        self.home_url = url.into();
        self
    }

    /// Set home icon (builder pattern)
    pub fn with_home_icon(mut self, icon: impl Into<String>) -> Self {
        self.home_icon = icon.into();
        self
    }

    /// Set separator (builder pattern)
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set container selector (builder pattern)
    pub fn with_container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = selector.into();
        self
    }

    /// Replace the noise directory list (builder pattern)
    pub fn with_noise_dirs(mut self, dirs: Vec<String>) -> Self {
        self.noise_dirs = dirs;
        self
    }

    /// Check if a segment is a project/root directory name
    pub fn is_noise_dir(&self, segment: &str) -> bool {
        self.noise_dirs.iter().any(|dir| dir == segment)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.home_text.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "home_text must not be empty".to_string(),
            ));
        }
        if self.container_selector.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "container_selector must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Site config file: breadcrumb options plus an optional registry.
///
/// ```toml
/// [breadcrumb]
/// home_text = "首页"
///
/// [registry]
/// page_extensions = ["html"]
///
/// [[registry.modules]]
/// id = "Docs"
/// name = "Documentation"
/// icon = "📘"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub breadcrumb: BreadcrumbOptions,

    /// None = built-in registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<RegistryDefinition>,
}

impl SiteConfig {
    /// Load a config file, format chosen by extension (toml, yaml/yml, json)
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let config: SiteConfig = match ext.as_str() {
            "toml" => toml::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        config.breadcrumb.validate()?;
        tracing::debug!(
            path = %path.display(),
            custom_registry = config.registry.is_some(),
            "loaded site config"
        );

        Ok(config)
    }

    /// Parse a TOML config
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        config.breadcrumb.validate()?;
        Ok(config)
    }

    /// Split into options and a ready registry
    pub fn into_parts(self) -> Result<(BreadcrumbOptions, Arc<ModuleRegistry>), ConfigError> {
        let registry = match self.registry {
            Some(definition) => Arc::new(ModuleRegistry::from_definition(definition)?),
            None => ModuleRegistry::builtin(),
        };
        Ok((self.breadcrumb, registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_default_options() {
        let options = BreadcrumbOptions::default();
        assert_eq!(options.home_text, "Home");
        assert_eq!(options.home_url, "../index.html");
        assert!(options.is_noise_dir("hr_project"));
        assert!(!options.is_noise_dir("Zwgl"));
    }

    #[test]
    fn test_options_builder() {
        let options = BreadcrumbOptions::default()
            .with_home_text("首页")
            .with_separator("/")
            .with_noise_dirs(vec!["site".to_string()]);

        assert_eq!(options.home_text, "首页");
        assert_eq!(options.separator, "/");
        assert!(options.is_noise_dir("site"));
        assert!(!options.is_noise_dir("project"));
    }

    #[test]
    fn test_toml_partial_options() {
        let config = SiteConfig::from_toml_str(
            r#"
[breadcrumb]
home_text = "首页"
"#,
        )
        .unwrap();

        assert_eq!(config.breadcrumb.home_text, "首页");
        assert_eq!(config.breadcrumb.home_icon, "🏠");
        assert!(config.registry.is_none());

        let (_, registry) = config.into_parts().unwrap();
        assert!(registry.is_module_identifier("Zwgl"));
    }

    #[test]
    fn test_toml_custom_registry() {
        let config = SiteConfig::from_toml_str(
            r#"
[registry]
page_extensions = ["html"]

[[registry.modules]]
id = "Docs"
name = "Documentation"
icon = "📘"

[[registry.modules.pages]]
id = "Docs-intro"
name = "Introduction"
"#,
        )
        .unwrap();

        let (_, registry) = config.into_parts().unwrap();
        assert!(registry.is_module_identifier("Docs"));
        assert!(!registry.is_module_identifier("Zwgl"));
        assert_eq!(registry.lookup_page("Docs-intro").unwrap().name, "Introduction");
        assert!(!registry.is_page_token("Docs.htm"));
    }

    #[test]
    fn test_rejects_empty_home_text() {
        let err = SiteConfig::from_toml_str("[breadcrumb]\nhome_text = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "breadcrumb:\n  home_url: /index.html\nregistry:\n  modules:\n    - id: Ops\n      name: Operations\n      icon: \"⚙\""
        )
        .unwrap();

        let config = SiteConfig::from_file(file.path()).unwrap();
        assert_eq!(config.breadcrumb.home_url, "/index.html");

        let (_, registry) = config.into_parts().unwrap();
        assert!(registry.is_module_identifier("Ops"));
        assert!(registry.is_page_token("Ops.htm"));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = Builder::new().suffix(".ini").tempfile().unwrap();
        let err = SiteConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}

//! Module registry
//!
//! Immutable lookup tables for the modules of a site, their pages, display
//! names and icons. A registry is built once, either from the built-in HR
//! site table or from a [`RegistryDefinition`] loaded with the site config,
//! and shared behind an `Arc`. Lookups never fail: absent keys yield `None`.

use crate::config::ConfigError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A page inside a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// `<module>-<suffix>`, e.g. `Zjgl-page2`
    pub id: String,

    /// Display name
    pub name: String,

    /// Icon glyph (None = generic page icon)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A top-level functional area of the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Short code, also the module directory and its landing page name
    pub id: String,

    /// Display name
    pub name: String,

    /// Icon glyph
    pub icon: String,

    /// Known sub-pages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<PageDescriptor>,
}

/// Serializable form of a registry, as found in a site config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDefinition {
    /// Extensions that mark a path segment as a page file, without the dot
    #[serde(default = "default_page_extensions")]
    pub page_extensions: Vec<String>,

    /// Registered modules
    #[serde(default)]
    pub modules: Vec<ModuleDescriptor>,
}

fn default_page_extensions() -> Vec<String> {
    vec!["html".to_string(), "htm".to_string()]
}

/// Immutable module and page lookup tables
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
    module_index: HashMap<String, usize>,
    page_index: HashMap<String, (usize, usize)>,
    extension_markers: Vec<String>,
}

static BUILTIN: Lazy<Arc<ModuleRegistry>> =
    Lazy::new(|| Arc::new(ModuleRegistry::index(builtin_definition())));

impl ModuleRegistry {
    /// Shared registry of the built-in HR site
    pub fn builtin() -> Arc<ModuleRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// Validate a definition and build the lookup tables
    pub fn from_definition(definition: RegistryDefinition) -> Result<Self, ConfigError> {
        validate(&definition)?;
        Ok(Self::index(definition))
    }

    fn index(definition: RegistryDefinition) -> Self {
        let mut module_index = HashMap::new();
        let mut page_index = HashMap::new();

        for (module_idx, module) in definition.modules.iter().enumerate() {
            module_index.insert(module.id.clone(), module_idx);
            for (page_idx, page) in module.pages.iter().enumerate() {
                page_index.insert(page.id.clone(), (module_idx, page_idx));
            }
        }

        let extension_markers = definition
            .page_extensions
            .iter()
            .map(|ext| format!(".{}", ext.trim_start_matches('.')))
            .collect();

        Self {
            modules: definition.modules,
            module_index,
            page_index,
            extension_markers,
        }
    }

    pub fn lookup_module(&self, id: &str) -> Option<&ModuleDescriptor> {
        self.module_index.get(id).map(|&idx| &self.modules[idx])
    }

    pub fn lookup_page(&self, id: &str) -> Option<&PageDescriptor> {
        self.page_index
            .get(id)
            .map(|&(module_idx, page_idx)| &self.modules[module_idx].pages[page_idx])
    }

    /// Check if a token is exactly a registered module code
    pub fn is_module_identifier(&self, token: &str) -> bool {
        self.module_index.contains_key(token)
    }

    /// Check if a token contains a page-file extension marker (`.html`, `.htm`, ...)
    pub fn is_page_token(&self, token: &str) -> bool {
        self.matched_extension(token).is_some()
    }

    /// Registered extension whose marker the token contains, without the dot.
    /// The longest marker wins, so `a.html` is `html` even when `htm` is listed first.
    pub fn matched_extension(&self, token: &str) -> Option<&str> {
        self.extension_markers
            .iter()
            .filter(|marker| token.contains(marker.as_str()))
            .max_by_key(|marker| marker.len())
            .map(|marker| &marker[1..])
    }

    /// Check if a file identifier is a module's own landing page
    pub fn is_module_home_page(&self, file_id: &str) -> bool {
        self.is_module_identifier(file_id)
    }

    /// Registered modules, in definition order
    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    /// Page extensions, without the leading dot
    pub fn page_extensions(&self) -> Vec<&str> {
        self.extension_markers
            .iter()
            .map(|marker| &marker[1..])
            .collect()
    }

    /// Convert back to the serializable form
    pub fn to_definition(&self) -> RegistryDefinition {
        RegistryDefinition {
            page_extensions: self.page_extensions().into_iter().map(String::from).collect(),
            modules: self.modules.clone(),
        }
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::index(builtin_definition())
    }
}

fn validate(definition: &RegistryDefinition) -> Result<(), ConfigError> {
    if definition.page_extensions.is_empty() {
        return Err(ConfigError::InvalidConfig(
            "at least one page extension is required".to_string(),
        ));
    }
    if let Some(ext) = definition
        .page_extensions
        .iter()
        .find(|ext| ext.trim_start_matches('.').is_empty())
    {
        return Err(ConfigError::InvalidConfig(format!(
            "empty page extension: {:?}",
            ext
        )));
    }

    let mut module_ids = HashSet::new();
    let mut page_ids = HashSet::new();

    for module in &definition.modules {
        if module.id.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "module id must not be empty".to_string(),
            ));
        }
        if module.id.contains(['/', '.', '-']) {
            return Err(ConfigError::InvalidConfig(format!(
                "module id {:?} must not contain '/', '.' or '-'",
                module.id
            )));
        }
        if !module_ids.insert(module.id.as_str()) {
            return Err(ConfigError::InvalidConfig(format!(
                "duplicate module id: {}",
                module.id
            )));
        }

        let prefix = format!("{}-", module.id);
        for page in &module.pages {
            if !page.id.starts_with(&prefix) || page.id.len() == prefix.len() {
                return Err(ConfigError::InvalidConfig(format!(
                    "page id {:?} must look like {}<suffix>",
                    page.id, prefix
                )));
            }
            if !page_ids.insert(page.id.as_str()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "duplicate page id: {}",
                    page.id
                )));
            }
        }
    }

    Ok(())
}

fn page(id: &str, name: &str, icon: Option<&str>) -> PageDescriptor {
    PageDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.map(String::from),
    }
}

fn module(id: &str, name: &str, icon: &str, pages: Vec<PageDescriptor>) -> ModuleDescriptor {
    ModuleDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        pages,
    }
}

/// The deployed HR site: position, grade, certification, talent, training
/// and performance management.
fn builtin_definition() -> RegistryDefinition {
    RegistryDefinition {
        page_extensions: default_page_extensions(),
        modules: vec![
            module(
                "Zwgl",
                "职位管理",
                "💼",
                vec![
                    page("Zwgl-page1", "职位竞聘流程", Some("🎯")),
                    page("Zwgl-page2", "职位调整流程", Some("🔄")),
                    page("Zwgl-page3", "试岗考评", Some("📋")),
                ],
            ),
            module(
                "Zjgl",
                "职级管理",
                "⭐",
                vec![
                    page("Zjgl-page1", "聘任后个人职级的套入", Some("📈")),
                    page("Zjgl-page2", "标准化职级晋升", Some("⚙️")),
                    page("Zjgl-page3", "大带宽职级晋升", Some("🔄")),
                ],
            ),
            module(
                "Rzgl",
                "认证管理",
                "🔐",
                vec![
                    page("Rzgl-page1", "认证报名", Some("📝")),
                    page("Rzgl-page2", "组织开始", Some("🚀")),
                    page("Rzgl-page3", "认证成绩", Some("📊")),
                ],
            ),
            module(
                "Rcgl",
                "人才管理",
                "👥",
                vec![
                    page("Rcgl-page1", "人才选聘", Some("👥")),
                    page("Rcgl-page2", "履职管理", Some("📋")),
                ],
            ),
            module(
                "Pxgl",
                "培训管理",
                "📚",
                vec![
                    page("Pxgl-page1", "制定计划", Some("📅")),
                    page("Pxgl-page2", "培训开展", Some("🎓")),
                    page("Pxgl-page3", "需求收集", Some("📊")),
                    page("Pxgl-page4", "内训开展", Some("📁")),
                ],
            ),
            module("Jxgl", "绩效管理", "📊", Vec::new()),
        ],
    }
}

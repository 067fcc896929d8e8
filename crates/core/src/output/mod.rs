//! Output formatting module
//!
//! This module provides formatters for JSON, YAML, HTML, ANSI and plain-text
//! output of trails, segments, registries and site scans.

pub mod ansi;
pub mod html;
mod json;
mod yaml;

pub use ansi::{format_registry_ansi, format_site_map_ansi, format_trail_ansi};
pub use html::render_html;
pub use json::format_json;
pub use yaml::format_yaml;

use crate::models::{BreadcrumbTrail, SiteMap};
use crate::registry::ModuleRegistry;
use crate::segment::{Segment, SegmentKind};
use thiserror::Error;

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Format {0:?} is not available for {1}")]
    Unsupported(OutputFormat, &'static str),
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format
    #[default]
    Json,
    /// YAML format
    Yaml,
    /// ANSI colored text
    Ansi,
    /// Breadcrumb markup
    Html,
    /// Plain text summary
    Summary,
}

/// Format a single trail
pub fn format_trail(
    trail: &BreadcrumbTrail,
    format: OutputFormat,
    separator: &str,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(trail),
        OutputFormat::Yaml => format_yaml(trail),
        OutputFormat::Ansi => Ok(format_trail_ansi(trail, separator)),
        OutputFormat::Html => Ok(render_html(trail, separator)),
        OutputFormat::Summary => Ok(trail.path(separator)),
    }
}

/// Format classified path segments
pub fn format_segments(segments: &[Segment], format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(&segments),
        OutputFormat::Yaml => format_yaml(&segments),
        OutputFormat::Ansi | OutputFormat::Summary => Ok(format_segments_summary(segments)),
        OutputFormat::Html => Err(FormatError::Unsupported(format, "segments")),
    }
}

/// Format the module registry
pub fn format_registry(registry: &ModuleRegistry, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(&registry.to_definition()),
        OutputFormat::Yaml => format_yaml(&registry.to_definition()),
        OutputFormat::Ansi => Ok(format_registry_ansi(registry)),
        OutputFormat::Summary => Ok(format_registry_summary(registry)),
        OutputFormat::Html => Err(FormatError::Unsupported(format, "the registry")),
    }
}

/// Format a site scan report
pub fn format_site_map(
    data: &SiteMap,
    format: OutputFormat,
    separator: &str,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(data),
        OutputFormat::Yaml => format_yaml(data),
        OutputFormat::Ansi => Ok(format_site_map_ansi(data, separator)),
        OutputFormat::Summary => Ok(format_site_summary(data)),
        OutputFormat::Html => Err(FormatError::Unsupported(format, "site scans")),
    }
}

fn format_segments_summary(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return "(no relevant segments)\n".to_string();
    }

    let mut output = String::new();
    for (idx, segment) in segments.iter().enumerate() {
        let kind = match &segment.kind {
            SegmentKind::Module { code } => format!("module {}", code),
            SegmentKind::Page {
                file_id, extension, ..
            } => format!("page {} (.{})", file_id, extension),
            SegmentKind::Other => "other".to_string(),
        };
        output.push_str(&format!("{}. {} -> {}\n", idx + 1, segment.raw, kind));
    }
    output
}

fn format_registry_summary(registry: &ModuleRegistry) -> String {
    let mut output = String::new();

    output.push_str("Module Registry\n");
    output.push_str("===============\n\n");
    output.push_str(&format!(
        "Page extensions: {}\n\n",
        registry.page_extensions().join(", ")
    ));

    for module in registry.modules() {
        output.push_str(&format!("{} {} ({})\n", module.icon, module.name, module.id));
        for page in &module.pages {
            output.push_str(&format!(
                "  {} {} ({})\n",
                page.icon.as_deref().unwrap_or("-"),
                page.name,
                page.id
            ));
        }
    }

    output
}

/// Format as plain text summary
fn format_site_summary(data: &SiteMap) -> String {
    let mut output = String::new();

    output.push_str("Site Breadcrumb Scan\n");
    output.push_str("====================\n\n");
    output.push_str(&format!("Root: {}\n", data.root.display()));
    output.push_str(&format!("Total Pages: {}\n", data.stats.total_pages));
    output.push_str(&format!("  Module home pages: {}\n", data.stats.module_home_pages));
    output.push_str(&format!("  Sub-pages: {}\n", data.stats.sub_pages));
    output.push_str(&format!("  Home only: {}\n", data.stats.home_only_pages));

    if data.stats.unregistered_pages > 0 {
        output.push_str(&format!(
            "\nUnregistered sub-pages: {}\n",
            data.stats.unregistered_pages
        ));
        for entry in data.pages.iter().filter(|e| !e.registered) {
            output.push_str(&format!("  {}\n", entry.url_path));
        }
    }

    output.push_str(&format!("\nScan Duration: {}ms\n", data.metadata.scan_duration_ms));

    output
}

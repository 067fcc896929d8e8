//! ANSI colored output formatter
//!
//! This module provides colorful terminal output for trails, the registry
//! and site scans.

use crate::models::{BreadcrumbTrail, NodeKind, SiteMap};
use crate::registry::ModuleRegistry;
use colored::{Color, Colorize};

/// Get color for node kind
fn node_kind_color(kind: NodeKind) -> Color {
    match kind {
        NodeKind::Home => Color::BrightBlue,
        NodeKind::Module => Color::BrightYellow,
        NodeKind::Page => Color::BrightCyan,
    }
}

/// Format a trail as a single colored line
pub fn format_trail_ansi(trail: &BreadcrumbTrail, separator: &str) -> String {
    let joiner = format!(" {} ", separator.dimmed());

    trail
        .iter()
        .map(|node| {
            let label = format!("{} {}", node.icon, node.display_text)
                .color(node_kind_color(node.kind));
            if node.is_active {
                label.bold().underline().to_string()
            } else {
                label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(&joiner)
}

/// Format the registry as a colored tree
pub fn format_registry_ansi(registry: &ModuleRegistry) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{}\n\n", "  Module Registry  ".bold().on_blue()));

    for module in registry.modules() {
        output.push_str(&format!(
            "{} {} {}\n",
            module.icon,
            module.name.bold().color(node_kind_color(NodeKind::Module)),
            format!("({})", module.id).dimmed()
        ));
        for page in &module.pages {
            output.push_str(&format!(
                "   {} {} {}\n",
                page.icon.as_deref().unwrap_or("•"),
                page.name.color(node_kind_color(NodeKind::Page)),
                format!("({})", page.id).dimmed()
            ));
        }
    }

    output
}

/// Format a site scan with one trail per page
pub fn format_site_map_ansi(data: &SiteMap, separator: &str) -> String {
    let mut output = String::new();

    // Header
    output.push_str(&format!("\n{}\n\n", "  Site Breadcrumb Scan  ".bold().on_blue()));
    output.push_str(&format!("{} {}\n", "Root:".bold(), data.root.display()));
    output.push_str(&format!(
        "{} {}  {} {}  {} {}  {} {}\n\n",
        "Pages:".bold(),
        data.stats.total_pages,
        "Module homes:".bold(),
        data.stats.module_home_pages,
        "Sub-pages:".bold(),
        data.stats.sub_pages,
        "Home only:".bold(),
        data.stats.home_only_pages
    ));

    for entry in &data.pages {
        let marker = if entry.registered {
            String::new()
        } else {
            format!(" {}", "⚠ unregistered".bright_red())
        };
        output.push_str(&format!("{}{}\n", entry.url_path.bold(), marker));
        output.push_str(&format!("   {}\n", format_trail_ansi(&entry.trail, separator)));
    }

    // Footer
    output.push_str(&format!(
        "\n{}\n",
        format!("Scan completed in {}ms", data.metadata.scan_duration_ms).dimmed()
    ));

    output
}

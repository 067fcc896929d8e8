//! Data models for breadcrumb navigation
//!
//! This module defines the breadcrumb nodes and trails produced by the
//! builder, and the report structures produced by a site scan.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of a step in the breadcrumb trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Home,
    Module,
    Page,
}

impl NodeKind {
    /// Get the label used in markup class names and summaries
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Home => "home",
            NodeKind::Module => "module",
            NodeKind::Page => "page",
        }
    }
}

/// A single rendered step of the navigation trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbNode {
    /// Human-readable label
    pub display_text: String,

    /// Link target, relative to the current page
    pub target_url: String,

    /// Icon glyph
    pub icon: String,

    /// Kind of step
    pub kind: NodeKind,

    /// Whether this is the current location
    pub is_active: bool,
}

impl BreadcrumbNode {
    /// Create an inactive node
    pub fn new(
        kind: NodeKind,
        display_text: impl Into<String>,
        target_url: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            display_text: display_text.into(),
            target_url: target_url.into(),
            icon: icon.into(),
            kind,
            is_active: false,
        }
    }
}

/// Shape of a trail, derived from its length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailShape {
    /// Home only
    HomeOnly,
    /// Home > Module, the module's own landing page
    ModuleHome,
    /// Home > Module > Page
    SubPage,
}

/// An ordered breadcrumb trail.
///
/// Always starts with exactly one home node and holds one to three nodes.
/// The last node is the only active one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbTrail {
    nodes: Vec<BreadcrumbNode>,
}

impl BreadcrumbTrail {
    /// Trail holding only the home node, which becomes active
    pub fn home_only(home: BreadcrumbNode) -> Self {
        Self::from_parts(home, Vec::new())
    }

    /// Home node followed by the module node
    pub fn module_home(home: BreadcrumbNode, module: BreadcrumbNode) -> Self {
        Self::from_parts(home, vec![module])
    }

    /// Home node followed by the module and page nodes
    pub fn sub_page(home: BreadcrumbNode, module: BreadcrumbNode, page: BreadcrumbNode) -> Self {
        Self::from_parts(home, vec![module, page])
    }

    fn from_parts(home: BreadcrumbNode, rest: Vec<BreadcrumbNode>) -> Self {
        let mut nodes = Vec::with_capacity(1 + rest.len());
        nodes.push(home);
        nodes.extend(rest);

        let last = nodes.len() - 1;
        for (idx, node) in nodes.iter_mut().enumerate() {
            node.is_active = idx == last;
        }

        Self { nodes }
    }

    /// All nodes, home first
    pub fn nodes(&self) -> &[BreadcrumbNode] {
        &self.nodes
    }

    /// Number of nodes (1 to 3)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, a trail holds at least the home node
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The home node
    pub fn home(&self) -> &BreadcrumbNode {
        &self.nodes[0]
    }

    /// The active (last) node
    pub fn active(&self) -> &BreadcrumbNode {
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn shape(&self) -> TrailShape {
        match self.nodes.len() {
            1 => TrailShape::HomeOnly,
            2 => TrailShape::ModuleHome,
            _ => TrailShape::SubPage,
        }
    }

    /// Get the formatted path string
    pub fn path(&self, separator: &str) -> String {
        self.nodes
            .iter()
            .map(|n| n.display_text.as_str())
            .collect::<Vec<_>>()
            .join(&format!(" {} ", separator))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BreadcrumbNode> {
        self.nodes.iter()
    }
}

impl<'a> IntoIterator for &'a BreadcrumbTrail {
    type Item = &'a BreadcrumbNode;
    type IntoIter = std::slice::Iter<'a, BreadcrumbNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Trail computed for one page file of a site scan
#[derive(Debug, Clone, Serialize)]
pub struct PageEntry {
    /// Path of the page file, relative to the site root
    pub path: PathBuf,

    /// URL path the page is served under
    pub url_path: String,

    /// Whether the page identifier has a registry entry
    pub registered: bool,

    /// Trail derived from the URL path
    pub trail: BreadcrumbTrail,
}

/// Summary statistics for a site scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteStats {
    /// Total page files found
    pub total_pages: usize,

    /// Pages that are a module's landing page
    pub module_home_pages: usize,

    /// Pages inside a module
    pub sub_pages: usize,

    /// Pages whose trail degraded to Home only
    pub home_only_pages: usize,

    /// Sub-pages without a registry entry
    pub unregistered_pages: usize,
}

/// Metadata about the scan operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    /// Duration of scan in milliseconds
    pub scan_duration_ms: u64,

    /// ISO timestamp of scan
    pub timestamp: String,

    /// Tool version
    pub tool_version: String,
}

/// Report of a site scan
#[derive(Debug, Clone, Serialize)]
pub struct SiteMap {
    /// Site root directory
    pub root: PathBuf,

    /// One entry per page file, sorted by URL path
    pub pages: Vec<PageEntry>,

    /// Summary statistics
    pub stats: SiteStats,

    /// Scan metadata
    pub metadata: ScanMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> BreadcrumbNode {
        BreadcrumbNode::new(NodeKind::Home, "Home", "../index.html", "🏠")
    }

    #[test]
    fn test_home_only_is_active() {
        let trail = BreadcrumbTrail::home_only(home());
        assert_eq!(trail.len(), 1);
        assert!(trail.home().is_active);
        assert_eq!(trail.shape(), TrailShape::HomeOnly);
    }

    #[test]
    fn test_active_moves_to_last_node() {
        let mut module = BreadcrumbNode::new(NodeKind::Module, "Zjgl", "Zjgl.html", "⭐");
        module.is_active = true;
        let page = BreadcrumbNode::new(NodeKind::Page, "Zjgl-page1", "Zjgl-page1.html", "📄");

        let trail = BreadcrumbTrail::sub_page(home(), module, page);

        let active: Vec<bool> = trail.iter().map(|n| n.is_active).collect();
        assert_eq!(active, vec![false, false, true]);
        assert_eq!(trail.shape(), TrailShape::SubPage);
    }

    #[test]
    fn test_path_joins_display_text() {
        let module = BreadcrumbNode::new(NodeKind::Module, "Zjgl", "Zjgl.html", "⭐");
        let trail = BreadcrumbTrail::module_home(home(), module);
        assert_eq!(trail.path(">"), "Home > Zjgl");
    }

    #[test]
    fn test_node_serializes_camel_case() {
        let json = serde_json::to_string(&home()).unwrap();
        assert!(json.contains("\"displayText\":\"Home\""));
        assert!(json.contains("\"targetUrl\":\"../index.html\""));
        assert!(json.contains("\"isActive\":false"));
        assert!(json.contains("\"kind\":\"home\""));
    }
}

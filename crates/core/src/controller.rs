//! Breadcrumb controller
//!
//! A thin adapter that owns the only mutable state of the system: the
//! rendered container. It reads the current location from a [`Location`],
//! asks the builder for a trail and writes markup into a [`Document`]. All
//! decision logic stays in the builder.

use crate::builder::BreadcrumbBuilder;
use crate::models::BreadcrumbTrail;
use crate::output::render_html;
use crate::segment::pathname_of;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cell::RefCell;
use std::rc::Rc;

/// Host document the breadcrumb container lives in
pub trait Document {
    /// Check if a container matching `selector` exists
    fn has_container(&self, selector: &str) -> bool;

    /// Create an empty container matching `selector`
    fn create_container(&mut self, selector: &str);

    /// Replace container contents; false if the container does not exist
    fn set_container_html(&mut self, selector: &str, html: &str) -> bool;

    /// Remove the container, if present
    fn remove_container(&mut self, selector: &str);
}

/// Source of the current URL path
pub trait Location {
    fn pathname(&self) -> String;
}

impl Location for String {
    fn pathname(&self) -> String {
        pathname_of(self)
    }
}

impl Location for &str {
    fn pathname(&self) -> String {
        pathname_of(self)
    }
}

/// Shared location a host updates between navigation events
impl Location for Rc<RefCell<String>> {
    fn pathname(&self) -> String {
        pathname_of(&self.borrow())
    }
}

static MODULE_DIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/[A-Z][a-z]{3}/").expect("module directory pattern is valid"));

/// Page-load gate: only pages under a `/Xxxx/` module directory get a
/// breadcrumb mounted automatically.
pub fn should_auto_mount(pathname: &str) -> bool {
    MODULE_DIR.is_match(pathname)
}

/// Mounts, refreshes and removes the breadcrumb container
pub struct BreadcrumbController<D: Document, L: Location> {
    builder: BreadcrumbBuilder,
    document: D,
    location: L,
}

impl<D: Document, L: Location> BreadcrumbController<D, L> {
    pub fn new(builder: BreadcrumbBuilder, document: D, location: L) -> Self {
        Self {
            builder,
            document,
            location,
        }
    }

    fn selector(&self) -> &str {
        &self.builder.options().container_selector
    }

    /// Create the container if absent, then render the current location
    pub fn mount(&mut self) -> Option<BreadcrumbTrail> {
        if !self.document.has_container(self.selector()) {
            let selector = self.selector().to_string();
            self.document.create_container(&selector);
            tracing::debug!(selector = %selector, "created breadcrumb container");
        }
        self.update()
    }

    /// Rebuild from the current location and replace the container contents.
    ///
    /// Returns None when no container is mounted.
    pub fn update(&mut self) -> Option<BreadcrumbTrail> {
        let pathname = self.location.pathname();
        let trail = self.builder.build_from_path(&pathname);
        self.render(&trail).then_some(trail)
    }

    /// History navigation (back/forward) hook
    pub fn on_history_change(&mut self) -> Option<BreadcrumbTrail> {
        self.update()
    }

    /// Render a caller-supplied trail instead of the derived one
    pub fn set_breadcrumb(&mut self, trail: &BreadcrumbTrail) -> bool {
        self.render(trail)
    }

    /// Remove the container
    pub fn destroy(&mut self) {
        let selector = self.selector().to_string();
        self.document.remove_container(&selector);
    }

    fn render(&mut self, trail: &BreadcrumbTrail) -> bool {
        let html = render_html(trail, &self.builder.options().separator);
        let selector = self.builder.options().container_selector.clone();
        let rendered = self.document.set_container_html(&selector, &html);
        if !rendered {
            tracing::warn!(selector = %selector, "breadcrumb container missing, nothing rendered");
        }
        rendered
    }

    pub fn builder(&self) -> &BreadcrumbBuilder {
        &self.builder
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn into_document(self) -> D {
        self.document
    }
}

/// A container in a [`MemoryDocument`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub selector: String,
    pub html: String,
}

/// In-memory document, for the CLI and for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    containers: Vec<Container>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container_html(&self, selector: &str) -> Option<&str> {
        self.containers
            .iter()
            .find(|c| c.selector == selector)
            .map(|c| c.html.as_str())
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }
}

impl Document for MemoryDocument {
    fn has_container(&self, selector: &str) -> bool {
        self.containers.iter().any(|c| c.selector == selector)
    }

    fn create_container(&mut self, selector: &str) {
        self.containers.push(Container {
            selector: selector.to_string(),
            html: String::new(),
        });
    }

    fn set_container_html(&mut self, selector: &str, html: &str) -> bool {
        match self.containers.iter_mut().find(|c| c.selector == selector) {
            Some(container) => {
                container.html = html.to_string();
                true
            }
            None => false,
        }
    }

    fn remove_container(&mut self, selector: &str) {
        self.containers.retain(|c| c.selector != selector);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BreadcrumbOptions;
    use crate::models::{BreadcrumbNode, NodeKind};
    use crate::registry::ModuleRegistry;

    const SELECTOR: &str = ".breadcrumb-container";

    fn builder() -> BreadcrumbBuilder {
        BreadcrumbBuilder::new(ModuleRegistry::builtin(), BreadcrumbOptions::default())
    }

    #[test]
    fn test_mount_creates_container_once() {
        let mut controller =
            BreadcrumbController::new(builder(), MemoryDocument::new(), "/Zwgl/Zwgl.html");

        controller.mount();
        controller.mount();

        assert_eq!(controller.document().container_count(), 1);
        let html = controller.document().container_html(SELECTOR).unwrap();
        assert!(html.contains("职位管理"));
    }

    #[test]
    fn test_update_is_byte_identical() {
        let mut controller =
            BreadcrumbController::new(builder(), MemoryDocument::new(), "/Zjgl/Zjgl-page1.html");

        controller.mount();
        let first = controller.document().container_html(SELECTOR).unwrap().to_string();
        controller.update();
        controller.update();
        let second = controller.document().container_html(SELECTOR).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_history_change_rederives_from_current_location() {
        let location = Rc::new(RefCell::new("/Zjgl/Zjgl-page1.html".to_string()));
        let mut controller =
            BreadcrumbController::new(builder(), MemoryDocument::new(), Rc::clone(&location));

        let trail = controller.mount().unwrap();
        assert_eq!(trail.len(), 3);

        *location.borrow_mut() = "/Zjgl/Zjgl.html".to_string();
        let trail = controller.on_history_change().unwrap();
        assert_eq!(trail.len(), 2);

        let html = controller.document().container_html(SELECTOR).unwrap();
        assert!(!html.contains("聘任后个人职级的套入"));
        assert!(html.contains("职级管理"));
    }

    #[test]
    fn test_update_without_container_renders_nothing() {
        let mut controller =
            BreadcrumbController::new(builder(), MemoryDocument::new(), "/Zjgl/Zjgl.html");

        assert!(controller.update().is_none());
        assert_eq!(controller.document().container_count(), 0);
    }

    #[test]
    fn test_existing_container_is_reused() {
        let mut document = MemoryDocument::new();
        document.create_container(SELECTOR);

        let mut controller = BreadcrumbController::new(builder(), document, "/Pxgl/Pxgl.html");
        controller.mount();

        assert_eq!(controller.document().container_count(), 1);
    }

    #[test]
    fn test_set_breadcrumb_and_destroy() {
        let mut controller =
            BreadcrumbController::new(builder(), MemoryDocument::new(), "/Zwgl/Zwgl.html");
        controller.mount();

        let manual = BreadcrumbTrail::home_only(BreadcrumbNode::new(
            NodeKind::Home,
            "Portal",
            "/",
            "🏠",
        ));
        assert!(controller.set_breadcrumb(&manual));
        let html = controller.document().container_html(SELECTOR).unwrap();
        assert!(html.contains("Portal"));
        assert!(!html.contains("职位管理"));

        controller.destroy();
        assert_eq!(controller.document().container_count(), 0);
        assert!(!controller.set_breadcrumb(&manual));
    }

    #[test]
    fn test_full_url_location() {
        let mut controller = BreadcrumbController::new(
            builder(),
            MemoryDocument::new(),
            "https://hr.example.com/hr_project/Rzgl/Rzgl-page1.html?step=2".to_string(),
        );

        let trail = controller.mount().unwrap();
        assert_eq!(trail.active().display_text, "认证报名");
    }

    #[test]
    fn test_should_auto_mount() {
        assert!(should_auto_mount("/hr_project/Zwgl/Zwgl.html"));
        assert!(should_auto_mount("/Pxgl/Pxgl-page1.html"));
        assert!(!should_auto_mount("/index.html"));
        assert!(!should_auto_mount("/hr_project/index.html"));
        assert!(!should_auto_mount("/ZWGL/Zwgl.html"));
    }
}

//! Breadcrumb builder
//!
//! Turns filtered path segments into a [`BreadcrumbTrail`]. The builder is
//! total: unknown modules and pages fall back to their raw identifier and a
//! generic icon, and anything that does not look like `<module>/<page file>`
//! degrades to a Home-only trail.
//!
//! URL rule: every target is relative to the directory of the current page.
//! The module-home node and the page node link to the page segment itself;
//! the module node of a sub-page links to `<module directory>.<matched page extension>`.

use crate::config::BreadcrumbOptions;
use crate::models::{BreadcrumbNode, BreadcrumbTrail, NodeKind};
use crate::observer::{BuildObserver, Decision, NoopObserver};
use crate::registry::ModuleRegistry;
use crate::segment::{classify, PathSegmenter, SegmentKind};
use std::sync::Arc;

/// Builds breadcrumb trails from URL paths or pre-filtered segments
#[derive(Clone)]
pub struct BreadcrumbBuilder {
    registry: Arc<ModuleRegistry>,
    options: BreadcrumbOptions,
    segmenter: PathSegmenter,
    observer: Arc<dyn BuildObserver>,
}

impl std::fmt::Debug for BreadcrumbBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreadcrumbBuilder")
            .field("options", &self.options)
            .field("modules", &self.registry.modules().len())
            .finish()
    }
}

impl BreadcrumbBuilder {
    /// Create a builder over a registry
    pub fn new(registry: Arc<ModuleRegistry>, options: BreadcrumbOptions) -> Self {
        let segmenter = PathSegmenter::new(Arc::clone(&registry), options.noise_dirs.clone());
        Self {
            registry,
            options,
            segmenter,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Set the decision observer (builder pattern)
    pub fn with_observer(mut self, observer: impl BuildObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn options(&self) -> &BreadcrumbOptions {
        &self.options
    }

    pub fn segmenter(&self) -> &PathSegmenter {
        &self.segmenter
    }

    /// Segment a URL path and build its trail
    pub fn build_from_path(&self, path: &str) -> BreadcrumbTrail {
        let segments = self.segmenter.segment(path);
        self.observer.on_decision(&Decision::Segmented {
            path,
            segments: &segments,
        });
        self.build(segments.as_slice())
    }

    /// Build a trail from filtered segments
    pub fn build<S: AsRef<str>>(&self, segments: &[S]) -> BreadcrumbTrail {
        let trail = self.build_inner(segments);
        self.observer.on_decision(&Decision::Completed {
            shape: trail.shape(),
            len: trail.len(),
        });
        trail
    }

    fn build_inner<S: AsRef<str>>(&self, segments: &[S]) -> BreadcrumbTrail {
        let home = self.home_node();

        let (module_segment, page_segment) = match segments {
            [first, second, ..] => (first.as_ref(), second.as_ref()),
            _ => {
                self.observer.on_decision(&Decision::TooFewSegments {
                    count: segments.len(),
                });
                return BreadcrumbTrail::home_only(home);
            }
        };

        let module_kind = classify(module_segment, &self.registry);
        let page_kind = classify(page_segment, &self.registry);

        let (file_id, extension) = match (&module_kind, &page_kind) {
            (
                SegmentKind::Module { .. },
                SegmentKind::Page {
                    file_id, extension, ..
                },
            ) if !file_id.is_empty() => (file_id.as_str(), extension.as_str()),
            _ => {
                self.observer.on_decision(&Decision::NotAModulePath {
                    module_segment,
                    page_segment,
                });
                return BreadcrumbTrail::home_only(home);
            }
        };

        self.observer
            .on_decision(&Decision::FileIdentifier { file_id });

        if self.registry.is_module_home_page(file_id) {
            self.observer
                .on_decision(&Decision::ModuleHome { module: file_id });
            let module = self.module_node(file_id, page_segment.to_string());
            return BreadcrumbTrail::module_home(home, module);
        }

        let module_code = match file_id.split_once('-') {
            Some((code, _)) => code,
            None => file_id,
        };
        if module_code.is_empty() {
            self.observer.on_decision(&Decision::NotAModulePath {
                module_segment,
                page_segment,
            });
            return BreadcrumbTrail::home_only(home);
        }

        self.observer.on_decision(&Decision::SubPage {
            module: module_code,
            page: file_id,
        });

        let module = self.module_node(module_code, format!("{}.{}", module_segment, extension));
        let page = self.page_node(file_id, page_segment);
        BreadcrumbTrail::sub_page(home, module, page)
    }

    fn home_node(&self) -> BreadcrumbNode {
        BreadcrumbNode::new(
            NodeKind::Home,
            &self.options.home_text,
            &self.options.home_url,
            &self.options.home_icon,
        )
    }

    fn module_node(&self, code: &str, target_url: String) -> BreadcrumbNode {
        match self.registry.lookup_module(code) {
            Some(module) => BreadcrumbNode::new(NodeKind::Module, &module.name, target_url, &module.icon),
            None => BreadcrumbNode::new(
                NodeKind::Module,
                code,
                target_url,
                &self.options.default_module_icon,
            ),
        }
    }

    fn page_node(&self, file_id: &str, page_segment: &str) -> BreadcrumbNode {
        let (text, icon) = match self.registry.lookup_page(file_id) {
            Some(page) => (
                page.name.as_str(),
                page.icon.as_deref().unwrap_or(&self.options.default_page_icon),
            ),
            None => (file_id, self.options.default_page_icon.as_str()),
        };
        BreadcrumbNode::new(NodeKind::Page, text, page_segment, icon)
    }
}

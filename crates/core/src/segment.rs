//! Path segmentation
//!
//! Splits a URL path into segments, drops empty segments and project/root
//! directory names, and classifies what is left into module and page
//! segments. Classification happens once here so the builder only ever
//! matches on [`SegmentKind`].

use crate::registry::ModuleRegistry;
use serde::Serialize;
use std::sync::Arc;

/// What a path segment denotes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentKind {
    /// A registered module code, e.g. `Zjgl`
    Module { code: String },

    /// A file-like token, e.g. `Zjgl-page2.html`
    Page {
        /// Text before the first `.`
        file_id: String,
        /// Text after the last `.`
        extension: String,
        /// Whether the token carries a registered page extension
        recognized: bool,
    },

    Other,
}

/// A raw path segment and its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub raw: String,
    #[serde(flatten)]
    pub kind: SegmentKind,
}

impl Segment {
    pub fn is_module(&self) -> bool {
        matches!(self.kind, SegmentKind::Module { .. })
    }

    /// Module segments and recognized page files survive path filtering
    pub fn is_relevant(&self) -> bool {
        match self.kind {
            SegmentKind::Module { .. } => true,
            SegmentKind::Page { recognized, .. } => recognized,
            SegmentKind::Other => false,
        }
    }
}

/// Classify a single token.
///
/// Module codes win over page tokens. Any token containing a `.` is
/// page-like; `recognized` tells whether it carries a registered extension,
/// and `extension` is that extension (or the text after the last `.`).
pub fn classify(token: &str, registry: &ModuleRegistry) -> SegmentKind {
    if registry.is_module_identifier(token) {
        return SegmentKind::Module {
            code: token.to_string(),
        };
    }

    match token.split_once('.') {
        Some((file_id, _)) => {
            let matched = registry.matched_extension(token);
            let extension = matched.unwrap_or_else(|| token.rsplit('.').next().unwrap_or_default());
            SegmentKind::Page {
                file_id: file_id.to_string(),
                extension: extension.to_string(),
                recognized: matched.is_some(),
            }
        }
        None => SegmentKind::Other,
    }
}

/// Reduce a full URL to its path; anything that is not an absolute URL is
/// taken as a path already. Query and fragment are dropped.
pub fn pathname_of(input: &str) -> String {
    if let Ok(url) = url::Url::parse(input) {
        if !url.cannot_be_a_base() {
            return url.path().to_string();
        }
    }

    let end = input.find(['?', '#']).unwrap_or(input.len());
    input[..end].to_string()
}

/// Splits URL paths into relevant, classified segments
#[derive(Debug, Clone)]
pub struct PathSegmenter {
    registry: Arc<ModuleRegistry>,
    noise_dirs: Vec<String>,
}

impl PathSegmenter {
    pub fn new(registry: Arc<ModuleRegistry>, noise_dirs: Vec<String>) -> Self {
        Self {
            registry,
            noise_dirs,
        }
    }

    /// Relevant segments of a path, classified, in path order
    pub fn split(&self, path: &str) -> Vec<Segment> {
        path.split('/')
            .filter(|raw| !raw.is_empty())
            .filter(|raw| !self.noise_dirs.iter().any(|dir| dir == raw))
            .map(|raw| Segment {
                raw: raw.to_string(),
                kind: classify(raw, &self.registry),
            })
            .filter(Segment::is_relevant)
            .collect()
    }

    /// Relevant segments of a path as plain strings
    pub fn segment(&self, path: &str) -> Vec<String> {
        self.split(path).into_iter().map(|s| s.raw).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BreadcrumbOptions;

    fn segmenter() -> PathSegmenter {
        PathSegmenter::new(
            ModuleRegistry::builtin(),
            BreadcrumbOptions::default().noise_dirs,
        )
    }

    #[test]
    fn test_classify_module() {
        let registry = ModuleRegistry::builtin();
        assert_eq!(
            classify("Zwgl", &registry),
            SegmentKind::Module {
                code: "Zwgl".to_string()
            }
        );
    }

    #[test]
    fn test_classify_page() {
        let registry = ModuleRegistry::builtin();
        assert_eq!(
            classify("Zwgl-page1.v2.html", &registry),
            SegmentKind::Page {
                file_id: "Zwgl-page1".to_string(),
                extension: "html".to_string(),
                recognized: true,
            }
        );
        assert_eq!(
            classify("Zjgl-page1.html.bak", &registry),
            SegmentKind::Page {
                file_id: "Zjgl-page1".to_string(),
                extension: "html".to_string(),
                recognized: true,
            }
        );
        assert!(matches!(
            classify("logo.png", &registry),
            SegmentKind::Page {
                recognized: false,
                ..
            }
        ));
        assert_eq!(classify("assets", &registry), SegmentKind::Other);
    }

    #[test]
    fn test_drops_empty_and_unknown_segments() {
        let segments = segmenter().segment("//static/Zjgl//Zjgl-page2.html/");
        assert_eq!(segments, vec!["Zjgl", "Zjgl-page2.html"]);
    }

    #[test]
    fn test_noise_dir_dropped() {
        let s = segmenter();
        assert_eq!(s.segment("/project/Zwgl/Zwgl.html"), s.segment("/Zwgl/Zwgl.html"));
        assert_eq!(
            s.segment("/a_hr_project/hr_project/Zwgl/Zwgl.html"),
            vec!["Zwgl", "Zwgl.html"]
        );
    }

    #[test]
    fn test_noise_dir_dropped_even_when_registered() {
        let s = PathSegmenter::new(ModuleRegistry::builtin(), vec!["Zwgl".to_string()]);
        assert_eq!(s.segment("/Zwgl/Zwgl.html"), vec!["Zwgl.html"]);
    }

    #[test]
    fn test_nothing_relevant() {
        assert!(segmenter().segment("/").is_empty());
        assert!(segmenter().segment("").is_empty());
        assert!(segmenter().segment("/assets/css/site.css").is_empty());
    }

    #[test]
    fn test_keeps_path_order() {
        let segments = segmenter().segment("/Zjgl-page1.html/Zjgl");
        assert_eq!(segments, vec!["Zjgl-page1.html", "Zjgl"]);
    }

    #[test]
    fn test_pathname_of() {
        assert_eq!(
            pathname_of("https://intra.example.com/hr_project/Zwgl/Zwgl.html?tab=2#top"),
            "/hr_project/Zwgl/Zwgl.html"
        );
        assert_eq!(pathname_of("/Zwgl/Zwgl-page1.html?x=1"), "/Zwgl/Zwgl-page1.html");
        assert_eq!(pathname_of("Zwgl/Zwgl.html"), "Zwgl/Zwgl.html");
    }
}

//! Breadcrumb markup
//!
//! Each node renders as an anchor holding an icon span and a text span;
//! nodes are joined by separator spans. The output depends only on the
//! trail and the separator, so re-rendering the same location is
//! byte-identical.

use crate::models::BreadcrumbTrail;
use maud::html;

/// Render a trail as breadcrumb markup
pub fn render_html(trail: &BreadcrumbTrail, separator: &str) -> String {
    html! {
        @for (idx, node) in trail.iter().enumerate() {
            @if idx > 0 {
                span class="breadcrumb-separator" { (separator) }
            }
            @let class = if node.is_active { "breadcrumb-item active" } else { "breadcrumb-item" };
            a href=(node.target_url) class=(class) title=(node.display_text) {
                span class={ "breadcrumb-icon breadcrumb-" (node.kind.label()) } { (node.icon) }
                span class="breadcrumb-text" { (node.display_text) }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BreadcrumbOptions;
    use crate::{BreadcrumbBuilder, ModuleRegistry};

    fn builder(options: BreadcrumbOptions) -> BreadcrumbBuilder {
        BreadcrumbBuilder::new(ModuleRegistry::builtin(), options)
    }

    #[test]
    fn test_render_home_only() {
        let trail = builder(BreadcrumbOptions::default()).build_from_path("/");
        assert_eq!(
            render_html(&trail, "›"),
            "<a href=\"../index.html\" class=\"breadcrumb-item active\" title=\"Home\"><span class=\"breadcrumb-icon breadcrumb-home\">🏠</span><span class=\"breadcrumb-text\">Home</span></a>"
        );
    }

    #[test]
    fn test_render_sub_page() {
        let trail = builder(BreadcrumbOptions::default()).build(&["Jxgl", "Jxgl-page1.html"]);
        let html = render_html(&trail, "›");

        assert_eq!(html.matches("<a href=").count(), 3);
        assert_eq!(html.matches("breadcrumb-separator").count(), 2);
        assert_eq!(html.matches("breadcrumb-item active").count(), 1);
        assert!(html.contains("breadcrumb-module\">📊</span><span class=\"breadcrumb-text\">绩效管理"));
        assert!(html.ends_with("<span class=\"breadcrumb-text\">Jxgl-page1</span></a>"));
    }

    #[test]
    fn test_render_escapes_text() {
        let options = BreadcrumbOptions::default().with_home_text("<b>\"Home\" & co</b>");
        let trail = builder(options).build_from_path("/");
        let html = render_html(&trail, "<");

        assert!(html.contains("title=\"&lt;b&gt;&quot;Home&quot; &amp; co&lt;/b&gt;\""));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_render_escapes_link_target() {
        let trail = builder(BreadcrumbOptions::default()).build(&["Zwgl", "Zwgl-x\"&.html"]);
        let html = render_html(&trail, "›");

        assert!(html.contains("href=\"Zwgl-x&quot;&amp;.html\""));
        assert!(html.contains("<span class=\"breadcrumb-text\">职位管理</span>"));
    }
}

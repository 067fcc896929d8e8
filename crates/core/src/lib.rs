//! mta_sitecrumbs_core - Core library for site breadcrumb navigation
//!
//! This crate maps the URL path of a page in a multi-module static site to
//! a breadcrumb trail (Home > Module > Page), distinguishing a module's own
//! landing page from its sub-pages.
//!
//! # Features
//!
//! - **Module Registry**: Immutable table of modules, pages, display names
//!   and icons, built in or loaded from a TOML/YAML/JSON site file.
//! - **Path Segmentation**: Noise directories and unrelated path components
//!   are dropped; the rest is classified as module or page segments.
//! - **Graceful Degradation**: Unknown or malformed paths shorten the trail,
//!   they never fail.
//! - **Decision Observers**: Every branch the builder takes can be traced.
//! - **Controller Adapter**: Mounts and refreshes rendered markup against an
//!   abstract document and location.
//! - **Site Scans**: Build the trail of every page under a site directory.
//! - **Multiple Output Formats**: JSON, YAML, HTML and ANSI-colored terminal output.
//!
//! # Example
//!
//! ```rust
//! use mta_sitecrumbs_core::{BreadcrumbBuilder, BreadcrumbOptions, ModuleRegistry};
//!
//! let builder = BreadcrumbBuilder::new(ModuleRegistry::builtin(), BreadcrumbOptions::default());
//! let trail = builder.build_from_path("/hr_project/Zjgl/Zjgl-page2.html");
//!
//! assert_eq!(trail.len(), 3);
//! assert_eq!(trail.active().display_text, "标准化职级晋升");
//! ```

pub mod builder;
pub mod config;
pub mod controller;
pub mod models;
pub mod observer;
pub mod output;
pub mod registry;
pub mod scanner;
pub mod segment;

// Re-exports for convenience
pub use builder::BreadcrumbBuilder;
pub use config::{BreadcrumbOptions, ConfigError, SiteConfig};
pub use controller::{should_auto_mount, BreadcrumbController, Document, Location, MemoryDocument};
pub use models::{
    BreadcrumbNode, BreadcrumbTrail, NodeKind, PageEntry, ScanMetadata, SiteMap, SiteStats,
    TrailShape,
};
pub use observer::{BuildObserver, Decision, NoopObserver, TracingObserver};
pub use output::{format_site_map, format_trail, FormatError, OutputFormat};
pub use registry::{ModuleDescriptor, ModuleRegistry, PageDescriptor, RegistryDefinition};
pub use scanner::{ScanConfig, ScanError, SiteScanner};
pub use segment::{classify, pathname_of, PathSegmenter, Segment, SegmentKind};

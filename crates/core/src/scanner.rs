//! Site scanner
//!
//! Walks a static-site directory and builds the breadcrumb trail of every
//! page file, as the browser would see it. Read-only: page files are never
//! modified.

use crate::builder::BreadcrumbBuilder;
use crate::models::{PageEntry, ScanMetadata, SiteMap, SiteStats, TrailShape};
use crate::segment::SegmentKind;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use rayon::prelude::*;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

/// Scanner errors
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(#[from] globset::Error),

    #[error("Site root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),
}

/// Configuration for a site scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Site root directory
    pub root: PathBuf,

    /// URL prefix the site root is served under, e.g. `/hr_project`
    pub base_path: String,

    /// Custom ignore patterns
    pub ignore_patterns: Vec<String>,

    /// Number of threads for parallel processing
    pub threads: usize,

    /// Whether to follow symlinks
    pub follow_symlinks: bool,

    /// Whether to include hidden files
    pub include_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            base_path: String::new(),
            ignore_patterns: Vec::new(),
            threads: num_cpus(),
            follow_symlinks: false,
            include_hidden: false,
        }
    }
}

impl ScanConfig {
    /// Create new config with root directory
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    /// Set URL prefix (builder pattern)
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Set ignore patterns (builder pattern)
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Set number of threads (builder pattern)
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set follow symlinks (builder pattern)
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set include hidden files (builder pattern)
    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }
}

/// Get number of available CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

/// Filter for ignoring files and directories
struct IgnoreFilter {
    root: PathBuf,
    gitignore: Option<Gitignore>,
    custom_globs: GlobSet,
    default_ignores: GlobSet,
    include_hidden: bool,
}

impl IgnoreFilter {
    fn new(config: &ScanConfig) -> Result<Self, ScanError> {
        let gitignore_path = config.root.join(".gitignore");
        let gitignore = if gitignore_path.exists() {
            let mut builder = GitignoreBuilder::new(&config.root);
            builder.add(&gitignore_path);
            match builder.build() {
                Ok(gi) => Some(gi),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring unreadable .gitignore");
                    None
                }
            }
        } else {
            None
        };

        let mut custom_builder = GlobSetBuilder::new();
        for pattern in &config.ignore_patterns {
            custom_builder.add(Glob::new(pattern)?);
        }
        let custom_globs = custom_builder.build()?;

        let mut default_builder = GlobSetBuilder::new();
        for pattern in [
            "**/node_modules/**",
            "**/.git/**",
            "**/target/**",
            "**/dist/**",
            "**/.DS_Store",
        ] {
            default_builder.add(Glob::new(pattern)?);
        }
        let default_ignores = default_builder.build()?;

        Ok(Self {
            root: config.root.clone(),
            gitignore,
            custom_globs,
            default_ignores,
            include_hidden: config.include_hidden,
        })
    }

    /// Check if a path should be ignored. Globs match the path relative to
    /// the site root, so a root named `dist` is still scanned.
    fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        if !self.include_hidden {
            if let Some(name) = path.file_name() {
                if name.to_string_lossy().starts_with('.') {
                    return true;
                }
            }
        }

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        if self.default_ignores.is_match(relative) || self.custom_globs.is_match(relative) {
            return true;
        }

        if let Some(ref gi) = self.gitignore {
            if gi.matched(path, is_dir).is_ignore() {
                return true;
            }
        }

        false
    }
}

/// Builds the trail of every page under a site root
pub struct SiteScanner {
    config: ScanConfig,
    builder: BreadcrumbBuilder,
    ignore_filter: IgnoreFilter,
}

impl SiteScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig, builder: BreadcrumbBuilder) -> Result<Self, ScanError> {
        if !config.root.is_dir() {
            return Err(ScanError::NotADirectory(config.root.clone()));
        }
        let ignore_filter = IgnoreFilter::new(&config)?;
        Ok(Self {
            config,
            builder,
            ignore_filter,
        })
    }

    /// Scan the site root and return the site map
    pub fn scan(&self) -> Result<SiteMap, ScanError> {
        let start = Instant::now();

        let page_files = self.find_page_files();
        tracing::debug!(root = %self.config.root.display(), pages = page_files.len(), "found page files");

        let mut pages: Vec<PageEntry> = if self.config.threads <= 1 {
            page_files.iter().map(|path| self.page_entry(path)).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads)
                .build()
                .map_err(|e| ScanError::ThreadPoolError(e.to_string()))?;

            pool.install(|| {
                page_files
                    .par_iter()
                    .map(|path| self.page_entry(path))
                    .collect()
            })
        };
        pages.sort_by(|a, b| a.url_path.cmp(&b.url_path));

        let stats = calculate_stats(&pages);
        let metadata = ScanMetadata {
            scan_duration_ms: start.elapsed().as_millis() as u64,
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Ok(SiteMap {
            root: self.config.root.clone(),
            pages,
            stats,
            metadata,
        })
    }

    /// Find all page files below the root, relative to it
    fn find_page_files(&self) -> Vec<PathBuf> {
        let extensions = self.builder.registry().page_extensions();
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.config.root)
            .follow_links(self.config.follow_symlinks)
            .into_iter()
            .filter_entry(|e| {
                // The root itself may be hidden (e.g. a temp dir)
                if e.depth() > 0 && e.file_type().is_dir() {
                    return !self.ignore_filter.should_ignore(e.path(), true);
                }
                true
            });

        for entry in walker.filter_map(|e| e.ok()) {
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            if self.ignore_filter.should_ignore(path, false) {
                continue;
            }

            let is_page = path
                .extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy().to_lowercase();
                    extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
                })
                .unwrap_or(false);
            if !is_page {
                continue;
            }

            if let Ok(relative) = path.strip_prefix(&self.config.root) {
                files.push(relative.to_path_buf());
            }
        }

        files
    }

    fn page_entry(&self, relative: &Path) -> PageEntry {
        let url_path = self.url_path(relative);
        let trail = self.builder.build_from_path(&url_path);
        let registered = self.is_registered(&url_path, trail.shape());

        PageEntry {
            path: relative.to_path_buf(),
            url_path,
            registered,
            trail,
        }
    }

    /// URL path a page is served under
    fn url_path(&self, relative: &Path) -> String {
        let mut url = self.config.base_path.trim_end_matches('/').to_string();
        for component in relative.components() {
            if let Component::Normal(part) = component {
                url.push('/');
                url.push_str(&part.to_string_lossy());
            }
        }
        url
    }

    /// Sub-pages count as registered only when their page id is known
    fn is_registered(&self, url_path: &str, shape: TrailShape) -> bool {
        if shape != TrailShape::SubPage {
            return true;
        }

        let segments = self.builder.segmenter().split(url_path);
        match segments.get(1).map(|s| &s.kind) {
            Some(SegmentKind::Page { file_id, .. }) => {
                self.builder.registry().lookup_page(file_id).is_some()
            }
            _ => false,
        }
    }
}

/// Calculate scan statistics
fn calculate_stats(pages: &[PageEntry]) -> SiteStats {
    let count = |shape: TrailShape| pages.iter().filter(|p| p.trail.shape() == shape).count();

    SiteStats {
        total_pages: pages.len(),
        module_home_pages: count(TrailShape::ModuleHome),
        sub_pages: count(TrailShape::SubPage),
        home_only_pages: count(TrailShape::HomeOnly),
        unregistered_pages: pages.iter().filter(|p| !p.registered).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BreadcrumbOptions;
    use crate::registry::ModuleRegistry;
    use std::fs;
    use tempfile::TempDir;

    fn builder() -> BreadcrumbBuilder {
        BreadcrumbBuilder::new(ModuleRegistry::builtin(), BreadcrumbOptions::default())
    }

    fn create_test_site() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        for (path, body) in [
            ("index.html", "<h1>home</h1>"),
            ("Zwgl/Zwgl.html", "<h1>zwgl</h1>"),
            ("Zwgl/Zwgl-page1.html", "<h1>page1</h1>"),
            ("Rcgl/Rcgl-page9.html", "<h1>page9</h1>"),
            ("Rcgl/style.css", "body {}"),
            ("node_modules/pkg/Zwgl.html", "vendored"),
            ("drafts/Zwgl-page2.html", "draft"),
        ] {
            let file = root.join(path);
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, body).unwrap();
        }

        dir
    }

    #[test]
    fn test_scan_site() {
        let dir = create_test_site();
        let config = ScanConfig::new(dir.path().to_path_buf())
            .with_base_path("/hr_project")
            .with_ignore_patterns(vec!["**/drafts/**".to_string()]);
        let scanner = SiteScanner::new(config, builder()).unwrap();
        let result = scanner.scan().unwrap();

        let urls: Vec<&str> = result.pages.iter().map(|p| p.url_path.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "/hr_project/Rcgl/Rcgl-page9.html",
                "/hr_project/Zwgl/Zwgl-page1.html",
                "/hr_project/Zwgl/Zwgl.html",
                "/hr_project/index.html",
            ]
        );

        assert_eq!(result.stats.total_pages, 4);
        assert_eq!(result.stats.module_home_pages, 1);
        assert_eq!(result.stats.sub_pages, 2);
        assert_eq!(result.stats.home_only_pages, 1);
        assert_eq!(result.stats.unregistered_pages, 1);

        let page9 = &result.pages[0];
        assert!(!page9.registered);
        assert_eq!(page9.trail.active().display_text, "Rcgl-page9");
    }

    #[test]
    fn test_single_threaded_matches_parallel() {
        let dir = create_test_site();
        let serial = SiteScanner::new(
            ScanConfig::new(dir.path().to_path_buf()).with_threads(1),
            builder(),
        )
        .unwrap()
        .scan()
        .unwrap();
        let parallel = SiteScanner::new(
            ScanConfig::new(dir.path().to_path_buf()).with_threads(4),
            builder(),
        )
        .unwrap()
        .scan()
        .unwrap();

        assert_eq!(serial.stats, parallel.stats);
        let serial_trails: Vec<_> = serial.pages.iter().map(|p| &p.trail).collect();
        let parallel_trails: Vec<_> = parallel.pages.iter().map(|p| &p.trail).collect();
        assert_eq!(serial_trails, parallel_trails);
    }

    #[test]
    fn test_gitignore_respected() {
        let dir = create_test_site();
        fs::write(dir.path().join(".gitignore"), "Rcgl/\n").unwrap();

        let result = SiteScanner::new(ScanConfig::new(dir.path().to_path_buf()), builder())
            .unwrap()
            .scan()
            .unwrap();

        assert!(result.pages.iter().all(|p| !p.url_path.contains("Rcgl")));
    }

    #[test]
    fn test_scan_root_named_dist() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("dist");
        for path in ["Zwgl/Zwgl.html", "Zwgl/Zwgl-page1.html", "dist/Zwgl/Zwgl.html"] {
            let file = root.join(path);
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, "<h1>page</h1>").unwrap();
        }

        let result = SiteScanner::new(ScanConfig::new(root), builder())
            .unwrap()
            .scan()
            .unwrap();

        let urls: Vec<&str> = result.pages.iter().map(|p| p.url_path.as_str()).collect();
        assert_eq!(urls, vec!["/Zwgl/Zwgl-page1.html", "/Zwgl/Zwgl.html"]);
        assert_eq!(result.stats.total_pages, 2);
    }

    #[test]
    fn test_ignore_patterns_are_root_relative() {
        let dir = create_test_site();
        let config = ScanConfig::new(dir.path().to_path_buf())
            .with_ignore_patterns(vec!["drafts/**".to_string(), "Rcgl/*.html".to_string()]);
        let result = SiteScanner::new(config, builder()).unwrap().scan().unwrap();

        assert_eq!(result.stats.total_pages, 3);
        assert!(result
            .pages
            .iter()
            .all(|p| !p.url_path.contains("drafts") && !p.url_path.contains("Rcgl")));
    }

    #[test]
    fn test_root_must_be_directory() {
        let dir = create_test_site();
        let err = SiteScanner::new(ScanConfig::new(dir.path().join("index.html")), builder())
            .err()
            .unwrap();
        assert!(matches!(err, ScanError::NotADirectory(_)));
    }

    #[test]
    fn test_invalid_glob() {
        let dir = create_test_site();
        let config =
            ScanConfig::new(dir.path().to_path_buf()).with_ignore_patterns(vec!["a[".to_string()]);
        assert!(matches!(
            SiteScanner::new(config, builder()),
            Err(ScanError::InvalidGlob(_))
        ));
    }
}

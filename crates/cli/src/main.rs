//! mta-sitecrumbs CLI
//!
//! Breadcrumb navigation for multi-module static sites.
//! Derives Home > Module > Page trails from URL paths.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use mta_sitecrumbs_core::output::{format_registry, format_segments};
use mta_sitecrumbs_core::{
    format_site_map, format_trail, pathname_of, should_auto_mount, BreadcrumbBuilder,
    BreadcrumbController, BreadcrumbOptions, MemoryDocument, ModuleRegistry, OutputFormat,
    ScanConfig, SiteConfig, SiteScanner, TracingObserver,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Breadcrumb navigation for multi-module static sites
#[derive(Parser)]
#[command(name = "mta-sitecrumbs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Breadcrumb navigation for multi-module static sites")]
#[command(long_about = r#"
mta-sitecrumbs: Breadcrumb Navigation for Static Sites

Maps the URL path of a page to its breadcrumb trail (Home > Module > Page),
telling a module's landing page apart from its sub-pages. Unknown modules
and pages fall back to their raw identifier; malformed paths fall back to
Home. Nothing here ever fails on a path.

Output formats:
  - JSON (default) - Structured JSON for programmatic use
  - YAML - Human-readable YAML format
  - ANSI - Colorful terminal output with icons
  - HTML - Breadcrumb markup as mounted in the page
  - Summary - Plain text

Examples:
  mta-sitecrumbs trail /hr_project/Zjgl/Zjgl-page2.html
  mta-sitecrumbs trail https://hr.example.com/Zwgl/Zwgl.html -f ansi
  mta-sitecrumbs segments /project/Zwgl/Zwgl.html -f summary
  mta-sitecrumbs render /Pxgl/Pxgl-page1.html
  mta-sitecrumbs scan ./site --base-path /hr_project -f ansi
  mta-sitecrumbs modules --config site.toml
"#)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Site config file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Json, global = true)]
    pub format: OutputFormatArg,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Home node text
    #[arg(long, global = true)]
    pub home_text: Option<String>,

    /// Home node link target
    #[arg(long, global = true)]
    pub home_url: Option<String>,

    /// Home node icon
    #[arg(long, global = true)]
    pub home_icon: Option<String>,

    /// Separator between rendered nodes
    #[arg(long, global = true)]
    pub separator: Option<String>,

    /// Project/root directory names to drop (replaces the configured list)
    #[arg(long, action = clap::ArgAction::Append, global = true)]
    pub noise_dir: Vec<String>,

    /// Log every builder decision (needs --verbose or RUST_LOG=debug)
    #[arg(long, global = true)]
    pub trace_decisions: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Build the breadcrumb trail of a URL or path
    Trail {
        /// URL or URL path
        location: String,
    },

    /// Show the relevant, classified segments of a URL or path
    Segments {
        /// URL or URL path
        location: String,
    },

    /// Mount a breadcrumb container and print its markup
    Render {
        /// URL or URL path
        location: String,

        /// Mount even where a page load would not
        #[arg(long)]
        force: bool,
    },

    /// Build the trail of every page in a site directory
    Scan {
        /// Site root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// URL prefix the site root is served under
        #[arg(long, default_value = "")]
        base_path: String,

        /// Ignore patterns (can be specified multiple times)
        #[arg(long, action = clap::ArgAction::Append)]
        ignore: Vec<String>,

        /// Number of threads for parallel processing (default: auto)
        #[arg(long)]
        threads: Option<usize>,
    },

    /// List registered modules and pages
    Modules,
}

/// Output format argument
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Ansi,
    Html,
    Summary,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Ansi => OutputFormat::Ansi,
            OutputFormatArg::Html => OutputFormat::Html,
            OutputFormatArg::Summary => OutputFormat::Summary,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let (options, registry) = load_config(&args)?;

    match &args.command {
        Commands::Trail { location } => run_trail(location, options, registry, &args),
        Commands::Segments { location } => run_segments(location, options, registry, &args),
        Commands::Render { location, force } => {
            run_render(location, *force, options, registry, &args)
        }
        Commands::Scan {
            path,
            base_path,
            ignore,
            threads,
        } => {
            let mut config = ScanConfig::new(path.clone())
                .with_base_path(base_path.clone())
                .with_ignore_patterns(ignore.clone());
            if let Some(threads) = threads {
                config = config.with_threads(*threads);
            }
            run_scan(config, options, registry, &args)
        }
        Commands::Modules => {
            let format: OutputFormat = args.format.clone().into();
            let output = format_registry(&registry, format)?;
            write_output(&output, args.output.as_ref())
        }
    }
}

/// Log to stderr; RUST_LOG wins over --verbose
fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,mta_sitecrumbs_core=debug,mta_sitecrumbs=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Merge the config file and command-line overrides
fn load_config(args: &Args) -> Result<(BreadcrumbOptions, Arc<ModuleRegistry>)> {
    let site = match &args.config {
        Some(path) => SiteConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SiteConfig::default(),
    };
    let (mut options, registry) = site.into_parts().context("Invalid module registry")?;

    if let Some(text) = &args.home_text {
        options = options.with_home_text(text.clone());
    }
    if let Some(url) = &args.home_url {
        options = options.with_home_url(url.clone());
    }
    if let Some(icon) = &args.home_icon {
        options = options.with_home_icon(icon.clone());
    }
    if let Some(separator) = &args.separator {
        options = options.with_separator(separator.clone());
    }
    if !args.noise_dir.is_empty() {
        options = options.with_noise_dirs(args.noise_dir.clone());
    }

    tracing::debug!(
        modules = registry.modules().len(),
        noise_dirs = ?options.noise_dirs,
        "configuration resolved"
    );

    Ok((options, registry))
}

fn create_builder(
    options: BreadcrumbOptions,
    registry: Arc<ModuleRegistry>,
    args: &Args,
) -> BreadcrumbBuilder {
    let builder = BreadcrumbBuilder::new(registry, options);
    if args.trace_decisions {
        builder.with_observer(TracingObserver)
    } else {
        builder
    }
}

fn run_trail(
    location: &str,
    options: BreadcrumbOptions,
    registry: Arc<ModuleRegistry>,
    args: &Args,
) -> Result<()> {
    let builder = create_builder(options, registry, args);
    let trail = builder.build_from_path(&pathname_of(location));

    let format: OutputFormat = args.format.clone().into();
    let output = format_trail(&trail, format, &builder.options().separator)?;
    write_output(&output, args.output.as_ref())
}

fn run_segments(
    location: &str,
    options: BreadcrumbOptions,
    registry: Arc<ModuleRegistry>,
    args: &Args,
) -> Result<()> {
    let builder = create_builder(options, registry, args);
    let segments = builder.segmenter().split(&pathname_of(location));

    let format: OutputFormat = args.format.clone().into();
    let output = format_segments(&segments, format)?;
    write_output(&output, args.output.as_ref())
}

fn run_render(
    location: &str,
    force: bool,
    options: BreadcrumbOptions,
    registry: Arc<ModuleRegistry>,
    args: &Args,
) -> Result<()> {
    let pathname = pathname_of(location);
    if !force && !should_auto_mount(&pathname) {
        anyhow::bail!(
            "{} is not under a module directory; a page load would not mount a breadcrumb (use --force)",
            pathname
        );
    }

    let builder = create_builder(options, registry, args);
    let selector = builder.options().container_selector.clone();
    let mut controller = BreadcrumbController::new(builder, MemoryDocument::new(), pathname);
    controller.mount().context("Breadcrumb container was not mounted")?;

    let document = controller.into_document();
    let html = document
        .container_html(&selector)
        .context("Breadcrumb container is missing")?;
    write_output(html, args.output.as_ref())
}

fn run_scan(
    config: ScanConfig,
    options: BreadcrumbOptions,
    registry: Arc<ModuleRegistry>,
    args: &Args,
) -> Result<()> {
    let builder = create_builder(options, registry, args);
    let separator = builder.options().separator.clone();

    // Show progress spinner
    let spinner = if args.verbose && atty::is(atty::Stream::Stderr) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Invalid spinner template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Scanning site...");
        Some(pb)
    } else {
        None
    };

    let root = config.root.clone();
    let scanner = SiteScanner::new(config, builder)
        .with_context(|| format!("Failed to create scanner for {}", root.display()))?;
    let result = scanner.scan().context("Failed to scan site")?;

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Scanned {} pages in {}ms",
            result.stats.total_pages, result.metadata.scan_duration_ms
        ));
    }

    let format: OutputFormat = args.format.clone().into();
    let output = format_site_map(&result, format, &separator)?;
    write_output(&output, args.output.as_ref())
}

fn write_output(output: &str, path: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, output).context("Failed to write output file")?;
    } else {
        println!("{}", output);
    }
    Ok(())
}

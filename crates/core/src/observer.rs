//! Decision observers
//!
//! The builder reports every branch it takes to a [`BuildObserver`]. The
//! default observer ignores them; [`TracingObserver`] turns them into
//! `tracing` debug events, which is how a trail is diagnosed on a live site.

use crate::models::TrailShape;

/// A decision point reached while building a trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision<'a> {
    /// Path was split and filtered
    Segmented {
        path: &'a str,
        segments: &'a [String],
    },

    /// Fewer than two relevant segments, trail stays at Home
    TooFewSegments { count: usize },

    /// First segment is not a module or second is not a file
    NotAModulePath {
        module_segment: &'a str,
        page_segment: &'a str,
    },

    /// File identifier derived from the page segment
    FileIdentifier { file_id: &'a str },

    /// The page is the module's landing page
    ModuleHome { module: &'a str },

    /// The page is a sub-page of `module`
    SubPage { module: &'a str, page: &'a str },

    /// Trail finished
    Completed { shape: TrailShape, len: usize },
}

/// Receives builder decisions
pub trait BuildObserver: Send + Sync {
    fn on_decision(&self, decision: &Decision<'_>);
}

impl<F> BuildObserver for F
where
    F: Fn(&Decision<'_>) + Send + Sync,
{
    fn on_decision(&self, decision: &Decision<'_>) {
        self(decision)
    }
}

/// Ignores all decisions
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {
    fn on_decision(&self, _decision: &Decision<'_>) {}
}

/// Emits each decision as a `tracing` debug event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BuildObserver for TracingObserver {
    fn on_decision(&self, decision: &Decision<'_>) {
        match decision {
            Decision::Segmented { path, segments } => {
                tracing::debug!(path, ?segments, "segmented path");
            }
            Decision::TooFewSegments { count } => {
                tracing::debug!(count, "too few relevant segments, home only");
            }
            Decision::NotAModulePath {
                module_segment,
                page_segment,
            } => {
                tracing::debug!(module_segment, page_segment, "not a module page, home only");
            }
            Decision::FileIdentifier { file_id } => {
                tracing::debug!(file_id, "file identifier");
            }
            Decision::ModuleHome { module } => {
                tracing::debug!(module, "module home page");
            }
            Decision::SubPage { module, page } => {
                tracing::debug!(module, page, "sub-page");
            }
            Decision::Completed { shape, len } => {
                tracing::debug!(?shape, len, "trail built");
            }
        }
    }
}

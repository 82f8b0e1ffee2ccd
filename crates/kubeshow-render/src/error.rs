//! Error types for kubeshow-render

use miette::Diagnostic;
use thiserror::Error;

/// Result type for kubeshow-render operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Boxed collaborator error (chart source, template engine)
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while rendering, selecting or emitting manifests
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum RenderError {
    /// Chart type does not permit installation
    #[error("chart '{chart}' is of type '{chart_type}' and is not installable")]
    #[diagnostic(
        code(kubeshow::render::not_installable),
        help("only charts of type 'application' (or with no type) can be installed")
    )]
    NotInstallable { chart: String, chart_type: String },

    /// Declared dependencies are not present among the fetched charts
    #[error("chart '{chart}' is missing dependencies: {}", .missing.join(", "))]
    #[diagnostic(
        code(kubeshow::render::missing_dependencies),
        help("fetch dependencies before rendering (populate the chart's charts/ directory)")
    )]
    MissingDependencies { chart: String, missing: Vec<String> },

    /// The chart source could not provide the chart
    #[error("failed to fetch chart '{chart}'")]
    #[diagnostic(code(kubeshow::render::fetch))]
    FetchFailure {
        chart: String,
        #[source]
        source: BoxError,
    },

    /// The template engine failed
    #[error("failed to render chart '{chart}'")]
    #[diagnostic(code(kubeshow::render::template))]
    RenderFailure {
        chart: String,
        #[source]
        source: BoxError,
    },

    /// A selector matched no rendered document
    #[error("could not find template {pattern} in chart")]
    #[diagnostic(
        code(kubeshow::render::selector_not_found),
        help("selectors are matched against paths relative to the chart root, e.g. templates/deployment.yaml")
    )]
    SelectorNotFound { pattern: String },

    /// A selector is not a valid glob
    #[error("invalid selector '{pattern}': {message}")]
    #[diagnostic(code(kubeshow::render::invalid_selector))]
    InvalidSelector { pattern: String, message: String },

    /// Only dry-run rendering is supported
    #[error("rendering requires dry-run mode")]
    #[diagnostic(
        code(kubeshow::render::dry_run_required),
        help("this tool never installs; set dry_run to true")
    )]
    DryRunRequired,

    /// A document path would escape the output directory
    #[error("refusing to write '{path}' outside the output directory")]
    #[diagnostic(code(kubeshow::render::unsafe_path))]
    UnsafeOutputPath { path: String },

    /// IO error while writing output
    #[error("failed to write {path}")]
    #[diagnostic(code(kubeshow::render::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// Whether the error was caused by user-supplied selectors
    pub fn is_selector_error(&self) -> bool {
        matches!(
            self,
            RenderError::SelectorNotFound { .. } | RenderError::InvalidSelector { .. }
        )
    }
}

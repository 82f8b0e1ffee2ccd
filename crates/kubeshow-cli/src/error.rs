//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use miette::Diagnostic;
use thiserror::Error;

use kubeshow_core::CoreError;
use kubeshow_render::RenderError;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// A selector was invalid or matched nothing
    #[error("{message}")]
    #[diagnostic(code(kubeshow::cli::selector))]
    Selector {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Template rendering failed
    #[error("Template error: {message}")]
    #[diagnostic(code(kubeshow::cli::template))]
    Template {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Chart could not be used
    #[error("Chart error: {message}")]
    #[diagnostic(code(kubeshow::cli::chart))]
    Chart {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(kubeshow::cli::io))]
    Io { message: String },

    /// Anything else
    #[error("{message}")]
    #[diagnostic(code(kubeshow::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Selector { .. } => exit_codes::SELECTOR_ERROR,
            CliError::Template { .. } => exit_codes::TEMPLATE_ERROR,
            CliError::Chart { .. } => exit_codes::CHART_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    /// Create a chart error
    pub fn chart(message: impl Into<String>) -> Self {
        Self::Chart {
            message: message.into(),
            help: None,
        }
    }
}

/// Render an error with its source chain on one line
fn with_sources(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl From<RenderError> for CliError {
    fn from(err: RenderError) -> Self {
        let message = with_sources(&err);
        let help = err.help().map(|h| h.to_string());

        if err.is_selector_error() {
            return CliError::Selector { message, help };
        }

        match err {
            RenderError::RenderFailure { .. } => CliError::Template { message, help },
            RenderError::NotInstallable { .. }
            | RenderError::MissingDependencies { .. }
            | RenderError::FetchFailure { .. } => CliError::Chart { message, help },
            RenderError::Io { .. } | RenderError::UnsafeOutputPath { .. } => {
                CliError::Io { message }
            }
            _ => CliError::Other { message },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io(e) => CliError::Io {
                message: e.to_string(),
            },
            other => CliError::chart(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

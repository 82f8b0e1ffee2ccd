//! Kubeshow Core - data model for dry-run chart rendering
//!
//! This crate provides the types exchanged between the render pipeline and
//! its collaborators:
//! - `Chart`: chart metadata and declared dependencies
//! - `RenderedOutput`: the template engine's output (manifest body + hooks)
//! - `Values`: merged values handed to the template engine
//! - `RenderOptions`: immutable per-call options

pub mod chart;
pub mod error;
pub mod options;
pub mod release;
pub mod values;

pub use chart::{Chart, ChartRef, Dependency, LoadedChart};
pub use error::{CoreError, Result};
pub use options::{DEFAULT_NAMESPACE, DEFAULT_RELEASE_NAME, RenderOptions};
pub use release::{Hook, HookEvent, ReleaseContext, RenderedOutput};
pub use values::Values;

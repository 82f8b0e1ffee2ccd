//! Kubeshow Render - dry-run manifest pipeline
//!
//! Turns a template engine's output into an ordered, selectable set of
//! documents:
//! - **Checks**: chart installability and dependency presence (`gate`)
//! - **Hooks**: test-hook filtering (`hooks`) and blob assembly (`assemble`)
//! - **Splitting**: `# Source:` boundary scanning (`split`, `source`)
//! - **Ordering**: kind precedence as data (`order`)
//! - **Selection**: path and glob selectors (`select`)
//! - **Emission**: stream and file output (`sink`)

pub mod assemble;
pub mod error;
pub mod gate;
pub mod hooks;
pub mod local;
pub mod order;
pub mod renderer;
pub mod select;
pub mod sink;
pub mod source;
pub mod split;

pub use assemble::{ManifestBlob, assemble};
pub use error::{RenderError, Result};
pub use gate::{check_dependencies, check_installable};
pub use hooks::filter_hooks;
pub use local::{LocalChartSource, RenderedFile};
pub use order::{KindCategory, KindMatcher, OrderTable, OrderedDocumentSet};
pub use renderer::{ChartSource, FetchedChart, Rendered, Renderer, TemplateEngine, process};
pub use select::{Selector, select};
pub use sink::{FileSink, write_documents, write_stream};
pub use split::{DocumentKey, DocumentOrigin, SplitDocument, SplitManifests, split_manifests};

//! Rendered release types
//!
//! These are the values handed over by the template engine: the primary
//! manifest body and the lifecycle hooks that were rendered alongside it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Lifecycle event a hook is attached to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[non_exhaustive]
pub enum HookEvent {
    PreInstall,
    PostInstall,
    PreDelete,
    PostDelete,
    PreUpgrade,
    PostUpgrade,
    PreRollback,
    PostRollback,
    /// Test hooks (run on demand)
    Test,
    /// Legacy spelling of `test`
    TestSuccess,
    /// Any tag the renderer emits that we do not know about
    Other(String),
}

impl HookEvent {
    /// Is this a test event?
    pub fn is_test(&self) -> bool {
        matches!(self, HookEvent::Test | HookEvent::TestSuccess)
    }

    pub fn as_str(&self) -> &str {
        match self {
            HookEvent::PreInstall => "pre-install",
            HookEvent::PostInstall => "post-install",
            HookEvent::PreDelete => "pre-delete",
            HookEvent::PostDelete => "post-delete",
            HookEvent::PreUpgrade => "pre-upgrade",
            HookEvent::PostUpgrade => "post-upgrade",
            HookEvent::PreRollback => "pre-rollback",
            HookEvent::PostRollback => "post-rollback",
            HookEvent::Test => "test",
            HookEvent::TestSuccess => "test-success",
            HookEvent::Other(s) => s,
        }
    }
}

impl From<&str> for HookEvent {
    fn from(s: &str) -> Self {
        match s.trim() {
            "pre-install" => HookEvent::PreInstall,
            "post-install" => HookEvent::PostInstall,
            "pre-delete" => HookEvent::PreDelete,
            "post-delete" => HookEvent::PostDelete,
            "pre-upgrade" => HookEvent::PreUpgrade,
            "post-upgrade" => HookEvent::PostUpgrade,
            "pre-rollback" => HookEvent::PreRollback,
            "post-rollback" => HookEvent::PostRollback,
            "test" => HookEvent::Test,
            "test-success" => HookEvent::TestSuccess,
            other => HookEvent::Other(other.to_string()),
        }
    }
}

impl From<String> for HookEvent {
    fn from(s: String) -> Self {
        HookEvent::from(s.as_str())
    }
}

impl From<HookEvent> for String {
    fn from(event: HookEvent) -> Self {
        event.as_str().to_string()
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered lifecycle hook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    /// Resource name of the hook
    #[serde(default)]
    pub name: String,

    /// Template path the hook was rendered from (`<chart>/templates/...`)
    pub path: String,

    /// Rendered manifest
    #[serde(default)]
    pub manifest: String,

    /// Events this hook is attached to
    #[serde(default)]
    pub events: Vec<HookEvent>,
}

impl Hook {
    pub fn new(path: impl Into<String>, manifest: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            path: path.into(),
            manifest: manifest.into(),
            events: Vec::new(),
        }
    }

    /// Builder-style event attachment
    pub fn with_event(mut self, event: impl Into<HookEvent>) -> Self {
        self.events.push(event.into());
        self
    }

    /// Whether any of the hook's events is a test event
    pub fn is_test(&self) -> bool {
        self.events.iter().any(HookEvent::is_test)
    }
}

/// Output of one template-render invocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedOutput {
    /// Primary manifest body (multi-document YAML)
    #[serde(default)]
    pub manifest: String,

    /// Rendered hooks, in renderer order
    #[serde(default)]
    pub hooks: Vec<Hook>,
}

impl RenderedOutput {
    pub fn new(manifest: impl Into<String>) -> Self {
        Self {
            manifest: manifest.into(),
            hooks: Vec::new(),
        }
    }

    pub fn with_hook(mut self, hook: Hook) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Parse a serialized render result
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a serialized render result from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }
}

/// Release information handed to the template engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseContext {
    /// Release name
    pub name: String,

    /// Target namespace
    pub namespace: String,

    /// Revision number
    pub revision: u32,

    /// Is this an install operation?
    pub is_install: bool,

    /// Render without consulting a cluster for capabilities
    #[serde(default)]
    pub client_only: bool,

    /// Extra API versions the renderer may assume are available
    #[serde(default)]
    pub api_versions: Vec<String>,
}

impl ReleaseContext {
    /// Create release info for a new install
    pub fn for_install(name: &str, namespace: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            revision: 1,
            is_install: true,
            client_only: false,
            api_versions: Vec::new(),
        }
    }
}

//! Render options

use serde::{Deserialize, Serialize};

use crate::release::ReleaseContext;

/// Default namespace for rendered resources
pub const DEFAULT_NAMESPACE: &str = "default";

/// Default release name used for previews
pub const DEFAULT_RELEASE_NAME: &str = "release-name";

/// Options for a single render call
///
/// Built once by the caller and passed by reference; nothing in the pipeline
/// reads process-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Drop hooks tagged with the `test` event
    pub skip_tests: bool,

    /// Leave hooks out of the combined manifest entirely
    pub disable_hooks: bool,

    /// Target namespace
    pub namespace: String,

    /// Release name
    pub release_name: String,

    /// Render without touching a cluster (always required)
    pub dry_run: bool,

    /// Do not consult a cluster for capabilities
    pub client_only: bool,

    /// Extra API versions to advertise to the template engine
    pub api_versions: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            skip_tests: false,
            disable_hooks: false,
            namespace: DEFAULT_NAMESPACE.to_string(),
            release_name: DEFAULT_RELEASE_NAME.to_string(),
            dry_run: true,
            client_only: true,
            api_versions: Vec::new(),
        }
    }
}

impl RenderOptions {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_release_name(mut self, name: impl Into<String>) -> Self {
        self.release_name = name.into();
        self
    }

    pub fn skip_tests(mut self, skip: bool) -> Self {
        self.skip_tests = skip;
        self
    }

    pub fn disable_hooks(mut self, disable: bool) -> Self {
        self.disable_hooks = disable;
        self
    }

    /// Release information derived from these options
    pub fn release_context(&self) -> ReleaseContext {
        let mut ctx = ReleaseContext::for_install(&self.release_name, &self.namespace);
        ctx.client_only = self.client_only;
        ctx.api_versions = self.api_versions.clone();
        ctx
    }
}

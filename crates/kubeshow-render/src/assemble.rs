//! Combine the primary manifest and hooks into one blob

use std::fmt;

use kubeshow_core::Hook;

/// Separator line that opens every document
pub const DOCUMENT_SEPARATOR: &str = "---";

/// Prefix of the comment line naming a document's template
pub const SOURCE_PREFIX: &str = "# Source:";

/// The concatenated manifest: primary body followed by hook documents
///
/// Tracks where the hook documents begin so that later stages can tell the
/// two regions apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestBlob {
    text: String,
    hooks_start: usize,
}

impl ManifestBlob {
    /// Wrap already-assembled text that has no hook region
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let hooks_start = text.len();
        Self { text, hooks_start }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Byte offset at which hook documents begin
    pub fn hooks_start(&self) -> usize {
        self.hooks_start
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl AsRef<str> for ManifestBlob {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ManifestBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render one document record: `---\n# Source: <source>\n<body>\n`
pub fn source_record(source: &str, body: &str) -> String {
    format!("{DOCUMENT_SEPARATOR}\n{SOURCE_PREFIX} {source}\n{body}\n")
}

/// Build the manifest blob
///
/// The body is trimmed and newline-terminated (an empty body contributes
/// nothing). Unless `disable_hooks` is set, each hook follows as its own
/// source-tagged record, in the order given.
pub fn assemble<'a, I>(body: &str, hooks: I, disable_hooks: bool) -> ManifestBlob
where
    I: IntoIterator<Item = &'a Hook>,
{
    let mut text = String::new();

    let body = body.trim();
    if !body.is_empty() {
        text.push_str(body);
        text.push('\n');
    }

    let hooks_start = text.len();
    if !disable_hooks {
        for hook in hooks {
            text.push_str(&source_record(&hook.path, &hook.manifest));
        }
    }

    ManifestBlob { text, hooks_start }
}

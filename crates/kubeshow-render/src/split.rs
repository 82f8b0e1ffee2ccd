//! Split a manifest blob into source-tagged documents
//!
//! A document boundary is a `---` line immediately followed by a
//! `# Source:` line. Everything up to the next boundary belongs to the
//! document, including any inner `---` lines that are not followed by a
//! source header. Text before the first boundary forms a document of its
//! own, so concatenating all documents in key order gives back the blob
//! byte for byte.

use std::collections::BTreeMap;
use std::fmt;

use crate::assemble::{DOCUMENT_SEPARATOR, ManifestBlob};
use crate::source::{logical_path, source_value, strip_line_ending};

/// Position of a document inside its blob
///
/// Keys are unique per blob even when several documents share a source path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentKey(usize);

impl DocumentKey {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "manifest-{}", self.0)
    }
}

/// Which part of the blob a document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOrigin {
    /// Primary manifest body
    Body,
    /// Hook section appended after the body
    Hook,
}

/// One document of a manifest blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDocument {
    key: DocumentKey,
    source: Option<String>,
    path: Option<String>,
    kind: Option<String>,
    origin: DocumentOrigin,
    text: String,
}

impl SplitDocument {
    fn new(key: DocumentKey, text: &str, origin: DocumentOrigin, opened_by: Option<&str>) -> Self {
        let source = opened_by
            .or_else(|| text.split_inclusive('\n').find_map(source_value))
            .map(str::to_string);
        let path = source.as_deref().and_then(logical_path);
        if source.is_none() || path.is_none() {
            tracing::debug!(%key, source = ?source, "document has no usable source header");
        }

        Self {
            key,
            path,
            source,
            kind: top_level_kind(text),
            origin,
            text: text.to_string(),
        }
    }

    pub fn key(&self) -> DocumentKey {
        self.key
    }

    /// Raw header value (`<chart>/<path>`)
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Normalized path after the chart name; `None` for malformed headers
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Top-level `kind:` of the document, if any
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn origin(&self) -> DocumentOrigin {
        self.origin
    }

    pub fn is_hook(&self) -> bool {
        self.origin == DocumentOrigin::Hook
    }

    /// Exact text as it appeared in the blob, separator line included
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Document without its leading `---` line, trimmed
    pub fn content(&self) -> &str {
        let mut lines = self.text.split_inclusive('\n');
        match lines.next() {
            Some(first) if is_separator(first) => self.text[first.len()..].trim(),
            _ => self.text.trim(),
        }
    }

    /// Document body without the separator and source header lines, trimmed
    pub fn body(&self) -> &str {
        let content = self.content();
        match content.split_once('\n') {
            Some((first, rest)) if source_value(first).is_some() => rest.trim(),
            None if source_value(content).is_some() => "",
            _ => content,
        }
    }
}

/// Documents of one blob, keyed by position
pub type SplitManifests = BTreeMap<DocumentKey, SplitDocument>;

#[derive(Debug, Clone, Copy)]
enum ScanState {
    /// Inside a document (or the text before the first boundary)
    InDocument,
    /// A `---` line started at `offset`; the next line decides whether it
    /// opens a new document
    AfterSeparator { offset: usize },
}

/// Split a blob into documents
pub fn split_manifests(blob: &ManifestBlob) -> SplitManifests {
    let text = blob.as_str();
    let mut docs = SplitManifests::new();
    let mut state = ScanState::InDocument;
    let mut start = 0;
    let mut opened_by: Option<&str> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if let ScanState::AfterSeparator { offset: sep } = state {
            if let Some(source) = source_value(line) {
                if sep > start {
                    push(&mut docs, blob, start, sep, opened_by);
                }
                start = sep;
                opened_by = Some(source);
            }
        }

        state = if is_separator(line) {
            ScanState::AfterSeparator { offset }
        } else {
            ScanState::InDocument
        };
        offset += line.len();
    }

    if text.len() > start {
        push(&mut docs, blob, start, text.len(), opened_by);
    }

    docs
}

fn push(
    docs: &mut SplitManifests,
    blob: &ManifestBlob,
    start: usize,
    end: usize,
    opened_by: Option<&str>,
) {
    let key = DocumentKey(docs.len());
    let origin = if start >= blob.hooks_start() {
        DocumentOrigin::Hook
    } else {
        DocumentOrigin::Body
    };
    let doc = SplitDocument::new(key, &blob.as_str()[start..end], origin, opened_by);
    docs.insert(key, doc);
}

fn is_separator(line: &str) -> bool {
    strip_line_ending(line).trim_end() == DOCUMENT_SEPARATOR
}

/// First unindented `kind:` line of a document
fn top_level_kind(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let value = line.strip_prefix("kind:")?.trim();
        let value = value.trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}

//! Emit rendered documents to a stream or to files

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::assemble::{DOCUMENT_SEPARATOR, ManifestBlob, source_record};
use crate::error::{RenderError, Result};
use crate::split::SplitDocument;

/// Write output to a stream
///
/// Without a selection the blob is written verbatim. With one, each
/// selected document is written after a fresh `---` line.
pub fn write_stream<W: Write>(
    out: &mut W,
    blob: &ManifestBlob,
    selected: Option<&[&SplitDocument]>,
) -> std::io::Result<()> {
    match selected {
        None => out.write_all(blob.as_str().as_bytes()),
        Some(docs) => write_documents(out, docs.iter().copied()),
    }
}

/// Write documents, each preceded by `---`
pub fn write_documents<'a, W, I>(out: &mut W, docs: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a SplitDocument>,
{
    for doc in docs {
        writeln!(out, "{DOCUMENT_SEPARATOR}\n{}", doc.content())?;
    }
    Ok(())
}

/// Writes documents under an output directory, one file per document path
#[derive(Debug, Clone)]
pub struct FileSink {
    output_dir: PathBuf,
}

impl FileSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Destination of a document, or `None` if it has no usable path
    pub fn destination(&self, doc: &SplitDocument) -> Result<Option<PathBuf>> {
        let Some(path) = doc.path() else {
            return Ok(None);
        };

        let relative = Path::new(path);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !safe {
            return Err(RenderError::UnsafeOutputPath {
                path: path.to_string(),
            });
        }

        Ok(Some(self.output_dir.join(relative)))
    }

    /// Write one document record, creating or appending as requested
    ///
    /// Returns the file written, or `None` for documents without a path.
    pub fn write_document(&self, doc: &SplitDocument, append: bool) -> Result<Option<PathBuf>> {
        let Some(dest) = self.destination(doc)? else {
            tracing::warn!(key = %doc.key(), "skipping document without a source path");
            return Ok(None);
        };

        ensure_parent_dir(&dest)?;

        let source = doc.source().unwrap_or_default();
        let record = source_record(source, doc.body());

        let mut file = open_output(&dest, append).map_err(|e| io_error(&dest, e))?;
        file.write_all(record.as_bytes())
            .map_err(|e| io_error(&dest, e))?;

        tracing::info!(path = %dest.display(), append, "wrote manifest");
        Ok(Some(dest))
    }

    /// Write a batch of documents
    ///
    /// The first document for a destination creates (truncates) the file;
    /// later documents with the same path are appended.
    pub fn write_all<'a, I>(&self, docs: I) -> Result<Vec<PathBuf>>
    where
        I: IntoIterator<Item = &'a SplitDocument>,
    {
        let mut seen = HashSet::new();
        let mut written = Vec::new();

        for doc in docs {
            let append = doc.path().is_some_and(|p| !seen.insert(p.to_string()));
            if let Some(dest) = self.write_document(doc, append)? {
                written.push(dest);
            }
        }

        Ok(written)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn ensure_parent_dir(file: &Path) -> Result<()> {
    let Some(parent) = file.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(parent).map_err(|e| io_error(parent, e))
}

fn open_output(path: &Path, append: bool) -> std::io::Result<fs::File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true);
    if append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

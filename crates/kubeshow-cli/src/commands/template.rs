//! Template command - render chart manifests locally

use console::style;
use std::io::{self, Write};
use std::path::Path;

use kubeshow_core::{RenderOptions, Values};
use kubeshow_render::{FileSink, LocalChartSource, RenderedFile, Renderer, SplitDocument, write_stream};

use crate::error::Result;

pub fn run(
    chart_path: &Path,
    rendered_path: &Path,
    options: &RenderOptions,
    show_only: &[String],
    output_dir: Option<&Path>,
) -> Result<()> {
    let source = LocalChartSource::new(chart_path);
    let chart_ref = source.chart_ref()?;

    tracing::debug!(chart = %chart_ref, path = %chart_path.display(), "loaded chart");

    let renderer = Renderer::new(source, RenderedFile::new(rendered_path));
    let rendered = renderer.render(&chart_ref, &Values::new(), options)?;

    let selected = if show_only.is_empty() {
        None
    } else {
        Some(rendered.select(show_only)?)
    };

    match output_dir {
        Some(dir) => {
            let docs: Vec<&SplitDocument> =
                selected.unwrap_or_else(|| rendered.documents.iter().collect());

            let sink = FileSink::new(dir);
            for path in sink.write_all(docs)? {
                println!("{} {}", style("wrote").green(), path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_stream(&mut out, &rendered.blob, selected.as_deref())?;
            out.flush()?;
        }
    }

    Ok(())
}

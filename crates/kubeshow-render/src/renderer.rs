//! Render entry point
//!
//! A [`Renderer`] ties the pipeline to its two collaborators: a
//! [`ChartSource`] that provides the chart and the dependencies already
//! fetched for it, and a [`TemplateEngine`] that turns chart + values into a
//! [`RenderedOutput`]. Everything after the engine is a pure transform.

use kubeshow_core::{Chart, ChartRef, ReleaseContext, RenderOptions, RenderedOutput, Values};

use crate::assemble::{ManifestBlob, assemble};
use crate::error::{BoxError, RenderError, Result};
use crate::gate::{check_dependencies, check_installable};
use crate::hooks::filter_hooks;
use crate::order::{OrderTable, OrderedDocumentSet};
use crate::select::select;
use crate::split::{SplitDocument, split_manifests};

/// A chart together with the names of the dependency charts available for it
#[derive(Debug, Clone)]
pub struct FetchedChart {
    pub chart: Chart,
    pub available_dependencies: Vec<String>,
}

/// Provides charts by reference
pub trait ChartSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch(&self, chart: &ChartRef) -> std::result::Result<FetchedChart, Self::Error>;
}

/// Expands chart templates
pub trait TemplateEngine {
    type Error: std::error::Error + Send + Sync + 'static;

    fn render(
        &self,
        chart: &Chart,
        values: &Values,
        release: &ReleaseContext,
    ) -> std::result::Result<RenderedOutput, Self::Error>;
}

/// Result of one render call
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Chart that was rendered
    pub chart: Chart,
    /// Combined manifest, exactly as assembled
    pub blob: ManifestBlob,
    /// Documents of the blob in canonical order
    pub documents: OrderedDocumentSet,
}

impl Rendered {
    /// Select documents by path or glob
    pub fn select<S: AsRef<str>>(&self, patterns: &[S]) -> Result<Vec<&SplitDocument>> {
        select(&self.documents, patterns)
    }
}

/// Dry-run renderer
#[derive(Debug, Clone)]
pub struct Renderer<S, E> {
    source: S,
    engine: E,
    order: OrderTable,
}

impl<S, E> Renderer<S, E>
where
    S: ChartSource,
    E: TemplateEngine,
{
    pub fn new(source: S, engine: E) -> Self {
        Self {
            source,
            engine,
            order: OrderTable::default(),
        }
    }

    /// Use a custom kind precedence
    pub fn with_order_table(mut self, order: OrderTable) -> Self {
        self.order = order;
        self
    }

    /// Fetch, check, render and post-process a chart
    pub fn render(
        &self,
        chart_ref: &ChartRef,
        values: &Values,
        options: &RenderOptions,
    ) -> Result<Rendered> {
        if !options.dry_run {
            return Err(RenderError::DryRunRequired);
        }

        let fetched = self
            .source
            .fetch(chart_ref)
            .map_err(|e| RenderError::FetchFailure {
                chart: chart_ref.to_string(),
                source: Box::new(e) as BoxError,
            })?;

        check_installable(&fetched.chart)?;
        check_dependencies(&fetched.chart, &fetched.available_dependencies)?;

        tracing::debug!(
            chart = %fetched.chart.name,
            version = %fetched.chart.version,
            namespace = %options.namespace,
            "rendering chart"
        );

        let output = self
            .engine
            .render(&fetched.chart, values, &options.release_context())
            .map_err(|e| RenderError::RenderFailure {
                chart: fetched.chart.name.clone(),
                source: Box::new(e) as BoxError,
            })?;

        let (blob, documents) = process(&output, options, &self.order);
        Ok(Rendered {
            chart: fetched.chart,
            blob,
            documents,
        })
    }
}

/// Post-process a render result: filter hooks, assemble, split and order
pub fn process(
    output: &RenderedOutput,
    options: &RenderOptions,
    order: &OrderTable,
) -> (ManifestBlob, OrderedDocumentSet) {
    let hooks = filter_hooks(&output.hooks, options.skip_tests);
    let blob = assemble(&output.manifest, hooks, options.disable_hooks);
    let documents = order.sort(split_manifests(&blob).into_values());

    tracing::debug!(
        documents = documents.len(),
        malformed = documents.malformed().count(),
        "split rendered manifest"
    );

    (blob, documents)
}

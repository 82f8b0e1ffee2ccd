//! Filesystem-backed collaborators
//!
//! [`LocalChartSource`] reads a chart directory with its vendored `charts/`;
//! [`RenderedFile`] loads the output of a template engine that ran out of
//! process and serialized its result as YAML.

use std::path::{Path, PathBuf};

use kubeshow_core::{
    Chart, ChartRef, CoreError, LoadedChart, ReleaseContext, RenderedOutput, Values,
};

use crate::renderer::{ChartSource, FetchedChart, TemplateEngine};

/// Chart source for an unpacked chart directory
#[derive(Debug, Clone)]
pub struct LocalChartSource {
    root: PathBuf,
}

impl LocalChartSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reference describing the chart at this location
    pub fn chart_ref(&self) -> Result<ChartRef, CoreError> {
        let loaded = LoadedChart::load(&self.root)?;
        Ok(ChartRef::new(
            self.root.display().to_string(),
            loaded.chart.name,
            loaded.chart.version.to_string(),
        ))
    }
}

impl ChartSource for LocalChartSource {
    type Error = CoreError;

    fn fetch(&self, chart: &ChartRef) -> Result<FetchedChart, CoreError> {
        let loaded = LoadedChart::load(&self.root)?;

        if !chart.name.is_empty() && chart.name != loaded.chart.name {
            return Err(CoreError::InvalidChart {
                message: format!(
                    "expected chart '{}' but {} contains '{}'",
                    chart.name,
                    self.root.display(),
                    loaded.chart.name
                ),
            });
        }
        if !chart.version.is_empty()
            && chart.version.trim_start_matches('v') != loaded.chart.version.to_string()
        {
            return Err(CoreError::InvalidChart {
                message: format!(
                    "expected version {} of '{}' but found {}",
                    chart.version, chart.name, loaded.chart.version
                ),
            });
        }

        Ok(FetchedChart {
            chart: loaded.chart,
            available_dependencies: loaded.available_dependencies,
        })
    }
}

/// Template engine stand-in that returns a previously serialized render
#[derive(Debug, Clone)]
pub struct RenderedFile {
    path: PathBuf,
}

impl RenderedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemplateEngine for RenderedFile {
    type Error = CoreError;

    fn render(
        &self,
        _chart: &Chart,
        _values: &Values,
        release: &ReleaseContext,
    ) -> Result<RenderedOutput, CoreError> {
        tracing::debug!(
            path = %self.path.display(),
            release = %release.name,
            client_only = release.client_only,
            "loading rendered output"
        );
        RenderedOutput::from_file(&self.path)
    }
}

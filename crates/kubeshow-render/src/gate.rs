//! Pre-render checks on a fetched chart

use std::collections::HashSet;

use kubeshow_core::Chart;

use crate::error::{RenderError, Result};

/// Chart type that may be installed (an empty type means the same)
pub const APPLICATION_TYPE: &str = "application";

/// Fail unless the chart's type permits installation
pub fn check_installable(chart: &Chart) -> Result<()> {
    match chart.chart_type.as_str() {
        "" | APPLICATION_TYPE => Ok(()),
        other => Err(RenderError::NotInstallable {
            chart: chart.name.clone(),
            chart_type: other.to_string(),
        }),
    }
}

/// Fail unless every declared dependency is among `available`
///
/// Purely structural: nothing is fetched or resolved here. All missing
/// names are reported, in declaration order.
pub fn check_dependencies<S: AsRef<str>>(chart: &Chart, available: &[S]) -> Result<()> {
    let present: HashSet<&str> = available.iter().map(AsRef::as_ref).collect();

    let missing: Vec<String> = chart
        .dependency_names()
        .filter(|name| !present.contains(name))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RenderError::MissingDependencies {
            chart: chart.name.clone(),
            missing,
        })
    }
}

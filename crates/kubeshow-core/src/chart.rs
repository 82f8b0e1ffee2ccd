//! Chart definition and loading

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// File holding chart metadata at the chart root
pub const CHART_FILE: &str = "Chart.yaml";

/// Directory holding already-fetched dependency charts
pub const DEPENDENCIES_DIR: &str = "charts";

/// Reference to a chart in a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRef {
    /// Repository URL (or local directory for on-disk charts)
    pub repository: String,

    /// Chart name
    pub name: String,

    /// Chart version
    pub version: String,
}

impl ChartRef {
    pub fn new(
        repository: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ChartRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}-{}", self.name, self.version)
        }
    }
}

/// Chart metadata as declared in `Chart.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    /// Chart API version (v1 or v2)
    #[serde(default)]
    pub api_version: String,

    /// Chart name (required)
    pub name: String,

    /// Chart version (required, SemVer)
    #[serde(with = "version_serde")]
    pub version: Version,

    /// Chart type tag. Empty and `application` are installable.
    #[serde(rename = "type", default)]
    pub chart_type: String,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Application version
    #[serde(default)]
    pub app_version: Option<String>,

    /// Declared dependencies
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Chart {
    /// Names of all declared dependencies, in declaration order
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(|d| d.name.as_str())
    }
}

/// Chart dependency
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    /// Dependency chart name
    pub name: String,

    /// Version constraint (semver range)
    #[serde(default)]
    pub version: String,

    /// Repository URL
    #[serde(default)]
    pub repository: String,

    /// Alias name (overrides dependency name in templates)
    #[serde(default)]
    pub alias: Option<String>,
}

/// Chart loaded from disk, together with the dependencies already vendored
/// under its `charts/` directory
#[derive(Debug, Clone)]
pub struct LoadedChart {
    /// Chart metadata
    pub chart: Chart,

    /// Root directory of the chart
    pub root: PathBuf,

    /// Names of dependency charts present under `charts/`
    pub available_dependencies: Vec<String>,
}

impl LoadedChart {
    /// Load a chart from a directory
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = path.as_ref().to_path_buf();

        if !root.is_dir() {
            return Err(CoreError::ChartNotFound {
                path: root.display().to_string(),
            });
        }

        let chart_file = root.join(CHART_FILE);
        if !chart_file.exists() {
            return Err(CoreError::InvalidChart {
                message: format!("{} not found in {}", CHART_FILE, root.display()),
            });
        }

        let content = std::fs::read_to_string(&chart_file)?;
        let chart: Chart = serde_yaml::from_str(&content)?;

        if chart.name.trim().is_empty() {
            return Err(CoreError::MissingField {
                field: "name".to_string(),
            });
        }

        let available_dependencies = Self::scan_dependencies(&root.join(DEPENDENCIES_DIR))?;

        Ok(Self {
            chart,
            root,
            available_dependencies,
        })
    }

    /// List the dependency charts vendored in `dir`
    ///
    /// Unpacked charts are named by their own `Chart.yaml` (falling back to
    /// the directory name); archives are named by their file stem with any
    /// trailing `-<version>` removed.
    fn scan_dependencies(dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();

        if !dir.is_dir() {
            return Ok(names);
        }

        for entry in walkdir::WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| CoreError::InvalidChart {
                message: format!("failed to read {}: {}", dir.display(), e),
            })?;
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy();

            if path.is_dir() {
                let nested = path.join(CHART_FILE);
                let name = match std::fs::read_to_string(&nested) {
                    Ok(content) => serde_yaml::from_str::<Chart>(&content)?.name,
                    Err(_) => file_name.into_owned(),
                };
                names.push(name);
            } else if let Some(stem) = file_name.strip_suffix(".tgz") {
                names.push(archive_chart_name(stem).to_string());
            }
        }

        Ok(names)
    }
}

/// Strip a trailing `-<semver>` from an archive stem (`redis-17.3.2` -> `redis`)
fn archive_chart_name(stem: &str) -> &str {
    let mut split_at = None;
    for (idx, _) in stem.match_indices('-') {
        if Version::parse(&stem[idx + 1..]).is_ok() {
            split_at = Some(idx);
            break;
        }
    }
    match split_at {
        Some(idx) => &stem[..idx],
        None => stem,
    }
}

mod version_serde {
    use semver::Version;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(version: &Version, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&version.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Version, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Version::parse(s.trim_start_matches('v')).map_err(serde::de::Error::custom)
    }
}

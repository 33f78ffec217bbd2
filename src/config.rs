use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`DashboardConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "RECLAMEAQUI_DATA_DIR";

/// Number of histogram bins used by the text-length view.
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

// ---------------------------------------------------------------------------
// Source files
// ---------------------------------------------------------------------------

/// One CSV export and the company its rows belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub company: String,
    pub file: PathBuf,
}

impl SourceFile {
    pub fn new(company: &str, file: &str) -> Self {
        SourceFile {
            company: company.to_string(),
            file: PathBuf::from(file),
        }
    }
}

/// The three exports the dashboard ships with.
pub fn default_sources() -> Vec<SourceFile> {
    vec![
        SourceFile::new("Hapvida", "RECLAMEAQUI_HAPVIDA.csv"),
        SourceFile::new("Ibyte", "RECLAMEAQUI_IBYTE.csv"),
        SourceFile::new("Nagem", "RECLAMEAQUI_NAGEM.csv"),
    ]
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup configuration. Every field has a default, so an empty JSON
/// object is a valid config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory the source files are resolved against.
    pub data_dir: PathBuf,
    /// Sources in load order.
    pub sources: Vec<SourceFile>,
    pub histogram_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_dir: PathBuf::from("."),
            sources: default_sources(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for this run: an optional JSON file,
    /// then the data directory override from the environment.
    pub fn resolve(config_path: Option<&Path>, data_dir_override: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(dir) = data_dir_override {
            log::debug!("data_dir overridden by {DATA_DIR_ENV}: {}", dir.display());
            config.data_dir = dir;
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            bail!("config lists no source files");
        }
        if self.histogram_bins == 0 {
            bail!("histogram_bins must be greater than zero");
        }
        Ok(())
    }

    /// Full path of a source file.
    pub fn source_path(&self, source: &SourceFile) -> PathBuf {
        self.data_dir.join(&source.file)
    }
}

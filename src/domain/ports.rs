use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Loads a checkpoint and exports it to an interchange format.
///
/// Where the artifact lands is up to the implementation; the returned path
/// is the one it reports.
#[async_trait]
pub trait ModelExporter: Send + Sync {
    async fn export(&self, checkpoint: &Path, format: &str) -> Result<PathBuf>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExporterBackend {
    /// The `yolo` command line shipped with ultralytics.
    #[default]
    Cli,
    /// A Python interpreter with ultralytics importable.
    Python,
}

pub trait ConfigProvider: Send + Sync {
    fn model_dir(&self) -> &str;
    fn input_suffix(&self) -> &str;
    fn exporter_backend(&self) -> ExporterBackend;
    /// Program and leading arguments; empty means the backend default.
    fn exporter_command(&self) -> &[String];
    fn report_path(&self) -> Option<&str>;
    fn fail_on_error(&self) -> bool;
    fn monitoring_enabled(&self) -> bool;
}

pub mod toml_config;

/// Where checkpoints are looked for when nothing else is configured.
pub const DEFAULT_MODEL_DIR: &str = "static/mediapipe";
pub const DEFAULT_INPUT_SUFFIX: &str = ".pt";

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::ports::ExporterBackend;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_command, validate_path, validate_suffix, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "pt2onnx")]
#[command(about = "Batch-convert YOLO .pt checkpoints to ONNX with ultralytics")]
pub struct CliConfig {
    /// Directory containing the checkpoints [default: static/mediapipe]
    #[arg(long, env = "PT2ONNX_MODEL_DIR")]
    pub model_dir: Option<String>,

    /// File name suffix selecting checkpoints [default: .pt]
    #[arg(long)]
    pub suffix: Option<String>,

    /// How ultralytics is invoked [default: cli]
    #[arg(long, value_enum)]
    pub backend: Option<ExporterBackend>,

    /// Exporter program and leading arguments, comma separated
    #[arg(long, value_delimiter = ',')]
    pub command: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write a JSON report of the batch to this path
    #[arg(long)]
    pub report: Option<String>,

    /// Exit with status 2 when any conversion failed
    #[arg(long)]
    pub fail_on_error: bool,

    /// List the checkpoints that would be converted and stop
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log resource usage after each conversion")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Overlay the flags given on the command line onto a file configuration.
    pub fn apply_to(&self, config: &mut toml_config::TomlConfig) {
        if let Some(model_dir) = &self.model_dir {
            config.converter.model_dir = model_dir.clone();
        }
        if let Some(suffix) = &self.suffix {
            config.converter.input_suffix = suffix.clone();
        }
        if let Some(backend) = self.backend {
            config.exporter.backend = backend;
        }
        if !self.command.is_empty() {
            config.exporter.command = self.command.clone();
        }

        let report = config.report.get_or_insert_with(Default::default);
        if let Some(path) = &self.report {
            report.path = Some(path.clone());
        }
        if self.fail_on_error {
            report.fail_on_error = Some(true);
        }

        if self.monitor {
            config.monitoring = Some(toml_config::MonitoringConfig { enabled: true });
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn model_dir(&self) -> &str {
        self.model_dir.as_deref().unwrap_or(DEFAULT_MODEL_DIR)
    }

    fn input_suffix(&self) -> &str {
        self.suffix.as_deref().unwrap_or(DEFAULT_INPUT_SUFFIX)
    }

    fn exporter_backend(&self) -> ExporterBackend {
        self.backend.unwrap_or_default()
    }

    fn exporter_command(&self) -> &[String] {
        &self.command
    }

    fn report_path(&self) -> Option<&str> {
        self.report.as_deref()
    }

    fn fail_on_error(&self) -> bool {
        self.fail_on_error
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("model_dir", self.model_dir())?;
        validate_suffix("suffix", self.input_suffix())?;
        validate_command("command", &self.command)?;
        if let Some(report) = &self.report {
            validate_path("report", report)?;
        }
        Ok(())
    }
}

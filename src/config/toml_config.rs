use crate::config::DEFAULT_INPUT_SUFFIX;
use crate::core::ConfigProvider;
use crate::domain::ports::ExporterBackend;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{validate_command, validate_path, validate_suffix, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub converter: ConverterConfig,
    #[serde(default)]
    pub exporter: ExporterConfig,
    pub report: Option<ReportConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub model_dir: String,
    #[serde(default = "default_input_suffix")]
    pub input_suffix: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    #[serde(default)]
    pub backend: ExporterBackend,
    #[serde(default)]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub path: Option<String>,
    pub fail_on_error: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_input_suffix() -> String {
    DEFAULT_INPUT_SUFFIX.to_string()
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConvertError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConvertError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl ConfigProvider for TomlConfig {
    fn model_dir(&self) -> &str {
        &self.converter.model_dir
    }

    fn input_suffix(&self) -> &str {
        &self.converter.input_suffix
    }

    fn exporter_backend(&self) -> ExporterBackend {
        self.exporter.backend
    }

    fn exporter_command(&self) -> &[String] {
        &self.exporter.command
    }

    fn report_path(&self) -> Option<&str> {
        self.report.as_ref().and_then(|r| r.path.as_deref())
    }

    fn fail_on_error(&self) -> bool {
        self.report
            .as_ref()
            .and_then(|r| r.fail_on_error)
            .unwrap_or(false)
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("converter.model_dir", &self.converter.model_dir)?;
        validate_suffix("converter.input_suffix", &self.converter.input_suffix)?;
        validate_command("exporter.command", &self.exporter.command)?;
        if let Some(path) = self.report_path() {
            validate_path("report.path", path)?;
        }
        Ok(())
    }
}

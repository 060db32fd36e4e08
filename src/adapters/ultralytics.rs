use crate::domain::ports::{ConfigProvider, ExporterBackend, ModelExporter};
use crate::utils::error::{ConvertError, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

const PYTHON_EXPORT_SCRIPT: &str = "\
import sys
from ultralytics import YOLO
YOLO(sys.argv[1]).export(format=sys.argv[2])
";

/// Drives the ultralytics package in a child process, one checkpoint per call.
///
/// Ultralytics writes the exported model next to the checkpoint, so the
/// reported artifact is the checkpoint path with the format as extension.
#[derive(Debug, Clone)]
pub struct UltralyticsExporter {
    backend: ExporterBackend,
    program: String,
    leading_args: Vec<String>,
}

impl UltralyticsExporter {
    pub fn new(backend: ExporterBackend, command: &[String]) -> Self {
        let (program, leading_args) = match command.split_first() {
            Some((program, rest)) => (program.clone(), rest.to_vec()),
            None => (default_program(backend).to_string(), Vec::new()),
        };

        Self {
            backend,
            program,
            leading_args,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.exporter_backend(), config.exporter_command())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn export_args(&self, checkpoint: &Path, format: &str) -> Vec<OsString> {
        match self.backend {
            ExporterBackend::Cli => {
                let mut model = OsString::from("model=");
                model.push(checkpoint.as_os_str());
                vec![
                    OsString::from("export"),
                    model,
                    OsString::from(format!("format={}", format)),
                ]
            }
            ExporterBackend::Python => vec![
                OsString::from("-c"),
                OsString::from(PYTHON_EXPORT_SCRIPT),
                checkpoint.as_os_str().to_os_string(),
                OsString::from(format),
            ],
        }
    }
}

fn default_program(backend: ExporterBackend) -> &'static str {
    match backend {
        ExporterBackend::Cli => "yolo",
        ExporterBackend::Python => "python3",
    }
}

/// Python reports the exception on the last line of its traceback.
fn last_error_line(stderr: &str) -> Option<&str> {
    stderr.lines().map(str::trim).rfind(|line| !line.is_empty())
}

#[async_trait]
impl ModelExporter for UltralyticsExporter {
    async fn export(&self, checkpoint: &Path, format: &str) -> Result<PathBuf> {
        tracing::debug!(
            "Running {} {:?} ({:?} backend) for {}",
            self.program,
            self.leading_args,
            self.backend,
            checkpoint.display()
        );

        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .args(self.export_args(checkpoint, format))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ConvertError::ExporterUnavailable {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!("exporter stdout:\n{}", stdout.trim_end());
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!("exporter stderr:\n{}", stderr.trim_end());
            let message = last_error_line(&stderr)
                .map(str::to_string)
                .unwrap_or_else(|| format!("exporter exited with {}", output.status));
            return Err(ConvertError::ExportFailed { message });
        }

        let artifact = checkpoint.with_extension(format);
        if !tokio::fs::try_exists(&artifact).await.unwrap_or(false) {
            tracing::warn!(
                "Exporter succeeded but {} was not found; ultralytics may have written it elsewhere",
                artifact.display()
            );
        }

        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_falls_back_to_backend_default() {
        assert_eq!(UltralyticsExporter::new(ExporterBackend::Cli, &[]).program(), "yolo");
        assert_eq!(
            UltralyticsExporter::new(ExporterBackend::Python, &[]).program(),
            "python3"
        );
    }

    #[test]
    fn cli_backend_passes_model_and_format() {
        let exporter = UltralyticsExporter::new(ExporterBackend::Cli, &[]);
        let args = exporter.export_args(Path::new("models/best.pt"), "onnx");

        assert_eq!(
            args,
            vec![
                OsString::from("export"),
                OsString::from("model=models/best.pt"),
                OsString::from("format=onnx"),
            ]
        );
    }

    #[test]
    fn python_backend_runs_inline_script() {
        let command = vec!["/opt/venv/bin/python".to_string(), "-u".to_string()];
        let exporter = UltralyticsExporter::new(ExporterBackend::Python, &command);
        let args = exporter.export_args(Path::new("best.pt"), "onnx");

        assert_eq!(exporter.program(), "/opt/venv/bin/python");
        assert_eq!(exporter.leading_args, vec!["-u".to_string()]);
        assert_eq!(args[0], OsString::from("-c"));
        assert!(args[1].to_string_lossy().contains("from ultralytics import YOLO"));
        assert_eq!(args[2], OsString::from("best.pt"));
        assert_eq!(args[3], OsString::from("onnx"));
    }

    #[test]
    fn last_error_line_skips_trailing_blank_lines() {
        let stderr = "Traceback (most recent call last):\n  File \"x.py\"\nRuntimeError: bad zip\n\n";
        assert_eq!(last_error_line(stderr), Some("RuntimeError: bad zip"));
        assert_eq!(last_error_line("\n  \n"), None);
    }
}

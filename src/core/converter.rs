use crate::core::report::save_report;
use crate::core::scanner::scan_checkpoints;
use crate::domain::model::{
    Checkpoint, ConversionOutcome, ConversionReport, FileResult, RunOutcome, TARGET_FORMAT,
};
use crate::domain::ports::{ConfigProvider, ModelExporter};
use crate::utils::error::{ConvertError, Result};
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Scans the model directory and converts each checkpoint in turn.
///
/// Operator-facing progress is written to the output handle; a failed
/// conversion is reported and the batch moves on to the next file.
pub struct BatchConverter<E: ModelExporter, C: ConfigProvider> {
    exporter: E,
    config: C,
    monitor: SystemMonitor,
    dry_run: bool,
}

impl<E: ModelExporter, C: ConfigProvider> BatchConverter<E, C> {
    pub fn new(exporter: E, config: C) -> Self {
        Self::new_with_monitoring(exporter, config, false)
    }

    pub fn new_with_monitoring(exporter: E, config: C, enable_monitoring: bool) -> Self {
        Self {
            exporter,
            config,
            monitor: SystemMonitor::new(enable_monitoring),
            dry_run: false,
        }
    }

    /// List the candidates but convert nothing.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let mut stdout = std::io::stdout();
        self.run_with_output(&mut stdout).await
    }

    pub async fn run_with_output<W: Write + Send>(&self, out: &mut W) -> Result<RunOutcome> {
        let model_dir = Path::new(self.config.model_dir());
        let suffix = self.config.input_suffix();

        let checkpoints = match scan_checkpoints(model_dir, suffix).await {
            Ok(checkpoints) => checkpoints,
            Err(e @ ConvertError::DirectoryNotFound { .. }) => {
                writeln!(out, "Error: {}", e)?;
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        if checkpoints.is_empty() {
            tracing::info!("Nothing to convert in {}", model_dir.display());
            writeln!(out, "No {} files found in {}", suffix, model_dir.display())?;
            return Ok(RunOutcome::NothingToConvert);
        }

        writeln!(
            out,
            "Found {} {} files to convert in {}:",
            checkpoints.len(),
            suffix,
            model_dir.display()
        )?;
        for checkpoint in &checkpoints {
            writeln!(out, "- {}", checkpoint.file_name)?;
        }

        if self.dry_run {
            tracing::info!("🔍 Dry run, skipping {} conversion(s)", checkpoints.len());
            return Ok(RunOutcome::DryRun(checkpoints));
        }

        let started_at = Utc::now();
        let mut results = Vec::with_capacity(checkpoints.len());

        for checkpoint in &checkpoints {
            writeln!(out, "\nProcessing {}...", checkpoint.file_name)?;
            out.flush()?;

            let result = self.convert_one(checkpoint).await;
            match &result.outcome {
                ConversionOutcome::Converted { .. } => writeln!(
                    out,
                    "Successfully converted {} to ONNX format.",
                    checkpoint.file_name
                )?,
                ConversionOutcome::Failed { error } => {
                    writeln!(out, "Error converting {}: {}", checkpoint.file_name, error)?
                }
            }

            self.monitor.log_stats(&checkpoint.file_name);
            results.push(result);
        }

        let report = ConversionReport {
            model_dir: model_dir.to_path_buf(),
            started_at,
            finished_at: Utc::now(),
            results,
        };

        writeln!(out, "\nConversion process finished.")?;
        writeln!(
            out,
            "Converted {} of {} files ({} failed).",
            report.succeeded(),
            report.total(),
            report.failed()
        )?;
        out.flush()?;

        self.monitor.log_final_stats();

        if let Some(path) = self.config.report_path() {
            save_report(&report, Path::new(path)).await?;
            tracing::info!("📁 Report saved to: {}", path);
        }

        Ok(RunOutcome::Completed(report))
    }

    async fn convert_one(&self, checkpoint: &Checkpoint) -> FileResult {
        let start = Instant::now();
        tracing::debug!("Exporting {} to {}", checkpoint.path.display(), TARGET_FORMAT);

        let outcome = match self.exporter.export(&checkpoint.path, TARGET_FORMAT).await {
            Ok(output) => {
                tracing::info!("✅ {} -> {}", checkpoint.file_name, output.display());
                ConversionOutcome::Converted { output }
            }
            Err(e) => {
                tracing::error!("❌ {} failed: {}", checkpoint.file_name, e);
                tracing::debug!("💡 {}", e.recovery_suggestion());
                ConversionOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        FileResult {
            file_name: checkpoint.file_name.clone(),
            outcome,
            elapsed_ms: start.elapsed().as_millis() as u64,
        }
    }
}

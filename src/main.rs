use anyhow::Context;
use clap::Parser;
use pt2onnx::core::ConfigProvider;
use pt2onnx::utils::{logger, validation::Validate};
use pt2onnx::{BatchConverter, CliConfig, RunOutcome, TomlConfig, UltralyticsExporter};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting pt2onnx");
    tracing::debug!("CLI config: {:?}", cli);

    if let Some(path) = cli.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        let mut config = TomlConfig::from_file(&path)
            .with_context(|| format!("failed to load config file '{}'", path))?;
        cli.apply_to(&mut config);
        return run(config, cli.dry_run).await;
    }

    let dry_run = cli.dry_run;
    run(cli, dry_run).await
}

async fn run<C: ConfigProvider + Validate>(config: C, dry_run: bool) -> anyhow::Result<ExitCode> {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        return Ok(ExitCode::from(1));
    }

    let exporter = UltralyticsExporter::from_config(&config);
    tracing::info!("🔧 Exporter: {}", exporter.program());

    let fail_on_error = config.fail_on_error();
    let monitor_enabled = config.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let converter =
        BatchConverter::new_with_monitoring(exporter, config, monitor_enabled).with_dry_run(dry_run);

    match converter.run().await {
        Ok(RunOutcome::Completed(report)) => {
            tracing::info!(
                "✅ Batch finished: {} converted, {} failed",
                report.succeeded(),
                report.failed()
            );
            if fail_on_error && report.has_failures() {
                return Ok(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Ok(RunOutcome::NothingToConvert) | Ok(RunOutcome::DryRun(_)) => Ok(ExitCode::SUCCESS),
        // Already reported on stdout; a missing directory is "nothing to do"
        // unless failures were asked to be fatal.
        Err(e) if e.is_setup_error() => {
            tracing::warn!("💡 Suggestion: {}", e.recovery_suggestion());
            if fail_on_error {
                return Ok(ExitCode::from(1));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Err(e).context("conversion batch aborted"),
    }
}

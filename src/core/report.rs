use crate::domain::model::ConversionReport;
use crate::utils::error::Result;
use std::path::Path;

/// Writes the report as pretty JSON, creating parent directories as needed.
pub async fn save_report(report: &ConversionReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(report)?;
    tracing::debug!("Writing report ({} bytes) to {}", json.len(), path.display());
    tokio::fs::write(path, json).await?;
    Ok(())
}

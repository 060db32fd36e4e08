use crate::domain::model::Checkpoint;
use crate::utils::error::{ConvertError, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Lists the regular files in `dir` whose names end with `suffix`.
///
/// Matching is exact and case-sensitive. Results are sorted by file name so
/// repeated scans of an unchanged directory agree.
pub async fn scan_checkpoints(dir: &Path, suffix: &str) -> Result<Vec<Checkpoint>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConvertError::DirectoryNotFound {
                path: dir.display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let mut checkpoints = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::warn!("Skipping entry with non UTF-8 name: {:?}", raw);
                continue;
            }
        };

        if !file_name.ends_with(suffix) {
            continue;
        }

        let path = entry.path();
        // Follows symlinks, so a link to a checkpoint still counts.
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => checkpoints.push(Checkpoint { file_name, path }),
            Ok(_) => tracing::debug!("Skipping non-file entry {}", file_name),
            Err(e) => tracing::warn!("Skipping {}: {}", file_name, e),
        }
    }

    checkpoints.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    tracing::debug!(
        "Scanned {}: {} candidate(s) matching '{}'",
        dir.display(),
        checkpoints.len(),
        suffix
    );

    Ok(checkpoints)
}

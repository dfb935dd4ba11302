//! JSON documents on disk: trainer states in, suggestions and metrics out.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

use crate::domain::errors::{CurriculumError, CurriculumResult};

/// File name of the serialized suggestion
pub const SUGGESTION_FILE: &str = "suggestion.json";

/// File name of the serialized metrics
pub const METRICS_FILE: &str = "metrics.json";

/// Read and parse a JSON document; `what` names it in errors.
pub async fn model_from_json_file<T: DeserializeOwned>(
    path: &Path,
    what: &str,
) -> CurriculumResult<T> {
    let contents = fs::read_to_string(path)
        .await
        .map_err(|e| CurriculumError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|e| CurriculumError::deserialization(what, e))
}

/// Pretty JSON, two-space indented.
pub fn to_pretty_json<T: Serialize>(value: &T, what: &str) -> CurriculumResult<String> {
    serde_json::to_string_pretty(value).map_err(|source| CurriculumError::Serialization {
        what: what.to_string(),
        source,
    })
}

/// One file to be written by [`write_all_or_nothing`].
#[derive(Debug, Clone, Copy)]
pub struct PendingFile<'a> {
    pub dir: &'a Path,
    pub file_name: &'a str,
    pub contents: &'a str,
}

fn staging_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(format!(".{file_name}.partial"))
}

/// Write every file or none of them.
///
/// Target directories are created first, then each file is staged next to
/// its target and only renamed into place once all of them are staged. On
/// failure, staged files and any file already moved into place are removed.
pub async fn write_all_or_nothing(files: &[PendingFile<'_>]) -> CurriculumResult<Vec<PathBuf>> {
    for file in files {
        fs::create_dir_all(file.dir)
            .await
            .map_err(|e| CurriculumError::io(file.dir, e))?;
    }

    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());
    for file in files {
        let staging = staging_path(file.dir, file.file_name);
        if let Err(e) = fs::write(&staging, file.contents).await {
            remove_quietly(staged.iter().map(|(s, _)| s)).await;
            return Err(CurriculumError::io(&staging, e));
        }
        staged.push((staging, file.dir.join(file.file_name)));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (index, (staging, target)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(staging, target).await {
            tracing::warn!(path = %target.display(), "rolling back written files");
            remove_quietly(written.iter()).await;
            remove_quietly(staged[index..].iter().map(|(s, _)| s)).await;
            return Err(CurriculumError::io(target, e));
        }
        tracing::debug!(path = %target.display(), "wrote file");
        written.push(target.clone());
    }
    Ok(written)
}

async fn remove_quietly<'a>(paths: impl Iterator<Item = &'a PathBuf>) {
    for path in paths {
        if let Err(e) = fs::remove_file(path).await {
            tracing::debug!(path = %path.display(), error = %e, "could not remove file");
        }
    }
}

//! Benchmark directory index page.
//!
//! Each benchmark campaign lives in its own directory under a target
//! directory; the index page links to all of them, newest first.

use crate::config::IndexConfig;
use crate::error::{ReportError, ReportResult};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Name of the generated index file.
pub const INDEX_FILE: &str = "index.md";

/// Names of the immediate subdirectories of `target`, minus `exclude`.
///
/// The returned list is unordered.
pub fn list_benchmark_dirs(target: &Path, exclude: &[String]) -> ReportResult<Vec<String>> {
    let entries = match fs::read_dir(target) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ReportError::TargetMissing(target.to_path_buf()));
        }
        Err(e) => return Err(ReportError::io(target, e)),
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ReportError::io(target, e))?;
        if !entry.path().is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!(path = %entry.path().display(), "Skipping directory with non UTF-8 name");
            continue;
        };
        if exclude.iter().any(|excluded| *excluded == name) {
            continue;
        }
        dirs.push(name);
    }

    Ok(dirs)
}

/// Render the index page. Directories are listed in reverse lexicographic order.
pub fn render_index(title: &str, dirs: &[String]) -> String {
    let mut sorted: Vec<&String> = dirs.iter().collect();
    sorted.sort_by(|a, b| b.cmp(a));

    let mut content = format!("# {title}\n\n");
    for dir in sorted {
        content.push_str(&format!("- [{dir}](./{dir})\n"));
    }
    content
}

/// Regenerate `index.md` in the configured target directory.
///
/// Returns the number of listed directories. Nothing is written when no
/// directory is found.
pub fn update_index(config: &IndexConfig) -> ReportResult<usize> {
    let dirs = list_benchmark_dirs(&config.target_dir, &config.exclude)?;
    if dirs.is_empty() {
        warn!(dir = %config.target_dir.display(), "No benchmark directories found");
        return Ok(0);
    }

    let path = config.target_dir.join(INDEX_FILE);
    let content = render_index(&config.title, &dirs);
    fs::write(&path, content).map_err(|e| ReportError::io(&path, e))?;

    info!(path = %path.display(), entries = dirs.len(), "Updated index");
    Ok(dirs.len())
}

//! Exporter output is staged in a sibling temp file and renamed into place

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use typenv_core::{Error, Result};
use uuid::Uuid;

/// Replace `path` with `content` so readers never observe a partial file
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = output_dir(path)?;
    fs::create_dir_all(dir)
        .map_err(|e| Error::file_system(dir, "create output directory", e))?;

    let staged = dir.join(format!(".{}.tmp", Uuid::new_v4()));
    let outcome = stage(&staged, content).and_then(|()| {
        fs::rename(&staged, path).map_err(|e| Error::file_system(path, "rename into place", e))
    });

    if outcome.is_err() {
        let _ = fs::remove_file(&staged);
    } else {
        ::tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    }
    outcome
}

pub fn write_atomic_string(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Directory holding `path`; a bare file name lives in `.`
fn output_dir(path: &Path) -> Result<&Path> {
    match path.parent() {
        Some(dir) if dir.as_os_str().is_empty() => Ok(Path::new(".")),
        Some(dir) => Ok(dir),
        None => Err(Error::configuration(format!(
            "invalid output path '{}'",
            path.display()
        ))),
    }
}

fn stage(staged: &Path, content: &[u8]) -> Result<()> {
    let mut file =
        File::create(staged).map_err(|e| Error::file_system(staged, "create staging file", e))?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| Error::file_system(staged, "write staging file", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("configmap.yaml");

        write_atomic_string(&file_path, "apiVersion: v1").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "apiVersion: v1");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("docs").join("ENV.md");

        write_atomic_string(&file_path, "# Environment Variables").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "# Environment Variables");
    }

    #[test]
    fn test_atomic_write_overwrites_existing_and_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("ENV.md");

        fs::write(&file_path, "Old content").unwrap();
        write_atomic_string(&file_path, "New content").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "New content");
        let leftovers = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_root_path_is_rejected() {
        let result = write_atomic_string(Path::new("/"), "x");
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}

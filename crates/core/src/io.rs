//! Shared file I/O utilities.

use std::{
    fs::{create_dir_all, read_to_string, remove_file, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern, glob_with};
use log::warn;

const BOM: char = '\u{feff}';

/// Find files matching a glob pattern directly in `dir`, ignoring case.
pub fn glob_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir_str = dir.to_str().context("Invalid directory path")?;
    let pattern_str = format!("{}/{pattern}", Pattern::escape(dir_str));
    let options = MatchOptions { case_sensitive: false, ..MatchOptions::new() };
    Ok(glob_with(&pattern_str, options)
        .with_context(|| format!("Failed to glob pattern: {pattern_str}"))?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect())
}

/// Read a UTF-8 text file, dropping a leading byte-order mark.
pub fn read_text(path: &Path) -> Result<String> {
    let text = read_to_string(path)
        .with_context(|| format!("Failed to read text: {}", path.display()))?;
    Ok(match text.strip_prefix(BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Write UTF-8 text without a byte-order mark.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    write(path, text.trim_start_matches(BOM))
        .with_context(|| format!("Failed to write text: {}", path.display()))
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    create_dir_all(dir).with_context(|| format!("Failed to create directory: {}", dir.display()))
}

/// Delete files, failing on the first one that exists but cannot be removed.
pub fn remove_files<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Nothing to remove at {}", path.display());
            continue;
        }
        remove_file(path).with_context(|| format!("Failed to remove: {}", path.display()))?;
    }
    Ok(())
}

/// File name as UTF-8.
pub fn file_name_str(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Invalid file name: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_glob_ignores_case_and_directories() {
        let dir = TempDir::new().unwrap();
        write(dir.path().join("A-Regular.ttf"), b"a").unwrap();
        write(dir.path().join("B-Bold.TTF"), b"b").unwrap();
        write(dir.path().join("notes.txt"), b"c").unwrap();
        create_dir_all(dir.path().join("nested.ttf")).unwrap();

        let mut names: Vec<_> = glob_files(dir.path(), "*.ttf")
            .unwrap()
            .iter()
            .map(|p| file_name_str(p).unwrap().to_string())
            .collect();
        names.sort();
        assert_eq!(names, ["A-Regular.ttf", "B-Bold.TTF"]);
    }

    #[test]
    fn test_glob_escapes_directory() {
        let dir = TempDir::new().unwrap();
        let odd = dir.path().join("[fonts]");
        create_dir_all(&odd).unwrap();
        write(odd.join("A.ttf"), b"a").unwrap();

        assert_eq!(glob_files(&odd, "*.ttf").unwrap().len(), 1);
    }

    #[test]
    fn test_read_text_drops_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dump.ttx");
        write(&path, "\u{feff}<ttFont/>").unwrap();
        assert_eq!(read_text(&path).unwrap(), "<ttFont/>");
    }

    #[test]
    fn test_write_text_has_no_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dump.ttx");
        write_text(&path, "\u{feff}<ttFont/>").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"<ttFont/>");
    }

    #[test]
    fn test_remove_files_skips_missing() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("a.ttx");
        write(&present, b"a").unwrap();
        remove_files(&[present.clone(), dir.path().join("missing.ttx")]).unwrap();
        assert!(!present.exists());
    }
}

use std::{
    fs::remove_file,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::batch::is_dehinted_name;
use crate::{
    config::{BuildConfig, DUMP_EXTENSION, FONT_EXTENSION},
    io::glob_files,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    pub removed: usize,
    pub skipped_dirs: usize,
}

/// Remove intermediates left in the source directories by a run that kept them
/// or did not finish.
pub fn clean(config: &BuildConfig) -> Result<CleanReport> {
    let mut report = CleanReport::default();

    for family in &config.families {
        let dir = &family.source_dir;
        if !dir.is_dir() {
            println!("Skipped {} (not found)", dir.display());
            report.skipped_dirs += 1;
            continue;
        }

        for path in leftovers(dir)? {
            remove_file(&path).with_context(|| format!("Failed to remove: {}", path.display()))?;
            println!("Removed {}", path.display());
            report.removed += 1;
        }
    }

    println!("Cleaned {} files", report.removed);
    Ok(report)
}

fn leftovers(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for extension in [FONT_EXTENSION, DUMP_EXTENSION] {
        paths.extend(glob_files(dir, &format!("*.{extension}"))?.into_iter().filter(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .map(is_dehinted_name)
                .unwrap_or(false)
        }));
    }
    Ok(paths)
}

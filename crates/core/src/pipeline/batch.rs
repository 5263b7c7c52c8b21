//! Enumerate the fonts of each family and run them through the pipeline.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use log::info;

use super::{
    PipelineContext,
    process::{FontJob, process_font},
};
use crate::{
    config::{DEHINTED_MARKER, FONT_EXTENSION, FontFamily},
    io::glob_files,
    tools::FontTools,
};

/// Whether a file stem marks output of an earlier dehint.
pub fn is_dehinted_name(stem: &str) -> bool {
    stem.to_lowercase().contains(DEHINTED_MARKER)
}

/// Source fonts directly in `dir`, sorted by file name, leftovers of earlier runs
/// excluded.
pub fn candidate_fonts(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Source directory not found: {}", dir.display());
    }

    let mut fonts: Vec<PathBuf> = glob_files(dir, &format!("*.{FONT_EXTENSION}"))?
        .into_iter()
        .filter(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| !is_dehinted_name(s))
                .unwrap_or(false)
        })
        .collect();
    fonts.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(fonts)
}

pub fn process_directory<T: FontTools>(
    ctx: &PipelineContext<T>,
    family: &FontFamily,
) -> Result<Vec<PathBuf>> {
    let fonts = candidate_fonts(&family.source_dir)?;
    println!("  Processing {} fonts in {}...", fonts.len(), family.source_dir.display());

    let outputs = fonts
        .iter()
        .map(|font| process_font(ctx, font))
        .collect::<Result<Vec<_>>>()?;

    info!("{}: {} fonts done", family.license_name, outputs.len());
    Ok(outputs)
}

/// Fail before any font is touched if two sources would be renamed to the same
/// output file.
pub fn check_unique_outputs<T: FontTools>(ctx: &PipelineContext<T>) -> Result<()> {
    let mut seen: HashMap<PathBuf, PathBuf> = HashMap::new();
    for family in &ctx.config.families {
        for font in candidate_fonts(&family.source_dir)? {
            let job = FontJob::new(&font, &ctx.config.output_dir, &ctx.rewriter)?;
            if let Some(previous) = seen.insert(job.output.clone(), font) {
                bail!(
                    "{} and {} would both be written to {}",
                    previous.display(),
                    job.source.display(),
                    job.output.display()
                );
            }
        }
    }
    Ok(())
}

/// Process every family in configuration order and return all output paths.
pub fn process_all<T: FontTools>(ctx: &PipelineContext<T>) -> Result<Vec<PathBuf>> {
    check_unique_outputs(ctx)?;
    let mut outputs = Vec::new();
    for family in &ctx.config.families {
        outputs.extend(process_directory(ctx, family)?);
    }
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::TempDir;

    use super::*;
    use crate::io::file_name_str;

    #[test]
    fn test_dehinted_marker_any_case() {
        assert!(is_dehinted_name("PlemolJP-Bold-dehinted"));
        assert!(is_dehinted_name("PlemolJP-Bold-DEHINTED"));
        assert!(is_dehinted_name("PlemolJP-Bold-DeHinted-new"));
        assert!(!is_dehinted_name("PlemolJP-Bold"));
        assert!(!is_dehinted_name("dehinted"));
    }

    #[test]
    fn test_candidates_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        for name in [
            "b-Regular.ttf",
            "A-Bold.ttf",
            "A-Bold-dehinted.ttf",
            "C-Italic-DEHINTED.ttf",
            "A-Bold-dehinted.ttx",
            "LICENSE",
        ] {
            write(dir.path().join(name), b"x").unwrap();
        }

        let names: Vec<_> = candidate_fonts(dir.path())
            .unwrap()
            .iter()
            .map(|p| file_name_str(p).unwrap().to_string())
            .collect();
        assert_eq!(names, ["A-Bold.ttf", "b-Regular.ttf"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        assert!(candidate_fonts(&dir.path().join("absent")).is_err());
    }
}

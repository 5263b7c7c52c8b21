//! Package the built fonts and family licenses into one ZIP archive.

use std::{
    fs::{File, remove_file},
    io::copy,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::info;
use zip::{
    CompressionMethod, ZipWriter,
    write::SimpleFileOptions,
};

use super::PipelineContext;
use crate::{
    io::{ensure_dir, file_name_str},
    tools::FontTools,
};

/// Write every font as a flat entry plus `LICENSE-<family>` for each family.
///
/// An existing archive is replaced. Fonts are deleted once archived unless
/// intermediates are kept.
pub fn archive_fonts<T: FontTools>(ctx: &PipelineContext<T>, fonts: &[PathBuf]) -> Result<PathBuf> {
    let archive_path = ctx.config.archive_path();
    ensure_dir(&ctx.config.output_dir)?;

    let file = File::create(&archive_path)
        .with_context(|| format!("Failed to create archive: {}", archive_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for font in fonts {
        add_file(&mut zip, font, file_name_str(font)?, options)?;
        if !ctx.keep_intermediates() {
            remove_file(font).with_context(|| format!("Failed to remove: {}", font.display()))?;
        }
    }

    for family in &ctx.config.families {
        add_file(&mut zip, &family.license_path(), &family.license_entry_name(), options)?;
    }

    zip.finish()
        .with_context(|| format!("Failed to finish archive: {}", archive_path.display()))?;

    info!(
        "Archived {} fonts and {} licenses",
        fonts.len(),
        ctx.config.families.len()
    );
    println!("  Wrote {}", archive_path.display());
    Ok(archive_path)
}

fn add_file(
    zip: &mut ZipWriter<File>,
    path: &Path,
    entry_name: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    let mut source =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    zip.start_file(entry_name, options)
        .with_context(|| format!("Failed to add archive entry: {entry_name}"))?;
    copy(&mut source, zip).with_context(|| format!("Failed to archive: {}", path.display()))?;
    Ok(())
}

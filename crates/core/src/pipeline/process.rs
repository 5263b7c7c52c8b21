//! Per-font processing: dehint, dump, rename, recompile.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{debug, info};

use super::PipelineContext;
use crate::{
    config::{DEHINTED_MARKER, DUMP_EXTENSION, REWRITTEN_MARKER},
    io::{ensure_dir, file_name_str, read_text, remove_files, write_text},
    rewrite::NameRewriter,
    tools::{FontTools, dump_path},
};

/// Every path one source font passes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontJob {
    pub source: PathBuf,
    pub dehinted: PathBuf,
    pub dump: PathBuf,
    pub rewritten_dump: PathBuf,
    pub output: PathBuf,
}

impl FontJob {
    pub fn new(source: &Path, output_dir: &Path, rewriter: &NameRewriter) -> Result<Self> {
        let dir = source.parent().unwrap_or(Path::new(""));
        let file_name = file_name_str(source)?;
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("Invalid file name: {}", source.display()))?;
        let extension = source
            .extension()
            .and_then(|s| s.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        let dehinted = dir.join(format!("{stem}{DEHINTED_MARKER}{extension}"));
        let dump = dump_path(&dehinted);
        let rewritten_dump =
            dir.join(format!("{stem}{DEHINTED_MARKER}{REWRITTEN_MARKER}.{DUMP_EXTENSION}"));
        let output = output_dir.join(rewriter.rewrite(file_name));

        let job = Self { source: source.to_path_buf(), dehinted, dump, rewritten_dump, output };
        if job.output == job.source || job.intermediates().contains(&job.output.as_path()) {
            bail!(
                "Output {} would overwrite {} or its intermediates",
                job.output.display(),
                job.source.display()
            );
        }
        Ok(job)
    }

    pub fn intermediates(&self) -> [&Path; 3] {
        [&self.dehinted, &self.dump, &self.rewritten_dump]
    }
}

/// Turn one source font into its renamed, dehinted counterpart in the output
/// directory and return the new path.
pub fn process_font<T: FontTools>(ctx: &PipelineContext<T>, source: &Path) -> Result<PathBuf> {
    let mut job = FontJob::new(source, &ctx.config.output_dir, &ctx.rewriter)?;
    info!("{}", file_name_str(source)?);

    ctx.tools
        .dehint(&job.source, &job.dehinted)
        .with_context(|| format!("Failed to dehint {}", job.source.display()))?;

    job.dump = ctx
        .tools
        .dump(&job.dehinted, &ctx.config.excluded_tables)
        .with_context(|| format!("Failed to dump {}", job.dehinted.display()))?;

    let text = read_text(&job.dump)?;
    write_text(&job.rewritten_dump, &ctx.rewriter.rewrite(&text))?;

    ensure_dir(&ctx.config.output_dir)?;
    ctx.tools
        .merge(&job.dehinted, &job.rewritten_dump, &job.output)
        .with_context(|| format!("Failed to compile {}", job.output.display()))?;

    if ctx.keep_intermediates() {
        debug!("Keeping intermediates of {}", job.source.display());
    } else {
        remove_files(&job.intermediates())?;
    }

    info!("  -> {}", job.output.display());
    Ok(job.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;

    fn rewriter() -> NameRewriter {
        NameRewriter::from_families(&BuildConfig::default().families).unwrap()
    }

    #[test]
    fn test_job_paths() {
        let job = FontJob::new(
            Path::new("/fonts/PlemolJP/PlemolJP35-Bold.ttf"),
            Path::new("/desktop"),
            &rewriter(),
        )
        .unwrap();

        assert_eq!(job.dehinted, Path::new("/fonts/PlemolJP/PlemolJP35-Bold-dehinted.ttf"));
        assert_eq!(job.dump, Path::new("/fonts/PlemolJP/PlemolJP35-Bold-dehinted.ttx"));
        assert_eq!(
            job.rewritten_dump,
            Path::new("/fonts/PlemolJP/PlemolJP35-Bold-dehinted-new.ttx")
        );
        assert_eq!(job.output, Path::new("/desktop/Plemo39-Bold.ttf"));
    }

    #[test]
    fn test_job_keeps_extension_case() {
        let job = FontJob::new(
            Path::new("/fonts/UDEVGothicJPDOC-Italic.TTF"),
            Path::new("/out"),
            &rewriter(),
        )
        .unwrap();
        assert_eq!(job.dehinted, Path::new("/fonts/UDEVGothicJPDOC-Italic-dehinted.TTF"));
        assert_eq!(job.output, Path::new("/out/Udev-Italic.TTF"));
    }

    #[test]
    fn test_job_refuses_to_overwrite_source() {
        let err = FontJob::new(
            Path::new("/fonts/UDEVGothicJPDOC/Example-Regular.ttf"),
            Path::new("/fonts/UDEVGothicJPDOC"),
            &rewriter(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("would overwrite"), "{err}");
    }
}

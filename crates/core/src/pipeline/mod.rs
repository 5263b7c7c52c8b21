//! Build pipeline: dehint and rename every font, then archive the results.

mod archive;
mod batch;
mod clean;
mod process;

pub use archive::archive_fonts;
pub use batch::{
    candidate_fonts, check_unique_outputs, is_dehinted_name, process_all, process_directory,
};
pub use clean::{CleanReport, clean};
pub use process::{FontJob, process_font};

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;

use crate::{
    config::BuildConfig,
    rewrite::NameRewriter,
    tools::{ExternalTools, FontTools},
};

pub struct PipelineContext<T> {
    pub config: BuildConfig,
    pub rewriter: NameRewriter,
    pub tools: T,
}

impl PipelineContext<ExternalTools> {
    pub fn with_external_tools(config: BuildConfig) -> Result<Self> {
        let tools = ExternalTools::from_config(&config);
        Self::new(config, tools)
    }
}

impl<T: FontTools> PipelineContext<T> {
    pub fn new(config: BuildConfig, tools: T) -> Result<Self> {
        config.validate()?;
        let rewriter = NameRewriter::from_families(&config.families)?;
        Ok(Self { config, rewriter, tools })
    }

    /// Intermediates are deleted as soon as they have been used, unless kept.
    pub fn keep_intermediates(&self) -> bool {
        self.config.keep_intermediates
    }
}

#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub fonts: Vec<PathBuf>,
    pub archive: PathBuf,
    pub elapsed: Duration,
}

pub fn run_step<R>(
    name: &str,
    step_num: usize,
    total: usize,
    f: impl FnOnce() -> Result<R>,
) -> Result<R> {
    println!("\n[{step_num}/{total}] {name}");
    let start = Instant::now();
    let result = f()?;
    println!("  ✓ {name} ({:.2}s)", start.elapsed().as_secs_f64());
    Ok(result)
}

/// Process every configured family in order, then archive.
///
/// The first failure aborts the whole run, including the archive step.
pub fn build<T: FontTools>(ctx: &PipelineContext<T>) -> Result<BuildSummary> {
    let start = Instant::now();

    println!("═══════════════════════════════════════════════════════════════════════════════");
    println!("flayground font build");
    println!("═══════════════════════════════════════════════════════════════════════════════");

    check_unique_outputs(ctx)?;

    let families = &ctx.config.families;
    let total = families.len() + 1;

    let mut fonts = Vec::new();
    for (i, family) in families.iter().enumerate() {
        let name = format!("process {}", family.license_name);
        fonts.extend(run_step(&name, i + 1, total, || process_directory(ctx, family))?);
    }

    let archive = run_step("archive", total, total, || archive_fonts(ctx, &fonts))?;

    let summary = BuildSummary { fonts, archive, elapsed: start.elapsed() };

    println!("\n═══════════════════════════════════════════════════════════════════════════════");
    println!("✨ Build complete in {:.2}s", summary.elapsed.as_secs_f64());
    println!("   Fonts: {}", summary.fonts.len());
    println!("   Archive: {}", summary.archive.display());
    println!("═══════════════════════════════════════════════════════════════════════════════");

    Ok(summary)
}

//! CLI definitions and command dispatch.

use std::{
    io::{IsTerminal, Write, stdin, stdout},
    path::PathBuf,
};

use anyhow::Result;
use clap::{Parser, Subcommand};

use flayground_core::{
    BuildConfig, PipelineContext, build,
    pipeline::{FontJob, candidate_fonts, clean},
};

#[derive(Parser)]
#[command(name = "flayground", version)]
#[command(about = "Dehint, rename and package the UDEV Gothic JPDOC and PlemolJP fonts")]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Exit right away on failure instead of waiting for Enter.
    #[arg(long, global = true)]
    pub no_pause: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// JSON configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Where the fonts and the archive are written (default: desktop).
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    pub ttfautohint: Option<PathBuf>,
    #[arg(long, global = true)]
    pub ttx: Option<PathBuf>,
    /// Keep dehinted fonts, dumps and built fonts next to the archive.
    #[arg(long, global = true, conflicts_with = "no_keep_intermediates")]
    pub keep_intermediates: bool,
    /// Delete intermediates even in a debug build.
    #[arg(long, global = true)]
    pub no_keep_intermediates: bool,
}

impl ConfigArgs {
    pub fn resolve(&self) -> Result<BuildConfig> {
        let mut config = match &self.config {
            Some(path) => BuildConfig::load(path)?,
            None => BuildConfig::default(),
        };
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(path) = &self.ttfautohint {
            config.ttfautohint = path.clone();
        }
        if let Some(path) = &self.ttx {
            config.ttx = path.clone();
        }
        if self.keep_intermediates {
            config.keep_intermediates = true;
        }
        if self.no_keep_intermediates {
            config.keep_intermediates = false;
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build all fonts and the archive (the default).
    Build,
    /// Remove intermediates left in the source directories.
    Clean,
    /// Show which fonts would be built and their new names.
    List,
    /// Print the effective configuration as JSON.
    Config,
    #[command(subcommand, hide = true)]
    Dev(crate::dev::DevCommands),
}

impl Cli {
    /// Whether to hold the console open after an error.
    pub fn pause_on_error(&self) -> bool {
        !self.no_pause && stdin().is_terminal()
    }

    pub fn run(self) -> Result<()> {
        let config = self.config.resolve()?;
        match self.command.unwrap_or(Commands::Build) {
            Commands::Build => {
                let ctx = PipelineContext::with_external_tools(config)?;
                build(&ctx)?;
            }
            Commands::Clean => {
                clean(&config)?;
            }
            Commands::List => list(config)?,
            Commands::Config => println!("{}", config.to_json()?),
            Commands::Dev(dev) => dev.run(config)?,
        }
        Ok(())
    }
}

fn list(config: BuildConfig) -> Result<()> {
    let ctx = PipelineContext::with_external_tools(config)?;
    for family in &ctx.config.families {
        println!("{} ({})", family.license_name, family.source_dir.display());
        for font in candidate_fonts(&family.source_dir)? {
            let job = FontJob::new(&font, &ctx.config.output_dir, &ctx.rewriter)?;
            println!("  {} -> {}", font.display(), job.output.display());
        }
    }
    println!("Archive: {}", ctx.config.archive_path().display());
    Ok(())
}

/// Block until the user presses Enter.
pub fn wait_for_enter() {
    print!("Press Enter to exit... ");
    let _ = stdout().flush();
    let mut line = String::new();
    let _ = stdin().read_line(&mut line);
}

//! Development commands for running single pipeline stages.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use flayground_core::{
    BuildConfig, FontTools, PipelineContext,
    io::{read_text, write_text},
    pipeline::process_font,
};

#[derive(Subcommand)]
pub enum DevCommands {
    /// Apply the rename rules to text files (e.g. kept .ttx dumps).
    Rewrite {
        /// Print the result instead of rewriting the files in place.
        #[arg(long)]
        stdout: bool,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    Dehint {
        #[arg(required = true)]
        input: PathBuf,
        #[arg(required = true)]
        output: PathBuf,
    },
    Dump {
        #[arg(required = true)]
        input: PathBuf,
    },
    /// Run the full per-font pipeline on individual fonts.
    Process {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl DevCommands {
    pub fn run(self, config: BuildConfig) -> Result<()> {
        let ctx = PipelineContext::with_external_tools(config)?;
        match self {
            DevCommands::Rewrite { stdout, files } => {
                for file in &files {
                    let text = ctx.rewriter.rewrite(&read_text(file)?);
                    if stdout {
                        print!("{text}");
                    } else {
                        write_text(file, &text)?;
                        println!("Rewrote {}", file.display());
                    }
                }
            }
            DevCommands::Dehint { input, output } => {
                ctx.tools
                    .dehint(&input, &output)
                    .with_context(|| format!("Failed to dehint {}", input.display()))?;
                println!("Wrote {}", output.display());
            }
            DevCommands::Dump { input } => {
                let dump = ctx
                    .tools
                    .dump(&input, &ctx.config.excluded_tables)
                    .with_context(|| format!("Failed to dump {}", input.display()))?;
                println!("Wrote {}", dump.display());
            }
            DevCommands::Process { files } => {
                for file in &files {
                    let output = process_font(&ctx, file)?;
                    println!("Wrote {}", output.display());
                }
            }
        }
        Ok(())
    }
}

//! Error types for external tool invocations.

use std::{
    io,
    path::PathBuf,
    process::ExitStatus,
};

/// Errors raised while running ttfautohint or ttx.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The executable could not be started at all.
    #[error("Failed to launch {tool} ({}): {source}", .program.display())]
    Launch {
        tool: &'static str,
        program: PathBuf,
        source: io::Error,
    },

    /// The tool ran and reported failure.
    #[error("{tool} exited with {status}: {stderr}")]
    Failed {
        tool: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    /// The tool reported success but its output file is not there.
    #[error("{tool} did not produce '{}'", .path.display())]
    MissingOutput { tool: &'static str, path: PathBuf },
}

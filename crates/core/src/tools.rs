//! Invocation of the external hinting tool and table compiler.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use log::debug;

use crate::{
    config::{BuildConfig, DUMP_EXTENSION},
    error::ToolError,
};

pub const TTFAUTOHINT: &str = "ttfautohint";
pub const TTX: &str = "ttx";

/// The three operations the pipeline needs from its font tools.
pub trait FontTools {
    /// Strip hinting from `input`, writing `output`.
    fn dehint(&self, input: &Path, output: &Path) -> Result<(), ToolError>;

    /// Dump every table of `input` except `excluded_tables` to XML and return the
    /// path of the dump.
    fn dump(&self, input: &Path, excluded_tables: &[String]) -> Result<PathBuf, ToolError>;

    /// Compile `dump` on top of `base`, writing `output`.
    fn merge(&self, base: &Path, dump: &Path, output: &Path) -> Result<(), ToolError>;
}

/// ttfautohint and ttx run as child processes.
#[derive(Debug, Clone)]
pub struct ExternalTools {
    ttfautohint: PathBuf,
    ttx: PathBuf,
}

impl ExternalTools {
    pub fn new(ttfautohint: impl Into<PathBuf>, ttx: impl Into<PathBuf>) -> Self {
        Self { ttfautohint: ttfautohint.into(), ttx: ttx.into() }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(&config.ttfautohint, &config.ttx)
    }
}

impl FontTools for ExternalTools {
    fn dehint(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        run(TTFAUTOHINT, &self.ttfautohint, &dehint_args(input, output))?;
        expect_output(TTFAUTOHINT, output)
    }

    fn dump(&self, input: &Path, excluded_tables: &[String]) -> Result<PathBuf, ToolError> {
        run(TTX, &self.ttx, &dump_args(input, excluded_tables))?;
        let dump = dump_path(input);
        expect_output(TTX, &dump)?;
        Ok(dump)
    }

    fn merge(&self, base: &Path, dump: &Path, output: &Path) -> Result<(), ToolError> {
        run(TTX, &self.ttx, &merge_args(base, dump, output))?;
        expect_output(TTX, output)
    }
}

/// Where ttx writes the dump of `font` when no `-o` is given.
pub fn dump_path(font: &Path) -> PathBuf {
    font.with_extension(DUMP_EXTENSION)
}

pub fn dehint_args(input: &Path, output: &Path) -> Vec<OsString> {
    vec!["--dehint".into(), input.into(), output.into()]
}

pub fn dump_args(input: &Path, excluded_tables: &[String]) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-f".into()];
    for table in excluded_tables {
        args.push("-x".into());
        args.push(table.into());
    }
    args.push(input.into());
    args
}

pub fn merge_args(base: &Path, dump: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-f".into(),
        "-o".into(),
        output.into(),
        "-m".into(),
        base.into(),
        dump.into(),
    ]
}

fn run(tool: &'static str, program: &Path, args: &[OsString]) -> Result<(), ToolError> {
    debug!(
        "{} {}",
        program.display(),
        args.iter().map(|a| a.to_string_lossy()).collect::<Vec<_>>().join(" ")
    );

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| ToolError::Launch { tool, program: program.to_path_buf(), source })?;

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !output.status.success() {
        return Err(ToolError::Failed { tool, status: output.status, stderr });
    }
    if !stderr.is_empty() {
        debug!("{tool}: {stderr}");
    }
    Ok(())
}

fn expect_output(tool: &'static str, path: &Path) -> Result<(), ToolError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ToolError::MissingOutput { tool, path: path.to_path_buf() })
    }
}

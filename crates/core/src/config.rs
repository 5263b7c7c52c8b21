//! Build configuration: tool locations, font families and their rename rules.
//!
//! The defaults reproduce the UDEV Gothic JPDOC + PlemolJP build. A JSON file can
//! override any field; missing fields keep their default.

use std::{
    fs::{canonicalize, read_to_string},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Marker appended to the stem of a hint-stripped font.
pub const DEHINTED_MARKER: &str = "-dehinted";

/// Marker appended to the stem of a dump after renaming.
pub const REWRITTEN_MARKER: &str = "-new";

/// Extension ttx gives its XML dumps.
pub const DUMP_EXTENSION: &str = "ttx";

/// Extension of the source fonts.
pub const FONT_EXTENSION: &str = "ttf";

/// License file expected in every source directory.
pub const LICENSE_FILENAME: &str = "LICENSE";

pub const DEFAULT_TTFAUTOHINT: &str = "ttfautohint";
pub const DEFAULT_TTX: &str = "ttx";

/// Tables left out of the dump. Only head, hhea, OS/2 and name survive.
pub const EXCLUDED_TABLES: &[&str] = &[
    // large and not needed
    "cmap", "glyf",
    // not needed for renaming
    "GlyphOrder", "maxp", "hmtx", "loca", "post", "gasp", "GDEF", "GPOS", "GSUB",
];

pub const UDEV_GOTHIC_DIRNAME: &str = "UDEVGothicJPDOC";
pub const PLEMOL_JP_DIRNAME: &str = "PlemolJP";

/// Archive file name, tied to the crate version.
pub fn default_archive_name() -> String {
    format!("flayground-v{}-fonts.zip", env!("CARGO_PKG_VERSION"))
}

/// Directory holding one subdirectory per source family.
pub fn default_fonts_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Repositories")
        .join("Static")
        .join("フォント")
}

/// The desktop, or the home directory where there is none.
pub fn default_output_dir() -> PathBuf {
    dirs::desktop_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// A literal substring substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }
}

/// One source font family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFamily {
    /// Canonical family identifier, used for the archived license entry.
    pub license_name: String,
    pub source_dir: PathBuf,
    #[serde(default = "default_license_file")]
    pub license_file: String,
    /// Applied in order, after the rules of every earlier family.
    #[serde(default)]
    pub rules: Vec<Replacement>,
}

fn default_license_file() -> String {
    LICENSE_FILENAME.to_string()
}

impl FontFamily {
    pub fn license_path(&self) -> PathBuf {
        self.source_dir.join(&self.license_file)
    }

    pub fn license_entry_name(&self) -> String {
        format!("LICENSE-{}", self.license_name)
    }
}

/// UDEV Gothic JPDOC, regular and 35 (narrow) widths.
pub fn udev_gothic(fonts_root: &Path) -> FontFamily {
    FontFamily {
        license_name: "UDEVGothic".to_string(),
        source_dir: fonts_root.join(UDEV_GOTHIC_DIRNAME),
        license_file: default_license_file(),
        rules: vec![
            Replacement::new("UDEV Gothic 35JPDOC", "Udev39"),
            Replacement::new("UDEV Gothic JPDOC", "Udev"),
            Replacement::new("UDEVGothic35JPDOC", "Udev39"),
            Replacement::new("UDEVGothicJPDOC", "Udev"),
        ],
    }
}

/// PlemolJP, regular and 35 widths.
///
/// The last rule puts back the bracketed `[PlemolJP]` that the bare family rule
/// shortens along with everything else.
pub fn plemol_jp(fonts_root: &Path) -> FontFamily {
    FontFamily {
        license_name: "PlemolJP".to_string(),
        source_dir: fonts_root.join(PLEMOL_JP_DIRNAME),
        license_file: default_license_file(),
        rules: vec![
            Replacement::new("PlemolJP35", "Plemo39"),
            Replacement::new("PlemolJP", "Plemo"),
            Replacement::new("[Plemo]", "[PlemolJP]"),
        ],
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub ttfautohint: PathBuf,
    pub ttx: PathBuf,
    pub output_dir: PathBuf,
    pub archive_name: String,
    pub excluded_tables: Vec<String>,
    /// Keep hint-stripped fonts, dumps and final fonts on disk for inspection.
    pub keep_intermediates: bool,
    pub families: Vec<FontFamily>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let fonts_root = default_fonts_root();
        Self {
            ttfautohint: PathBuf::from(DEFAULT_TTFAUTOHINT),
            ttx: PathBuf::from(DEFAULT_TTX),
            output_dir: default_output_dir(),
            archive_name: default_archive_name(),
            excluded_tables: EXCLUDED_TABLES.iter().map(|t| t.to_string()).collect(),
            keep_intermediates: cfg!(debug_assertions),
            families: vec![udev_gothic(&fonts_root), plemol_jp(&fonts_root)],
        }
    }
}

impl BuildConfig {
    /// Load a JSON configuration file. Fields it leaves out keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.families.is_empty() {
            bail!("No font families configured");
        }
        if self.archive_name.trim().is_empty() {
            bail!("Archive name is empty");
        }
        for family in &self.families {
            if family.license_name.is_empty() {
                bail!("Family at {} has no license name", family.source_dir.display());
            }
            if same_dir(&self.output_dir, &family.source_dir) {
                bail!(
                    "Output directory {} is the source directory of {}",
                    self.output_dir.display(),
                    family.license_name
                );
            }
            if let Some(rule) = family.rules.iter().find(|r| r.from.is_empty()) {
                bail!("Family {} has a rule with an empty pattern (-> {:?})", family.license_name, rule.to);
            }
        }
        Ok(())
    }

    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(&self.archive_name)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Compare resolved paths where both exist, the paths as written otherwise.
fn same_dir(a: &Path, b: &Path) -> bool {
    match (canonicalize(a), canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

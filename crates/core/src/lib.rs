//! flayground core - dehint, rename and package a fixed set of font families.

pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod rewrite;
pub mod tools;

pub use config::{BuildConfig, FontFamily, Replacement};
pub use error::ToolError;
pub use pipeline::{BuildSummary, PipelineContext, build};
pub use rewrite::NameRewriter;
pub use tools::{ExternalTools, FontTools};

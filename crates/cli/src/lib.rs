//! flayground CLI library.

pub mod cli;
pub mod dev;

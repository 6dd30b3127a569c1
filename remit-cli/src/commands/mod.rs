//! CLI command implementations

pub mod close;
pub mod fault;
pub mod open;
pub mod show;
pub mod transfer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use remit_core::RemitContext;

/// Get the remit directory from environment or default
pub fn get_remit_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("REMIT_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".remit"))
        .context("Could not find home directory; set REMIT_DIR")
}

/// Open the remit context, creating the directory on first use
pub fn get_context() -> Result<RemitContext> {
    let remit_dir = get_remit_dir()?;

    std::fs::create_dir_all(&remit_dir)
        .with_context(|| format!("Failed to create remit directory: {:?}", remit_dir))?;

    RemitContext::new(&remit_dir).context("Failed to initialize remit context")
}

//! Interactive console handler.

use anyhow::{Context, Result};
use shelf_core::config::Config;

use crate::modes;

pub fn run(config: &Config) -> Result<()> {
    modes::run_console(config).context("console failed")?;
    Ok(())
}

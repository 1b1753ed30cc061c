//! Runtime execution modes.
//!
//! - `tui`: Full-screen interactive console (optional feature)

#[cfg(feature = "tui")]
pub use shelf_tui::run_console;

#[cfg(not(feature = "tui"))]
pub fn run_console(_config: &shelf_core::config::Config) -> anyhow::Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}

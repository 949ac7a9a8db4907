//! Full-screen TUI for deskmon.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod screens;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use deskmon_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive deskmon session.
///
/// Must be called from inside a tokio runtime; requests and timers are
/// spawned onto it while the event loop blocks this thread.
pub fn run(config: &Config) -> Result<()> {
    // The dashboard needs a real terminal to render
    if !stderr().is_terminal() {
        anyhow::bail!(
            "deskmon requires a terminal.\n\
             Use `deskmon login` or `deskmon register` for non-interactive use."
        );
    }

    let mut runtime = TuiRuntime::new(config)?;
    runtime.run()
}

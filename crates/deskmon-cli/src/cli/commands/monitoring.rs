//! Monitoring command handler.

use anyhow::Result;
use deskmon_core::config::Config;

pub fn run(config: &Config) -> Result<()> {
    let url = config.effective_monitoring_url();

    println!("Grafana dashboard: {url}");

    // Best effort, skip in tests
    if std::env::var("DESKMON_NO_BROWSER").is_err() {
        let _ = open::that(&url);
    }
    Ok(())
}

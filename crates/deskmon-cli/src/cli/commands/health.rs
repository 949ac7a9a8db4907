//! Health command handler.

use anyhow::Result;
use deskmon_core::api::ApiClient;
use deskmon_core::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let client = ApiClient::from_config(config)?;

    match client.health().await {
        Ok(response) => {
            let status = response.status.as_deref().unwrap_or("ok");
            println!("✓ API is up at {} ({status})", client.base_url());
            Ok(())
        }
        Err(err) => anyhow::bail!("API at {} is not reachable: {err}", client.base_url()),
    }
}

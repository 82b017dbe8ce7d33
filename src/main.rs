use anyhow::{Context, Result};
use std::path::Path;
use websupport_dns::{api::WebsupportClient, config, resource};

const DEFAULT_CONFIG: &str = "config.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [command, id] if command == "import" => import(id, None).await,
        [command, id, config_file] if command == "import" => import(id, Some(config_file)).await,
        [] => apply(DEFAULT_CONFIG).await,
        [config_file] => apply(config_file).await,
        _ => anyhow::bail!("usage: websupport-dns [CONFIG] | websupport-dns import ZONE/RECORD_ID [CONFIG]"),
    }
}

// Create or update every record declared in the config, then print the resulting state
async fn apply(config_file: &str) -> Result<()> {
    let mut config = config::load_config(Path::new(config_file))?;
    let client = WebsupportClient::new(config.credentials());

    resource::apply_all(&client, &mut config.records)
        .await
        .context("Failed to apply records")?;

    print!("{}", serde_yaml::to_string(&config.records)?);
    Ok(())
}

async fn import(id: &str, config_file: Option<&String>) -> Result<()> {
    let config = match config_file {
        Some(path) => config::load_config(Path::new(path))?,
        None => config::config_from_env()?,
    };
    let client = WebsupportClient::new(config.credentials());

    let record = resource::import(&client, id)
        .await
        .with_context(|| format!("Failed to import record {}", id))?;

    print!("{}", serde_yaml::to_string(&record)?);
    Ok(())
}

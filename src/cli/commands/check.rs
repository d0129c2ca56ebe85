//! Database check command handler

use tracing::info;

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    info!("Checking database at {}", config.general.database_path);

    let store = Store::new(&config.general.database_path).await?;
    store.ping().await?;

    let users = store.list_users().await?.len();
    let projects = store.list_projects().await?.len();

    println!("✓ Database reachable, schema up to date");
    println!("  {users} users, {projects} projects");

    if config.ai.api_key().is_none() {
        println!(
            "! {} is not set; user story generation will fail",
            config.ai.api_key_env
        );
    }

    Ok(())
}

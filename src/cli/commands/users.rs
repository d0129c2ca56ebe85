//! List users command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_list_users(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let users = store.list_users().await?;

    if users.is_empty() {
        println!("No users registered.");
        println!();
        println!("Register one with: POST /users/");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<70}", "");

    for user in users {
        println!("{:>5}  {:<24} {:<30} {}", user.id, user.name, user.email, user.role);
    }

    Ok(())
}

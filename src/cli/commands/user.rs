//! User management command handlers

use crate::config::Config;
use crate::db::Store;
use crate::models::reference::UserDraft;
use crate::services::{ReferenceService, SeaOrmReferenceService};

pub async fn cmd_user_add(
    config: &Config,
    username: String,
    full_name: String,
    role: String,
    password: String,
) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if let Some(existing) = store.get_user_by_username(&username).await? {
        anyhow::bail!(
            "User '{}' already exists with ID {}",
            existing.username,
            existing.id
        );
    }

    let service = SeaOrmReferenceService::new(store, config.security.clone());

    let id = service
        .create_user(UserDraft {
            username: username.clone(),
            full_name,
            role: role.clone(),
            password: Some(password),
        })
        .await?;

    println!("✓ Created user '{username}' ({role}) with ID {id}");
    Ok(())
}

pub async fn cmd_user_list(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let users = store.list_users().await?;

    if users.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<60}", "");

    for user in users {
        println!(
            "[{}] {} ({}) - {}",
            user.id, user.username, user.role, user.full_name
        );
    }

    Ok(())
}

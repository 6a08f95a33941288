use std::collections::HashMap;

use clap::{Args, Subcommand};

use gw2_core::{Gw2Client, Item, Session, MAX_IDS_PER_REQUEST};

use super::OutputFormat;
use crate::db::FavoriteRepository;

/// Favorite management commands
#[derive(Args)]
pub struct FavCommand {
    #[command(subcommand)]
    command: FavSubcommand,
}

#[derive(Subcommand)]
enum FavSubcommand {
    /// Add an item to favorites
    Add {
        /// Item id
        item_id: i32,
    },

    /// Remove an item from favorites
    Remove {
        /// Item id
        item_id: i32,
    },

    /// Toggle an item's favorite state
    Toggle {
        /// Item id
        item_id: i32,
    },

    /// List favorites in insertion order
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

/// Errors specific to favorite commands
#[derive(Debug)]
pub enum FavError {
    /// No session on disk
    NotSignedIn,
    /// Guest sessions cannot own favorites
    GuestSession,
}

impl std::fmt::Display for FavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FavError::NotSignedIn => {
                write!(f, "Not signed in. Run 'gw2 auth login --email <email>' first.")
            }
            FavError::GuestSession => {
                write!(f, "Guest sessions cannot manage favorites. Sign in with an email.")
            }
        }
    }
}

impl std::error::Error for FavError {}

impl FavCommand {
    pub async fn run(
        &self,
        repo: &FavoriteRepository,
        client: &Gw2Client,
        session: Option<&Session>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let session = session.ok_or(FavError::NotSignedIn)?;
        if session.guest {
            return Err(FavError::GuestSession.into());
        }
        let user_id = session.user_id.as_str();

        match &self.command {
            FavSubcommand::Add { item_id } => {
                repo.add(user_id, *item_id).await?;
                println!("Added item {} to favorites.", item_id);
            }

            FavSubcommand::Remove { item_id } => {
                if repo.remove(user_id, *item_id).await? {
                    println!("Removed item {} from favorites.", item_id);
                } else {
                    println!("Item {} was not a favorite.", item_id);
                }
            }

            FavSubcommand::Toggle { item_id } => {
                if repo.toggle(user_id, *item_id).await? {
                    println!("Added item {} to favorites.", item_id);
                } else {
                    println!("Removed item {} from favorites.", item_id);
                }
            }

            FavSubcommand::List { format } => {
                let favorites = repo.list(user_id).await?;
                if favorites.is_empty() {
                    println!("No favorites yet.");
                    return Ok(());
                }

                let details = fetch_details(client, &favorites).await;

                match format {
                    OutputFormat::Json => {
                        let rows: Vec<serde_json::Value> = favorites
                            .iter()
                            .map(|fav| {
                                serde_json::json!({
                                    "item_id": fav.item_id,
                                    "created_at": fav.created_at,
                                    "item": details.get(&fav.item_id),
                                })
                            })
                            .collect();
                        println!("{}", serde_json::to_string_pretty(&rows)?);
                    }
                    OutputFormat::Table => {
                        println!("{:<8} {:<42} {:<20}", "ID", "NAME", "FAVORITED");
                        for fav in &favorites {
                            let name = details
                                .get(&fav.item_id)
                                .map(|i| i.name.as_str())
                                .unwrap_or("(unknown)");
                            println!(
                                "{:<8} {:<42} {:<20}",
                                fav.item_id,
                                name,
                                fav.created_at.format("%Y-%m-%d %H:%M")
                            );
                        }
                    }
                }
            }
        }

        Ok(())
    }
}


/// Resolves favorite item details in request-sized batches. A failed
/// batch is logged and its rows fall back to ids only.
async fn fetch_details(
    client: &Gw2Client,
    favorites: &[gw2_core::Favorite],
) -> HashMap<i32, Item> {
    let ids: Vec<i32> = favorites.iter().map(|f| f.item_id).collect();
    let mut details = HashMap::new();

    for batch in ids.chunks(MAX_IDS_PER_REQUEST) {
        match client.items_by_ids(batch).await {
            Ok(items) => {
                details.extend(items.into_iter().map(|i| (i.id, i)));
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to resolve favorite details");
            }
        }
    }

    details
}

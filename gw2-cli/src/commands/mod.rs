//! CLI command implementations.

mod auth;
mod browse;
mod config_cmd;
mod fav;
mod item;
mod preload_cmd;
mod recipe;
mod search;

pub use auth::AuthCommand;
pub use browse::BrowseCommand;
pub use config_cmd::ConfigCommand;
pub use fav::FavCommand;
pub use item::ItemCommand;
pub use preload_cmd::PreloadCommand;
pub use recipe::RecipeCommand;
pub use search::SearchCommand;

use clap::ValueEnum;
use std::io::{self, Write};

use gw2_core::{Catalog, Gw2Client, Item, PreloadOptions};

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Resolves the batch cap: a `--batches` flag wins over the configured
/// value, and 0 means the full catalog.
pub(crate) fn preload_options(batches_flag: Option<usize>, config: &Config) -> PreloadOptions {
    match batches_flag.unwrap_or(config.max_batches.value) {
        0 => PreloadOptions::default(),
        n => PreloadOptions::capped(n),
    }
}

/// Runs the catalog preload, reporting progress on stderr.
pub(crate) async fn preload_catalog(
    client: &Gw2Client,
    batches_flag: Option<usize>,
    config: &Config,
) -> Catalog {
    let options = preload_options(batches_flag, config);

    let catalog = gw2_core::preload(client, options, |loaded, planned| {
        eprint!("\rLoading catalog: {}/{} items", loaded, planned);
        let _ = io::stderr().flush();
    })
    .await;
    eprintln!();

    catalog
}

pub(crate) fn print_item_table(items: &[&Item]) {
    println!(
        "{:<8} {:<42} {:<14} {:<10} {:>5}",
        "ID", "NAME", "TYPE", "RARITY", "LEVEL"
    );
    for item in items {
        println!(
            "{:<8} {:<42} {:<14} {:<10} {:>5}",
            item.id,
            truncate(&item.name, 42),
            item.kind,
            item.rarity,
            item.level
        );
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_names_alone() {
        assert_eq!(truncate("Sword", 10), "Sword");
    }

    #[test]
    fn truncate_shortens_long_names() {
        let out = truncate("A very long legendary greatsword name", 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn preload_options_flag_beats_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("none.yaml"))).unwrap();

        assert_eq!(preload_options(Some(3), &config).max_batches, Some(3));
        assert_eq!(preload_options(Some(0), &config).max_batches, None);
        assert_eq!(
            preload_options(None, &config).max_batches,
            Some(crate::config::DEFAULT_MAX_BATCHES)
        );
    }
}

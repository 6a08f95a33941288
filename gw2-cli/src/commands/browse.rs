use clap::Args;
use rand::seq::IndexedRandom;

use gw2_core::{Gw2Client, Item};

use super::{preload_catalog, print_item_table, OutputFormat};
use crate::config::Config;

/// Show a random selection of items from the preloaded catalog.
#[derive(Args)]
pub struct BrowseCommand {
    /// How many items to show
    #[arg(long, short = 'n', default_value_t = 10)]
    pub count: usize,

    /// Number of id batches to preload (0 = full catalog)
    #[arg(long, short)]
    pub batches: Option<usize>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl BrowseCommand {
    pub async fn run(
        &self,
        client: &Gw2Client,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let catalog = preload_catalog(client, self.batches, config).await;
        if catalog.is_empty() {
            eprintln!("Catalog is empty; nothing to browse.");
            return Ok(());
        }

        let mut rng = rand::rng();
        let picks: Vec<&Item> = catalog
            .items()
            .choose_multiple(&mut rng, self.count)
            .collect();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&picks)?);
            }
            OutputFormat::Table => print_item_table(&picks),
        }

        Ok(())
    }
}

use clap::Args;

use gw2_core::Gw2Client;

use super::{preload_catalog, print_item_table, OutputFormat};
use crate::config::Config;

/// Search the preloaded catalog by name, category or subtype.
#[derive(Args)]
pub struct SearchCommand {
    /// Search text
    pub query: String,

    /// Number of id batches to preload (0 = full catalog)
    #[arg(long, short)]
    pub batches: Option<usize>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl SearchCommand {
    pub async fn run(
        &self,
        client: &Gw2Client,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let catalog = preload_catalog(client, self.batches, config).await;
        if catalog.is_empty() {
            eprintln!("Catalog is empty; nothing to search.");
        }

        let results = catalog.search(&self.query);

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&results)?);
            }
            OutputFormat::Table => {
                if results.is_empty() {
                    println!("No items matched '{}'.", self.query.trim());
                } else {
                    print_item_table(&results);
                    println!(
                        "\n{} of {} loaded items matched.",
                        results.len(),
                        catalog.len()
                    );
                }
            }
        }

        Ok(())
    }
}

use std::io::{self, Write};

use clap::Args;

use gw2_core::Gw2Client;

use super::preload_options;
use crate::config::Config;

/// Run the catalog preload and report progress and final counts.
#[derive(Args)]
pub struct PreloadCommand {
    /// Number of id batches to fetch (0 = full catalog)
    #[arg(long, short)]
    pub batches: Option<usize>,
}

impl PreloadCommand {
    pub async fn run(
        &self,
        client: &Gw2Client,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let options = preload_options(self.batches, config);

        let mut planned_total = 0usize;
        let catalog = gw2_core::preload(client, options, |loaded, planned| {
            planned_total = planned;
            print!("\rLoaded {}/{} items", loaded, planned);
            let _ = io::stdout().flush();
        })
        .await;
        println!();

        if catalog.is_empty() {
            println!("Preload produced no items; see warnings above.");
        } else if catalog.len() < planned_total {
            println!(
                "Partial preload: {} of {} planned items.",
                catalog.len(),
                planned_total
            );
        } else {
            println!("Preload complete: {} items.", catalog.len());
        }

        Ok(())
    }
}

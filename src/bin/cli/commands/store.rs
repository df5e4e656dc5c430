use clap::Subcommand;

use crate::client::StoreboardClient;
use crate::output::{self, OutputConfig};

/// Store commands
#[derive(Subcommand, Debug)]
pub enum StoreCommands {
    /// Register a store
    Create {
        /// The store name
        name: String,
    },
    /// Show a store and its rating
    Show {
        /// The store ID
        id: String,
    },
}

/// Executes a store command
pub async fn execute(
    client: &StoreboardClient,
    cmd: StoreCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = match cmd {
        StoreCommands::Create { name } => client.create_store(name).await?,
        StoreCommands::Show { id } => client.get_store(&id).await?,
    };
    output::print_store(&store, config);
    Ok(())
}

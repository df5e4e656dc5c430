use clap::Subcommand;

use crate::client::StoreboardClient;
use crate::output::{self, OutputConfig};

/// User profile commands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Register a user profile
    Create {
        #[clap(long)]
        nickname: String,
        #[clap(long)]
        name: String,
        /// Location of an avatar image
        #[clap(long)]
        profile_image: Option<String>,
    },
    /// Show a user profile
    Show {
        /// The user ID
        id: String,
    },
}

/// Executes a user command
pub async fn execute(
    client: &StoreboardClient,
    cmd: UserCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = match cmd {
        UserCommands::Create {
            nickname,
            name,
            profile_image,
        } => client.create_user(nickname, name, profile_image).await?,
        UserCommands::Show { id } => client.get_user(&id).await?,
    };
    output::print_user(&user, config);
    Ok(())
}

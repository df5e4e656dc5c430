use clap::Subcommand;

use crate::client::StoreboardClient;
use crate::output::{self, OutputConfig};

/// Comment commands
#[derive(Subcommand, Debug)]
pub enum CommentCommands {
    /// Comment on a board (requires --user)
    Create {
        /// The board to comment on
        #[clap(long)]
        board_id: String,
        /// The comment text
        content: String,
    },
    /// Show a comment
    Show {
        /// The comment ID
        id: String,
    },
    /// Delete a comment you wrote (requires --user)
    Delete {
        /// The comment ID
        id: String,
    },
}

/// Executes a comment command
pub async fn execute(
    client: &StoreboardClient,
    cmd: CommentCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        CommentCommands::Create { board_id, content } => {
            let comment = client.create_comment(&board_id, content).await?;
            output::print_comment(&comment, config);
        }
        CommentCommands::Show { id } => {
            let comment = client.get_comment(&id).await?;
            output::print_comment(&comment, config);
        }
        CommentCommands::Delete { id } => {
            client.delete_comment(&id).await?;
            output::print_done(&format!("Deleted comment {}", id), config);
        }
    }
    Ok(())
}

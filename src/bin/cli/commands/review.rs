use clap::Subcommand;

use crate::client::StoreboardClient;
use crate::output::{self, OutputConfig};

/// Review commands
#[derive(Subcommand, Debug)]
pub enum ReviewCommands {
    /// Show a review
    Show {
        /// The review ID
        id: String,
    },
    /// List the reviews of a store
    List {
        /// The store ID
        #[clap(long)]
        store_id: String,
    },
    /// Review a store (requires --user)
    Create {
        /// The store to review
        #[clap(long)]
        store_id: String,
        /// The grade (1-5)
        #[clap(long)]
        grade: i32,
        /// The review text
        content: String,
    },
    /// Change the grade and text of a review
    Edit {
        /// The review ID
        id: String,
        /// The new grade (1-5)
        #[clap(long)]
        grade: i32,
        /// The new review text
        content: String,
    },
    /// Delete a review
    Delete {
        /// The review ID
        id: String,
    },
}

/// Executes a review command
pub async fn execute(
    client: &StoreboardClient,
    cmd: ReviewCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ReviewCommands::Show { id } => match client.get_review(&id).await? {
            Some(review) => output::print_review(&review, config),
            None => return Err(format!("Review {} not found", id).into()),
        },
        ReviewCommands::List { store_id } => {
            let reviews = client.list_store_reviews(&store_id).await?;
            output::print_reviews(&reviews, config);
        }
        ReviewCommands::Create {
            store_id,
            grade,
            content,
        } => {
            let review = client.create_review(&store_id, grade, content).await?;
            output::print_review(&review, config);
        }
        ReviewCommands::Edit { id, grade, content } => {
            let store = client.edit_review(&id, grade, content).await?;
            output::print_store(&store, config);
        }
        ReviewCommands::Delete { id } => {
            client.delete_review(&id).await?;
            output::print_done(&format!("Deleted review {}", id), config);
        }
    }
    Ok(())
}

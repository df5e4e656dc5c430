use chrono::NaiveDate;
use clap::Subcommand;
use std::path::PathBuf;
use storeboard::dto::UpdateBoardDto;

use crate::client::{NewBoard, StoreboardClient};
use crate::output::{self, OutputConfig};

/// Board commands
#[derive(Subcommand, Debug)]
pub enum BoardCommands {
    /// Show one page of boards, newest first
    List {
        /// The page to show, starting at 1
        #[clap(long)]
        page: Option<i64>,
        /// Boards per page
        #[clap(long)]
        per_page: Option<i64>,
    },
    /// Show a board with its comments
    Show {
        /// The board ID
        id: String,
    },
    /// Find the boards in a region
    Search {
        /// The region, matched exactly
        region: String,
    },
    /// Post a new board (requires --user)
    Create {
        #[clap(long)]
        region: String,
        #[clap(long)]
        title: String,
        #[clap(long)]
        content: String,
        /// Meetup date as YYYY-MM-DD
        #[clap(long)]
        meet_date: String,
        /// Path of the image to attach
        #[clap(long)]
        image: PathBuf,
        /// The store the meetup is at
        #[clap(long)]
        store_id: Option<String>,
    },
    /// Change fields of a board; fields left out stay as they are
    Edit {
        /// The board ID
        id: String,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        content: Option<String>,
        /// New meetup date as YYYY-MM-DD
        #[clap(long)]
        meet_date: Option<NaiveDate>,
        #[clap(long)]
        region: Option<String>,
    },
    /// Delete a board you own (requires --user)
    Delete {
        /// The board ID
        id: String,
    },
}

/// Executes a board command
pub async fn execute(
    client: &StoreboardClient,
    cmd: BoardCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        BoardCommands::List { page, per_page } => {
            let page = client.list_boards(page, per_page).await?;
            output::print_board_page(&page, config);
        }
        BoardCommands::Show { id } => {
            let detail = client.get_board(&id).await?;
            output::print_board_detail(&detail, config);
        }
        BoardCommands::Search { region } => {
            let boards = client.search_boards(&region).await?;
            output::print_boards(&boards, config);
        }
        BoardCommands::Create {
            region,
            title,
            content,
            meet_date,
            image,
            store_id,
        } => {
            let board = NewBoard {
                region,
                title,
                content,
                meet_date,
                store_id,
            };
            let board = client.create_board(board, &image).await?;
            output::print_board(&board, config);
        }
        BoardCommands::Edit {
            id,
            title,
            content,
            meet_date,
            region,
        } => {
            let changes = UpdateBoardDto {
                title,
                content,
                meet_date,
                region,
            };
            let board = client.edit_board(&id, &changes).await?;
            output::print_board(&board, config);
        }
        BoardCommands::Delete { id } => {
            client.delete_board(&id).await?;
            output::print_done(&format!("Deleted board {}", id), config);
        }
    }
    Ok(())
}

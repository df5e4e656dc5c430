use clap::ValueEnum;
use serde::Serialize;
use storeboard::dto::{BoardDetail, BoardPage, BoardView, CommentView};
use storeboard::models::{Board, Review, Store, User, UserSummary};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Bundled output configuration passed to all print functions
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// The output format
    pub format: OutputFormat,
    /// When true, print minimal output (just IDs or counts)
    pub quiet: bool,
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Could not render JSON: {}", e),
    }
}

fn owner_name(owner: &Option<UserSummary>) -> &str {
    owner.as_ref().map_or("(unknown)", |owner| owner.nickname.as_str())
}

fn print_board_rows(rows: impl Iterator<Item = (String, String, String, String)>) {
    println!("{:<36}  {:<10}  {:<12}  TITLE", "ID", "MEET", "REGION");
    for (id, meet, region, title) in rows {
        println!("{:<36}  {:<10}  {:<12}  {}", id, meet, region, title);
    }
}

fn board_view_row(board: &BoardView) -> (String, String, String, String) {
    (
        board.id.clone(),
        board.meet_date.to_string(),
        board.region.clone(),
        board.title.clone(),
    )
}

/// Prints one page of the board listing
pub fn print_board_page(page: &BoardPage, config: &OutputConfig) {
    match config.format {
        OutputFormat::Json => print_json(page),
        OutputFormat::Human => {
            if config.quiet {
                for board in &page.data {
                    println!("{}", board.id);
                }
                return;
            }
            if page.data.is_empty() {
                println!("No boards found.");
                return;
            }
            print_board_rows(page.data.iter().map(board_view_row));
            println!(
                "Page {} of {} ({} boards)",
                page.current_page, page.total_pages, page.total_count
            );
        }
    }
}

/// Prints a list of raw boards
pub fn print_boards(boards: &[Board], config: &OutputConfig) {
    match config.format {
        OutputFormat::Json => print_json(boards),
        OutputFormat::Human => {
            if config.quiet {
                for board in boards {
                    println!("{}", board.get_id());
                }
                return;
            }
            if boards.is_empty() {
                println!("No boards found.");
                return;
            }
            print_board_rows(boards.iter().map(|board| {
                (
                    board.get_id(),
                    board.get_meet_date().to_string(),
                    board.get_region(),
                    board.get_title(),
                )
            }));
        }
    }
}

/// Prints a single raw board
pub fn print_board(board: &Board, config: &OutputConfig) {
    match config.format {
        OutputFormat::Json => print_json(board),
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", board.get_id());
                return;
            }
            println!("ID:       {}", board.get_id());
            println!("Title:    {}", board.get_title());
            println!("Region:   {}", board.get_region());
            println!("Meet on:  {}", board.get_meet_date());
            println!("Owner:    {}", board.get_user_id());
            if let Some(store_id) = board.get_store_id() {
                println!("Store:    {}", store_id);
            }
            println!("Image:    {}", board.get_image());
            println!();
            println!("{}", board.get_content());
        }
    }
}

/// Prints a board with its comments
pub fn print_board_detail(detail: &BoardDetail, config: &OutputConfig) {
    match config.format {
        OutputFormat::Json => print_json(detail),
        OutputFormat::Human => {
            let board = &detail.board;
            if config.quiet {
                println!("{}", board.id);
                return;
            }
            println!("{} ({})", board.title, board.id);
            println!(
                "{} in {} on {}, posted {}",
                owner_name(&board.owner),
                board.region,
                board.meet_date,
                board.created_at
            );
            println!();
            println!("{}", board.content);
            if !detail.comments.is_empty() {
                println!();
                println!("Comments:");
                for comment in &detail.comments {
                    println!(
                        "  [{}] {}: {}",
                        comment.created_at,
                        owner_name(&comment.owner),
                        comment.content
                    );
                }
            }
        }
    }
}

/// Prints a single comment
pub fn print_comment(comment: &CommentView, config: &OutputConfig) {
    match config.format {
        OutputFormat::Json => print_json(comment),
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", comment.id);
                return;
            }
            println!("ID:       {}", comment.id);
            println!("Board:    {}", comment.board_id);
            println!("Author:   {}", owner_name(&comment.owner));
            println!("Posted:   {}", comment.created_at);
            println!("Content:  {}", comment.content);
        }
    }
}

/// Prints a single review
pub fn print_review(review: &Review, config: &OutputConfig) {
    match config.format {
        OutputFormat::Json => print_json(review),
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", review.get_id());
                return;
            }
            println!("ID:       {}", review.get_id());
            println!("Store:    {}", review.get_store_id());
            println!("Author:   {}", review.get_user_nickname());
            println!("Grade:    {}", review.get_grade());
            println!("Content:  {}", review.get_content());
        }
    }
}

/// Prints the reviews of a store
pub fn print_reviews(reviews: &[Review], config: &OutputConfig) {
    match config.format {
        OutputFormat::Json => print_json(reviews),
        OutputFormat::Human => {
            if config.quiet {
                for review in reviews {
                    println!("{}", review.get_id());
                }
                return;
            }
            if reviews.is_empty() {
                println!("No reviews found.");
                return;
            }
            println!("{:<36}  GRADE  AUTHOR", "ID");
            for review in reviews {
                println!(
                    "{:<36}  {:<5}  {}",
                    review.get_id(),
                    review.get_grade(),
                    review.get_user_nickname()
                );
            }
        }
    }
}

/// Prints a single store with its rating
pub fn print_store(store: &Store, config: &OutputConfig) {
    match config.format {
        OutputFormat::Json => print_json(store),
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", store.get_id());
                return;
            }
            println!("ID:       {}", store.get_id());
            println!("Name:     {}", store.get_name());
            println!(
                "Rating:   {:.2} ({} reviews)",
                store.get_star_rating(),
                store.review_count()
            );
        }
    }
}

/// Prints a single user profile
pub fn print_user(user: &User, config: &OutputConfig) {
    match config.format {
        OutputFormat::Json => print_json(user),
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", user.get_id());
                return;
            }
            println!("ID:       {}", user.get_id());
            println!("Nickname: {}", user.get_nickname());
            println!("Name:     {}", user.get_name());
        }
    }
}

/// Prints a confirmation for operations that return no body
pub fn print_done(message: &str, config: &OutputConfig) {
    match config.format {
        OutputFormat::Json => print_json(&serde_json::json!({ "message": message })),
        OutputFormat::Human => {
            if !config.quiet {
                println!("{}", message);
            }
        }
    }
}

mod client;
mod commands;
mod output;

use clap::{Parser, Subcommand};
use client::StoreboardClient;
use output::{OutputConfig, OutputFormat};
use std::process;
use storeboard::config;

/// CLI for the Storeboard service
#[derive(Parser, Debug)]
#[clap(name = "storeboard-cli", about = "CLI for the Storeboard community service")]
struct Cli {
    /// Server URL to connect to
    #[clap(long, env = "STOREBOARD_URL", global = true)]
    server_url: Option<String>,

    /// User id to act as; forwarded to the server as the authenticated user
    #[clap(long, env = "STOREBOARD_USER", global = true)]
    user: Option<String>,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    format: OutputFormat,

    /// Quiet mode: minimal output (just IDs)
    #[clap(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage boards
    #[command(subcommand)]
    Board(commands::board::BoardCommands),
    /// Manage comments
    #[command(subcommand)]
    Comment(commands::comment::CommentCommands),
    /// Manage reviews
    #[command(subcommand)]
    Review(commands::review::ReviewCommands),
    /// Manage stores
    #[command(subcommand)]
    Store(commands::store::StoreCommands),
    /// Manage user profiles
    #[command(subcommand)]
    User(commands::user::UserCommands),
}

/// Resolves the server URL from CLI args, config file, or defaults
///
/// Precedence: CLI flag / env var > config file > default
fn resolve_server_url(cli_url: Option<String>) -> String {
    if let Some(url) = cli_url {
        return url;
    }

    let config_path = config::get_config_dir_path().map(|dir| dir.join("config.toml"));
    if let Ok(update) = config::config_from_file(config_path) {
        if let Some(url) = update.server_url {
            return url;
        }
    }

    "http://localhost:3000".to_string()
}

/// Formats an error for human-readable stderr output
fn format_error(err: &dyn std::error::Error) -> String {
    let err_string = err.to_string();

    if err_string.contains("error sending request")
        || err_string.contains("connection refused")
        || err_string.contains("Connection refused")
        || err_string.contains("tcp connect error")
    {
        return format!(
            "Could not connect to server. Is storeboard running?\n  {}",
            err_string
        );
    }

    err_string
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let server_url = resolve_server_url(cli.server_url);
    let client = StoreboardClient::new(server_url, cli.user);
    let output_config = OutputConfig {
        format: cli.format,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Board(cmd) => commands::board::execute(&client, cmd, &output_config).await,
        Commands::Comment(cmd) => commands::comment::execute(&client, cmd, &output_config).await,
        Commands::Review(cmd) => commands::review::execute(&client, cmd, &output_config).await,
        Commands::Store(cmd) => commands::store::execute(&client, cmd, &output_config).await,
        Commands::User(cmd) => commands::user::execute(&client, cmd, &output_config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", format_error(e.as_ref()));
        process::exit(1);
    }
}

use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Configuration for the Storeboard service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Address the HTTP server listens on
    pub bind_address: String,
    /// Directory uploaded board images are written to
    pub upload_dir: String,
    /// Page size of the board listing when the request gives none
    pub count_per_page: i64,
    /// Largest accepted board post, in megabytes
    pub max_upload_mb: u64,
    /// Directory for daily rolling log files; stdout only when unset
    pub log_dir: Option<String>,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub bind_address: Option<String>,
    #[serde(default)]
    pub upload_dir: Option<String>,
    #[serde(default)]
    pub count_per_page: Option<i64>,
    #[serde(default)]
    pub max_upload_mb: Option<u64>,
    #[serde(default)]
    pub log_dir: Option<String>,
    /// Server URL the command-line client connects to; not used by the server
    #[serde(default)]
    pub server_url: Option<String>,
}

/// Command line arguments for the server
#[derive(Parser, Debug, Default)]
#[clap(name = "storeboard", about = "Community board and store review service")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address to listen on, e.g. 0.0.0.0:3000
    #[clap(long, env = "STOREBOARD_BIND")]
    pub bind_address: Option<String>,

    /// Directory for uploaded images
    #[clap(long, env = "STOREBOARD_UPLOAD_DIR")]
    pub upload_dir: Option<String>,

    /// Default number of boards per page
    #[clap(long, env = "STOREBOARD_COUNT_PER_PAGE")]
    pub count_per_page: Option<i64>,

    /// Largest accepted board post in megabytes
    #[clap(long, env = "STOREBOARD_MAX_UPLOAD_MB")]
    pub max_upload_mb: Option<u64>,

    /// Directory for rolling log files
    #[clap(long, env = "STOREBOARD_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Emit logs as JSON lines
    #[clap(long, env = "STOREBOARD_LOG_JSON", default_value_t = false)]
    pub log_json: bool,

    /// Debug mode
    #[clap(long, env = "STOREBOARD_DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            bind_address: update.bind_address.unwrap_or(self.bind_address),
            upload_dir: update.upload_dir.unwrap_or(self.upload_dir),
            count_per_page: update.count_per_page.unwrap_or(self.count_per_page),
            max_upload_mb: update.max_upload_mb.unwrap_or(self.max_upload_mb),
            log_dir: update.log_dir.or(self.log_dir),
        }
    }

    /// The upload size limit in bytes
    pub fn max_upload_bytes(&self) -> usize {
        usize::try_from(self.max_upload_mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }
}

/// Returns the base (default) configuration
///
/// With a config directory, the database and uploads live inside it;
/// otherwise they are relative to the working directory.
pub fn base_config(config_path: Option<PathBuf>) -> Config {
    let in_dir = |name: &str| {
        config_path.as_ref().map_or(name.to_string(), |path| {
            path.join(name).to_string_lossy().to_string()
        })
    };

    Config {
        database_url: in_dir("storeboard.db"),
        bind_address: "0.0.0.0:3000".to_string(),
        upload_dir: in_dir("uploads"),
        count_per_page: 10,
        max_upload_mb: 10,
        log_dir: None,
    }
}

/// Loads configuration from a TOML file
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: &CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url.clone(),
        bind_address: args.bind_address.clone(),
        upload_dir: args.upload_dir.clone(),
        count_per_page: args.count_per_page,
        max_upload_mb: args.max_upload_mb,
        log_dir: args.log_dir.clone(),
        server_url: None,
    }
}

/// Returns the platform config directory, if one can be determined
pub fn get_config_dir_path() -> Option<PathBuf> {
    match ProjectDirs::from("com", "storeboard", "storeboard") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().to_path_buf()),
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    }
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: &CliArgs) -> Config {
    let config_path = get_config_dir_path().filter(|path| {
        let exists = path.exists();
        if !exists {
            info!("Config path not found at {:?}, using defaults", path);
        }
        exists
    });

    let file_update = config_from_file(config_path.as_ref().map(|dir| dir.join("config.toml")))
        .unwrap_or_default();

    let config = base_config(config_path)
        .apply_update(file_update)
        .apply_update(config_from_args(args));

    info!(
        "Final configuration: database_url={}, bind_address={}, upload_dir={}, count_per_page={}",
        config.database_url, config.bind_address, config.upload_dir, config.count_per_page
    );

    config
}

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Public path prefix under which stored uploads are served
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Stores uploaded images on disk and hands out their public locations
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory files are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` under a fresh name and returns its location
    ///
    /// The extension of `original_name` is kept when it is purely
    /// alphanumeric; anything else is dropped so client names never reach
    /// the filesystem.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> io::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = match original_name.and_then(safe_extension) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;

        debug!("Stored upload as {}", file_name);
        Ok(format!("{}/{}", UPLOADS_ROUTE, file_name))
    }

    /// Deletes the file behind `location`; missing files are not an error
    #[instrument(skip(self))]
    pub async fn remove(&self, location: &str) -> io::Result<()> {
        let Some(file_name) = location
            .strip_prefix(UPLOADS_ROUTE)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.is_empty() && !name.contains(['/', '\\']) && *name != "..")
        else {
            warn!("Refusing to remove upload outside the store: {}", location);
            return Ok(());
        };

        match tokio::fs::remove_file(self.dir.join(file_name)).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

fn safe_extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

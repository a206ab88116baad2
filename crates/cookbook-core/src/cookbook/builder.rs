//! Builder for creating and configuring Cookbook instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Cookbook;
use crate::{
    db::Database,
    error::{CookbookError, Result},
    images::ImageStore,
};

const APP_PREFIX: &str = "cookbook";
const DATABASE_FILE: &str = "cookbook.db";
const IMAGE_DIR: &str = "images";

/// Builder for creating and configuring Cookbook instances.
#[derive(Debug, Clone, Default)]
pub struct CookbookBuilder {
    database_path: Option<PathBuf>,
    image_dir: Option<PathBuf>,
}

impl CookbookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG data directory:
    /// `$XDG_DATA_HOME/cookbook/cookbook.db` or
    /// `~/.local/share/cookbook/cookbook.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets a custom image directory.
    ///
    /// Defaults to an `images` directory next to a custom database file, or
    /// `$XDG_DATA_HOME/cookbook/images` otherwise.
    pub fn with_image_dir<P: AsRef<Path>>(mut self, dir: Option<P>) -> Self {
        if let Some(dir) = dir {
            self.image_dir = Some(dir.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured cookbook, creating directories and the schema.
    ///
    /// # Errors
    ///
    /// Returns `CookbookError::XdgDirectory` if no default location exists,
    /// `CookbookError::FileSystem` if a directory cannot be created and
    /// `CookbookError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<Cookbook> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        let image_dir = match (self.image_dir, db_path.parent()) {
            (Some(dir), _) => dir,
            (None, Some(parent)) if !parent.as_os_str().is_empty() => parent.join(IMAGE_DIR),
            (None, _) => PathBuf::from(IMAGE_DIR),
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| CookbookError::file_system(parent, e))?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), CookbookError>(())
        })
        .await
        .map_err(|e| CookbookError::join(&e))??;

        debug!(
            "Opened cookbook at {} with images in {}",
            db_path.display(),
            image_dir.display()
        );
        Ok(Cookbook::new(db_path, ImageStore::new(image_dir)))
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix(APP_PREFIX)
            .place_data_file(DATABASE_FILE)
            .map_err(|e| CookbookError::XdgDirectory(e.to_string()))
    }
}

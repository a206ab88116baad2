//! Backup export and import for the Cookbook.

use std::fs;

use log::{info, warn};
use tokio::task;

use super::Cookbook;
use crate::{
    backup::{BackupDocument, ExportSummary, ImportReport},
    db::{now, Database},
    error::{CookbookError, Result},
    images::{decode_data_uri, RESTORE_PREFIX},
    params::{ExportBackup, ImportBackup},
};

impl Cookbook {
    /// Writes every category, recipe, ingredient and step to a JSON file.
    ///
    /// With `embed_images`, readable image files are included as base64
    /// data URIs next to their paths.
    pub async fn export_backup(&self, params: &ExportBackup) -> Result<ExportSummary> {
        let db_path = self.db_path.clone();
        let path = params.path.clone();
        let embed_images = params.embed_images;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let mut document = BackupDocument::from_snapshot(db.snapshot()?, now());

            let images_embedded = if embed_images {
                document.embed_images()
            } else {
                0
            };

            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| CookbookError::file_system(parent, e))?;
            }
            fs::write(&path, document.to_json()?)
                .map_err(|e| CookbookError::file_system(&path, e))?;

            info!(
                "Exported {} categories and {} recipes to {}",
                document.categories.len(),
                document.recipes.len(),
                path.display()
            );
            Ok(ExportSummary {
                categories: document.categories.len(),
                recipes: document.recipes.len(),
                images_embedded,
                path,
            })
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Merges a JSON backup into the collection.
    ///
    /// Records are matched by name; a match is overwritten only when the
    /// backup's copy was modified more recently. Embedded images are written
    /// into the image directory.
    pub async fn import_backup(&self, params: &ImportBackup) -> Result<ImportReport> {
        let db_path = self.db_path.clone();
        let images = self.images.clone();
        let path = params.path.clone();

        task::spawn_blocking(move || {
            let json =
                fs::read_to_string(&path).map_err(|e| CookbookError::file_system(&path, e))?;
            let document = BackupDocument::from_json(&json)?;

            let mut db = Database::new(&db_path)?;
            let mut restored: Vec<String> = Vec::new();

            let mut resolve = |path: Option<&str>, embedded: Option<&str>| -> Option<String> {
                if let Some(data) = embedded.filter(|d| !d.trim().is_empty()) {
                    let saved = decode_data_uri(data)
                        .and_then(|(bytes, ext)| images.save_bytes(&bytes, RESTORE_PREFIX, ext));
                    return match saved {
                        Ok(stored) => {
                            restored.push(stored.clone());
                            Some(stored)
                        }
                        Err(e) => {
                            warn!("Dropping embedded image that could not be restored: {e}");
                            None
                        }
                    };
                }
                path.filter(|p| !p.trim().is_empty()).map(String::from)
            };

            match db.merge_backup(&document, &mut resolve) {
                Ok(mut report) => {
                    report.images_restored = restored.len();
                    info!("Imported backup from {}", path.display());
                    Ok(report)
                }
                Err(e) => {
                    images.delete_all(&restored);
                    Err(e)
                }
            }
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }
}

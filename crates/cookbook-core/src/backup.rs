//! JSON backup document.
//!
//! A backup holds every category, recipe, ingredient and step as flat
//! arrays linked by ID, with timestamps in epoch milliseconds. Images are
//! referenced by path, and can additionally be embedded as base64 data URIs
//! so a backup moved to another machine still carries its pictures.
//!
//! Merging a document into a store is done by
//! [`Database::merge_backup`](crate::db::Database::merge_backup), which
//! produces an [`ImportReport`].

use std::path::Path;

use jiff::Timestamp;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    db::Snapshot,
    error::{CookbookError, Result},
    images::encode_data_uri,
};

/// Newest document version this build reads and the one it writes.
pub const BACKUP_VERSION: u32 = 1;

fn default_version() -> u32 {
    BACKUP_VERSION
}

/// Serde adapter storing a [`Timestamp`] as integer epoch milliseconds.
pub mod epoch_millis {
    use jiff::Timestamp;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(ts.as_millisecond())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let millis = i64::deserialize(deserializer)?;
        Timestamp::from_millisecond(millis).map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(with = "epoch_millis", default)]
    pub export_time: Timestamp,
    #[serde(default)]
    pub categories: Vec<BackupCategory>,
    #[serde(default)]
    pub recipes: Vec<BackupRecipe>,
    #[serde(default)]
    pub ingredients: Vec<BackupIngredient>,
    #[serde(default)]
    pub steps: Vec<BackupStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupCategory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(with = "epoch_millis", default)]
    pub created_at: Timestamp,
    #[serde(with = "epoch_millis", default)]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupRecipe {
    pub id: u64,
    pub name: String,
    pub category_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_path: Option<String>,
    /// Cover image as a data URI, present only in embedded exports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_base64: Option<String>,
    /// View counter
    #[serde(default)]
    pub click_count: u32,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(with = "epoch_millis", default)]
    pub created_at: Timestamp,
    #[serde(with = "epoch_millis", default)]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupIngredient {
    #[serde(default)]
    pub id: u64,
    pub recipe_id: u64,
    pub name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub sort_order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupStep {
    #[serde(default)]
    pub id: u64,
    pub recipe_id: u64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Step image as a data URI, present only in embedded exports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub step_number: u32,
    #[serde(default)]
    pub sort_order: u32,
}

impl BackupDocument {
    /// Builds a document from a consistent snapshot of the store.
    pub fn from_snapshot(snapshot: Snapshot, export_time: Timestamp) -> Self {
        Self {
            version: BACKUP_VERSION,
            export_time,
            categories: snapshot
                .categories
                .into_iter()
                .map(|c| BackupCategory {
                    id: c.id,
                    name: c.name,
                    sort_order: c.sort_order,
                    created_at: c.created_at,
                    updated_at: c.updated_at,
                })
                .collect(),
            recipes: snapshot
                .recipes
                .into_iter()
                .map(|r| BackupRecipe {
                    id: r.id,
                    name: r.name,
                    category_id: r.category_id,
                    cover_image_path: r.cover_image_path,
                    cover_image_base64: None,
                    click_count: r.view_count,
                    is_favorite: r.is_favorite,
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                })
                .collect(),
            ingredients: snapshot
                .ingredients
                .into_iter()
                .map(|i| BackupIngredient {
                    id: i.id,
                    recipe_id: i.recipe_id,
                    name: i.name,
                    amount: i.amount,
                    sort_order: i.sort_order,
                })
                .collect(),
            steps: snapshot
                .steps
                .into_iter()
                .map(|s| BackupStep {
                    id: s.id,
                    recipe_id: s.recipe_id,
                    description: s.description,
                    image_path: s.image_path,
                    image_base64: None,
                    step_number: s.step_number,
                    sort_order: s.sort_order,
                })
                .collect(),
        }
    }

    /// Embeds every readable cover and step image as a data URI.
    ///
    /// Returns how many images were embedded. Unreadable files are skipped
    /// with a warning and keep only their path.
    pub fn embed_images(&mut self) -> usize {
        let covers = self
            .recipes
            .iter_mut()
            .map(|r| (r.cover_image_path.as_deref(), &mut r.cover_image_base64));
        let steps = self
            .steps
            .iter_mut()
            .map(|s| (s.image_path.as_deref(), &mut s.image_base64));

        let mut embedded = 0;
        for (path, slot) in covers.chain(steps) {
            let Some(path) = path.filter(|p| !p.trim().is_empty()) else {
                continue;
            };
            match encode_data_uri(Path::new(path)) {
                Ok(uri) => {
                    *slot = Some(uri);
                    embedded += 1;
                }
                Err(e) => warn!("Not embedding image {path}: {e}"),
            }
        }
        embedded
    }

    /// Parses a document and rejects versions newer than this build reads.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(json)?;
        if document.version > BACKUP_VERSION {
            return Err(CookbookError::invalid_input("version").with_reason(format!(
                "backup version {} is newer than the supported version {BACKUP_VERSION}",
                document.version
            )));
        }
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Outcome of merging a backup document into the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub categories_created: usize,
    pub categories_updated: usize,
    pub categories_unchanged: usize,
    pub recipes_created: usize,
    pub recipes_updated: usize,
    pub recipes_unchanged: usize,
    /// Recipes whose category was neither in the document nor the store
    pub recipes_skipped: usize,
    pub images_restored: usize,
}

/// Outcome of writing a backup document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub path: std::path::PathBuf,
    pub categories: usize,
    pub recipes: usize,
    pub images_embedded: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_BACKUP: &str = r#"{
        "version": 1,
        "exportTime": 1700000000000,
        "categories": [
            {"id": 4, "name": "Soups", "sortOrder": 2, "createdAt": 1600000000000, "updatedAt": 1600000000500}
        ],
        "recipes": [
            {"id": 9, "name": "Borscht", "categoryId": 4, "coverImagePath": "/data/cover.jpg",
             "isFavorite": true, "clickCount": 12, "createdAt": 1600000001000, "updatedAt": 1600000002000}
        ],
        "ingredients": [
            {"id": 1, "recipeId": 9, "name": "Beetroot", "amount": "2", "sortOrder": 0}
        ],
        "steps": [
            {"id": 1, "recipeId": 9, "stepNumber": 1, "description": "Boil", "sortOrder": 0}
        ]
    }"#;

    #[test]
    fn test_reads_camel_case_document() {
        let doc = BackupDocument::from_json(LEGACY_BACKUP).unwrap();
        assert_eq!(doc.export_time.as_millisecond(), 1_700_000_000_000);
        assert_eq!(doc.categories[0].sort_order, 2);

        let recipe = &doc.recipes[0];
        assert_eq!(recipe.category_id, 4);
        assert_eq!(recipe.click_count, 12);
        assert!(recipe.is_favorite);
        assert_eq!(recipe.cover_image_base64, None);
        assert_eq!(doc.steps[0].image_path, None);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let doc = BackupDocument::from_json(r#"{"recipes": []}"#).unwrap();
        assert_eq!(doc.version, BACKUP_VERSION);
        assert!(doc.categories.is_empty());
        assert_eq!(doc.export_time, Timestamp::UNIX_EPOCH);
    }

    #[test]
    fn test_rejects_newer_version() {
        let err = BackupDocument::from_json(r#"{"version": 2}"#).unwrap_err();
        assert!(matches!(err, CookbookError::InvalidInput { ref field, .. } if field == "version"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            BackupDocument::from_json("{not json"),
            Err(CookbookError::Serialization { .. })
        ));
    }

    #[test]
    fn test_written_keys_are_camel_case_millis() {
        let doc = BackupDocument::from_json(LEGACY_BACKUP).unwrap();
        let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(value["recipes"][0]["clickCount"], 12);
        assert_eq!(value["recipes"][0]["updatedAt"], 1_600_000_002_000_i64);
        assert!(value["recipes"][0].get("coverImageBase64").is_none());
        assert_eq!(value["steps"][0]["stepNumber"], 1);
    }

    #[test]
    fn test_embed_images_skips_unreadable_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let cover = dir.path().join("cover.png");
        std::fs::write(&cover, b"png").unwrap();

        let mut doc = BackupDocument::from_json(LEGACY_BACKUP).unwrap();
        doc.recipes[0].cover_image_path = Some(cover.to_string_lossy().into_owned());
        doc.steps[0].image_path = Some("/nonexistent/step.jpg".to_string());

        assert_eq!(doc.embed_images(), 1);
        assert!(doc.recipes[0]
            .cover_image_base64
            .as_deref()
            .unwrap()
            .starts_with("data:image/png;base64,"));
        assert_eq!(doc.steps[0].image_base64, None);
    }
}

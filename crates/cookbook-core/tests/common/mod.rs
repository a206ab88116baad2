use cookbook_core::{Cookbook, CookbookBuilder};
use tempfile::TempDir;

/// Helper function to create a test cookbook with its own database and
/// image directory
pub async fn create_test_cookbook() -> (TempDir, Cookbook) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let cookbook = open_cookbook(&temp_dir, "test").await;
    (temp_dir, cookbook)
}

/// Opens a cookbook stored under `dir/<name>/`
pub async fn open_cookbook(dir: &TempDir, name: &str) -> Cookbook {
    let root = dir.path().join(name);
    CookbookBuilder::new()
        .with_database_path(Some(root.join("cookbook.db")))
        .with_image_dir(Some(root.join("images")))
        .build()
        .await
        .expect("Failed to create cookbook")
}

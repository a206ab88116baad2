//! Image files referenced by recipes and steps.
//!
//! The database only stores paths. Files live in a single flat directory
//! owned by [`ImageStore`] and are named `<prefix>_<millis>.<ext>`.
//! Removal is best effort and never fails the surrounding operation.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD, Engine};
use log::{debug, warn};

use crate::error::{CookbookError, Result};

/// Prefix for recipe cover images.
pub const COVER_PREFIX: &str = "COVER";
/// Prefix for step images.
pub const STEP_PREFIX: &str = "STEP";
/// Prefix for images restored from a backup.
pub const RESTORE_PREFIX: &str = "RESTORE";

/// Extension used when the image type cannot be determined.
const DEFAULT_EXTENSION: &str = "jpg";

/// Directory of image files managed by the cookbook.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether `path` names a file directly inside the store directory.
    pub fn contains(&self, path: &Path) -> bool {
        path.parent() == Some(self.dir.as_path())
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| CookbookError::file_system(&self.dir, e))
    }

    /// Picks an unused file name for a new image.
    fn next_path(&self, prefix: &str, ext: &str) -> PathBuf {
        let millis = jiff::Timestamp::now().as_millisecond();
        let mut path = self.dir.join(format!("{prefix}_{millis}.{ext}"));
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("{prefix}_{millis}_{n}.{ext}"));
            n += 1;
        }
        path
    }

    /// Copies an image file into the store and returns the stored path.
    pub fn import_file(&self, source: &Path, prefix: &str) -> Result<String> {
        if !source.is_file() {
            return Err(CookbookError::invalid_input("image")
                .with_reason(format!("'{}' is not a readable file", source.display())));
        }
        self.ensure_dir()?;

        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        let target = self.next_path(prefix, &ext);

        fs::copy(source, &target).map_err(|e| CookbookError::file_system(&target, e))?;
        debug!("Imported image {} as {}", source.display(), target.display());
        Ok(target.to_string_lossy().into_owned())
    }

    /// Returns `path` unchanged if the store already owns it, otherwise
    /// copies the file in.
    pub fn adopt(&self, path: &str, prefix: &str) -> Result<String> {
        let source = Path::new(path);
        if self.contains(source) {
            return Ok(path.to_string());
        }
        self.import_file(source, prefix)
    }

    /// Writes raw image bytes into the store.
    pub fn save_bytes(&self, bytes: &[u8], prefix: &str, ext: &str) -> Result<String> {
        self.ensure_dir()?;
        let target = self.next_path(prefix, ext);
        fs::write(&target, bytes).map_err(|e| CookbookError::file_system(&target, e))?;
        Ok(target.to_string_lossy().into_owned())
    }

    /// Removes an image file owned by the store.
    ///
    /// Blank paths, missing files and files outside the store are ignored;
    /// other failures are logged.
    pub fn delete(&self, path: &str) {
        if path.trim().is_empty() {
            return;
        }
        let path = Path::new(path);
        if !self.contains(path) {
            debug!("Not removing {} outside the image directory", path.display());
            return;
        }
        match fs::remove_file(path) {
            Ok(()) => debug!("Removed image {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove image {}: {e}", path.display()),
        }
    }

    pub fn delete_all<I, S>(&self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.delete(path.as_ref());
        }
    }

    /// Removes every file in the store that is not in `used`.
    ///
    /// Returns the number of files removed.
    pub fn cleanup_orphans(&self, used: &[String]) -> Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(CookbookError::file_system(&self.dir, e)),
        };

        let used: HashSet<PathBuf> = used.iter().map(PathBuf::from).collect();
        let mut removed = 0;

        for entry in entries {
            let entry = entry.map_err(|e| CookbookError::file_system(&self.dir, e))?;
            let path = entry.path();
            if !path.is_file() || used.contains(&path) {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to remove orphaned image {}: {e}", path.display()),
            }
        }

        debug!("Removed {removed} orphaned images from {}", self.dir.display());
        Ok(removed)
    }
}

fn mime_subtype(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "png" => "png",
        "gif" => "gif",
        "webp" => "webp",
        "bmp" => "bmp",
        _ => "jpeg",
    }
}

fn extension_for(subtype: &str) -> &'static str {
    match subtype.to_ascii_lowercase().as_str() {
        "png" => "png",
        "gif" => "gif",
        "webp" => "webp",
        "bmp" => "bmp",
        _ => DEFAULT_EXTENSION,
    }
}

/// Reads an image file and encodes it as `data:image/<type>;base64,...`.
pub fn encode_data_uri(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| CookbookError::file_system(path, e))?;
    let subtype = mime_subtype(path.extension().and_then(|e| e.to_str()).unwrap_or(""));
    Ok(format!("data:image/{subtype};base64,{}", STANDARD.encode(bytes)))
}

/// Decodes a data URI or a bare base64 payload.
///
/// Returns the image bytes and the file extension matching the declared
/// type, `jpg` when there is none.
pub fn decode_data_uri(text: &str) -> Result<(Vec<u8>, &'static str)> {
    let text = text.trim();
    let (ext, payload) = match text.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest.split_once(',').ok_or_else(|| {
                CookbookError::invalid_input("image").with_reason("data URI has no payload")
            })?;
            let subtype = header
                .split(';')
                .next()
                .and_then(|mime| mime.strip_prefix("image/"))
                .unwrap_or("");
            (extension_for(subtype), payload)
        }
        None => (DEFAULT_EXTENSION, text),
    };

    let bytes = STANDARD.decode(payload.trim())?;
    Ok((bytes, ext))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_data_uri_encode_then_decode() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("photo.PNG");
        fs::write(&source, b"\x89PNG fake").unwrap();

        let uri = encode_data_uri(&source).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));

        let (bytes, ext) = decode_data_uri(&uri).unwrap();
        assert_eq!(bytes, b"\x89PNG fake");
        assert_eq!(ext, "png");
    }

    #[test]
    fn test_decode_bare_payload_defaults_to_jpg() {
        let (bytes, ext) = decode_data_uri("aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
        assert_eq!(ext, "jpg");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_data_uri("data:image/png;base64,***"),
            Err(CookbookError::ImageEncoding { .. })
        ));
        assert!(decode_data_uri("data:image/png;base64").is_err());
    }

    #[test]
    fn test_import_and_adopt() {
        let outside = TempDir::new().unwrap();
        let source = outside.path().join("soup.jpg");
        fs::write(&source, b"jpeg").unwrap();

        let store_dir = TempDir::new().unwrap();
        let store = ImageStore::new(store_dir.path().join("images"));

        let stored = store
            .adopt(source.to_str().unwrap(), COVER_PREFIX)
            .unwrap();
        assert!(store.contains(Path::new(&stored)));
        assert!(stored.ends_with(".jpg"));
        assert!(source.exists());

        // Already in the store: no second copy
        assert_eq!(store.adopt(&stored, COVER_PREFIX).unwrap(), stored);
        assert_eq!(fs::read_dir(store.dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_import_missing_file_is_invalid_input() {
        let store_dir = TempDir::new().unwrap();
        let store = ImageStore::new(store_dir.path());
        assert!(matches!(
            store.import_file(Path::new("/nonexistent/cover.jpg"), COVER_PREFIX),
            Err(CookbookError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_save_bytes_never_overwrites() {
        let store_dir = TempDir::new().unwrap();
        let store = ImageStore::new(store_dir.path());
        let first = store.save_bytes(b"a", STEP_PREFIX, "png").unwrap();
        let second = store.save_bytes(b"b", STEP_PREFIX, "png").unwrap();
        assert_ne!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"a");
        assert_eq!(fs::read(&second).unwrap(), b"b");
    }

    #[test]
    fn test_delete_ignores_outside_and_missing_files() {
        let outside = TempDir::new().unwrap();
        let foreign = outside.path().join("keep.jpg");
        fs::write(&foreign, b"x").unwrap();

        let store_dir = TempDir::new().unwrap();
        let store = ImageStore::new(store_dir.path());
        let owned = store.save_bytes(b"y", COVER_PREFIX, "jpg").unwrap();

        store.delete_all([
            foreign.to_str().unwrap(),
            "",
            owned.as_str(),
            owned.as_str(),
        ]);
        assert!(foreign.exists());
        assert!(!Path::new(&owned).exists());
    }

    #[test]
    fn test_cleanup_orphans_keeps_used_files() {
        let store_dir = TempDir::new().unwrap();
        let store = ImageStore::new(store_dir.path());
        let used = store.save_bytes(b"1", COVER_PREFIX, "jpg").unwrap();
        let orphan = store.save_bytes(b"2", STEP_PREFIX, "jpg").unwrap();

        let removed = store.cleanup_orphans(std::slice::from_ref(&used)).unwrap();
        assert_eq!(removed, 1);
        assert!(Path::new(&used).exists());
        assert!(!Path::new(&orphan).exists());
    }

    #[test]
    fn test_cleanup_missing_directory_is_noop() {
        let store_dir = TempDir::new().unwrap();
        let store = ImageStore::new(store_dir.path().join("never-created"));
        assert_eq!(store.cleanup_orphans(&[]).unwrap(), 0);
    }
}

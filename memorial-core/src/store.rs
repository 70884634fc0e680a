//! Local-device persistence for designs and gallery state.
//!
//! State lives as JSON files under a data directory, one file per
//! well-known key. Reads fall back to built-in defaults when a file is
//! absent or unparseable; writes surface their failure to the caller
//! rather than dropping data silently.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::gallery::GalleryItem;
use crate::schema::DesignDocument;

/// Well-known key for the saved-designs list.
pub const DESIGNS_KEY: &str = "monument_designs";

/// Well-known key for the gallery item list.
pub const GALLERY_KEY: &str = "gallery_items";

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An I/O error occurred while reading or writing a key.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
    /// A value could not be serialized for storage.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A saved snapshot of a design with the moment it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDesign {
    /// The design snapshot.
    pub document: DesignDocument,
    /// Unix timestamp in milliseconds at save time.
    pub timestamp: u64,
}

/// File-backed store for local device state.
#[derive(Debug, Clone)]
pub struct DesignStore {
    data_dir: PathBuf,
}

impl DesignStore {
    /// Open a store over the given data directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// Append a design snapshot to the saved-designs list.
    ///
    /// The write is read-modify-write over the whole list, matching the
    /// single-writer model. A failed write is reported, never retried.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the list cannot be written, or
    /// [`StoreError::Serialization`] if encoding fails.
    pub fn save_design(&self, document: DesignDocument) -> Result<SavedDesign, StoreError> {
        let saved = SavedDesign {
            document,
            timestamp: current_timestamp_ms(),
        };
        let mut designs = self.saved_designs();
        designs.push(saved.clone());
        self.write_key(DESIGNS_KEY, &designs)?;
        tracing::debug!(count = designs.len(), "design saved");
        Ok(saved)
    }

    /// All saved designs, oldest first. Falls back to an empty list when
    /// the key is absent or unparseable.
    #[must_use]
    pub fn saved_designs(&self) -> Vec<SavedDesign> {
        self.read_key(DESIGNS_KEY).unwrap_or_default()
    }

    /// Replace the stored gallery item list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Serialization`] on
    /// write failure.
    pub fn save_gallery(&self, items: &[GalleryItem]) -> Result<(), StoreError> {
        self.write_key(GALLERY_KEY, &items)
    }

    /// The gallery item list. Falls back to the built-in default list when
    /// the key is absent or unparseable.
    #[must_use]
    pub fn gallery_items(&self) -> Vec<GalleryItem> {
        self.read_key(GALLERY_KEY)
            .unwrap_or_else(GalleryItem::default_items)
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", sanitize_filename(key)))
    }

    fn read_key<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);
        let contents = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value unparseable, using default");
                None
            }
        }
    }

    fn write_key<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(self.key_path(key), json)?;
        Ok(())
    }
}

/// Sanitize a key for use as a filename.
fn sanitize_filename(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::Design;
    use crate::element::TemplateId;

    fn sample_document() -> DesignDocument {
        let mut design = Design::new(800.0, 600.0);
        let id = TemplateId::new("stone-vertical").expect("valid id");
        design.place(id, 10.0, 20.0);
        DesignDocument::from_design(&design)
    }

    #[test]
    fn test_save_and_list_designs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DesignStore::open(dir.path()).expect("open");

        assert!(store.saved_designs().is_empty());
        store.save_design(sample_document()).expect("save");
        store.save_design(sample_document()).expect("save");

        let designs = store.saved_designs();
        assert_eq!(designs.len(), 2);
        assert_eq!(designs[0].document, sample_document());
    }

    #[test]
    fn test_corrupt_designs_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DesignStore::open(dir.path()).expect("open");
        std::fs::write(dir.path().join("monument_designs.json"), "{not json")
            .expect("write");

        assert!(store.saved_designs().is_empty());
    }

    #[test]
    fn test_gallery_defaults_when_unset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DesignStore::open(dir.path()).expect("open");

        assert_eq!(store.gallery_items(), GalleryItem::default_items());

        let custom = vec![GalleryItem::image("g1", "https://example.com/a.jpg", "A", "")];
        store.save_gallery(&custom).expect("save");
        assert_eq!(store.gallery_items(), custom);
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DesignStore::open(dir.path()).expect("open");
        // Turn the key path into a directory so the write must fail.
        std::fs::create_dir(dir.path().join("monument_designs.json")).expect("mkdir");

        let err = store.save_design(sample_document()).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}

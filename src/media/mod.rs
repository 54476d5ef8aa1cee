//! # Media
//!
//! Upload contract between the shell and whatever stores media files.
//!
//! The shell consumes a [`MediaStore`] through [`MediaManager`]. When no store
//! is configured the [`DummyMediaStore`] stands in: it raises a visible alert
//! on every upload instead of pretending to succeed.
//!
//! ## Stores
//!
//! | Store | Behavior |
//! |-------|----------|
//! | [`DummyMediaStore`] | Alerts "no media store configured", returns the would-be locations |
//! | [`FsMediaStore`] | Copies files under a root directory |

mod dummy;
mod fs;

use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Serialize;
use thiserror::Error;

pub use dummy::{DummyMediaStore, NOT_CONFIGURED};
pub use fs::FsMediaStore;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("File type not accepted: {filename} (accepts {accept})")]
    NotAccepted { filename: String, accept: String },

    #[error("Invalid upload directory: {0}")]
    InvalidDirectory(String),

    #[error("Invalid file path: {0}")]
    InvalidFile(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A local file to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub path: PathBuf,
}

impl MediaFile {
    /// Uses the path's final component as the file name
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, MediaError> {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| MediaError::InvalidFile(path.clone()))?
            .to_string();

        Ok(Self { name, path })
    }
}

/// One file and the directory it should be stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUploadOptions {
    pub directory: String,
    pub file: MediaFile,
}

/// Where a persisted file ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Media {
    pub directory: String,
    pub filename: String,
}

/// Backend that persists uploaded files
pub trait MediaStore {
    /// Accepted file types, e.g. `*` or `image/*,.pdf`
    fn accept(&self) -> &str;

    fn persist(&self, files: &[MediaUploadOptions]) -> Result<Vec<Media>, MediaError>;
}

/// Front door for uploads; wraps the configured store
#[derive(Clone)]
pub struct MediaManager {
    store: Rc<dyn MediaStore>,
}

impl std::fmt::Debug for MediaManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaManager")
            .field("accept", &self.store.accept())
            .finish()
    }
}

impl MediaManager {
    pub fn new(store: Rc<dyn MediaStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Rc<dyn MediaStore> {
        &self.store
    }

    pub fn accept(&self) -> &str {
        self.store.accept()
    }

    pub fn persist(&self, files: &[MediaUploadOptions]) -> Result<Vec<Media>, MediaError> {
        tracing::debug!(count = files.len(), accept = self.store.accept(), "persisting media");
        let media = self.store.persist(files)?;
        tracing::debug!(count = media.len(), "media persisted");
        Ok(media)
    }
}

/// Returns true if `filename` matches an accept list such as `image/*,.pdf`
pub fn accepts(accept: &str, filename: &str) -> bool {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    accept
        .split(',')
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .any(|rule| match rule {
            "*" | "*/*" => true,
            "image/*" => IMAGE_EXTENSIONS.contains(&extension.as_str()),
            "video/*" => VIDEO_EXTENSIONS.contains(&extension.as_str()),
            _ => match rule.strip_prefix('.') {
                Some(ext) => ext.eq_ignore_ascii_case(&extension),
                // Concrete mime type: compare its subtype to the extension
                None => rule
                    .rsplit('/')
                    .next()
                    .is_some_and(|subtype| subtype.eq_ignore_ascii_case(&extension)),
            },
        })
}

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "avif", "bmp", "ico",
];

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "ogv"];

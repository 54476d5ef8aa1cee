//! Filesystem-backed media store

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::{accepts, Media, MediaError, MediaStore, MediaUploadOptions};

/// Copies uploads into `root/<directory>/<filename>`
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    root: PathBuf,
    accept: String,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>, accept: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            accept: accept.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn target_dir(&self, directory: &str) -> Result<PathBuf, MediaError> {
        let relative = Path::new(directory);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if escapes {
            return Err(MediaError::InvalidDirectory(directory.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

impl MediaStore for FsMediaStore {
    fn accept(&self) -> &str {
        &self.accept
    }

    fn persist(&self, files: &[MediaUploadOptions]) -> Result<Vec<Media>, MediaError> {
        // Reject the whole batch before copying anything
        for upload in files {
            if !accepts(&self.accept, &upload.file.name) {
                return Err(MediaError::NotAccepted {
                    filename: upload.file.name.clone(),
                    accept: self.accept.clone(),
                });
            }
            self.target_dir(&upload.directory)?;
        }

        let mut media = Vec::with_capacity(files.len());
        for upload in files {
            let dir = self.target_dir(&upload.directory)?;
            fs::create_dir_all(&dir).map_err(|source| MediaError::Io {
                path: dir.clone(),
                source,
            })?;

            let target = dir.join(&upload.file.name);
            fs::copy(&upload.file.path, &target).map_err(|source| MediaError::Io {
                path: upload.file.path.clone(),
                source,
            })?;

            tracing::debug!(target = %target.display(), "stored media file");
            media.push(Media {
                directory: upload.directory.clone(),
                filename: upload.file.name.clone(),
            });
        }

        Ok(media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaFile;
    use tempfile::TempDir;

    fn upload(dir: &TempDir, name: &str, directory: &str) -> MediaUploadOptions {
        let path = dir.path().join(name);
        fs::write(&path, b"data").unwrap();
        MediaUploadOptions {
            directory: directory.to_string(),
            file: MediaFile::from_path(path).unwrap(),
        }
    }

    #[test]
    fn copies_into_directory() {
        let source = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let store = FsMediaStore::new(root.path(), "*");

        let media = store
            .persist(&[upload(&source, "a.png", "images/posts")])
            .unwrap();

        assert_eq!(media[0].filename, "a.png");
        assert!(root.path().join("images/posts/a.png").is_file());
    }

    #[test]
    fn rejects_unaccepted_batch_without_copying() {
        let source = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let store = FsMediaStore::new(root.path(), "image/*");

        let err = store
            .persist(&[
                upload(&source, "ok.png", "media"),
                upload(&source, "notes.txt", "media"),
            ])
            .unwrap_err();

        assert!(matches!(err, MediaError::NotAccepted { .. }));
        assert!(!root.path().join("media").exists());
    }

    #[test]
    fn rejects_escaping_directory() {
        let source = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let store = FsMediaStore::new(root.path(), "*");

        let err = store
            .persist(&[upload(&source, "a.png", "../outside")])
            .unwrap_err();

        assert!(matches!(err, MediaError::InvalidDirectory(_)));
    }

    #[test]
    fn missing_source_is_io_error() {
        let root = TempDir::new().unwrap();
        let store = FsMediaStore::new(root.path(), "*");

        let err = store
            .persist(&[MediaUploadOptions {
                directory: String::new(),
                file: MediaFile::from_path(root.path().join("missing.png")).unwrap(),
            }])
            .unwrap_err();

        assert!(matches!(err, MediaError::Io { .. }));
    }
}

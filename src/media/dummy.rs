//! Placeholder store used when no media store is configured

use std::rc::Rc;

use super::{Media, MediaError, MediaStore, MediaUploadOptions};
use crate::state::Alerts;

pub const NOT_CONFIGURED: &str =
    "No media store configured: uploaded files were not saved. Configure [media] in .tina/config.toml.";

/// Alerts the user on every upload and reports where files would have gone
pub struct DummyMediaStore {
    alerts: Rc<Alerts>,
}

impl DummyMediaStore {
    pub fn new(alerts: Rc<Alerts>) -> Self {
        Self { alerts }
    }
}

impl MediaStore for DummyMediaStore {
    fn accept(&self) -> &str {
        "*"
    }

    fn persist(&self, files: &[MediaUploadOptions]) -> Result<Vec<Media>, MediaError> {
        tracing::warn!(count = files.len(), "upload attempted without a media store");
        self.alerts.warn(NOT_CONFIGURED);

        Ok(files
            .iter()
            .map(|upload| Media {
                directory: upload.directory.clone(),
                filename: upload.file.name.clone(),
            })
            .collect())
    }
}

//! `tina upload`: persist files through the media manager

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::output::Output;
use crate::cms::Cms;
use crate::media::{MediaFile, MediaUploadOptions};

pub fn run(cms: &Cms, output: &Output, files: &[PathBuf], directory: &str) -> Result<()> {
    let mut uploads = Vec::with_capacity(files.len());
    for path in files {
        if !path.is_file() {
            anyhow::bail!("Not a file: {}", path.display());
        }
        uploads.push(MediaUploadOptions {
            directory: directory.to_string(),
            file: MediaFile::from_path(path)?,
        });
    }

    let seen = cms.alerts().len();
    let result = cms.media().persist(&uploads);

    // Alerts raised by the store are reported even when the upload failed
    let raised = cms.alerts().all();
    output.alerts(raised.get(seen..).unwrap_or_default());

    let media = result.context("Upload failed")?;

    if output.is_json() {
        output.data(&media);
        return Ok(());
    }

    for item in &media {
        let location = if item.directory.is_empty() {
            item.filename.clone()
        } else {
            format!("{}/{}", item.directory.trim_end_matches('/'), item.filename)
        };
        output.row(&[location.as_str()]);
    }

    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::{IMAGE_EXTENSIONS, MAX_UPLOAD_BYTES};

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("not a supported image file: {0}")]
    NotAnImage(PathBuf),
    #[error("{path} is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A classroom photo ready to send to `/recognize`.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageUpload {
    file_name: String,
    mime_type: &'static str,
    bytes: Vec<u8>,
}

pub fn is_image(path: &Path) -> bool {
    image_extension(path).is_some()
}

fn image_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn mime_for(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, mime_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type,
            bytes,
        }
    }

    /// Reads an image file, rejecting non-image extensions and oversized files
    /// before touching the network.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let ext = image_extension(path).ok_or_else(|| UploadError::NotAnImage(path.to_path_buf()))?;

        let size = fs::metadata(path)
            .map_err(|e| UploadError::Io {
                path: path.to_path_buf(),
                source: e,
            })?
            .len();
        if size > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: MAX_UPLOAD_BYTES,
            });
        }

        let bytes = fs::read(path).map_err(|e| UploadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        Ok(Self::new(file_name, mime_for(&ext), bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

use std::path::Path;

use crate::shared::photo::Photo;

/// Encodes a photo to disk; format follows the file extension.
pub struct PhotoFileWriter;

impl PhotoFileWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, path: &Path, photo: &Photo) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let img = image::RgbImage::from_raw(photo.width(), photo.height(), photo.data().to_vec())
            .ok_or("Failed to create image from photo data")?;
        img.save(path)?;
        Ok(())
    }
}

impl Default for PhotoFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

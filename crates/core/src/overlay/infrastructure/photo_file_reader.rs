use std::path::Path;

use crate::shared::photo::Photo;

/// Decodes photos with the `image` crate into RGB8.
pub struct PhotoFileReader;

impl PhotoFileReader {
    pub fn new() -> Self {
        Self
    }

    /// Returns `(width, height)` without decoding pixel data.
    pub fn dimensions(&self, path: &Path) -> Result<(u32, u32), Box<dyn std::error::Error>> {
        Ok(image::image_dimensions(path)?)
    }

    /// Reads and resamples to `width x height` (display size). A photo that
    /// already has that size is returned as decoded.
    pub fn read_resized(
        &self,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<Photo, Box<dyn std::error::Error>> {
        let img = image::open(path)?.into_rgb8();
        let img = if img.dimensions() == (width, height) {
            img
        } else {
            image::imageops::resize(&img, width, height, image::imageops::FilterType::Triangle)
        };
        Ok(Photo::new(img.into_raw(), width, height))
    }
}

impl Default for PhotoFileReader {
    fn default() -> Self {
        Self::new()
    }
}

/// A decoded photo: contiguous RGB8 bytes in row-major order.
///
/// Decoding and encoding happen at I/O boundaries only.
#[derive(Clone, Debug)]
pub struct Photo {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

pub const CHANNELS: usize = 3;

impl Photo {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * CHANNELS)
            .collect();
        Self::new(data, width, height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        let idx = self.offset(x, y)?;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let photo = Photo::new(vec![0u8; 4 * 2 * 3], 4, 2);
        assert_eq!(photo.width(), 4);
        assert_eq!(photo.height(), 2);
        assert_eq!(photo.data().len(), 24);
    }

    #[test]
    fn test_filled_repeats_colour() {
        let photo = Photo::filled(3, 3, [1, 2, 3]);
        assert_eq!(photo.pixel(0, 0), Some([1, 2, 3]));
        assert_eq!(photo.pixel(2, 2), Some([1, 2, 3]));
    }

    #[test]
    fn test_pixel_reads_row_major() {
        let photo = Photo::new((0u8..12).collect(), 2, 2);
        assert_eq!(photo.pixel(1, 0), Some([3, 4, 5]));
        assert_eq!(photo.pixel(0, 1), Some([6, 7, 8]));
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let photo = Photo::filled(2, 2, [0, 0, 0]);
        assert_eq!(photo.pixel(2, 0), None);
        assert_eq!(photo.pixel(0, 5), None);
    }
}

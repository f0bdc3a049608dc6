use super::color::Rgba;

/// Row-major RGBA pixel buffer assembled from computed spectral lines.
pub struct ImageBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl ImageBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    /// Write one row of pixels. `row.len()` must equal the image width and
    /// `y` must be in range.
    pub fn set_row(&mut self, y: usize, row: &[Rgba]) {
        assert_eq!(row.len(), self.width);
        assert!(y < self.height);
        let start = y * self.width * 4;
        for (x, px) in row.iter().enumerate() {
            self.pixels[start + x * 4..start + x * 4 + 4].copy_from_slice(px);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

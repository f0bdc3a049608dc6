/// Maps an integer zoom level to the sample stride between consecutive
/// spectral lines. Level 0 advances a full FFT length per line (disjoint
/// windows, maximum time range); each additional level halves the stride,
/// down to 1 sample at level log2(fft_size).
#[derive(Clone, Copy, Debug)]
pub struct ZoomController {
    fft_size: usize,
    level: u32,
}

impl ZoomController {
    /// Precondition: `fft_size` is a power of two.
    pub fn new(fft_size: usize) -> Self {
        debug_assert!(fft_size.is_power_of_two());
        Self { fft_size, level: 0 }
    }

    pub fn max_level(&self) -> u32 {
        self.fft_size.trailing_zeros()
    }

    /// Clamps any requested level into `[0, log2(fft_size)]`.
    pub fn set_level(&mut self, level: i32) {
        let max = self.max_level() as i32;
        self.level = level.clamp(0, max) as u32;
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Samples advanced between consecutive lines. Always >= 1.
    pub fn stride(&self) -> usize {
        self.fft_size >> self.level
    }

    /// Total addressable lines for a capture of `total_samples`.
    pub fn line_count(&self, total_samples: usize) -> usize {
        total_samples / self.stride()
    }

    /// Elapsed time at the start of a line, in seconds.
    pub fn line_to_seconds(&self, line: usize, sample_rate: u32) -> f64 {
        (line * self.stride()) as f64 / sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_halves_per_level() {
        let mut z = ZoomController::new(1024);
        assert_eq!(z.stride(), 1024);
        z.set_level(1);
        assert_eq!(z.stride(), 512);
        z.set_level(10);
        assert_eq!(z.stride(), 1);
    }

    #[test]
    fn stride_never_grows_with_level() {
        let mut z = ZoomController::new(256);
        let mut prev = usize::MAX;
        for level in 0..=z.max_level() as i32 {
            z.set_level(level);
            let s = z.stride();
            assert!(s <= prev && s >= 1);
            prev = s;
        }
    }

    #[test]
    fn level_clamps_to_valid_range() {
        let mut z = ZoomController::new(1024);
        z.set_level(-3);
        assert_eq!(z.level(), 0);
        z.set_level(11);
        assert_eq!(z.level(), 10);
        assert_eq!(z.stride(), 1);
    }

    #[test]
    fn line_count_is_floor_of_total_over_stride() {
        let z = ZoomController::new(1024);
        assert_eq!(z.line_count(4096), 4);
        assert_eq!(z.line_count(4095), 3);
        assert_eq!(z.line_count(1023), 0);
    }

    #[test]
    fn line_time_uses_stride_and_rate() {
        let mut z = ZoomController::new(1024);
        z.set_level(2);
        // stride 256, 1000 Hz: line 4 starts at sample 1024 -> 1.024 s
        assert!((z.line_to_seconds(4, 1000) - 1.024).abs() < 1e-9);
        assert_eq!(z.line_to_seconds(0, 48_000), 0.0);
    }
}

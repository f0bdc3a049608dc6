use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Forward transform planned once for a fixed size. Repeated calls reuse the
/// plan and scratch space; a size change requires constructing a new instance.
pub struct SpectralTransform {
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    size: usize,
}

impl SpectralTransform {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        Self { fft, scratch, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// In-place forward transform. `buffer.len()` must equal `size()`.
    pub fn process(&mut self, buffer: &mut [Complex<f32>]) {
        self.fft.process_with_scratch(buffer, &mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dc_input_lands_in_bin_zero() {
        let mut t = SpectralTransform::new(8);
        let mut buf = vec![Complex::new(1.0f32, 0.0); 8];
        t.process(&mut buf);
        assert!((buf[0].norm() - 8.0).abs() < 1e-4);
        for bin in &buf[1..] {
            assert!(bin.norm() < 1e-4);
        }
    }

    #[test]
    fn repeated_calls_are_consistent() {
        let mut t = SpectralTransform::new(16);
        let input: Vec<Complex<f32>> = (0..16)
            .map(|i| Complex::new((i as f32 * 0.3).sin(), (i as f32 * 0.7).cos()))
            .collect();
        let mut a = input.clone();
        let mut b = input;
        t.process(&mut a);
        t.process(&mut b);
        assert_eq!(a, b);
    }
}

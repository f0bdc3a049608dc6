use rustfft::num_complex::Complex;

use super::fft::SpectralTransform;
use super::window::WindowKind;
use crate::input::source::{SampleSource, SourceError};

/// Power reported for bins whose magnitude is zero (silence or exact
/// cancellation), instead of the -inf that log10 would produce.
pub const DB_FLOOR: f32 = -300.0;

/// Normalized magnitude to decibels, clamped at [`DB_FLOOR`] so non-finite
/// values never leave the line engine.
pub fn power_db(mag: f32) -> f32 {
    let db = 10.0 * mag.log10();
    if db.is_finite() {
        db.max(DB_FLOOR)
    } else {
        DB_FLOOR
    }
}

/// Display column for natural transform bin `k` of an `n`-point transform:
/// a circular shift by n/2 swaps the halves so DC lands at column n/2 and
/// column 0 holds the most negative frequency.
pub fn centered_bin(k: usize, n: usize) -> usize {
    (k + n / 2) % n
}

/// Produces one spectral line (dB per frequency bin) per requested time
/// index. Owns its window, plan, and working buffer; not shareable across
/// threads, so parallel callers each construct their own.
pub struct LineComputer {
    fft: SpectralTransform,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
}

impl LineComputer {
    pub fn new(fft_size: usize, window: WindowKind) -> Self {
        Self {
            fft: SpectralTransform::new(fft_size),
            window: window.coefficients(fft_size),
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
        }
    }

    /// Compute the dB line for time index `line`, advancing `stride` samples
    /// per line. Fails with [`SourceError::Underrun`] when fewer than
    /// `fft_size` samples remain past the offset; no zero-padding.
    pub fn compute_line(
        &mut self,
        source: &mut dyn SampleSource,
        line: usize,
        stride: usize,
    ) -> Result<Vec<f32>, SourceError> {
        let n = self.fft.size();
        source.read(line * stride, &mut self.buffer)?;

        for (sample, &w) in self.buffer.iter_mut().zip(&self.window) {
            sample.re *= w;
            sample.im *= w;
        }
        self.fft.process(&mut self.buffer);

        let mut out = vec![0.0f32; n];
        for (k, bin) in self.buffer.iter().enumerate() {
            let mag = bin.norm() / n as f32;
            out[centered_bin(k, n)] = power_db(mag);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::source::MemorySource;

    #[test]
    fn db_floor_replaces_non_finite_values() {
        assert_eq!(power_db(0.0), DB_FLOOR);
        assert_eq!(power_db(f32::NAN), DB_FLOOR);
        assert!((power_db(1.0) - 0.0).abs() < 1e-6);
        assert!((power_db(0.1) - -10.0).abs() < 1e-4);
    }

    #[test]
    fn centering_swaps_halves() {
        let n = 8;
        let shifted: Vec<usize> = (0..n).map(|k| centered_bin(k, n)).collect();
        assert_eq!(shifted, vec![4, 5, 6, 7, 0, 1, 2, 3]);
        // Involution for even n: applying it twice is the identity.
        for k in 0..n {
            assert_eq!(centered_bin(centered_bin(k, n), n), k);
        }
    }

    #[test]
    fn dc_signal_peaks_at_center_column() {
        // Four unit samples through a rectangular window: the transform puts
        // magnitude 4 in natural bin 0, which normalizes to 1.0 -> 0 dB, and
        // the reorder moves it to column 2.
        let mut computer = LineComputer::new(4, WindowKind::Rectangular);
        let mut source = MemorySource::new(vec![Complex::new(1.0, 0.0); 4]);
        let line = computer.compute_line(&mut source, 0, 4).unwrap();

        assert!((line[2] - 0.0).abs() < 1e-4, "DC bin: {}", line[2]);
        for (x, &db) in line.iter().enumerate() {
            if x != 2 {
                assert!(db < -100.0, "column {} unexpectedly hot: {}", x, db);
            }
        }
    }

    #[test]
    fn repeated_lines_are_identical() {
        let samples: Vec<Complex<f32>> = (0..64)
            .map(|i| {
                let t = i as f32 * 0.1;
                Complex::new(t.sin(), t.cos())
            })
            .collect();
        let mut computer = LineComputer::new(16, WindowKind::Hann);
        let mut source = MemorySource::new(samples);

        let first = computer.compute_line(&mut source, 1, 16).unwrap();
        let second = computer.compute_line(&mut source, 1, 16).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn tail_underrun_is_an_error() {
        let mut computer = LineComputer::new(16, WindowKind::Hann);
        let mut source = MemorySource::new(vec![Complex::new(0.0, 0.0); 24]);
        // stride 8: line 1 starts at sample 8 and still fits, line 2 does not.
        assert!(computer.compute_line(&mut source, 1, 8).is_ok());
        assert!(matches!(
            computer.compute_line(&mut source, 2, 8),
            Err(SourceError::Underrun { .. })
        ));
    }
}

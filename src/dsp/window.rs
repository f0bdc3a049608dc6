use std::f32::consts::PI;

/// Attenuation window applied to each block of samples before the FFT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowKind {
    /// Raised-cosine (Hann) window, the default for spectral display.
    Hann,
    /// No attenuation; useful for amplitude-exact test signals.
    Rectangular,
}

impl WindowKind {
    /// Precompute the coefficient sequence for a window of length `len`.
    /// Precondition: `len >= 2` (a single-point window is degenerate).
    pub fn coefficients(self, len: usize) -> Vec<f32> {
        debug_assert!(len >= 2, "window length must be at least 2");
        match self {
            WindowKind::Rectangular => vec![1.0; len],
            WindowKind::Hann => (0..len)
                .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / (len - 1) as f32).cos()))
                .collect(),
        }
    }
}

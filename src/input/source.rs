use rustfft::num_complex::Complex;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Bytes per complex sample: two interleaved little-endian f32 values.
const SAMPLE_BYTES: u64 = 8;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open capture {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read of {count} samples at offset {start} exceeds capture length {available}")]
    Underrun {
        start: usize,
        count: usize,
        available: usize,
    },
    #[error("capture read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-by-offset access to a run of complex samples. Implementations fill
/// the destination completely or fail; there are no partial reads.
pub trait SampleSource {
    fn sample_count(&self) -> usize;
    fn read(&mut self, start: usize, dest: &mut [Complex<f32>]) -> Result<(), SourceError>;
}

/// Raw I/Q capture file (`.cfile`): interleaved little-endian f32 pairs,
/// no header.
#[derive(Debug)]
pub struct CaptureFile {
    file: File,
    sample_count: usize,
}

impl CaptureFile {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let open = |p: &Path| -> std::io::Result<(File, u64)> {
            let file = File::open(p)?;
            let len = file.metadata()?.len();
            Ok((file, len))
        };
        let (file, len) = open(path).map_err(|source| SourceError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            file,
            sample_count: (len / SAMPLE_BYTES) as usize,
        })
    }
}

impl SampleSource for CaptureFile {
    fn sample_count(&self) -> usize {
        self.sample_count
    }

    fn read(&mut self, start: usize, dest: &mut [Complex<f32>]) -> Result<(), SourceError> {
        let count = dest.len();
        if start + count > self.sample_count {
            return Err(SourceError::Underrun {
                start,
                count,
                available: self.sample_count,
            });
        }

        // Read into an f32 vec so the byte view is properly aligned.
        let mut raw = vec![0.0f32; count * 2];
        self.file.seek(SeekFrom::Start(start as u64 * SAMPLE_BYTES))?;
        self.file.read_exact(bytemuck::cast_slice_mut(&mut raw))?;

        for (sample, pair) in dest.iter_mut().zip(raw.chunks_exact(2)) {
            *sample = Complex::new(pair[0], pair[1]);
        }
        Ok(())
    }
}

/// In-memory source for fixtures and tests.
#[cfg(test)]
pub struct MemorySource {
    samples: Vec<Complex<f32>>,
}

#[cfg(test)]
impl MemorySource {
    pub fn new(samples: Vec<Complex<f32>>) -> Self {
        Self { samples }
    }
}

#[cfg(test)]
impl SampleSource for MemorySource {
    fn sample_count(&self) -> usize {
        self.samples.len()
    }

    fn read(&mut self, start: usize, dest: &mut [Complex<f32>]) -> Result<(), SourceError> {
        let count = dest.len();
        if start + count > self.samples.len() {
            return Err(SourceError::Underrun {
                start,
                count,
                available: self.samples.len(),
            });
        }
        dest.copy_from_slice(&self.samples[start..start + count]);
        Ok(())
    }
}

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Writes the assembled RGBA buffer as a still image by piping rawvideo to
/// an ffmpeg child process. The output format follows the file extension
/// (png, bmp, jpg, ...).
pub struct ImageEncoder {
    child: Child,
}

impl ImageEncoder {
    pub fn new(output_path: &Path, width: u32, height: u32) -> Result<Self> {
        let output = output_path
            .to_str()
            .context("Output path is not valid UTF-8")?;

        let video_size = format!("{}x{}", width, height);
        let child = Command::new("ffmpeg")
            .args([
                "-y",
                "-f", "rawvideo",
                "-pixel_format", "rgba",
                "-video_size", video_size.as_str(),
                "-i", "pipe:0",
                "-frames:v", "1",
                output,
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn ffmpeg. Is ffmpeg installed?")?;

        log::info!("FFmpeg encoder started: {}x{} -> {}", width, height, output);

        Ok(Self { child })
    }

    pub fn write_image(&mut self, rgba_pixels: &[u8]) -> Result<()> {
        let stdin = self
            .child
            .stdin
            .as_mut()
            .context("FFmpeg stdin not available")?;
        stdin
            .write_all(rgba_pixels)
            .context("Failed to write pixels to ffmpeg")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        // Close stdin to signal EOF
        drop(self.child.stdin.take());

        let output = self
            .child
            .wait_with_output()
            .context("Failed to wait for ffmpeg")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("FFmpeg exited with error:\n{}", stderr);
        }

        log::info!("FFmpeg encoding complete");
        Ok(())
    }
}

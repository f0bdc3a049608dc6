mod cli;
mod config;
mod dsp;
mod encode;
mod input;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

use cli::Cli;
use dsp::line::LineComputer;
use dsp::window::WindowKind;
use dsp::zoom::ZoomController;
use encode::ffmpeg::ImageEncoder;
use input::source::{CaptureFile, SampleSource};
use render::color::{map_to_color, PowerRange, Rgba};
use render::image::ImageBuffer;

/// Lines handed to each rayon task; each task plans its own FFT.
const LINES_PER_TASK: usize = 64;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect iqgram.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("iqgram.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("iqgram").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Merge: config values apply only when CLI is at its default
            if cli.fft_size == 1024 { cli.fft_size = cfg.engine.fft_size; }
            if cli.zoom == 0 { cli.zoom = cfg.engine.zoom; }
            if cli.power_min == -50.0 { cli.power_min = cfg.power.min; }
            if cli.power_max == 0.0 { cli.power_max = cfg.power.max; }
            if cli.sample_rate == 8_000_000 { cli.sample_rate = cfg.input.sample_rate; }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    let input = cli.input.as_ref().context("Input capture file is required")?;
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    if !cli.fft_size.is_power_of_two() || cli.fft_size < 2 {
        anyhow::bail!("FFT size must be a power of two >= 2, got {}", cli.fft_size);
    }
    if cli.sample_rate == 0 {
        anyhow::bail!("Sample rate must be positive");
    }

    let range = PowerRange::new(cli.power_min, cli.power_max)?;

    log::info!("iqgram - I/Q capture waterfall renderer");
    log::info!("Input: {}", input.display());
    log::info!("Output: {}", cli.output.display());

    let total_samples = CaptureFile::open(input)?.sample_count();

    let mut zoom = ZoomController::new(cli.fft_size);
    zoom.set_level(cli.zoom);
    let stride = zoom.stride();

    // Only lines whose full FFT block fits inside the capture are rendered;
    // trailing partial blocks are skipped rather than zero-padded.
    let addressable = zoom.line_count(total_samples);
    let complete = if total_samples >= cli.fft_size {
        (total_samples - cli.fft_size) / stride + 1
    } else {
        0
    };
    let mut height = addressable.min(complete);
    if let Some(cap) = cli.lines {
        height = height.min(cap);
    }
    if height == 0 {
        anyhow::bail!(
            "Capture holds {} samples, shorter than one {}-sample FFT block",
            total_samples,
            cli.fft_size
        );
    }
    if height < addressable {
        log::debug!("Skipping {} tail line(s) without a full block", addressable - height);
    }

    log::info!(
        "{} samples, zoom {} (stride {}), {} lines x {} bins, {:.6}s span",
        total_samples,
        zoom.level(),
        stride,
        height,
        cli.fft_size,
        zoom.line_to_seconds(height, cli.sample_rate)
    );

    let started = Instant::now();
    let pb = ProgressBar::new(height as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} lines ({eta} remaining)")
            .unwrap()
            .progress_chars("=>-"),
    );

    let indices: Vec<usize> = (0..height).collect();
    let rows: Vec<Vec<Rgba>> = indices
        .par_chunks(LINES_PER_TASK)
        .map(|chunk| -> Result<Vec<Vec<Rgba>>> {
            // Each task owns its FFT plan, window, and file handle; the
            // transform state is never shared across threads.
            let mut computer = LineComputer::new(cli.fft_size, WindowKind::Hann);
            let mut source = CaptureFile::open(input)?;
            let mut rows = Vec::with_capacity(chunk.len());
            for &y in chunk {
                let line = computer.compute_line(&mut source, y, stride)?;
                rows.push(line.iter().map(|&db| map_to_color(db, range)).collect());
                pb.inc(1);
            }
            Ok(rows)
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();

    pb.finish_with_message("Lines computed");

    let mut image = ImageBuffer::new(cli.fft_size, height);
    for (y, row) in rows.iter().enumerate() {
        image.set_row(y, row);
    }

    let mut encoder = ImageEncoder::new(&cli.output, cli.fft_size as u32, height as u32)?;
    encoder.write_image(image.as_bytes())?;
    encoder.finish()?;

    log::info!("Rendered {} lines in {} ms", height, started.elapsed().as_millis());
    log::info!("Done! Output: {}", cli.output.display());
    Ok(())
}

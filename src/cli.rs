use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "iqgram", about = "Waterfall image renderer for raw I/Q captures")]
pub struct Cli {
    /// Input capture file (raw interleaved little-endian f32 I/Q, .cfile)
    pub input: Option<PathBuf>,

    /// Output image file (any still format ffmpeg can write)
    #[arg(short, long, default_value = "spectrogram.png")]
    pub output: PathBuf,

    /// FFT size (power of two); also the image width in pixels
    #[arg(long, default_value_t = 1024)]
    pub fft_size: usize,

    /// Zoom level: 0 advances a full FFT per line, each step halves the stride
    #[arg(short, long, default_value_t = 0)]
    pub zoom: i32,

    /// Sample rate in Hz (time axis only, not the spectral math)
    #[arg(long, default_value_t = 8_000_000)]
    pub sample_rate: u32,

    /// Power at the dark end of the color scale, dB
    #[arg(long, default_value_t = -50.0, allow_hyphen_values = true)]
    pub power_min: f32,

    /// Power at the bright end of the color scale, dB
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub power_max: f32,

    /// Cap the number of rendered lines (default: every addressable line)
    #[arg(long)]
    pub lines: Option<usize>,

    /// Config file path (default: ./iqgram.toml or the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

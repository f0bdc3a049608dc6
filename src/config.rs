use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub power: PowerConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,
    #[serde(default)]
    pub zoom: i32,
}

#[derive(Debug, Deserialize)]
pub struct PowerConfig {
    #[serde(default = "default_power_min")]
    pub min: f32,
    #[serde(default = "default_power_max")]
    pub max: f32,
}

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fft_size: default_fft_size(),
            zoom: 0,
        }
    }
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            min: default_power_min(),
            max: default_power_max(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
        }
    }
}

fn default_fft_size() -> usize { 1024 }
fn default_power_min() -> f32 { -50.0 }
fn default_power_max() -> f32 { 0.0 }
fn default_sample_rate() -> u32 { 8_000_000 }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.engine.fft_size, 1024);
        assert_eq!(cfg.engine.zoom, 0);
        assert_eq!(cfg.power.min, -50.0);
        assert_eq!(cfg.power.max, 0.0);
        assert_eq!(cfg.input.sample_rate, 8_000_000);
    }

    #[test]
    fn partial_sections_fill_in() {
        let cfg: Config = toml::from_str("[engine]\nfft_size = 4096\n[power]\nmin = -80.0\n").unwrap();
        assert_eq!(cfg.engine.fft_size, 4096);
        assert_eq!(cfg.power.min, -80.0);
        assert_eq!(cfg.power.max, 0.0);
    }
}

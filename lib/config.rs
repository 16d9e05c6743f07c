use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::driver::LoopSettings;
use crate::render::Strategy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read config file: {0}")]
    Io(#[from] io::Error),
    #[error("couldn't parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    /// Render a square image whose side is the smaller of `width` and `height`.
    pub square: bool,
    pub strategy: Strategy,
    pub threads: usize,
    pub max_frames: Option<u64>,
    pub duration_secs: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 600,
            height: 600,
            square: true,
            strategy: Strategy::Parallel,
            threads: num_cpus::get(),
            max_frames: None,
            duration_secs: None,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let text = fs::read_to_string(path)?;
        Config::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn image_size(&self) -> (usize, usize) {
        if self.square {
            let side = self.width.min(self.height);
            (side, side)
        } else {
            (self.width, self.height)
        }
    }

    pub fn loop_settings(&self) -> LoopSettings {
        LoopSettings {
            strategy: self.strategy,
            threads: self.threads,
            max_frames: self.max_frames,
            max_duration: self.duration_secs.filter(|s| *s > 0.0).map(Duration::from_secs_f64),
        }
    }
}

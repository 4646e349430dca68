use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use super::timeline::Timeline;

/// Highest POV-Ray render quality level.
pub const MAX_QUALITY: u8 = 11;
pub const DEFAULT_ANTIALIAS_THRESHOLD: f64 = 0.01;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

fn invalid(parameter: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        parameter,
        reason: reason.into(),
    }
}

/// What to do with frame files left over from an earlier render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    #[default]
    Ask,
    Always,
    Never,
}

impl FromStr for OverwritePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ask" => Ok(OverwritePolicy::Ask),
            "always" => Ok(OverwritePolicy::Always),
            "never" => Ok(OverwritePolicy::Never),
            other => Err(invalid(
                "overwrite",
                format!("expected one of ask, always, never (got '{}')", other),
            )),
        }
    }
}

impl fmt::Display for OverwritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OverwritePolicy::Ask => "ask",
            OverwritePolicy::Always => "always",
            OverwritePolicy::Never => "never",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub frames_dir: PathBuf,
    pub prefix: String,
    pub overwrite: OverwritePolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageConfig {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    /// Antialiasing threshold; `None` renders without antialiasing.
    pub antialias: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub duration_secs: f64,
    pub fps: f64,
}

impl AnimationConfig {
    pub fn timeline(&self) -> Timeline {
        Timeline::new(self.duration_secs, self.fps)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoolConfig {
    pub enabled: bool,
    /// Dedicated pool size; `None` uses the global rayon pool.
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub output: OutputConfig,
    pub image: ImageConfig,
    pub animation: AnimationConfig,
    pub pool: PoolConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                frames_dir: PathBuf::from("images"),
                prefix: "simulation".to_string(),
                overwrite: OverwritePolicy::Ask,
            },
            image: ImageConfig {
                width: 1024,
                height: 768,
                quality: 9,
                antialias: Some(DEFAULT_ANTIALIAS_THRESHOLD),
            },
            animation: AnimationConfig {
                duration_secs: 6.0,
                fps: 10.0,
            },
            pool: PoolConfig {
                enabled: true,
                workers: None,
            },
        }
    }
}

#[derive(Default)]
pub struct RenderConfigBuilder {
    frames_dir: Option<PathBuf>,
    prefix: Option<String>,
    overwrite: Option<OverwritePolicy>,
    width: Option<u32>,
    height: Option<u32>,
    quality: Option<u8>,
    antialias: Option<Option<f64>>,
    duration_secs: Option<f64>,
    fps: Option<f64>,
    pool_enabled: Option<bool>,
    workers: Option<usize>,
}

impl RenderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_dir(mut self, dir: PathBuf) -> Self {
        self.frames_dir = Some(dir);
        self
    }
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
    pub fn overwrite(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = Some(policy);
        self
    }
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }
    pub fn antialias(mut self, threshold: Option<f64>) -> Self {
        self.antialias = Some(threshold);
        self
    }
    pub fn duration_secs(mut self, seconds: f64) -> Self {
        self.duration_secs = Some(seconds);
        self
    }
    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = Some(fps);
        self
    }
    pub fn pool_enabled(mut self, enabled: bool) -> Self {
        self.pool_enabled = Some(enabled);
        self
    }
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        let output = OutputConfig {
            frames_dir: self
                .frames_dir
                .ok_or(ConfigError::MissingParameter("frames_dir"))?,
            prefix: self.prefix.ok_or(ConfigError::MissingParameter("prefix"))?,
            overwrite: self
                .overwrite
                .ok_or(ConfigError::MissingParameter("overwrite"))?,
        };
        let image = ImageConfig {
            width: self.width.ok_or(ConfigError::MissingParameter("width"))?,
            height: self.height.ok_or(ConfigError::MissingParameter("height"))?,
            quality: self.quality.ok_or(ConfigError::MissingParameter("quality"))?,
            antialias: self
                .antialias
                .ok_or(ConfigError::MissingParameter("antialias"))?,
        };
        let animation = AnimationConfig {
            duration_secs: self
                .duration_secs
                .ok_or(ConfigError::MissingParameter("duration_secs"))?,
            fps: self.fps.ok_or(ConfigError::MissingParameter("fps"))?,
        };
        let pool = PoolConfig {
            enabled: self
                .pool_enabled
                .ok_or(ConfigError::MissingParameter("pool_enabled"))?,
            workers: self.workers,
        };
        let config = RenderConfig {
            output,
            image,
            animation,
            pool,
        };
        config.validate()?;
        Ok(config)
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.output.prefix;
        if prefix.trim().is_empty() {
            return Err(invalid("prefix", "must not be empty"));
        }
        if prefix.contains(['/', '\\']) {
            return Err(invalid("prefix", "must not contain path separators"));
        }
        if self.image.width == 0 {
            return Err(invalid("width", "must be at least 1 pixel"));
        }
        if self.image.height == 0 {
            return Err(invalid("height", "must be at least 1 pixel"));
        }
        if self.image.quality > MAX_QUALITY {
            return Err(invalid(
                "quality",
                format!("must be between 0 and {} (got {})", MAX_QUALITY, self.image.quality),
            ));
        }
        if let Some(threshold) = self.image.antialias {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(invalid("antialias", format!("must be a non-negative number (got {})", threshold)));
            }
        }
        if !self.animation.fps.is_finite() || self.animation.fps <= 0.0 {
            return Err(invalid("fps", format!("must be positive (got {})", self.animation.fps)));
        }
        if !self.animation.duration_secs.is_finite() || self.animation.duration_secs <= 0.0 {
            return Err(invalid(
                "duration_secs",
                format!("must be positive (got {})", self.animation.duration_secs),
            ));
        }
        if self.pool.workers == Some(0) {
            return Err(invalid("workers", "must be at least 1"));
        }
        Ok(())
    }
}

use crate::cli::RenderArgs;
use crate::error::{CliError, Result};
use povmol::engine::config::{self as core_config, OverwritePolicy};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialOutputConfig {
    frames_dir: Option<PathBuf>,
    prefix: Option<String>,
    overwrite: Option<OverwritePolicy>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialImageConfig {
    width: Option<u32>,
    height: Option<u32>,
    quality: Option<u8>,
    antialias: Option<bool>,
    antialias_threshold: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialAnimationConfig {
    /// Seconds.
    duration: Option<f64>,
    fps: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialPoolConfig {
    enabled: Option<bool>,
    workers: Option<usize>,
}

/// A render configuration as written in a TOML file; every key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRenderConfig {
    output: Option<PartialOutputConfig>,
    image: Option<PartialImageConfig>,
    animation: Option<PartialAnimationConfig>,
    pool: Option<PartialPoolConfig>,
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

impl PartialRenderConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolves the final configuration. Precedence, highest first: command-line
    /// flags, `-S KEY=VALUE` pairs, the file, built-in defaults.
    pub fn merge_with_cli(mut self, args: &RenderArgs) -> Result<core_config::RenderConfig> {
        self.apply_set_values(&args.set_values)?;

        let defaults = core_config::RenderConfig::default();
        let output = self.output.take().unwrap_or_default();
        let image = self.image.take().unwrap_or_default();
        let animation = self.animation.take().unwrap_or_default();
        let pool = self.pool.take().unwrap_or_default();

        let overwrite = if args.force {
            OverwritePolicy::Always
        } else {
            output.overwrite.unwrap_or(defaults.output.overwrite)
        };
        let antialias = match image.antialias {
            Some(false) => None,
            _ => Some(
                image
                    .antialias_threshold
                    .unwrap_or(core_config::DEFAULT_ANTIALIAS_THRESHOLD),
            ),
        };

        let mut builder = core_config::RenderConfigBuilder::new()
            .frames_dir(
                args.output_dir
                    .clone()
                    .or(output.frames_dir)
                    .unwrap_or(defaults.output.frames_dir),
            )
            .prefix(
                args.prefix
                    .clone()
                    .or(output.prefix)
                    .unwrap_or(defaults.output.prefix),
            )
            .overwrite(overwrite)
            .width(image.width.unwrap_or(defaults.image.width))
            .height(image.height.unwrap_or(defaults.image.height))
            .quality(image.quality.unwrap_or(defaults.image.quality))
            .antialias(antialias)
            .duration_secs(animation.duration.unwrap_or(defaults.animation.duration_secs))
            .fps(animation.fps.unwrap_or(defaults.animation.fps))
            .pool_enabled(pool.enabled.unwrap_or(defaults.pool.enabled));
        if let Some(workers) = pool.workers.or(defaults.pool.workers) {
            builder = builder.workers(workers);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();

            match key {
                "output.frames-dir" => {
                    self.output.get_or_insert_with(Default::default).frames_dir =
                        Some(PathBuf::from(value.trim()));
                }
                "output.prefix" => {
                    self.output.get_or_insert_with(Default::default).prefix =
                        Some(value.trim().to_string());
                }
                "output.overwrite" => {
                    self.output.get_or_insert_with(Default::default).overwrite = Some(
                        value
                            .parse()
                            .map_err(|e: core_config::ConfigError| CliError::Config(e.to_string()))?,
                    );
                }
                "image.width" => {
                    self.image.get_or_insert_with(Default::default).width =
                        Some(parse_value(key, value, "integer")?);
                }
                "image.height" => {
                    self.image.get_or_insert_with(Default::default).height =
                        Some(parse_value(key, value, "integer")?);
                }
                "image.quality" => {
                    self.image.get_or_insert_with(Default::default).quality =
                        Some(parse_value(key, value, "integer")?);
                }
                "image.antialias" => {
                    self.image.get_or_insert_with(Default::default).antialias =
                        Some(parse_value(key, value, "boolean")?);
                }
                "image.antialias-threshold" => {
                    self.image
                        .get_or_insert_with(Default::default)
                        .antialias_threshold = Some(parse_value(key, value, "float")?);
                }
                "animation.duration" => {
                    self.animation.get_or_insert_with(Default::default).duration =
                        Some(parse_value(key, value, "float")?);
                }
                "animation.fps" => {
                    self.animation.get_or_insert_with(Default::default).fps =
                        Some(parse_value(key, value, "float")?);
                }
                "pool.enabled" => {
                    self.pool.get_or_insert_with(Default::default).enabled =
                        Some(parse_value(key, value, "boolean")?);
                }
                "pool.workers" => {
                    self.pool.get_or_insert_with(Default::default).workers =
                        Some(parse_value(key, value, "integer")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn render_args(extra: &[&str]) -> RenderArgs {
        let mut argv = vec!["povmol", "render", "sphere-sweep"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Render(args) => args,
            other => panic!("expected render, got {:?}", other),
        }
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = PartialRenderConfig::from_toml("")
            .unwrap()
            .merge_with_cli(&render_args(&[]))
            .unwrap();
        assert_eq!(config, core_config::RenderConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let partial = PartialRenderConfig::from_toml(
            r#"
            [output]
            frames-dir = "frames"
            prefix = "tour"
            overwrite = "never"

            [image]
            width = 640
            height = 480
            antialias = false

            [animation]
            duration = 2.5
            fps = 24

            [pool]
            workers = 3
            "#,
        )
        .unwrap();
        let config = partial.merge_with_cli(&render_args(&[])).unwrap();
        assert_eq!(config.output.frames_dir, PathBuf::from("frames"));
        assert_eq!(config.output.prefix, "tour");
        assert_eq!(config.output.overwrite, OverwritePolicy::Never);
        assert_eq!((config.image.width, config.image.height), (640, 480));
        assert_eq!(config.image.quality, 9);
        assert_eq!(config.image.antialias, None);
        assert_eq!(config.animation.duration_secs, 2.5);
        assert_eq!(config.animation.fps, 24.0);
        assert!(config.pool.enabled);
        assert_eq!(config.pool.workers, Some(3));
    }

    #[test]
    fn set_values_override_file_and_flags_override_both() {
        let partial = PartialRenderConfig::from_toml(
            r#"
            [output]
            prefix = "from-file"
            [animation]
            fps = 12
            "#,
        )
        .unwrap();
        let args = render_args(&[
            "-S",
            "output.prefix=from-set",
            "-S",
            "animation.fps=30",
            "-S",
            "image.antialias-threshold=0.3",
            "--prefix",
            "from-flag",
            "--force",
        ]);
        let config = partial.merge_with_cli(&args).unwrap();
        assert_eq!(config.output.prefix, "from-flag");
        assert_eq!(config.output.overwrite, OverwritePolicy::Always);
        assert_eq!(config.animation.fps, 30.0);
        assert_eq!(config.image.antialias, Some(0.3));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PartialRenderConfig::from_toml("[image]\ncolour = 3\n").is_err());
        assert!(PartialRenderConfig::from_toml("[camera]\nx = 3\n").is_err());

        let args = render_args(&["-S", "camera.x=3"]);
        let result = PartialRenderConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("camera.x")));
    }

    #[test]
    fn malformed_set_values_are_reported() {
        for bad in ["animation.fps", "animation.fps=fast", "output.overwrite=sometimes"] {
            let args = render_args(&["-S", bad]);
            let result = PartialRenderConfig::default().merge_with_cli(&args);
            assert!(matches!(result, Err(CliError::Config(_))), "{} was accepted", bad);
        }
    }

    #[test]
    fn invalid_values_fail_validation() {
        let args = render_args(&["-S", "image.quality=12"]);
        let result = PartialRenderConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("quality")));
    }

    #[test]
    fn from_file_reports_parse_errors_with_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("render.toml");
        fs::write(&path, "[image\nwidth = ").unwrap();
        match PartialRenderConfig::from_file(&path) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

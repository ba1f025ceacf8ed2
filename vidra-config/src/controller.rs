use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::validation::ConfigValidationError;

pub const CONFIG_PATH_VAR: &str = "VIDRA_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "VIDRA_CONFIG_JSON";

/// Files checked, in order, when no environment override is set.
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "vidra.toml",
    "vidra.json",
    "config/vidra.toml",
    "config/vidra.json",
];

/// Source that produced the controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    /// One of [`DEFAULT_CANDIDATES`], resolved against the search directory.
    DefaultFile(PathBuf),
    /// A path handed over explicitly, e.g. a `--config` flag.
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Default => f.write_str("built-in defaults"),
            ConfigSource::EnvPath(path) => {
                write!(f, "${CONFIG_PATH_VAR} ({})", path.display())
            }
            ConfigSource::EnvInline => write!(f, "${CONFIG_JSON_VAR}"),
            ConfigSource::DefaultFile(path) | ConfigSource::File(path) => {
                write!(f, "{}", path.display())
            }
        }
    }
}

/// Serialization format of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Format named by the file extension, if it names one.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(ConfigFormat::Json),
            Some("toml") | Some("tml") => Some(ConfigFormat::Toml),
            _ => None,
        }
    }

    /// A controller config is a flat table, so a JSON document must open
    /// with `{`. Anything else is read as TOML.
    pub fn sniff(contents: &str) -> Self {
        if contents.trim_start().starts_with('{') {
            ConfigFormat::Json
        } else {
            ConfigFormat::Toml
        }
    }

    fn parse(self, contents: &str) -> anyhow::Result<ControllerConfig> {
        match self {
            ConfigFormat::Toml => {
                toml::from_str(contents).map_err(|err| anyhow!("toml: {err}"))
            }
            ConfigFormat::Json => serde_json::from_str(contents)
                .map_err(|err| anyhow!("json: {err}")),
        }
    }
}

/// Tuning for a mounted playback controller. Every field has a default, so a
/// config file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Inactivity window (ms) before the controls overlay hides while
    /// playing. Shorter windows get the overlay out of the way faster;
    /// longer windows suit pages where users read the scrub bar.
    pub controls_hide_delay_ms: u64,
    /// Seconds moved by a single arrow-key seek.
    pub seek_step_secs: f64,
    /// Volume change for a single arrow-key press, in `(0, 1]`.
    pub volume_step: f64,
    /// Volume restored when unmuting a player whose volume is zero, so the
    /// unmute is audible.
    pub unmute_volume: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            controls_hide_delay_ms: 3_000,
            seek_step_secs: 5.0,
            volume_step: 0.1,
            unmute_volume: 0.5,
        }
    }
}

impl ControllerConfig {
    pub fn controls_hide_delay(&self) -> Duration {
        Duration::from_millis(self.controls_hide_delay_ms)
    }

    /// Load controller configuration overrides using environment variables.
    /// Evaluation order:
    /// 1) `$VIDRA_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$VIDRA_CONFIG_JSON` (inline JSON),
    /// 3) the first of [`DEFAULT_CANDIDATES`] in the working directory,
    /// 4) defaults if none of the above is present.
    ///
    /// Whatever is found is validated before it is returned.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        Self::load_with(|key| env::var(key).ok())
    }

    /// Same as [`Self::load_from_env`] with an explicit variable lookup.
    pub fn load_with<F>(lookup: F) -> anyhow::Result<(Self, ConfigSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load_in(Path::new("."), lookup)
    }

    /// Resolve configuration with relative paths and default candidates
    /// taken from `dir`.
    pub fn load_in<F>(
        dir: &Path,
        lookup: F,
    ) -> anyhow::Result<(Self, ConfigSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (config, source) = Self::resolve(dir, lookup)?;
        config
            .validate()
            .with_context(|| format!("controller config from {source}"))?;
        tracing::debug!(%source, "loaded controller config");
        Ok((config, source))
    }

    fn resolve<F>(
        dir: &Path,
        lookup: F,
    ) -> anyhow::Result<(Self, ConfigSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path_str) = lookup(CONFIG_PATH_VAR)
            && !path_str.trim().is_empty()
        {
            let path = dir.join(path_str.trim());
            let config = Self::read_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = lookup(CONFIG_JSON_VAR)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(dir) {
            let config = Self::read_file(&path)?;
            return Ok((config, ConfigSource::DefaultFile(path)));
        }

        Ok((Self::default(), ConfigSource::Default))
    }

    /// Read and validate a single config file. The extension picks the
    /// format; without one the contents decide.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let config = Self::read_file(path)?;
        config.validate().with_context(|| {
            format!("controller config {}", path.display())
        })?;
        Ok(config)
    }

    fn read_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read controller config from {}", path.display())
        })?;
        let format = ConfigFormat::from_extension(path)
            .unwrap_or_else(|| ConfigFormat::sniff(&contents));
        format.parse(&contents).with_context(|| {
            format!("invalid controller config {}", path.display())
        })
    }

    /// Parse an in-memory document whose format is unknown.
    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        ConfigFormat::sniff(contents)
            .parse(contents)
            .with_context(|| format!("invalid controller config {origin}"))
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        ConfigFormat::Json.parse(raw)
    }

    /// Reject values the controller cannot honor.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.controls_hide_delay_ms == 0 {
            return Err(ConfigValidationError::ZeroHideDelay);
        }
        if !(self.seek_step_secs.is_finite() && self.seek_step_secs > 0.0) {
            return Err(ConfigValidationError::SeekStep(self.seek_step_secs));
        }
        if !(self.volume_step > 0.0 && self.volume_step <= 1.0) {
            return Err(ConfigValidationError::VolumeStep(self.volume_step));
        }
        if !(self.unmute_volume > 0.0 && self.unmute_volume <= 1.0) {
            return Err(ConfigValidationError::UnmuteVolume(
                self.unmute_volume,
            ));
        }
        Ok(())
    }

    fn find_default_file(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CANDIDATES
            .iter()
            .map(|candidate| dir.join(candidate))
            .find(|path| path.is_file())
    }
}

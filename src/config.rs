// Startup settings: which images make up the stack, window size, brush range.
// Read from `<preferences>/scratch-reveal/config.toml` when present; any key
// left out keeps its default.

use std::path::{Path, PathBuf};

use scratch_reveal::clearance::ClearanceMode;
use serde::Deserialize;

use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Top layer first.
    pub layers: Vec<PathBuf>,
    pub window: WindowConfig,
    pub brush: BrushConfig,
    pub clearance: ClearanceMode,
    /// 0x00RRGGBB shown once every layer is gone.
    pub background: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrushConfig {
    pub radius: i64,
    pub min: u32,
    pub max: u32,
    /// Pixels per key press / wheel notch.
    pub step: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layers: vec![
                PathBuf::from("img/layer1.png"),
                PathBuf::from("img/layer2.png"),
                PathBuf::from("img/layer3.png"),
            ],
            window: WindowConfig::default(),
            brush: BrushConfig::default(),
            clearance: ClearanceMode::Incremental,
            background: 0x00_20_20_20,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: 960, height: 640 }
    }
}

impl BrushConfig {
    /// Largest radius a config file may ask for.
    pub const MAX_RADIUS: u32 = 4096;
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self { radius: 24, min: 1, max: 150, step: 2 }
    }
}

#[must_use]
pub fn preferences_dir() -> Option<PathBuf> {
    let mut base_dir = dirs::preference_dir()?;
    base_dir.push(env!("CARGO_PKG_NAME"));
    Some(base_dir)
}

impl Config {
    const FILENAME: &'static str = "config.toml";

    pub fn from_toml(text: &str, path: &Path) -> Result<Self, Error> {
        let mut config: Self =
            toml::from_str(text).map_err(|source| Error::Config { path: path.to_owned(), source })?;
        if config.brush.max > BrushConfig::MAX_RADIUS {
            log::warn!(
                "{}: brush max {} capped to {}",
                path.display(),
                config.brush.max,
                BrushConfig::MAX_RADIUS
            );
            config.brush.max = BrushConfig::MAX_RADIUS;
        }
        Ok(config)
    }

    /// Read a config file. A missing file is an error here.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text, path)
    }

    /// The user's config file if it exists and parses, defaults otherwise.
    #[must_use]
    pub fn load_or_default() -> Self {
        let Some(mut path) = preferences_dir() else {
            log::debug!("No preferences dir, using default config");
            return Self::default();
        };
        path.push(Self::FILENAME);

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// `--config <path>` picks the file; every other argument is a layer image.
    pub fn from_args<I>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = std::ffi::OsString>,
    {
        let mut config_path = None;
        let mut layers = Vec::new();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg.as_os_str() == "--config" {
                let path = args
                    .next()
                    .ok_or_else(|| Error::Usage("--config needs a path".into()))?;
                config_path = Some(PathBuf::from(path));
            } else {
                layers.push(PathBuf::from(arg));
            }
        }

        let mut config = match config_path {
            Some(path) => Self::load(&path)?,
            None => Self::load_or_default(),
        };
        if !layers.is_empty() {
            config.layers = layers;
        }
        Ok(config)
    }
}

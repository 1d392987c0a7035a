//! Loader for locomotion config files (RON or JSON).

use ron::Options;
use std::fs;
use std::path::Path;

use super::LocomotionConfig;

/// Where the plugin looks for the config at startup.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/locomotion.ron";

/// Error type for config loading failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigFormat {
    Ron,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ron" => Some(Self::Ron),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse config text in the given format. Missing fields keep their defaults.
pub(crate) fn parse_config(
    contents: &str,
    format: ConfigFormat,
    file_name: &str,
) -> Result<LocomotionConfig, ConfigLoadError> {
    let parsed = match format {
        ConfigFormat::Ron => ron_options()
            .from_str::<LocomotionConfig>(contents)
            .map_err(|e| e.to_string()),
        ConfigFormat::Json => {
            serde_json::from_str::<LocomotionConfig>(contents).map_err(|e| e.to_string())
        }
    };

    parsed.map_err(|message| ConfigLoadError {
        file: file_name.to_string(),
        message: format!("Parse error: {}", message),
    })
}

/// Load a [`LocomotionConfig`] from disk, picking the format by extension.
pub fn load_config(path: &Path) -> Result<LocomotionConfig, ConfigLoadError> {
    let file_name = path.display().to_string();

    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigLoadError {
        file: file_name.clone(),
        message: "unsupported extension (expected .ron or .json)".to_string(),
    })?;

    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_config(&contents, format, &file_name)
}

//! Configuration file handling for facecheck.
//!
//! Loads configuration from `<config dir>/facecheck/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::{BACKEND_URL_ENV, DEFAULT_BACKEND_URL};
use crate::camera::{CameraSettings, Resolution, DEFAULT_JPEG_QUALITY};

/// Configuration file structure for facecheck.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub camera: CameraConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Whole-request timeout. Unset means wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: None,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CameraConfig {
    #[serde(default)]
    pub device: u32,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default)]
    pub mirror: bool,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            mirror: false,
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl CameraConfig {
    pub fn settings(&self) -> CameraSettings {
        CameraSettings {
            device_index: self.device,
            resolution: Resolution {
                width: self.width,
                height: self.height,
            },
            fps: self.fps,
            mirror: self.mirror,
            jpeg_quality: self.jpeg_quality,
        }
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_width() -> u32 {
    Resolution::default().width
}

fn default_height() -> u32 {
    Resolution::default().height
}

fn default_fps() -> u32 {
    30
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed or holds
    /// out-of-range values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            config.validate(&path)?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Apply `FACECHECK_BACKEND_URL` on top of the file values.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                self.backend.url = url;
            }
        }
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        };
        if !(1..=100).contains(&self.camera.jpeg_quality) {
            return Err(invalid(format!(
                "camera.jpeg_quality must be between 1 and 100, got {}",
                self.camera.jpeg_quality
            )));
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(invalid(
                "camera.width and camera.height must be greater than 0".to_string(),
            ));
        }
        if self.backend.timeout_secs == Some(0) {
            return Err(invalid(
                "backend.timeout_secs must be greater than 0 (omit it to disable)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    Invalid {
        path: PathBuf,
        reason: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::Invalid { path, reason } => {
                write!(f, "Invalid config file '{}': {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::Invalid { .. } => None,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("facecheck").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/facecheck/config.toml")
        })
}

/// Contents written by `facecheck config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# facecheck configuration

[backend]
# Face recognition service (overridden by FACECHECK_BACKEND_URL)
url = "http://127.0.0.1:5000"
# Give up on a request after this many seconds (default: wait forever)
# timeout_secs = 30

[camera]
# Camera device index (see `facecheck list-cameras`)
device = 0
# Requested capture size; the camera may pick the closest it supports
width = 640
height = 480
fps = 30
# Flip snapshots horizontally
mirror = false
# JPEG quality for snapshots (1-100)
jpeg_quality = 92
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/facecheck.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.backend.url, DEFAULT_BACKEND_URL);
        assert_eq!(config.backend.timeout(), None);
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[backend]\nurl = \"http://faces.local:8080\"\ntimeout_secs = 15\n\n[camera]\nmirror = true"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.backend.url, "http://faces.local:8080");
        assert_eq!(config.backend.timeout(), Some(Duration::from_secs(15)));
        assert!(config.camera.mirror);
        assert_eq!(config.camera.width, 640);
        assert_eq!(config.camera.jpeg_quality, 92);
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[camera\ndevice = ").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_out_of_range_quality_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[camera]\njpeg_quality = 0").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_camera_settings_from_config() {
        let camera = CameraConfig {
            device: 2,
            width: 1280,
            height: 720,
            fps: 15,
            mirror: true,
            jpeg_quality: 80,
        };
        let settings = camera.settings();
        assert_eq!(settings.device_index, 2);
        assert_eq!(settings.resolution, Resolution::HIGH);
        assert_eq!(settings.fps, 15);
        assert!(settings.mirror);
        assert_eq!(settings.jpeg_quality, 80);
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let path = default_path();
        assert!(path.ends_with("facecheck/config.toml"));
    }
}

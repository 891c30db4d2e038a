//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the backend URL, the optional API key and the dark-mode flag.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use log::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/recall-tui";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub dark_mode: bool,
    file_path: Option<PathBuf>,
}

/// Shape of the configuration file.
///
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub dark_mode: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for FileSpec {
    fn default() -> Self {
        FileSpec {
            base_url: default_base_url(),
            api_key: None,
            dark_mode: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance with default values.
    ///
    pub fn new() -> Config {
        Config {
            base_url: default_base_url(),
            api_key: None,
            dark_mode: false,
            file_path: None,
        }
    }

    /// Load an existing configuration from the disk using the custom
    /// directory if provided. A missing file leaves the defaults in place and
    /// is written on first save.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let data = Config::read(file_path)?;
            self.base_url = data.base_url;
            self.api_key = data.api_key.filter(|key| !key.is_empty());
            self.dark_mode = data.dark_mode;
        } else {
            debug!("No configuration at {}, using defaults.", file_path.display());
        }

        Ok(())
    }

    /// Override file values with those given on the command line. The
    /// overrides last for this session only.
    ///
    pub fn apply_overrides(&mut self, base_url: Option<&str>, api_key: Option<&str>) {
        if let Some(base_url) = base_url {
            self.base_url = base_url.to_string();
        }
        if let Some(api_key) = api_key {
            self.api_key = Some(api_key.to_string());
        }
    }

    /// Write the dark-mode flag to the configuration file. Every other key
    /// is taken from the file as it is on disk, so command line overrides
    /// never leave the session.
    ///
    pub fn save_dark_mode(&self, dark_mode: bool) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let mut data = if file_path.exists() {
            Config::read(file_path)?
        } else {
            FileSpec::default()
        };
        data.dark_mode = dark_mode;
        Config::write(file_path, &data)
    }

    fn read(file_path: &Path) -> Result<FileSpec, AppError> {
        let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
            path: file_path.to_path_buf(),
            message: format!("IO error: {}", e),
        })?;
        let data = serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        Ok(data)
    }

    /// Serialize the file contents and write them to the disk, returning any
    /// unrecoverable errors.
    ///
    fn write(file_path: &Path, data: &FileSpec) -> Result<(), AppError> {
        let content = serde_yaml::to_string(data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let save_failed = |e| ConfigError::SaveFailed {
            path: file_path.to_path_buf(),
            source: e,
        };
        let mut file = fs::File::create(file_path).map_err(save_failed)?;
        write!(file, "{}", content).map_err(save_failed)?;
        file.flush().map_err(save_failed)?;
        Ok(())
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() -> Result<(), AppError> {
        let dir = tempdir()?;
        let mut config = Config::new();
        config.load(dir.path().to_str())?;
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_key, None);
        assert!(!config.dark_mode);
        Ok(())
    }

    #[test]
    fn save_then_load_keeps_dark_mode() -> Result<(), AppError> {
        let dir = tempdir()?;
        fs::write(dir.path().join(FILE_NAME), "api_key: secret\n")?;
        let mut config = Config::new();
        config.load(dir.path().to_str())?;
        config.save_dark_mode(true)?;

        let mut reloaded = Config::new();
        reloaded.load(dir.path().to_str())?;
        assert!(reloaded.dark_mode);
        assert_eq!(reloaded.api_key.as_deref(), Some("secret"));
        Ok(())
    }

    #[test]
    fn saving_dark_mode_leaves_overrides_out_of_file() -> Result<(), AppError> {
        let dir = tempdir()?;
        let file_path = dir.path().join(FILE_NAME);
        fs::write(&file_path, "base_url: http://file:1\n")?;
        let mut config = Config::new();
        config.load(dir.path().to_str())?;
        config.apply_overrides(Some("http://session:2"), Some("cli-secret"));
        let saver = config.clone();
        saver.save_dark_mode(true)?;

        assert_eq!(config.base_url, "http://session:2");
        let mut reloaded = Config::new();
        reloaded.load(dir.path().to_str())?;
        assert_eq!(reloaded.base_url, "http://file:1");
        assert_eq!(reloaded.api_key, None);
        assert!(reloaded.dark_mode);
        assert!(!fs::read_to_string(&file_path)?.contains("cli-secret"));
        Ok(())
    }

    #[test]
    fn partial_file_fills_defaults() -> Result<(), AppError> {
        let dir = tempdir()?;
        fs::write(dir.path().join(FILE_NAME), "dark_mode: true\n")?;
        let mut config = Config::new();
        config.load(dir.path().to_str())?;
        assert!(config.dark_mode);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        Ok(())
    }

    #[test]
    fn invalid_yaml_is_reported() -> Result<(), AppError> {
        let dir = tempdir()?;
        fs::write(dir.path().join(FILE_NAME), "dark_mode: [")?;
        let mut config = Config::new();
        let result = config.load(dir.path().to_str());
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::DeserializationFailed(_)))
        ));
        Ok(())
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = Config::new();
        config.apply_overrides(Some("http://recall:9000"), None);
        assert_eq!(config.base_url, "http://recall:9000");
        assert_eq!(config.api_key, None);
        config.apply_overrides(None, Some("k"));
        assert_eq!(config.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn save_without_load_fails() {
        assert!(matches!(
            Config::new().save_dark_mode(true),
            Err(AppError::Config(ConfigError::FilePathNotSet))
        ));
    }
}

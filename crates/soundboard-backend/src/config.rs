use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use soundboard_bridge::config::Config;
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

/// Errors that can occur while loading or resolving application configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to determine the user's configuration directory. This usually
    /// occurs when required environment variables are missing (e.g., `$HOME`
    /// on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the configuration file.
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid TOML or does not match the
    /// expected structure.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
    /// Failed to serialize the default configuration to TOML.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

fn config_dir() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("dev", "soundboard", "soundboard")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(ConfigError::DirectoriesNotFound)
}

/// Loads the application configuration from the user's configuration
/// directory. Returns the loaded config, as well as the directory itself so
/// other persisted state (preferences) can live next to it.
pub async fn load_config() -> Result<(Config, PathBuf), ConfigError> {
    let config_dir = config_dir()?;
    let config = load_config_from(&config_dir.join("config.toml")).await?;
    Ok((config, config_dir))
}

/// Reads the configuration at `config_path`, writing the defaults there first
/// if the file does not exist yet.
pub(crate) async fn load_config_from(config_path: &Path) -> Result<Config, ConfigError> {
    log::info!("Loading configuration from {config_path:?}");
    if config_path.exists() {
        let contents = read_to_string(config_path).await?;
        return Ok(toml::from_str(&contents)?);
    }

    let config = Config::default();
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(&config)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(config_path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_defaults_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).await.unwrap();

        assert_eq!(config, Config::default());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("cdn_base_url"));
    }

    #[tokio::test]
    async fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbase_url = \"http://board.local:8080\"\n").unwrap();

        let config = load_config_from(&path).await.unwrap();

        assert_eq!(config.server.base_url, "http://board.local:8080");
        assert_eq!(config.server.events_url, Config::default().server.events_url);
        assert_eq!(config.audio, Config::default().audio);
    }

    #[tokio::test]
    async fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server = [").unwrap();

        assert!(matches!(
            load_config_from(&path).await,
            Err(ConfigError::DeserializeError(_))
        ));
    }
}

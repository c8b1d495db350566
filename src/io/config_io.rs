use std::fs;
use std::path::{Path, PathBuf};

use crate::model::AppConfig;

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse tagpane.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Load `tagpane.toml` from the listing directory. A missing file is not
/// an error — defaults apply.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let config_path = dir.join("tagpane.toml");
    if !config_path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert!(config.editor.is_none());
    }

    #[test]
    fn test_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("tagpane.toml"), "editor = \"nano\"\n").unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.editor.as_deref(), Some("nano"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("tagpane.toml"), "editor = [").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }
}

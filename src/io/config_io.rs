use std::fs;
use std::path::{Path, PathBuf};

use crate::model::AppConfig;

/// File name of the optional config inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load config.toml from the data directory. A missing file means stock
/// settings; a file that exists but does not parse is an error, not a
/// silent fallback.
pub fn load_config(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(e) => return Err(ConfigError::Read { path, source: e }),
    };
    toml::from_str(&text).map_err(|e| ConfigError::Parse { path, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert!(config.ui.show_key_hints);
        assert!(config.ui.confirm_delete);
        assert!(config.colors.is_empty());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[ui]\nconfirm_delete = false\n",
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap();
        assert!(config.ui.show_key_hints);
        assert!(!config.ui.confirm_delete);
    }

    #[test]
    fn color_overrides_are_read() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[colors]\naccent = \"#3B82F6\"\noverdue = \"#EF4444\"\n",
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.colors.get("accent"), Some(&"#3B82F6".to_string()));
        assert_eq!(config.colors.get("overdue"), Some(&"#EF4444".to_string()));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[ui\nbroken").unwrap();
        assert!(matches!(
            load_config(dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}

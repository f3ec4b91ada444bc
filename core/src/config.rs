use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.json";

/// Optional settings read from `config.json` in the data directory. Absent
/// file means defaults; the app never writes this file itself.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// When set, every successful save is mirrored to this path.
    #[serde(default)]
    pub mirror_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = Self::data_dir(base_dir)?.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let file = File::open(&path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
        match base_dir {
            Some(dir) => Ok(dir),
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                Ok(home_dir.join(".korjournal"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_means_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.mirror_path.is_none());
    }

    #[test]
    fn test_config_with_mirror_path() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"mirror_path": "/tmp/backup/korjournal.csv"}"#,
        )
        .unwrap();
        let config = AppConfig::load(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(
            config.mirror_path,
            Some(PathBuf::from("/tmp/backup/korjournal.csv"))
        );
    }
}

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::model::template::TripTemplate;

const TEMPLATE_FILE_NAME: &str = "templates.json";

/// Quick-add templates live in a JSON file next to the journal so the user
/// can edit their favourite routes by hand. A missing file is seeded with
/// the default commute pair.
pub struct FileTemplateRepository {
    file_path: PathBuf,
}

impl FileTemplateRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".korjournal")
            }
        };
        fs::create_dir_all(&path)?;
        path.push(TEMPLATE_FILE_NAME);

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &TripTemplate::defaults())?;
            writer.flush()?;
        }

        Ok(FileTemplateRepository { file_path: path })
    }

    pub fn list(&self) -> Result<Vec<TripTemplate>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let templates = serde_json::from_reader(reader)?;
        Ok(templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_seeded_with_defaults() {
        let dir = tempdir().unwrap();
        let repo = FileTemplateRepository::new(Some(dir.path().to_path_buf())).unwrap();
        let templates = repo.list().unwrap();
        assert_eq!(templates, TripTemplate::defaults());
    }

    #[test]
    fn test_existing_file_is_left_alone() {
        let dir = tempdir().unwrap();
        let custom = vec![TripTemplate {
            name: "Gym".to_string(),
            origin: "Hemma".to_string(),
            destination: "Gymmet".to_string(),
            start_time: "18:00".to_string(),
            end_time: "18:20".to_string(),
            distance_km: 6.2,
            purpose: "Träning".to_string(),
        }];
        fs::write(
            dir.path().join(TEMPLATE_FILE_NAME),
            serde_json::to_string(&custom).unwrap(),
        )
        .unwrap();

        let repo = FileTemplateRepository::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(repo.list().unwrap(), custom);
    }
}

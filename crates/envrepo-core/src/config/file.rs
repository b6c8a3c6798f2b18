//! File-based repository settings (YAML)
//!
//! Supports a user-level file (~/.config/envrepo/repository.yaml) or any explicit path.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::SettingsResult;
use super::settings::RepositorySettings;

/// Repository settings stored in a YAML file
///
/// Every field is optional in the file; missing fields keep their defaults.
///
/// # Example
///
/// ```no_run
/// use envrepo_core::config::SettingsFile;
///
/// let settings = SettingsFile::user().load_with_env().unwrap();
/// println!("querying with {}", settings.sql);
/// ```
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    /// Create a settings file handle for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// User-level settings (~/.config/envrepo/repository.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("envrepo").join("repository.yaml"))
    }

    /// Get the settings file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the settings file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load settings from the file, falling back to defaults if it is missing
    pub fn load(&self) -> SettingsResult<RepositorySettings> {
        if !self.exists() {
            return Ok(RepositorySettings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(RepositorySettings::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load settings from the file, then apply `ENVREPO_*` overrides
    pub fn load_with_env(&self) -> SettingsResult<RepositorySettings> {
        let mut settings = self.load()?;
        settings.apply_env()?;
        Ok(settings)
    }

    /// Save settings to the file
    pub fn save(&self, settings: &RepositorySettings) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(settings)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Grouping, SettingsError, DEFAULT_SQL};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("repository.yaml"));

        assert!(!file.exists());
        assert_eq!(file.load().unwrap(), RepositorySettings::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repository.yaml");
        fs::write(&path, "order: 1\ngrouping: per_batch\n").unwrap();

        let settings = SettingsFile::new(&path).load().unwrap();
        assert_eq!(settings.order, 1);
        assert_eq!(settings.grouping, Grouping::PerBatch);
        assert_eq!(settings.sql, DEFAULT_SQL);
        assert_eq!(settings.store, "memory");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("nested").join("repository.yaml"));

        let settings = RepositorySettings::default()
            .with_sql("SELECT K, V FROM CONFIG WHERE APP=? AND ENV=? AND TAG=?")
            .with_yaml_extension(true)
            .with_store("memory");
        file.save(&settings).unwrap();

        assert!(file.exists());
        assert_eq!(file.load().unwrap(), settings);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repository.yaml");
        fs::write(&path, "order: [not, a, number]\n").unwrap();

        assert!(matches!(SettingsFile::new(&path).load(), Err(SettingsError::Yaml(_))));
    }

    #[test]
    fn test_user_path() {
        let file = SettingsFile::user();
        assert!(file.path().ends_with("envrepo/repository.yaml"));
    }
}

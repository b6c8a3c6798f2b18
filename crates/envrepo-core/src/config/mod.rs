//! Repository settings
//!
//! Settings come from three layers, later ones overriding earlier ones:
//! - Built-in defaults (`RepositorySettings::default()`)
//! - A YAML settings file (`SettingsFile`, ~/.config/envrepo/repository.yaml by default)
//! - `ENVREPO_*` environment variables

mod error;
mod settings;
mod file;

pub use error::{SettingsError, SettingsResult};
pub use settings::{RepositorySettings, Grouping, DEFAULT_SQL, DEFAULT_ORDER, DEFAULT_STORE};
pub use file::SettingsFile;

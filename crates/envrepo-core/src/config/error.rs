//! Settings errors

/// Errors that can occur while loading or saving settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

impl SettingsError {
    pub(crate) fn invalid(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.into(),
            value: value.into(),
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;

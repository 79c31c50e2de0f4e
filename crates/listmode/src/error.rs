use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListModeError {
    #[error("Invalid <{tag}> entry #{index}: {reason}")]
    ConfigInvalid {
        tag: String,
        index: usize,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] confique::Error),

    #[error("No list limit matches channel {0}")]
    NoMatchingLimit(String),
}

pub type Result<T> = std::result::Result<T, ListModeError>;

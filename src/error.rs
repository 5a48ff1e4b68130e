use thiserror::Error;

#[derive(Error, Debug)]
pub enum WellnusError {
    #[error("{0}")]
    BadCommand(String),

    #[error("Detokenization failed! The file might be corrupted: {0}")]
    Tokenizer(String),

    #[error("{0}")]
    Habit(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl WellnusError {
    pub fn bad_command(message: impl Into<String>) -> Self {
        WellnusError::BadCommand(message.into())
    }

    pub fn is_bad_command(&self) -> bool {
        matches!(self, WellnusError::BadCommand(_))
    }
}

pub type Result<T> = std::result::Result<T, WellnusError>;

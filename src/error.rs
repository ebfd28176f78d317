//! Error types.
//!
//! The animation core never fails. Errors only come from the edges:
//! reading configuration, terminal I/O and layout.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonsterError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),
}

pub type Result<T> = std::result::Result<T, MonsterError>;

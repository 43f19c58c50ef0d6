use std::fmt::{self, Display};

/// Errors produced by model parsing and validation routines.
#[derive(Debug)]
pub enum ModelError {
    UnknownStatus(String),
    MalformedFrame(serde_json::Error),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownStatus(raw) => {
                write!(f, "unknown request status: {raw}")
            }
            ModelError::MalformedFrame(err) => {
                write!(f, "malformed channel frame: {err}")
            }
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::UnknownStatus(_) => None,
            ModelError::MalformedFrame(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::MalformedFrame(err)
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

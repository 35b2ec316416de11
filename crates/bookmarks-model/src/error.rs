//! Model error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown special folder: {0}")]
    UnknownSpecialFolder(String),
}

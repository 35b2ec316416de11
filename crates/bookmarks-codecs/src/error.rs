//! Codec error types

use thiserror::Error;

use crate::codec::{Dialect, Format};

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid HTML: {0}")]
    Html(#[from] bookmarks_html::HtmlError),

    #[error("Storage error: {0}")]
    Storage(#[from] bookmarks_storage::StorageError),

    #[error("Invalid special folder: {0}")]
    Model(#[from] bookmarks_model::ModelError),

    #[error("Missing required field {0:?}")]
    MissingField(String),

    #[error("Invalid value for field {field:?}: {value}")]
    InvalidField { field: String, value: String },

    #[error("Unsupported element type {0:?}")]
    UnsupportedType(String),

    #[error("Top-level bookmark must be a folder")]
    RootNotFolder,

    #[error("The {dialect} dialect does not support the {format} format")]
    Unsupported { dialect: Dialect, format: Format },

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),
}

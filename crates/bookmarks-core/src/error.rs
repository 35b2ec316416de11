//! Core error types

use thiserror::Error;

use bookmarks_codecs::CodecError;
use bookmarks_storage::StorageError;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No bookmarks parsed, call parse first")]
    NotParsed,

    #[error("No bookmarks converted, call convert first")]
    NotConverted,
}

impl ConvertError {
    /// The input was handed over as a database but is not SQLite at all.
    pub fn is_invalid_database(&self) -> bool {
        matches!(
            self,
            ConvertError::Storage(StorageError::NotADatabase(_))
                | ConvertError::Codec(CodecError::Storage(StorageError::NotADatabase(_)))
        )
    }

    /// The input was read but its content is not a bookmarks document of
    /// the expected shape.
    pub fn is_invalid_bookmarks(&self) -> bool {
        match self {
            ConvertError::Codec(err) => matches!(
                err,
                CodecError::Json(_)
                    | CodecError::Html(_)
                    | CodecError::Model(_)
                    | CodecError::MissingField(_)
                    | CodecError::InvalidField { .. }
                    | CodecError::UnsupportedType(_)
                    | CodecError::RootNotFolder
                    | CodecError::Storage(StorageError::RootNotFound)
            ),
            ConvertError::Storage(StorageError::RootNotFound) => true,
            ConvertError::Serialization(_) => true,
            _ => false,
        }
    }
}

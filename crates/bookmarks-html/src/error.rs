//! HTML error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HtmlError {
    #[error("No bookmark folder found in HTML document")]
    NoContainer,

    #[error("Invalid {attribute} attribute: {value:?}")]
    InvalidNumber { attribute: String, value: String },

    #[error("Link {id} has no HREF attribute")]
    MissingHref { id: i64 },
}

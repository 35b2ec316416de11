//! Bookmarks Model
//!
//! The common in-memory bookmark tree. Every parser produces a [`Folder`]
//! tagged as the root special folder, every serializer consumes one.
//!
//! Timestamps are always microseconds since the Unix epoch here; epoch and
//! unit conversions happen inside the codecs, never in the model.

mod bookmark;
mod error;
pub mod guid;
mod special;
pub mod timestamp;

pub use bookmark::{Bookmark, Folder, Url, Walk};
pub use error::ModelError;
pub use special::SpecialFolder;

pub type Result<T> = std::result::Result<T, ModelError>;

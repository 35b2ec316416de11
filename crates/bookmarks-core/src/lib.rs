//! Bookmarks Core
//!
//! Loads a bookmarks file in one dialect and format, and writes it out in
//! another. Codecs only see text, JSON values and rows; every file and
//! database handle is opened here.

mod config;
mod converter;
mod error;
mod io;

pub use config::Config;
pub use converter::{export, formats, load, Converter, Output};
pub use error::ConvertError;
pub use io::{read_text, save_db, write_json, write_text};

pub use bookmarks_codecs::{Codec, CodecError, Dialect, Format};
pub use bookmarks_model::{Bookmark, Folder, SpecialFolder, Url};
pub use bookmarks_storage::{BookmarkRow, StorageError};

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

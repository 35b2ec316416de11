//! Bookmarks Codecs
//!
//! Reads and writes bookmark trees in each browser dialect:
//! - Generic: HTML, JSON and the SQLite `bookmark` table
//! - Chrome: the `Bookmarks` JSON file and Chrome's HTML export
//! - Firefox: the JSON backup and Firefox's HTML export

mod chrome;
mod codec;
mod db;
mod error;
mod firefox;
mod generic;
mod html;
mod json;

pub use chrome::{as_chrome_timestamp, from_chrome_timestamp, Chrome, CHROME_EPOCH_OFFSET};
pub use codec::{Codec, Dialect, Format};
pub use error::CodecError;
pub use firefox::Firefox;
pub use generic::{special_title, Generic};

pub type Result<T> = std::result::Result<T, CodecError>;

//! Converter configuration

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use bookmarks_codecs::Format;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for generated output files; the input file's directory when unset
    pub output_dir: Option<PathBuf>,
    /// Stem of generated output file names
    pub file_stem: String,
    /// Indent JSON output by two spaces
    pub pretty_json: bool,
}

impl Config {
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self {
            output_dir,
            ..Self::default()
        }
    }

    /// `<stem>-YYYYMMDD-HHMMSS.<ext>`
    pub fn file_name(&self, format: Format, at: NaiveDateTime) -> String {
        format!(
            "{}-{}.{}",
            self.file_stem,
            at.format("%Y%m%d-%H%M%S"),
            format.extension()
        )
    }

    /// Timestamped output path next to `input` or inside `output_dir`.
    pub fn output_path(&self, input: &Path, format: Format) -> PathBuf {
        let dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        dir.join(self.file_name(format, Local::now().naive_local()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            file_stem: "bookmarks".to_string(),
            pretty_json: true,
        }
    }
}

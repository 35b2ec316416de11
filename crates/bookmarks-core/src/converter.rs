//! Parse, convert and save a bookmarks file
//!
//! [`Converter`] keeps the tree and the converted output between the three
//! stages so callers can inspect either. [`load`] and [`export`] are the
//! single-step building blocks it is made of.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use bookmarks_codecs::{Codec, Dialect, Format};
use bookmarks_model::Folder;
use bookmarks_storage::{BookmarkRow, Database};

use crate::config::Config;
use crate::error::ConvertError;
use crate::io::{read_text, save_db, write_json, write_text};
use crate::Result;

/// A converted tree, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Html(String),
    Json(Value),
    Db(Vec<BookmarkRow>),
}

impl Output {
    pub fn format(&self) -> Format {
        match self {
            Output::Html(_) => Format::Html,
            Output::Json(_) => Format::Json,
            Output::Db(_) => Format::Db,
        }
    }

    /// Write to `path`. A file created by a failed write is removed again.
    pub fn save(&self, path: &Path, config: &Config) -> Result<()> {
        let existed = path.exists();

        let result = match self {
            Output::Html(text) => write_text(path, text),
            Output::Json(value) => write_json(path, value, config.pretty_json),
            Output::Db(rows) => save_db(path, rows).map(|_| ()),
        };

        if let Err(e) = &result {
            if !existed && path.exists() {
                tracing::warn!(path = %path.display(), error = %e, "Removing partial output");
                if let Err(remove) = fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), error = %remove, "Failed to remove partial output");
                }
            }
        } else {
            tracing::info!(path = %path.display(), format = %self.format(), "Saved bookmarks");
        }

        result
    }
}

fn codec_for(dialect: Dialect, format: Format) -> Result<&'static dyn Codec> {
    let codec = dialect.codec();
    if !codec.supports(format) {
        return Err(codec.unsupported(format).into());
    }
    Ok(codec)
}

/// Read `path` as `format` in the given dialect.
pub fn load(dialect: Dialect, format: Format, path: &Path) -> Result<Folder> {
    let codec = codec_for(dialect, format)?;

    let tree = match format {
        Format::Html => codec.from_html(&read_text(path)?)?,
        Format::Json => codec.from_json(&read_text(path)?)?,
        Format::Db => codec.from_db(&Database::open(path)?)?,
    };

    tracing::info!(
        dialect = %dialect,
        format = %format,
        path = %path.display(),
        nodes = tree.len(),
        "Parsed bookmarks"
    );
    Ok(tree)
}

/// Serialize `tree` as `format` in the given dialect.
pub fn export(dialect: Dialect, format: Format, tree: &Folder) -> Result<Output> {
    let codec = codec_for(dialect, format)?;

    let output = match format {
        Format::Html => Output::Html(codec.as_html(tree)?),
        Format::Json => Output::Json(codec.as_json(tree)?),
        Format::Db => Output::Db(codec.as_db(tree)?),
    };

    tracing::debug!(dialect = %dialect, format = %format, "Converted bookmarks");
    Ok(output)
}

/// Every format at least one dialect can read and write.
pub fn formats() -> Vec<Format> {
    Format::ALL
        .into_iter()
        .filter(|format| Dialect::ALL.iter().any(|d| d.codec().supports(*format)))
        .collect()
}

/// Staged converter for one input file.
pub struct Converter {
    input: PathBuf,
    from: Dialect,
    to: Dialect,
    config: Config,
    tree: Option<Folder>,
    output: Option<Output>,
}

impl Converter {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            from: Dialect::default(),
            to: Dialect::default(),
            config: Config::default(),
            tree: None,
            output: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Dialect of the input file.
    pub fn from_dialect(mut self, dialect: Dialect) -> Self {
        self.from = dialect;
        self
    }

    /// Dialect of the output.
    pub fn to_dialect(mut self, dialect: Dialect) -> Self {
        self.to = dialect;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn tree(&self) -> Option<&Folder> {
        self.tree.as_ref()
    }

    pub fn output(&self) -> Option<&Output> {
        self.output.as_ref()
    }

    /// Load the input file. Any earlier conversion is discarded.
    pub fn parse(&mut self, format: Format) -> Result<&Folder> {
        let tree = load(self.from, format, &self.input)?;
        self.output = None;
        Ok(self.tree.insert(tree))
    }

    pub fn convert(&mut self, format: Format) -> Result<&Output> {
        let tree = self.tree.as_ref().ok_or(ConvertError::NotParsed)?;
        let output = export(self.to, format, tree)?;
        Ok(self.output.insert(output))
    }

    /// Save to a timestamped file chosen by the configuration.
    pub fn save(&self) -> Result<PathBuf> {
        let output = self.output.as_ref().ok_or(ConvertError::NotConverted)?;
        let path = self.config.output_path(&self.input, output.format());
        output.save(&path, &self.config)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let output = self.output.as_ref().ok_or(ConvertError::NotConverted)?;
        output.save(path, &self.config)
    }

    /// All three stages; `output` overrides the generated file name.
    pub fn run(&mut self, from: Format, to: Format, output: Option<&Path>) -> Result<PathBuf> {
        self.parse(from)?;
        self.convert(to)?;
        match output {
            Some(path) => {
                self.save_to(path)?;
                Ok(path.to_path_buf())
            }
            None => self.save(),
        }
    }
}

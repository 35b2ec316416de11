//! Special folder tags
//!
//! ```text
//! root
//!  ├── menu
//!  ├── toolbar
//!  ├── other
//!  └── mobile
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialFolder {
    /// The single top-level container of a tree
    Root,
    /// Bookmarks menu (Firefox and the generic dialect)
    Menu,
    /// Bookmarks toolbar / bar
    Toolbar,
    /// Other / unfiled bookmarks
    Other,
    /// Mobile / synced bookmarks
    Mobile,
}

impl SpecialFolder {
    pub const ALL: [SpecialFolder; 5] = [
        SpecialFolder::Root,
        SpecialFolder::Menu,
        SpecialFolder::Toolbar,
        SpecialFolder::Other,
        SpecialFolder::Mobile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialFolder::Root => "root",
            SpecialFolder::Menu => "menu",
            SpecialFolder::Toolbar => "toolbar",
            SpecialFolder::Other => "other",
            SpecialFolder::Mobile => "mobile",
        }
    }
}

impl std::fmt::Display for SpecialFolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SpecialFolder {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "root" => Ok(SpecialFolder::Root),
            "menu" => Ok(SpecialFolder::Menu),
            "toolbar" => Ok(SpecialFolder::Toolbar),
            "other" => Ok(SpecialFolder::Other),
            "mobile" => Ok(SpecialFolder::Mobile),
            _ => Err(ModelError::UnknownSpecialFolder(s.to_string())),
        }
    }
}

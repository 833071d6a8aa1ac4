//! # Configuration
//!
//! The store itself only needs a directory. This module decides which one,
//! using [`confique`] for layered loading from a TOML file and environment
//! variables.
//!
//! ## Resolution Order
//!
//! 1. **Explicit root**: `data_root` from the environment (`VERSES_DATA_ROOT`)
//!    or the TOML file, when non-blank.
//! 2. **Azure App Service**: when `WEBSITE_INSTANCE_ID` is set and `HOME` is
//!    non-blank, `$HOME/site/data/App_Data` (the persistent share).
//! 3. **Content root**: `<content root>/App_Data`.
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `data_root` | `VERSES_DATA_ROOT` | unset | Directory holding the collection files |

use crate::error::{Result, VersesError};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DATA_DIR_NAME: &str = "App_Data";

/// Configuration for the store, stored in `verses.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct VersesConfig {
    /// Directory holding groups.json, verses.json, registrations.json and
    /// purposes.json. Created on first use.
    #[config(env = "VERSES_DATA_ROOT")]
    pub data_root: Option<PathBuf>,
}

impl VersesConfig {
    /// Loads environment variables layered over an optional TOML file.
    /// A missing file is not an error.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = VersesConfig::builder().env();
        if let Some(file) = file {
            builder = builder.file(file);
        }
        builder
            .load()
            .map_err(|e| VersesError::Config(e.to_string()))
    }

    /// See [`resolve_data_root`], reading the process environment.
    pub fn data_root(&self, content_root: &Path) -> PathBuf {
        resolve_data_root(
            self.data_root.as_deref(),
            |key| std::env::var(key).ok(),
            content_root,
        )
    }
}

/// Picks the storage directory. `env` looks up environment variables so the
/// choice can be tested without touching the process environment.
pub fn resolve_data_root<F>(configured: Option<&Path>, env: F, content_root: &Path) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(root) = configured.filter(|p| !is_blank(p)) {
        return root.to_path_buf();
    }

    let on_azure = env("WEBSITE_INSTANCE_ID").is_some_and(|v| !v.trim().is_empty());
    if on_azure {
        if let Some(home) = env("HOME").filter(|h| !h.trim().is_empty()) {
            return Path::new(&home).join("site").join("data").join(DATA_DIR_NAME);
        }
    }

    content_root.join(DATA_DIR_NAME)
}

fn is_blank(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}

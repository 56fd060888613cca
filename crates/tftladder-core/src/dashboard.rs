//! Static dashboard assembly.
//!
//! The page is a template with three placeholders: stylesheet, script, and a
//! JSON snapshot of the stored records. Nothing is rendered server-side; the
//! embedded script builds the table in the browser.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::storage::{JsonStore, StorageError, StoredRecord};

pub const CSS_PLACEHOLDER: &str = "<!-- CSS_PLACEHOLDER -->";
pub const JS_PLACEHOLDER: &str = "<!-- JS_PLACEHOLDER -->";
pub const DATA_PLACEHOLDER: &str = "<!-- DATA_PLACEHOLDER -->";

const TEMPLATE_FILE: &str = "game_tracker.html";
const STYLE_FILE: &str = "style.css";
const SCRIPT_FILE: &str = "script.js";

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("template is missing placeholder {placeholder}")]
    MissingPlaceholder { placeholder: &'static str },

    #[error("failed to read dashboard asset {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to encode snapshot: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Template, stylesheet, and script making up the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardAssets {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl Default for DashboardAssets {
    fn default() -> Self {
        Self {
            html: String::from(include_str!("../assets/game_tracker.html")),
            css: String::from(include_str!("../assets/style.css")),
            js: String::from(include_str!("../assets/script.js")),
        }
    }
}

impl DashboardAssets {
    /// Load `game_tracker.html`, `style.css`, and `script.js` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, DashboardError> {
        Ok(Self {
            html: read_asset(&dir.join(TEMPLATE_FILE))?,
            css: read_asset(&dir.join(STYLE_FILE))?,
            js: read_asset(&dir.join(SCRIPT_FILE))?,
        })
    }
}

fn read_asset(path: &Path) -> Result<String, DashboardError> {
    fs::read_to_string(path).map_err(|source| DashboardError::Asset {
        path: path.to_path_buf(),
        source,
    })
}

/// Data embedded into the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: String,
    pub data_dir: PathBuf,
    pub records: Vec<StoredRecord>,
}

impl DashboardSnapshot {
    pub fn collect(store: &JsonStore) -> Result<Self, DashboardError> {
        Ok(Self {
            generated_at: OffsetDateTime::now_utc().format(&Rfc3339)?,
            data_dir: store.data_dir().to_path_buf(),
            records: store.list()?,
        })
    }
}

/// Fill every placeholder of the template.
pub fn render(
    assets: &DashboardAssets,
    snapshot: &DashboardSnapshot,
) -> Result<String, DashboardError> {
    for placeholder in [CSS_PLACEHOLDER, JS_PLACEHOLDER, DATA_PLACEHOLDER] {
        if !assets.html.contains(placeholder) {
            return Err(DashboardError::MissingPlaceholder { placeholder });
        }
    }

    // No raw `<` may reach the data element: it could close the script,
    // open an HTML comment, or spell a placeholder.
    let data = serde_json::to_string(snapshot)?.replace('<', "\\u003c");

    // Data goes in last so nothing inside it is treated as a placeholder.
    let html = assets
        .html
        .replace(CSS_PLACEHOLDER, &format!("<style>\n{}\n</style>", assets.css))
        .replace(JS_PLACEHOLDER, &format!("<script>\n{}\n</script>", assets.js))
        .replace(
            DATA_PLACEHOLDER,
            &format!("<script id=\"tracker-data\" type=\"application/json\">{data}</script>"),
        );

    Ok(html)
}

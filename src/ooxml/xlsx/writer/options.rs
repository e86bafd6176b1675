//! Configuration of an export session.
//!
//! # Examples
//!
//! ```rust
//! use xlsx_factory::{ExportOptions, FactoryMode};
//!
//! let options = ExportOptions::new()
//!     .with_author("Reporting")
//!     .with_default_font_size(10.0)
//!     .with_factory_mode(FactoryMode::MultiSheet);
//! assert_eq!(options.author, "Reporting");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How [`super::session::ExportSession::start_export`] treats accumulated state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FactoryMode {
    /// Every export starts from an empty session
    #[default]
    SingleSheet,
    /// Sheets accumulate across exports until the session is reset
    MultiSheet,
}

/// Options applied to the package-level parts of an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// Creator and last editor recorded in `docProps/core.xml`
    pub author: String,
    /// Size in points of fonts whose style leaves the size unset
    pub default_font_size: f64,
    pub factory_mode: FactoryMode,
    /// Creation timestamp; the time of packaging when unset
    pub created: Option<DateTime<Utc>>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            author: "xlsx-factory".to_string(),
            default_font_size: 11.0,
            factory_mode: FactoryMode::SingleSheet,
            created: None,
        }
    }
}

impl ExportOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    #[inline]
    pub fn with_default_font_size(mut self, size: f64) -> Self {
        self.default_font_size = size;
        self
    }

    #[inline]
    pub fn with_factory_mode(mut self, mode: FactoryMode) -> Self {
        self.factory_mode = mode;
        self
    }

    /// Pin the creation timestamp, e.g. for reproducible output.
    #[inline]
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

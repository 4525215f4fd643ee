//! Destination sheet surface abstraction.
//!
//! The publisher renders the catalog through the [`SheetSurface`] trait;
//! [`GoogleSheet`] is the Google Sheets implementation. Rows and columns
//! are 1-based throughout, matching the sheet UI.

mod gsheets;

pub use gsheets::{GoogleSheet, GoogleSheetConfig};

use async_trait::async_trait;
use thiserror::Error;

/// Errors for sheet surface operations.
#[derive(Debug, Error)]
pub enum SheetError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status.
    #[error("Sheets API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// The configured worksheet title does not exist in the spreadsheet.
    #[error("Worksheet not found in spreadsheet: {0}")]
    SheetNotFound(String),

    /// Failed to parse a response.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Trait for a sheet-like destination surface.
#[async_trait]
pub trait SheetSurface: Send + Sync {
    /// Remove every value from the surface.
    async fn clear(&self) -> Result<(), SheetError>;

    /// Append a row after the last non-empty row.
    async fn append_row(&self, row: &[String]) -> Result<(), SheetError>;

    /// Overwrite a single cell. The value is interpreted as user input, so
    /// formulas take effect.
    async fn update_cell(&self, row: u32, col: u32, value: &str) -> Result<(), SheetError>;

    /// Freeze the first `rows` rows.
    async fn freeze_rows(&self, rows: u32) -> Result<(), SheetError>;

    /// Enable a basic filter over the used range.
    async fn set_basic_filter(&self) -> Result<(), SheetError>;

    /// Render a row in bold.
    async fn bold_row(&self, row: u32) -> Result<(), SheetError>;

    /// Auto-size the columns `first..=last`.
    async fn auto_resize_columns(&self, first: u32, last: u32) -> Result<(), SheetError>;
}

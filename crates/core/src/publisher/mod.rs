//! Catalog publishing.
//!
//! Renders an ordered catalog into a sheet surface: a fixed header row,
//! one data row per entry, and the Name cell of every data row rewritten
//! as a hyperlink to the source item.

use tracing::info;

use crate::catalog::CatalogEntry;
use crate::sheet::{SheetError, SheetSurface};

/// The fixed header row, in column order.
pub const HEADER: [&str; 5] = ["Artist", "Name", "Instrument", "Location", "Document ID"];

/// 1-based column holding the hyperlinked name.
const NAME_COLUMN: u32 = 2;

/// Renders ordered catalog entries into a [`SheetSurface`].
#[derive(Debug, Default)]
pub struct CatalogPublisher;

impl CatalogPublisher {
    pub fn new() -> Self {
        Self
    }

    /// Publish the entries, which must already be sorted by
    /// `(artist, name, instrument)`.
    ///
    /// The first data row sits immediately below the frozen header: entry
    /// `k` (0-based) lands on sheet row `k + 2`.
    pub async fn publish(
        &self,
        entries: &[CatalogEntry],
        sheet: &dyn SheetSurface,
    ) -> Result<(), SheetError> {
        sheet.clear().await?;

        let header: Vec<String> = HEADER.iter().map(|h| h.to_string()).collect();
        sheet.append_row(&header).await?;
        sheet.freeze_rows(1).await?;
        sheet.set_basic_filter().await?;
        sheet.bold_row(1).await?;

        for (offset, entry) in entries.iter().enumerate() {
            info!(
                "adding {}: {} ({})",
                entry.artist, entry.name, entry.instrument
            );

            let row = vec![
                entry.artist.clone(),
                entry.name.clone(),
                entry.instrument.clone(),
                entry.location.clone(),
                entry.document_id.clone(),
            ];
            sheet.append_row(&row).await?;

            let row_number = offset as u32 + 2;
            sheet
                .update_cell(row_number, NAME_COLUMN, &name_cell(entry))
                .await?;
        }

        sheet.auto_resize_columns(1, HEADER.len() as u32).await?;

        Ok(())
    }
}

/// The Name cell value: a HYPERLINK formula, or the plain name when the
/// entry carries no link.
fn name_cell(entry: &CatalogEntry) -> String {
    if entry.link.is_empty() {
        return entry.name.clone();
    }
    format!(
        "=HYPERLINK(\"{}\", \"{}\")",
        escape_quotes(&entry.link),
        escape_quotes(&entry.name)
    )
}

/// Double quotes inside formula string operands.
fn escape_quotes(s: &str) -> String {
    s.replace('"', "\"\"")
}

//! Mock sheet surface for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::sheet::{SheetError, SheetSurface};

/// A recorded sheet operation for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetOp {
    Clear,
    AppendRow(Vec<String>),
    UpdateCell { row: u32, col: u32, value: String },
    FreezeRows(u32),
    SetBasicFilter,
    BoldRow(u32),
    AutoResizeColumns { first: u32, last: u32 },
}

/// Mock implementation of the [`SheetSurface`] trait.
///
/// Records every operation and replays value writes into an in-memory grid
/// so tests can assert on the exact published layout, including cell
/// overwrites landing on the right row.
#[derive(Debug, Clone, Default)]
pub struct MockSheet {
    ops: Arc<RwLock<Vec<SheetOp>>>,
    rows: Arc<RwLock<Vec<Vec<String>>>>,
    next_error: Arc<RwLock<Option<SheetError>>>,
}

impl MockSheet {
    /// Create a new empty mock sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded operation, in call order.
    pub async fn operations(&self) -> Vec<SheetOp> {
        self.ops.read().await.clone()
    }

    /// The current grid contents: appended rows with cell updates applied.
    pub async fn grid(&self) -> Vec<Vec<String>> {
        self.rows.read().await.clone()
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: SheetError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<SheetError> {
        self.next_error.write().await.take()
    }

    async fn record(&self, op: SheetOp) {
        self.ops.write().await.push(op);
    }
}

#[async_trait]
impl SheetSurface for MockSheet {
    async fn clear(&self) -> Result<(), SheetError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.record(SheetOp::Clear).await;
        self.rows.write().await.clear();
        Ok(())
    }

    async fn append_row(&self, row: &[String]) -> Result<(), SheetError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.record(SheetOp::AppendRow(row.to_vec())).await;
        self.rows.write().await.push(row.to_vec());
        Ok(())
    }

    async fn update_cell(&self, row: u32, col: u32, value: &str) -> Result<(), SheetError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.record(SheetOp::UpdateCell {
            row,
            col,
            value: value.to_string(),
        })
        .await;

        let mut rows = self.rows.write().await;
        let row_idx = row as usize - 1;
        let col_idx = col as usize - 1;
        if rows.len() <= row_idx {
            rows.resize(row_idx + 1, Vec::new());
        }
        let cells = &mut rows[row_idx];
        if cells.len() <= col_idx {
            cells.resize(col_idx + 1, String::new());
        }
        cells[col_idx] = value.to_string();
        Ok(())
    }

    async fn freeze_rows(&self, rows: u32) -> Result<(), SheetError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.record(SheetOp::FreezeRows(rows)).await;
        Ok(())
    }

    async fn set_basic_filter(&self) -> Result<(), SheetError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.record(SheetOp::SetBasicFilter).await;
        Ok(())
    }

    async fn bold_row(&self, row: u32) -> Result<(), SheetError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.record(SheetOp::BoldRow(row)).await;
        Ok(())
    }

    async fn auto_resize_columns(&self, first: u32, last: u32) -> Result<(), SheetError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.record(SheetOp::AutoResizeColumns { first, last }).await;
        Ok(())
    }
}

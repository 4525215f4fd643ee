//! Google Sheets v4 surface implementation.
//!
//! Value reads/writes go through the `values` endpoints; structural changes
//! (frozen rows, basic filter, formatting, column sizing) go through
//! `batchUpdate` requests against the resolved numeric sheet id.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::{SheetError, SheetSurface};
use async_trait::async_trait;

/// Google Sheets destination configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleSheetConfig {
    /// Spreadsheet (workbook) identifier.
    pub spreadsheet_id: String,
    /// Worksheet title inside the spreadsheet.
    pub sheet_name: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Base URL (default: https://sheets.googleapis.com/v4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_timeout() -> u32 {
    30
}

/// Google Sheets surface bound to one worksheet.
pub struct GoogleSheet {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    sheet_title: String,
    /// Numeric sheet id resolved from the title at open time.
    sheet_id: i64,
    access_token: String,
}

impl GoogleSheet {
    /// Open the configured worksheet, resolving its title to a sheet id.
    ///
    /// Fails with [`SheetError::SheetNotFound`] when the title does not
    /// exist, before anything destructive has happened.
    pub async fn open(config: GoogleSheetConfig, access_token: &str) -> Result<Self, SheetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://sheets.googleapis.com/v4".to_string());

        let url = format!("{}/spreadsheets/{}", base_url, config.spreadsheet_id);
        let response = client
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("fields", "sheets(properties(sheetId,title))")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let meta: SpreadsheetMeta = response.json().await.map_err(|e| {
            SheetError::Parse(format!("Failed to parse spreadsheet metadata: {}", e))
        })?;

        let sheet_id = meta
            .sheets
            .iter()
            .find(|s| s.properties.title == config.sheet_name)
            .map(|s| s.properties.sheet_id)
            .ok_or_else(|| SheetError::SheetNotFound(config.sheet_name.clone()))?;

        debug!(
            "resolved worksheet '{}' to sheet id {}",
            config.sheet_name, sheet_id
        );

        Ok(Self {
            client,
            base_url,
            spreadsheet_id: config.spreadsheet_id,
            sheet_title: config.sheet_name,
            sheet_id,
            access_token: access_token.to_string(),
        })
    }

    async fn ensure_success(response: reqwest::Response) -> Result<(), SheetError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(SheetError::ApiError {
            status: status.as_u16(),
            message: body,
        })
    }

    /// Send a single `batchUpdate` request.
    async fn batch_update(&self, request: Value) -> Result<(), SheetError> {
        let url = format!(
            "{}/spreadsheets/{}:batchUpdate",
            self.base_url, self.spreadsheet_id
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&json!({ "requests": [request] }))
            .send()
            .await?;
        Self::ensure_success(response).await
    }
}

#[async_trait]
impl SheetSurface for GoogleSheet {
    async fn clear(&self) -> Result<(), SheetError> {
        let url = format!(
            "{}/spreadsheets/{}/values:batchClear",
            self.base_url, self.spreadsheet_id
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&json!({ "ranges": [quoted_title(&self.sheet_title)] }))
            .send()
            .await?;
        Self::ensure_success(response).await
    }

    async fn append_row(&self, row: &[String]) -> Result<(), SheetError> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}:append",
            self.base_url,
            self.spreadsheet_id,
            quoted_title(&self.sheet_title)
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        Self::ensure_success(response).await
    }

    async fn update_cell(&self, row: u32, col: u32, value: &str) -> Result<(), SheetError> {
        let range = a1_cell(&self.sheet_title, row, col);
        let url = format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url, self.spreadsheet_id, range
        );
        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.access_token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&json!({ "values": [[value]] }))
            .send()
            .await?;
        Self::ensure_success(response).await
    }

    async fn freeze_rows(&self, rows: u32) -> Result<(), SheetError> {
        self.batch_update(json!({
            "updateSheetProperties": {
                "properties": {
                    "sheetId": self.sheet_id,
                    "gridProperties": { "frozenRowCount": rows }
                },
                "fields": "gridProperties.frozenRowCount"
            }
        }))
        .await
    }

    async fn set_basic_filter(&self) -> Result<(), SheetError> {
        self.batch_update(json!({
            "setBasicFilter": {
                "filter": { "range": { "sheetId": self.sheet_id } }
            }
        }))
        .await
    }

    async fn bold_row(&self, row: u32) -> Result<(), SheetError> {
        self.batch_update(json!({
            "repeatCell": {
                "range": {
                    "sheetId": self.sheet_id,
                    "startRowIndex": row - 1,
                    "endRowIndex": row
                },
                "cell": {
                    "userEnteredFormat": { "textFormat": { "bold": true } }
                },
                "fields": "userEnteredFormat.textFormat.bold"
            }
        }))
        .await
    }

    async fn auto_resize_columns(&self, first: u32, last: u32) -> Result<(), SheetError> {
        self.batch_update(json!({
            "autoResizeDimensions": {
                "dimensions": {
                    "sheetId": self.sheet_id,
                    "dimension": "COLUMNS",
                    "startIndex": first - 1,
                    "endIndex": last
                }
            }
        }))
        .await
    }
}

/// Quote a worksheet title for use in an A1 range.
fn quoted_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// A1 notation for a single cell, 1-based row and column.
fn a1_cell(title: &str, row: u32, col: u32) -> String {
    format!("{}!{}{}", quoted_title(title), column_letters(col), row)
}

/// Spreadsheet column letters for a 1-based column index (1 = A, 27 = AA).
fn column_letters(col: u32) -> String {
    let mut col = col;
    let mut letters = Vec::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        letters.push(b'A' + rem);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).expect("ASCII letters")
}

// ============================================================================
// Sheets API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId", default)]
    sheet_id: i64,
    #[serde(default)]
    title: String,
}

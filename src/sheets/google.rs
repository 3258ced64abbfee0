//! Google Sheets API v4 client
//!
//! Authorizes once with a service-account key and then talks plain REST
//! through `reqwest`. An upload run is short, so the access token is not
//! refreshed.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::SheetsClient;
use crate::config::SheetsConfig;
use crate::constants::sheets;
use crate::types::{HrError, Result};

pub struct GoogleSheetsClient {
    /// Never exposed in logs or debug output
    access_token: SecretString,
    api_base: String,
    spreadsheet_id: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GoogleSheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsClient")
            .field("access_token", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .finish()
    }
}

impl GoogleSheetsClient {
    /// Authorize with the configured service-account key
    pub async fn connect(config: &SheetsConfig) -> Result<Self> {
        let key = yup_oauth2::read_service_account_key(&config.credentials)
            .await
            .map_err(|e| {
                HrError::Config(format!(
                    "Cannot read service account key {}: {}",
                    config.credentials.display(),
                    e
                ))
            })?;

        let auth = yup_oauth2::ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| HrError::SheetsApi(format!("Failed to create authenticator: {}", e)))?;

        let token = auth
            .token(&[sheets::SCOPE])
            .await
            .map_err(|e| HrError::SheetsApi(format!("Service account authorization failed: {}", e)))?;
        let access_token = token
            .token()
            .ok_or_else(|| HrError::SheetsApi("Authorization returned no access token".to_string()))?
            .to_string();

        info!("Authorized Google Sheets access");
        Self::with_token(config, SecretString::from(access_token))
    }

    /// Build a client around an already issued access token
    pub fn with_token(config: &SheetsConfig, access_token: SecretString) -> Result<Self> {
        let spreadsheet_id = config
            .spreadsheet_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                HrError::Config(
                    "No spreadsheet configured. Set sheets.spreadsheet_id or HR_ANALYTICS_SHEETS__SPREADSHEET_ID"
                        .to_string(),
                )
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HrError::SheetsApi(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            access_token,
            api_base: config.api_base.clone(),
            spreadsheet_id: spreadsheet_id.trim().to_string(),
            client,
        })
    }

    /// `{api_base}/spreadsheets/` followed by `segments`, each one
    /// percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.api_base).map_err(|e| {
            HrError::Config(format!("Invalid Sheets api_base '{}': {}", self.api_base, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| HrError::Config(format!("Invalid Sheets api_base '{}'", self.api_base)))?
            .pop_if_empty()
            .push("spreadsheets")
            .extend(segments);
        Ok(url)
    }

    /// `values/{range}:{method}` endpoint for a worksheet
    fn values_endpoint(&self, title: &str, cell: &str, method: &str) -> Result<reqwest::Url> {
        let range = format!("{}{}:{}", quote_title(title), cell, method);
        self.endpoint(&[self.spreadsheet_id.as_str(), "values", range.as_str()])
    }

    async fn send(&self, request: reqwest::RequestBuilder, action: &str) -> Result<reqwest::Response> {
        let response = request
            .bearer_auth(self.access_token.expose_secret())
            .send()
            .await
            .map_err(|e| HrError::SheetsApi(format!("{} request failed: {}", action, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HrError::SheetsApi(format!(
                "{} failed ({}): {}",
                action, status, body
            )));
        }

        Ok(response)
    }
}

/// A1-notation sheet name: single-quoted, inner quotes doubled
fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

#[async_trait]
impl SheetsClient for GoogleSheetsClient {
    async fn worksheet_titles(&self) -> Result<Vec<String>> {
        let url = self.endpoint(&[self.spreadsheet_id.as_str()])?;
        let request = self
            .client
            .get(url)
            .query(&[("fields", "sheets.properties.title")]);
        let meta: SpreadsheetMeta = self
            .send(request, "Spreadsheet lookup")
            .await?
            .json()
            .await
            .map_err(|e| HrError::SheetsApi(format!("Failed to parse spreadsheet metadata: {}", e)))?;
        Ok(meta.titles())
    }

    async fn add_worksheet(&self, title: &str, rows: usize, columns: usize) -> Result<()> {
        let batch_update = format!("{}:batchUpdate", self.spreadsheet_id);
        let url = self.endpoint(&[batch_update.as_str()])?;
        let body = BatchUpdateRequest::add_sheet(title, rows, columns);
        self.send(self.client.post(url).json(&body), "Add worksheet")
            .await?;
        debug!("Added worksheet {} ({}x{})", title, rows, columns);
        Ok(())
    }

    async fn clear_worksheet(&self, title: &str) -> Result<()> {
        let url = self.values_endpoint(title, "", "clear")?;
        self.send(
            self.client.post(url).json(&serde_json::json!({})),
            "Clear worksheet",
        )
        .await?;
        debug!("Cleared worksheet {}", title);
        Ok(())
    }

    async fn write_rows(&self, title: &str, rows: &[Vec<String>]) -> Result<()> {
        // append inserts rows as needed, so the grid never limits the write
        let url = self.values_endpoint(title, "!A1", "append")?;
        let body = ValueRange {
            major_dimension: "ROWS",
            values: rows,
        };
        let request = self
            .client
            .post(url)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&body);
        self.send(request, "Write rows").await?;
        debug!("Wrote {} rows to {}", rows.len(), title);
        Ok(())
    }

    fn name(&self) -> &str {
        "google-sheets"
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct BatchUpdateRequest {
    requests: Vec<SheetRequest>,
}

impl BatchUpdateRequest {
    fn add_sheet(title: &str, rows: usize, columns: usize) -> Self {
        Self {
            requests: vec![SheetRequest {
                add_sheet: AddSheet {
                    properties: NewSheetProperties {
                        title: title.to_string(),
                        grid_properties: GridProperties {
                            row_count: rows,
                            column_count: columns,
                        },
                    },
                },
            }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SheetRequest {
    add_sheet: AddSheet,
}

#[derive(Debug, Serialize)]
struct AddSheet {
    properties: NewSheetProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewSheetProperties {
    title: String,
    grid_properties: GridProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GridProperties {
    row_count: usize,
    column_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange<'a> {
    major_dimension: &'static str,
    values: &'a [Vec<String>],
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

impl SpreadsheetMeta {
    fn titles(self) -> Vec<String> {
        self.sheets.into_iter().map(|s| s.properties.title).collect()
    }
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

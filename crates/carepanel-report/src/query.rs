//! Wire format of report queries and responses.

use serde::{Deserialize, Serialize};

use carepanel_core::types::{ReportFilter, ReportPage, ReportRow};

use crate::error::FetchError;

/// Body sent to the report endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery<'a> {
    /// Active filter; `{}` when unfiltered.
    pub filter: &'a ReportFilter,
    /// Zero-based page index.
    pub page_index: u64,
    /// Rows per page.
    pub page_size: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportResponse {
    rows: Vec<ReportRow>,
    total_count: u64,
}

/// Decode a successful response body into the page at `page_index`.
pub fn decode_page(body: serde_json::Value, page_index: u64) -> Result<ReportPage, FetchError> {
    let response: ReportResponse =
        serde_json::from_value(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(ReportPage {
        rows: response.rows,
        total_count: response.total_count,
        page_index,
    })
}

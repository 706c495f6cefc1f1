//! Productivity report configuration.

use serde::{Deserialize, Serialize};

/// Report query settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Path on the data API that answers paginated report queries.
    #[serde(default = "default_path")]
    pub path: String,
    /// Rows per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            page_size: default_page_size(),
        }
    }
}

fn default_path() -> String {
    "/reports/productivity/query".to_string()
}

fn default_page_size() -> u64 {
    10
}

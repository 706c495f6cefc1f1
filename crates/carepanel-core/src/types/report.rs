//! Productivity report rows and pages.

use serde::{Deserialize, Serialize};

/// One patient's aggregated visit counters for the reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// Patient identifier.
    pub patient_id: String,
    /// Patient display name.
    pub patient_name: String,
    /// City of residence.
    #[serde(default)]
    pub city: String,
    /// Health plan name.
    #[serde(default)]
    pub health_plan: String,
    /// In-clinic consultations.
    #[serde(default)]
    pub consultations: u64,
    /// Home visits.
    #[serde(default)]
    pub home_visits: u64,
    /// Procedures performed.
    #[serde(default)]
    pub procedures: u64,
    /// Follow-up visits.
    #[serde(default)]
    pub follow_ups: u64,
    /// Remote consultations.
    #[serde(default)]
    pub teleconsultations: u64,
}

impl ReportRow {
    /// Sum of all visit counters.
    pub fn total_visits(&self) -> u64 {
        self.consultations
            .saturating_add(self.home_visits)
            .saturating_add(self.procedures)
            .saturating_add(self.follow_ups)
            .saturating_add(self.teleconsultations)
    }
}

/// A point-in-time page of report rows.
///
/// Pages are replaced wholesale by the fetcher and never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    /// Rows on this page, in backend order.
    pub rows: Vec<ReportRow>,
    /// Total rows across all pages for the filter that produced this page.
    pub total_count: u64,
    /// Zero-based index this page corresponds to.
    pub page_index: u64,
}

impl ReportPage {
    /// An empty page at `page_index`.
    pub fn empty(page_index: u64) -> Self {
        Self {
            rows: Vec::new(),
            total_count: 0,
            page_index,
        }
    }

    /// Whether the backend reported no rows at all for the filter.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.total_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_decodes_camel_case_with_defaults() {
        let row: ReportRow = serde_json::from_value(serde_json::json!({
            "patientId": "p-1",
            "patientName": "Maria Souza",
            "healthPlan": "Unimed",
            "homeVisits": 3,
            "followUps": 1,
        }))
        .unwrap();
        assert_eq!(row.city, "");
        assert_eq!(row.home_visits, 3);
        assert_eq!(row.consultations, 0);
        assert_eq!(row.total_visits(), 4);
    }

    #[test]
    fn test_total_visits_saturates() {
        let row: ReportRow = serde_json::from_value(serde_json::json!({
            "patientId": "p-2",
            "patientName": "Joana Lima",
            "consultations": u64::MAX,
            "homeVisits": 1,
        }))
        .unwrap();
        assert_eq!(row.total_visits(), u64::MAX);
    }

    #[test]
    fn test_empty_page_requires_zero_total() {
        assert!(ReportPage::empty(0).is_empty());
        let past_end = ReportPage {
            rows: Vec::new(),
            total_count: 12,
            page_index: 5,
        };
        assert!(!past_end.is_empty());
    }
}

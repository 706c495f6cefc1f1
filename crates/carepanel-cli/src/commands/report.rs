//! Productivity report CLI command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use carepanel_core::config::AppConfig;
use carepanel_core::error::AppError;
use carepanel_core::types::{ReportFilter, ReportPage, ReportRow};
use carepanel_report::{FetchSnapshot, PaginationController, ReportFetcher};

use crate::output::{self, OutputFormat};

/// Arguments for the report command
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: u64,

    /// Reporting month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Clinician identifier
    #[arg(long)]
    pub clinician: Option<String>,
}

/// Report display row for table output
#[derive(Debug, Serialize, Tabled)]
struct PatientRow {
    #[tabled(rename = "Patient")]
    patient: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Plan")]
    plan: String,
    #[tabled(rename = "Consult.")]
    consultations: u64,
    #[tabled(rename = "Home")]
    home_visits: u64,
    #[tabled(rename = "Proc.")]
    procedures: u64,
    #[tabled(rename = "Follow-up")]
    follow_ups: u64,
    #[tabled(rename = "Tele")]
    teleconsultations: u64,
    #[tabled(rename = "Total")]
    total: u64,
}

impl From<&ReportRow> for PatientRow {
    fn from(row: &ReportRow) -> Self {
        Self {
            patient: row.patient_name.clone(),
            city: row.city.clone(),
            plan: row.health_plan.clone(),
            consultations: row.consultations,
            home_visits: row.home_visits,
            procedures: row.procedures,
            follow_ups: row.follow_ups,
            teleconsultations: row.teleconsultations,
            total: row.total_visits(),
        }
    }
}

/// JSON shape of a report page
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageOutput<'a> {
    page: &'a ReportPage,
    page_count: u64,
    empty: bool,
}

/// Execute the report command
pub async fn execute(
    args: &ReportArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let transport = super::create_transport(config)?;
    let fetcher = ReportFetcher::from_config(transport, &config.report);
    let mut controller = PaginationController::new(fetcher);

    let first = controller.set_filter(filter_from(args)).await;
    let mut failure = first.err();

    let requested = args.page.saturating_sub(1);
    if failure.is_none() && requested > 0 {
        if let Some(pending) = controller.go_to(requested) {
            failure = pending.await.err();
        }
        let landed = controller.state().page_index();
        if failure.is_none() && landed != requested {
            output::print_warning(&format!(
                "Page {} is out of range; showing page {}",
                args.page,
                landed + 1
            ));
        }
    }

    let snapshot = controller.fetcher().snapshot();
    render(&snapshot, controller.state().page_count(), format);

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn filter_from(args: &ReportArgs) -> ReportFilter {
    let mut filter = ReportFilter::new();
    if let Some(month) = &args.month {
        filter = filter.month(month.as_str());
    }
    if let Some(clinician) = &args.clinician {
        filter = filter.clinician(clinician.as_str());
    }
    filter
}

fn render(snapshot: &FetchSnapshot, page_count: u64, format: OutputFormat) {
    let page = snapshot.page_or_empty();

    if format == OutputFormat::Json {
        output::print_json(&PageOutput {
            page: &page,
            page_count,
            empty: snapshot.is_empty(),
        });
        return;
    }

    if let Some(e) = &snapshot.error {
        output::print_error(&format!("Could not load report: {e}"));
        if snapshot.page.is_none() {
            return;
        }
        output::print_warning("Showing the last page that loaded successfully");
    }

    if snapshot.is_empty() {
        println!("No rows match the current filter.");
        return;
    }

    let rows: Vec<PatientRow> = page.rows.iter().map(PatientRow::from).collect();
    output::print_rows(&rows, format, "No rows on this page.");
    println!(
        "Page {}/{} ({} patients)",
        page.page_index + 1,
        page_count.max(1),
        page.total_count
    );
}

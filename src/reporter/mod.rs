//! Output layer: structured report models and their renderers.
//!
//! Reports are built as plain serializable values first (the machine-readable
//! form), then rendered to text by one of the format renderers. Rendering is
//! all-or-nothing: the full string is produced before any byte is persisted.

pub mod csv;
pub mod json;
pub mod terminal;

use crate::aggregator::MonthlyView;
use crate::error::Result;
use crate::reconciler::{ActivityHistory, AuthorizationSet, ReconciliationResult};
use crate::store::ObservationStore;
use crate::types::MacAddress;
use chrono::NaiveDate;
use serde::Serialize;

pub use csv::CsvRenderer;
pub use json::JsonRenderer;
pub use terminal::TerminalRenderer;

/// One row of a monthly report, keyed by canonical MAC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRow {
    pub mac: MacAddress,
    pub ips: Vec<String>,
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
    pub days_seen: u32,
}

/// Structured monthly report for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub entries: Vec<MonthlyRow>,
}

impl MonthlyReport {
    /// Build from a folded view. Rows come out sorted by canonical MAC, so
    /// successive runs on unchanged input render byte-identically.
    pub fn from_view(year: i32, month: u32, view: &MonthlyView) -> Self {
        let entries = view
            .iter()
            .map(|(mac, presence)| MonthlyRow {
                mac: *mac,
                ips: presence.ips.iter().cloned().collect(),
                first_seen: presence.first_seen,
                last_seen: presence.last_seen,
                days_seen: presence.occurrences,
            })
            .collect();
        Self {
            year,
            month,
            entries,
        }
    }
}

/// One classified row of a comparison report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub mac: MacAddress,
    pub ips: Vec<String>,
    pub last_seen: Option<NaiveDate>,
}

/// Structured outcome of a reconciliation run, with counts for machine
/// consumption alongside the classified lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    pub observed_total: usize,
    pub authorized_total: usize,
    pub skipped_records: usize,
    pub unauthorized: Vec<ComparisonRow>,
    pub inactive: Vec<ComparisonRow>,
    pub newly_seen: Vec<ComparisonRow>,
}

impl ComparisonReport {
    /// Assemble the renderable report from a reconciliation result plus the
    /// inputs needed to resolve IPs and last-seen metadata.
    pub fn build(
        result: &ReconciliationResult,
        observed: &ObservationStore,
        authorized: &AuthorizationSet,
        history: Option<&ActivityHistory>,
    ) -> Self {
        let row = |mac: &MacAddress| ComparisonRow {
            mac: *mac,
            ips: observed
                .ips_for(mac)
                .map(|ips| ips.iter().cloned().collect())
                .unwrap_or_default(),
            last_seen: history.and_then(|h| h.last_seen(mac)),
        };

        Self {
            observed_total: observed.len(),
            authorized_total: authorized.len(),
            skipped_records: observed.skipped() + authorized.skipped(),
            unauthorized: result.unauthorized.iter().map(row).collect(),
            inactive: result.inactive.iter().map(row).collect(),
            newly_seen: result.newly_seen.iter().map(row).collect(),
        }
    }
}

/// A renderable report of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Monthly(MonthlyReport),
    Comparison(ComparisonReport),
}

/// Renders a structured report to text in one output format.
pub trait Renderer {
    fn render(&self, report: &Report) -> Result<String>;
}

//! `monthly-report`: fold a month of daily snapshots into one report.

use crate::aggregator::MonthlyView;
use crate::cli::ReportFormat;
use crate::config::Config;
use crate::error::{MacAuditError, Result};
use crate::reporter::{MonthlyReport, Report};
use crate::snapshot;
use chrono::{Datelike, NaiveDate};
use std::process::ExitCode;
use tracing::{error, info};

use super::renderer_for;

pub fn handle_monthly_report(
    config: &Config,
    month: Option<&str>,
    format: ReportFormat,
) -> ExitCode {
    match run(config, month, format) {
        Ok(code) => code,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, month: Option<&str>, format: ReportFormat) -> Result<ExitCode> {
    let (year, month) = match month {
        Some(raw) => parse_month(raw)?,
        None => previous_month(chrono::Local::now().date_naive()),
    };

    let stores = snapshot::load_month(&config.output.daily_dir, year, month)?;
    if stores.is_empty() {
        error!("no daily snapshots found for {year}-{month:02}");
        return Ok(ExitCode::FAILURE);
    }
    info!("folding {} daily snapshots for {year}-{month:02}", stores.len());

    let view = MonthlyView::fold(&stores)?;
    let report = Report::Monthly(MonthlyReport::from_view(year, month, &view));
    let text = renderer_for(format).render(&report)?;

    match format {
        ReportFormat::Csv => {
            let path = snapshot::monthly_report_path(&config.output.monthly_dir, year, month);
            snapshot::write_report(&path, &text)?;
            println!("wrote {}", path.display());
        }
        ReportFormat::Json | ReportFormat::Terminal => print!("{text}"),
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse a `YYYY-MM` month selector.
fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let date = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").map_err(|_| {
        MacAuditError::Config(format!("invalid month {raw:?}, expected YYYY-MM"))
    })?;
    Ok((date.year(), date.month()))
}

/// The calendar month before the one containing `today`.
fn previous_month(today: NaiveDate) -> (i32, u32) {
    if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    }
}

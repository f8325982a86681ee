//! `compare`: reconcile an observed snapshot against the authorized set.

use crate::aggregator::MonthlyView;
use crate::config::Config;
use crate::error::Result;
use crate::reconciler::{reconcile, ActivityHistory};
use crate::reporter::{ComparisonReport, Report};
use crate::snapshot;
use chrono::{Datelike, NaiveDate};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

use super::renderer_for;
use crate::cli::ReportFormat;

/// Options for one compare run, lifted straight off the CLI.
#[derive(Debug)]
pub struct CompareOpts {
    pub arp_file: PathBuf,
    pub ldap_file: Option<PathBuf>,
    pub previous: Option<PathBuf>,
    pub inactive_days: Option<u32>,
    pub output: Option<PathBuf>,
    pub format: ReportFormat,
}

pub fn handle_compare(config: &Config, opts: &CompareOpts) -> ExitCode {
    match run(config, opts) {
        Ok(code) => code,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, opts: &CompareOpts) -> Result<ExitCode> {
    let observed = snapshot::load_snapshot(&opts.arp_file)?;
    let ldap_path = opts
        .ldap_file
        .clone()
        .unwrap_or_else(|| config.output.ldap_output.clone());
    let authorized = snapshot::load_authorized(&ldap_path)?;

    let previous = match &opts.previous {
        Some(path) => Some(snapshot::load_snapshot(path)?),
        None => None,
    };

    let history = opts
        .inactive_days
        .and_then(|days| build_history(config, observed.date(), days));

    let result = reconcile(&observed, &authorized, previous.as_ref(), history.as_ref());
    info!(
        "compared {} observed against {} authorized: {} unauthorized, {} inactive, {} newly seen",
        observed.len(),
        authorized.len(),
        result.unauthorized.len(),
        result.inactive.len(),
        result.newly_seen.len()
    );

    let report = Report::Comparison(ComparisonReport::build(
        &result,
        &observed,
        &authorized,
        history.as_ref(),
    ));
    let text = renderer_for(opts.format).render(&report)?;

    match &opts.output {
        Some(path) => {
            snapshot::write_report(path, &text)?;
            println!("wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(ExitCode::SUCCESS)
}

/// Build an activity history from the current month's daily snapshots.
/// History is best-effort: a missing or unreadable daily directory degrades
/// the inactive check rather than failing the compare.
fn build_history(config: &Config, as_of: NaiveDate, window_days: u32) -> Option<ActivityHistory> {
    // A snapshot with no dated rows loads with a placeholder date; there is
    // no reference point to age the authorized set against.
    if as_of == NaiveDate::MIN {
        warn!("observed snapshot has no dated rows; skipping activity history");
        return None;
    }
    let stores = match snapshot::load_month(&config.output.daily_dir, as_of.year(), as_of.month()) {
        Ok(stores) => stores,
        Err(err) => {
            warn!("no activity history available: {err}");
            return None;
        }
    };
    match MonthlyView::fold(&stores) {
        Ok(view) => Some(ActivityHistory::from_view(&view, as_of, window_days)),
        Err(err) => {
            warn!("activity history skipped: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{date, mac, store};
    use tempfile::TempDir;

    #[test]
    fn test_build_history_rejects_placeholder_date() {
        let config = Config::default();
        assert!(build_history(&config, NaiveDate::MIN, 30).is_none());
    }

    #[test]
    fn test_build_history_from_daily_snapshots() {
        let dir = TempDir::new().unwrap();
        let day = store("2024-12-10", &[("10.0.0.5", "aa:bb:cc:00:00:01")]);
        snapshot::save_daily(&day, dir.path(), "20241210-0600").unwrap();

        let mut config = Config::default();
        config.output.daily_dir = dir.path().to_path_buf();

        let history = build_history(&config, date("2024-12-15"), 30).unwrap();
        assert_eq!(
            history.last_seen(&mac("aa:bb:cc:00:00:01")),
            Some(date("2024-12-10"))
        );
        assert!(!history.is_stale(&mac("aa:bb:cc:00:00:01")));
    }

    #[test]
    fn test_build_history_missing_dir_degrades_to_none() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.output.daily_dir = dir.path().join("nope");
        assert!(build_history(&config, date("2024-12-15"), 30).is_none());
    }
}

//! Snapshot persistence: dated daily CSVs and monthly report files.
//!
//! Daily snapshots are named `mac_addresses_<YYYYMMDD-HHMM>.csv` and carry
//! `IP,MAC,Date` rows; the monthly report for a month lands in
//! `Result<YYYYMM>.csv`. A snapshot is never mutated after being written; the
//! next collection run supersedes it with a new file.

use crate::error::{MacAuditError, Result};
use crate::parser::parse_snapshot_csv;
use crate::reconciler::AuthorizationSet;
use crate::store::ObservationStore;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const DAILY_PREFIX: &str = "mac_addresses_";

/// Persist a daily snapshot. `stamp` is the collection timestamp in
/// `YYYYMMDD-HHMM` form, supplied by the caller so the core itself stays
/// clock-free.
pub fn save_daily(store: &ObservationStore, dir: &Path, stamp: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| MacAuditError::Write {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut content = String::from("IP,MAC,Date\n");
    for (mac, sources) in store.iter() {
        for source in sources {
            content.push_str(&format!("{},{},{}\n", source, mac, store.date()));
        }
    }

    let path = dir.join(format!("{DAILY_PREFIX}{stamp}.csv"));
    fs::write(&path, content).map_err(|e| MacAuditError::Write {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(path)
}

/// Load one snapshot file into per-date stores (rows are grouped by their
/// date column, so a file never spans stores). Also returns the number of
/// records the parser skipped.
fn load_file(path: &Path) -> Result<(BTreeMap<NaiveDate, ObservationStore>, usize)> {
    let content = fs::read_to_string(path).map_err(|e| MacAuditError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    let parsed = parse_snapshot_csv(&content);
    if parsed.skipped > 0 {
        tracing::warn!(
            "{}: {} records skipped",
            path.display(),
            parsed.skipped
        );
    }

    let mut stores: BTreeMap<NaiveDate, ObservationStore> = BTreeMap::new();
    for obs in parsed.rows {
        stores
            .entry(obs.date)
            .or_insert_with(|| ObservationStore::new(obs.date))
            .insert(obs.mac, obs.source);
    }
    Ok((stores, parsed.skipped))
}

/// Load one snapshot file into a single store, merging across row dates.
/// The store is dated to its newest row; an empty file yields an empty
/// store with a placeholder date.
pub fn load_snapshot(path: &Path) -> Result<ObservationStore> {
    let (by_date, skipped) = load_file(path)?;
    let latest = by_date
        .keys()
        .next_back()
        .copied()
        .unwrap_or(NaiveDate::MIN);
    let mut merged = ObservationStore::new(latest);
    for (_, store) in by_date {
        merged.merge(store);
    }
    merged.note_skipped(skipped);
    Ok(merged)
}

/// Load every daily snapshot for a calendar month, merged by date and sorted
/// oldest-first, ready for [`MonthlyView::fold`](crate::MonthlyView::fold).
///
/// Two collection runs on the same day merge into one store rather than
/// producing a duplicate date. Days with no snapshot simply do not appear.
pub fn load_month(dir: &Path, year: i32, month: u32) -> Result<Vec<(NaiveDate, ObservationStore)>> {
    let prefix = format!("{DAILY_PREFIX}{year}{month:02}");
    let entries = fs::read_dir(dir).map_err(|e| MacAuditError::Read {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(&prefix) && n.ends_with(".csv"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    let mut by_date: BTreeMap<NaiveDate, ObservationStore> = BTreeMap::new();
    for path in &files {
        let (stores, _skipped) = load_file(path)?;
        for (date, store) in stores {
            match by_date.get_mut(&date) {
                Some(existing) => existing.merge(store),
                None => {
                    by_date.insert(date, store);
                }
            }
        }
    }

    Ok(by_date.into_iter().collect())
}

/// Path of the monthly report file for a given month.
pub fn monthly_report_path(dir: &Path, year: i32, month: u32) -> PathBuf {
    dir.join(format!("Result{year}{month:02}.csv"))
}

/// Write rendered report text. The text is complete before this call, so a
/// failure leaves either the old file or an error, never a half-written
/// report presented as valid.
pub fn write_report(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| MacAuditError::Write {
            path: parent.display().to_string(),
            source: e,
        })?;
    }
    fs::write(path, text).map_err(|e| MacAuditError::Write {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load an authorized-MAC list file (one token per line).
pub fn load_authorized(path: &Path) -> Result<AuthorizationSet> {
    let content = fs::read_to_string(path).map_err(|e| MacAuditError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(crate::parser::parse_auth_list(&content))
}

/// Persist an authorization set, one canonical MAC per line.
pub fn save_authorized(set: &AuthorizationSet, path: &Path) -> Result<()> {
    let mut content = String::new();
    for mac in set.iter() {
        content.push_str(&format!("{mac}\n"));
    }
    write_report(path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::MonthlyView;
    use crate::test_utils::fixtures::{date, mac, store};
    use tempfile::TempDir;

    #[test]
    fn test_save_and_reload_daily_snapshot() {
        let dir = TempDir::new().unwrap();
        let original = store(
            "2024-12-01",
            &[
                ("10.0.0.5", "aa:bb:cc:00:00:01"),
                ("10.0.0.9", "aa:bb:cc:00:00:02"),
            ],
        );

        let path = save_daily(&original, dir.path(), "20241201-0600").unwrap();
        assert!(path.ends_with("mac_addresses_20241201-0600.csv"));

        let loaded = load_month(dir.path(), 2024, 12).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].0, date("2024-12-01"));
        assert_eq!(loaded[0].1.mac_set(), original.mac_set());
    }

    #[test]
    fn test_load_month_merges_same_day_runs() {
        let dir = TempDir::new().unwrap();
        let morning = store("2024-12-01", &[("10.0.0.5", "aa:bb:cc:00:00:01")]);
        let evening = store("2024-12-01", &[("10.0.0.9", "aa:bb:cc:00:00:02")]);
        save_daily(&morning, dir.path(), "20241201-0600").unwrap();
        save_daily(&evening, dir.path(), "20241201-1800").unwrap();

        let loaded = load_month(dir.path(), 2024, 12).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].1.len(), 2);

        // Merged same-day runs fold cleanly instead of tripping the
        // duplicate-date check.
        let view = MonthlyView::fold(&loaded).unwrap();
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_load_month_ignores_other_months() {
        let dir = TempDir::new().unwrap();
        let november = store("2024-11-30", &[("10.0.0.5", "aa:bb:cc:00:00:01")]);
        let december = store("2024-12-01", &[("10.0.0.9", "aa:bb:cc:00:00:02")]);
        save_daily(&november, dir.path(), "20241130-0600").unwrap();
        save_daily(&december, dir.path(), "20241201-0600").unwrap();

        let loaded = load_month(dir.path(), 2024, 12).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].1.contains(&mac("aa:bb:cc:00:00:02")));
    }

    #[test]
    fn test_load_month_missing_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = load_month(&missing, 2024, 12).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_monthly_report_path_layout() {
        let path = monthly_report_path(Path::new("/out"), 2024, 3);
        assert_eq!(path, PathBuf::from("/out/Result202403.csv"));
    }

    #[test]
    fn test_load_snapshot_merges_rows_and_counts_skips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("arp.csv");
        std::fs::write(
            &path,
            "IP,MAC,Date\n\
             10.0.0.5,aa:bb:cc:00:00:01,2024-12-01\n\
             10.0.0.6,broken,2024-12-01\n\
             10.0.0.7,aa:bb:cc:00:00:02,2024-12-02\n",
        )
        .unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.date(), date("2024-12-02"));
        assert_eq!(loaded.skipped(), 1);
    }

    #[test]
    fn test_authorized_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ldap_mac.txt");
        let set = crate::parser::parse_auth_list("aa:bb:cc:00:00:01\naa:bb:cc:00:00:02\n");

        save_authorized(&set, &path).unwrap();
        let loaded = load_authorized(&path).unwrap();
        assert_eq!(loaded, set);
    }
}

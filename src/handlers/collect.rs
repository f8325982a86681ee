//! `collect-arp`: gather ARP tables over SNMP and persist a daily snapshot.

use crate::collectors::SnmpCollector;
use crate::config::Config;
use crate::error::{MacAuditError, Result};
use crate::snapshot;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};

pub fn handle_collect_arp(config: &Config, device_file: Option<&Path>) -> ExitCode {
    match run(config, device_file) {
        Ok(code) => code,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, device_file: Option<&Path>) -> Result<ExitCode> {
    let device_ips = match device_file {
        Some(path) => read_device_list(path)?,
        None => config.snmp.device_ips.clone(),
    };
    if device_ips.is_empty() {
        error!("no device IPs configured; set snmp.device_ips or pass --device-file");
        return Ok(ExitCode::FAILURE);
    }

    info!("scanning {} devices", device_ips.len());
    let collector = SnmpCollector::new(config.snmp.communities.clone(), &config.snmp.oid)?;

    let now = chrono::Local::now();
    let store = collector.collect(&device_ips, now.date_naive());

    if store.is_empty() {
        warn!("no records collected");
        return Ok(ExitCode::SUCCESS);
    }

    let stamp = now.format("%Y%m%d-%H%M").to_string();
    let path = snapshot::save_daily(&store, &config.output.daily_dir, &stamp)?;
    info!("collected {} unique MACs", store.len());
    println!("wrote {}", path.display());
    Ok(ExitCode::SUCCESS)
}

/// Read a device IP list: one per line, `#` comments and blanks ignored.
fn read_device_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| MacAuditError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_device_list_skips_comments_and_blanks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("devices.txt");
        fs::write(&path, "# core switches\n172.16.0.1\n\n172.16.0.2\n").unwrap();

        let ips = read_device_list(&path).unwrap();
        assert_eq!(ips, vec!["172.16.0.1", "172.16.0.2"]);
    }

    #[test]
    fn test_read_device_list_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(read_device_list(&dir.path().join("nope.txt")).is_err());
    }
}

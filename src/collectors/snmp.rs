//! SNMP ARP-table collector.
//!
//! Shells out to `snmpwalk` against the `ipNetToMediaPhysAddress` table of
//! each device, trying the configured community strings in order. One
//! unreachable device never aborts the run; it is logged and the remaining
//! devices are still collected.

use crate::error::Result;
use crate::store::ObservationStore;
use crate::types::MacAddress;
use chrono::NaiveDate;
use regex::Regex;
use std::process::Command;

/// ARP table OID (ipNetToMediaPhysAddress).
pub const DEFAULT_ARP_OID: &str = "1.3.6.1.2.1.4.22.1.2";

pub struct SnmpCollector {
    communities: Vec<String>,
    oid: String,
    row_pattern: Regex,
}

impl SnmpCollector {
    pub fn new(communities: Vec<String>, oid: impl Into<String>) -> Result<Self> {
        // Matches rows like:
        //   iso.3.6.1.2.1.4.22.1.2.3.192.168.1.5 = Hex-STRING: AA BB CC DD EE FF
        let row_pattern = Regex::new(
            r"(?i)iso\.3\.6\.1\.2\.1\.4\.22\.1\.2\.\d+\.(\d+\.\d+\.\d+\.\d+)\s*=\s*Hex-STRING:\s*((?:[0-9A-F]{2}\s+){5}[0-9A-F]{2})",
        )?;
        Ok(Self {
            communities,
            oid: oid.into(),
            row_pattern,
        })
    }

    /// Walk one device, trying each community in order. Returns the first
    /// non-empty output, or `None` when every community fails.
    fn walk(&self, device_ip: &str) -> Option<String> {
        for community in &self.communities {
            let output = Command::new("snmpwalk")
                .args(["-v", "2c", "-c", community, device_ip, &self.oid])
                .output();
            match output {
                Ok(out) if !out.stdout.is_empty() => {
                    tracing::debug!("{device_ip}: community '{community}' answered");
                    return Some(String::from_utf8_lossy(&out.stdout).into_owned());
                }
                Ok(_) => {
                    tracing::debug!("{device_ip}: community '{community}' gave no data");
                }
                Err(err) => {
                    tracing::error!("{device_ip}: failed to run snmpwalk: {err}");
                }
            }
        }
        tracing::warn!("{device_ip}: no community returned data");
        None
    }

    /// Extract `(ip, mac)` pairs from snmpwalk output, dropping all-zero
    /// placeholder entries.
    pub fn parse_walk(&self, output: &str) -> Vec<(String, MacAddress)> {
        self.row_pattern
            .captures_iter(output)
            .filter_map(|caps| {
                let ip = caps.get(1)?.as_str().to_string();
                let mac = MacAddress::parse(caps.get(2)?.as_str()).ok()?;
                (!mac.is_zero()).then_some((ip, mac))
            })
            .collect()
    }

    /// Collect the ARP tables of every device into one dated store.
    pub fn collect(&self, device_ips: &[String], date: NaiveDate) -> ObservationStore {
        let mut store = ObservationStore::new(date);
        for device_ip in device_ips {
            tracing::info!("scanning device {device_ip}");
            let Some(output) = self.walk(device_ip) else {
                continue;
            };
            let records = self.parse_walk(&output);
            tracing::info!("{device_ip}: {} ip-mac entries", records.len());
            for (ip, mac) in records {
                store.insert(mac, ip);
            }
        }
        store
    }
}

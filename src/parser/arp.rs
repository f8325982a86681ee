//! Raw ARP line and daily snapshot CSV parsing.

use crate::error::{MacAuditError, Result};
use crate::store::Observation;
use crate::types::MacAddress;
use chrono::NaiveDate;

/// Parse one raw ARP collector line into an `(ip, mac)` pair.
///
/// The expected shape is `<ip> <mac-token>` with whitespace or comma
/// separation; a trailing `# comment` is stripped before the MAC token is
/// normalized. Tokens whose hex digits are space-grouped (as some devices
/// emit them) are handled by joining everything after the IP field.
pub fn parse_arp_line(line: &str) -> Result<(String, MacAddress)> {
    let payload = match line.split_once('#') {
        Some((head, _comment)) => head,
        None => line,
    };
    let fields: Vec<&str> = payload
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();

    if fields.len() < 2 {
        return Err(MacAuditError::Malformed {
            token: line.to_string(),
            reason: "expected '<ip> <mac>' fields",
        });
    }

    let ip = fields[0].to_string();
    let mac = MacAddress::parse(&fields[1..].join(" "))?;
    Ok((ip, mac))
}

/// Observations recovered from one snapshot file, plus the skip tally.
#[derive(Debug, Default)]
pub struct SnapshotRows {
    /// Validated observations in file order.
    pub rows: Vec<Observation>,
    /// Records dropped for malformed MACs, bad dates, or short rows.
    pub skipped: usize,
}

/// Parse a persisted daily snapshot CSV (`IP,MAC,Date` with optional header).
///
/// Short rows, malformed MACs, unparseable dates, and all-zero placeholder
/// MACs are skipped and counted; a handful of bad lines never fails the
/// whole file.
pub fn parse_snapshot_csv(content: &str) -> SnapshotRows {
    let mut out = SnapshotRows::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 3 {
            out.skipped += 1;
            continue;
        }
        if fields[0].eq_ignore_ascii_case("ip") {
            // Header row.
            continue;
        }

        let mac = match MacAddress::parse(fields[1]) {
            Ok(mac) => mac,
            Err(err) => {
                tracing::debug!("skipping snapshot row: {err}");
                out.skipped += 1;
                continue;
            }
        };
        if mac.is_zero() {
            out.skipped += 1;
            continue;
        }
        let date = match NaiveDate::parse_from_str(fields[2], "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                tracing::warn!("invalid date in snapshot row: {}", fields[2]);
                out.skipped += 1;
                continue;
            }
        };

        out.rows.push(Observation {
            mac,
            source: fields[0].to_string(),
            date,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{date, mac};

    #[test]
    fn test_raw_line_with_trailing_comment() {
        let (ip, parsed) =
            parse_arp_line("192.168.1.5  aa-bb-cc-dd-ee-ff # printer-room").unwrap();
        assert_eq!(ip, "192.168.1.5");
        assert_eq!(parsed, mac("aa:bb:cc:dd:ee:ff"));
    }

    #[test]
    fn test_parse_arp_line_comma_separated() {
        let (ip, parsed) = parse_arp_line("10.0.0.9,AA:BB:CC:00:00:03").unwrap();
        assert_eq!(ip, "10.0.0.9");
        assert_eq!(parsed, mac("aa:bb:cc:00:00:03"));
    }

    #[test]
    fn test_parse_arp_line_space_grouped_hex() {
        let (ip, parsed) = parse_arp_line("10.0.0.9  AA BB CC 00 00 03").unwrap();
        assert_eq!(ip, "10.0.0.9");
        assert_eq!(parsed, mac("aa:bb:cc:00:00:03"));
    }

    #[test]
    fn test_parse_arp_line_missing_mac() {
        assert!(parse_arp_line("10.0.0.9").is_err());
        assert!(parse_arp_line("").is_err());
        assert!(parse_arp_line("# only a comment").is_err());
    }

    #[test]
    fn test_parse_snapshot_csv_skips_header_and_zero_macs() {
        let content = "\
IP,MAC,Date
10.0.0.5,aa:bb:cc:00:00:01,2024-12-01
10.0.0.6,00:00:00:00:00:00,2024-12-01
10.0.0.7,aa:bb:cc:00:00:02,2024-12-01
";
        let parsed = parse_snapshot_csv(content);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.rows[0].date, date("2024-12-01"));
        assert_eq!(parsed.rows[0].source, "10.0.0.5");
        assert_eq!(parsed.rows[0].mac, mac("aa:bb:cc:00:00:01"));
    }

    #[test]
    fn test_parse_snapshot_csv_partial_success() {
        let content = "\
10.0.0.5,aa:bb:cc:00:00:01,2024-12-01
10.0.0.6,broken-mac,2024-12-01
10.0.0.7,aa:bb:cc:00:00:02,not-a-date
short-row
10.0.0.8,aa:bb:cc:00:00:03,2024-12-02
";
        let parsed = parse_snapshot_csv(content);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.skipped, 3);
    }

    #[test]
    fn test_parse_snapshot_csv_empty_input() {
        let parsed = parse_snapshot_csv("");
        assert!(parsed.rows.is_empty());
        assert_eq!(parsed.skipped, 0);
    }
}

//! Parsing boundary for collector output.
//!
//! Everything arriving from the outside world (raw ARP lines, persisted
//! daily snapshot CSVs, authorized-MAC lists) is parsed here, so malformed
//! data cannot propagate past this layer.

mod arp;
mod auth;

pub use arp::{parse_arp_line, parse_snapshot_csv, SnapshotRows};
pub use auth::parse_auth_list;

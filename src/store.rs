//! Observation store: one collection run's deduplicated view.
//!
//! An [`ObservationStore`] maps each normalized MAC to the set of IPs or
//! device identifiers it was seen on during a single dated collection run.
//! Repeated observations of the same MAC union their IP sets; records whose
//! MAC token fails normalization are skipped and counted rather than failing
//! the run, so a handful of bad lines from one device never discards the rest
//! of a collection.

use crate::types::MacAddress;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// One validated observation: a MAC seen on a source at a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub mac: MacAddress,
    pub source: String,
    pub date: NaiveDate,
}

/// Deduplicated MAC-to-sources mapping for a single collection date.
///
/// Keys iterate in canonical MAC order, so every derived output is
/// deterministic for a given input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationStore {
    date: NaiveDate,
    entries: BTreeMap<MacAddress, BTreeSet<String>>,
    skipped: usize,
}

impl ObservationStore {
    /// Create an empty store for the given collection date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entries: BTreeMap::new(),
            skipped: 0,
        }
    }

    /// Build a store from raw `(source, mac_token)` records.
    ///
    /// Tokens are normalized through [`MacAddress::parse`]; malformed records
    /// are skipped and tallied in [`skipped`](Self::skipped).
    pub fn build<I, S, T>(date: NaiveDate, records: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: AsRef<str>,
    {
        let mut store = Self::new(date);
        for (source, token) in records {
            match MacAddress::parse(token.as_ref()) {
                Ok(mac) => store.insert(mac, source.into()),
                Err(err) => {
                    tracing::debug!("skipping record: {err}");
                    store.skipped += 1;
                }
            }
        }
        store
    }

    /// Record an already-validated MAC/source pair.
    pub fn insert(&mut self, mac: MacAddress, source: String) {
        self.entries.entry(mac).or_default().insert(source);
    }

    /// Merge every entry of `other` into this store. Skipped counts add up.
    pub fn merge(&mut self, other: ObservationStore) {
        for (mac, sources) in other.entries {
            self.entries.entry(mac).or_default().extend(sources);
        }
        self.skipped += other.skipped;
    }

    /// The collection date this store belongs to.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The set of distinct MACs observed.
    pub fn mac_set(&self) -> BTreeSet<MacAddress> {
        self.entries.keys().copied().collect()
    }

    /// The sources a MAC was seen on, if it was observed at all.
    pub fn ips_for(&self, mac: &MacAddress) -> Option<&BTreeSet<String>> {
        self.entries.get(mac)
    }

    /// Whether the MAC was observed in this run.
    pub fn contains(&self, mac: &MacAddress) -> bool {
        self.entries.contains_key(mac)
    }

    /// Iterate entries in canonical MAC order.
    pub fn iter(&self) -> impl Iterator<Item = (&MacAddress, &BTreeSet<String>)> {
        self.entries.iter()
    }

    /// Number of distinct MACs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// An empty store is valid (for example, a device outage yields zero
    /// rows) and never an error.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records skipped because their MAC token was malformed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Add records skipped upstream (for example by a snapshot parser) to
    /// this store's tally.
    pub fn note_skipped(&mut self, count: usize) {
        self.skipped += count;
    }
}

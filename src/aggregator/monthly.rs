//! Monthly fold over daily observation stores.

use crate::error::{MacAuditError, Result};
use crate::store::ObservationStore;
use crate::types::MacAddress;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Per-MAC presence summary accumulated over one aggregation period.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MacPresence {
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
    /// Number of distinct days the MAC appeared on, regardless of how many
    /// rows it produced within any single day.
    pub occurrences: u32,
    pub ips: BTreeSet<String>,
}

/// Deduplicated monthly view keyed by canonical MAC.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonthlyView {
    entries: BTreeMap<MacAddress, MacPresence>,
}

impl MonthlyView {
    /// Fold an ordered sequence of `(date, store)` pairs into a monthly view.
    ///
    /// The input is expected sorted oldest-first. Out-of-order dates are
    /// tolerated: first/last-seen are min/max guarded so they never regress.
    /// A duplicate date aborts the fold with
    /// [`MacAuditError::InconsistentSequence`], since silently aggregating
    /// the same day twice would corrupt the occurrence counts.
    pub fn fold(stores: &[(NaiveDate, ObservationStore)]) -> Result<Self> {
        let mut seen_dates: BTreeSet<NaiveDate> = BTreeSet::new();
        let mut previous: Option<NaiveDate> = None;
        let mut entries: BTreeMap<MacAddress, MacPresence> = BTreeMap::new();

        for (date, store) in stores {
            if !seen_dates.insert(*date) {
                return Err(MacAuditError::InconsistentSequence { date: *date });
            }
            if let Some(prev) = previous {
                if *date < prev {
                    tracing::warn!("snapshot dates out of order: {date} after {prev}");
                }
            }
            previous = Some(*date);

            for (mac, sources) in store.iter() {
                match entries.get_mut(mac) {
                    Some(presence) => {
                        presence.first_seen = presence.first_seen.min(*date);
                        presence.last_seen = presence.last_seen.max(*date);
                        presence.occurrences += 1;
                        presence.ips.extend(sources.iter().cloned());
                    }
                    None => {
                        entries.insert(
                            *mac,
                            MacPresence {
                                first_seen: *date,
                                last_seen: *date,
                                occurrences: 1,
                                ips: sources.clone(),
                            },
                        );
                    }
                }
            }
        }

        Ok(Self { entries })
    }

    /// Presence summary for a MAC, if it appeared during the period.
    pub fn get(&self, mac: &MacAddress) -> Option<&MacPresence> {
        self.entries.get(mac)
    }

    /// The set of distinct MACs seen during the period.
    pub fn mac_set(&self) -> BTreeSet<MacAddress> {
        self.entries.keys().copied().collect()
    }

    /// Iterate entries in canonical MAC order.
    pub fn iter(&self) -> impl Iterator<Item = (&MacAddress, &MacPresence)> {
        self.entries.iter()
    }

    /// Number of distinct MACs in the view.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

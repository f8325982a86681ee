//! Reconciliation of observed MACs against the authorization directory.
//!
//! Pure set comparison over already-materialized values: no IO, no clock.
//! The result owns its three classified sets and keeps no reference back
//! into its inputs.

use crate::aggregator::MonthlyView;
use crate::store::ObservationStore;
use crate::types::MacAddress;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// The normalized set of authorized MACs, as produced by the directory query.
///
/// A point-in-time snapshot; the core keeps no authorization history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationSet {
    macs: BTreeSet<MacAddress>,
    skipped: usize,
}

impl AuthorizationSet {
    /// Build from raw directory tokens, normalizing each through the MAC
    /// parser. Malformed entries are skipped and counted.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut macs = BTreeSet::new();
        let mut skipped = 0usize;
        for token in tokens {
            match MacAddress::parse(token.as_ref()) {
                Ok(mac) => {
                    macs.insert(mac);
                }
                Err(err) => {
                    tracing::debug!("skipping directory entry: {err}");
                    skipped += 1;
                }
            }
        }
        Self { macs, skipped }
    }

    pub fn contains(&self, mac: &MacAddress) -> bool {
        self.macs.contains(mac)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MacAddress> {
        self.macs.iter()
    }

    pub fn mac_set(&self) -> &BTreeSet<MacAddress> {
        &self.macs
    }

    pub fn len(&self) -> usize {
        self.macs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macs.is_empty()
    }

    /// Number of tokens dropped during normalization.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Externally-supplied activity history used to age the Inactive set.
///
/// Carries each MAC's last observed date, the reference date of the check,
/// and the lookback window in days. The window is an explicit caller
/// decision, never a hidden default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityHistory {
    last_seen: BTreeMap<MacAddress, NaiveDate>,
    as_of: NaiveDate,
    window_days: u32,
}

impl ActivityHistory {
    pub fn new(as_of: NaiveDate, window_days: u32) -> Self {
        Self {
            last_seen: BTreeMap::new(),
            as_of,
            window_days,
        }
    }

    /// Record an observation date for a MAC, keeping the most recent.
    pub fn record(&mut self, mac: MacAddress, date: NaiveDate) {
        self.last_seen
            .entry(mac)
            .and_modify(|d| *d = (*d).max(date))
            .or_insert(date);
    }

    /// Derive a history from a folded monthly view.
    pub fn from_view(view: &MonthlyView, as_of: NaiveDate, window_days: u32) -> Self {
        let mut history = Self::new(as_of, window_days);
        for (mac, presence) in view.iter() {
            history.record(*mac, presence.last_seen);
        }
        history
    }

    pub fn last_seen(&self, mac: &MacAddress) -> Option<NaiveDate> {
        self.last_seen.get(mac).copied()
    }

    /// Whether a MAC's last observed date falls outside the lookback window.
    /// A MAC with no recorded activity at all is stale.
    pub fn is_stale(&self, mac: &MacAddress) -> bool {
        match self.last_seen.get(mac) {
            Some(date) => self.as_of - *date > Duration::days(i64::from(self.window_days)),
            None => true,
        }
    }
}

/// Classified outcome of one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    /// Observed on the network but absent from the authorization directory.
    pub unauthorized: BTreeSet<MacAddress>,
    /// Authorized but not observed (aged by history when one was supplied).
    pub inactive: BTreeSet<MacAddress>,
    /// Observed now but not in the previous period's store.
    pub newly_seen: BTreeSet<MacAddress>,
}

/// Compare an observed store against the authorized set.
///
/// With no `previous` store, everything observed is newly seen (first-run
/// behavior, by design). With no `history`, Inactive means "authorized but
/// currently absent" without an activity-age guarantee; supplying a history
/// restricts it to MACs stale beyond the caller's lookback window.
pub fn reconcile(
    observed: &ObservationStore,
    authorized: &AuthorizationSet,
    previous: Option<&ObservationStore>,
    history: Option<&ActivityHistory>,
) -> ReconciliationResult {
    let observed_macs = observed.mac_set();

    let unauthorized: BTreeSet<MacAddress> = observed_macs
        .iter()
        .filter(|mac| !authorized.contains(mac))
        .copied()
        .collect();

    let newly_seen: BTreeSet<MacAddress> = match previous {
        Some(prev) => observed_macs
            .iter()
            .filter(|mac| !prev.contains(mac))
            .copied()
            .collect(),
        None => observed_macs.clone(),
    };

    let inactive: BTreeSet<MacAddress> = authorized
        .iter()
        .filter(|mac| !observed_macs.contains(mac))
        .filter(|mac| history.map_or(true, |h| h.is_stale(mac)))
        .copied()
        .collect();

    ReconciliationResult {
        unauthorized,
        inactive,
        newly_seen,
    }
}

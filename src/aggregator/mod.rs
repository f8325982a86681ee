//! Aggregation layer.
//!
//! Folds a month's worth of daily observation stores into a single
//! deduplicated [`MonthlyView`] with first-seen/last-seen tracking and
//! per-MAC occurrence counts.

mod monthly;

pub use monthly::{MacPresence, MonthlyView};

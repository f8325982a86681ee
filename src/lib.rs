pub mod aggregator;
pub mod cli;
pub mod collectors;
pub mod config;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod reconciler;
pub mod reporter;
pub mod snapshot;
pub mod store;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use aggregator::{MacPresence, MonthlyView};
pub use cli::{Cli, Command, ReportFormat};
pub use config::Config;
pub use error::{MacAuditError, Result};
pub use reconciler::{reconcile, ActivityHistory, AuthorizationSet, ReconciliationResult};
pub use reporter::{
    ComparisonReport, CsvRenderer, JsonRenderer, MonthlyReport, Renderer, Report,
    TerminalRenderer,
};
pub use store::{Observation, ObservationStore};
pub use types::MacAddress;

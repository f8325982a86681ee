//! Command handlers: wire the core engine, collectors, and snapshot IO
//! together and map errors to exit codes.

mod collect;
mod compare;
mod ldap;
mod monthly;

pub use collect::handle_collect_arp;
pub use compare::{handle_compare, CompareOpts};
pub use ldap::handle_query_ldap;
pub use monthly::handle_monthly_report;

use crate::cli::ReportFormat;
use crate::reporter::{CsvRenderer, JsonRenderer, Renderer, TerminalRenderer};

/// Pick the renderer for a CLI-selected format.
pub(crate) fn renderer_for(format: ReportFormat) -> Box<dyn Renderer> {
    match format {
        ReportFormat::Terminal => Box::new(TerminalRenderer::new()),
        ReportFormat::Csv => Box::new(CsvRenderer::new()),
        ReportFormat::Json => Box::new(JsonRenderer::new()),
    }
}

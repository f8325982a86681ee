//! Human-readable terminal rendering with colored section headers.

use crate::error::Result;
use crate::reporter::{ComparisonReport, ComparisonRow, MonthlyReport, Renderer, Report};
use colored::Colorize;

pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }

    fn monthly(report: &MonthlyReport) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{}\n",
            format!(
                "━━━ Monthly report {}/{:02} ━━━",
                report.year, report.month
            )
            .bold()
        ));
        out.push_str(&format!("Unique MACs: {}\n\n", report.entries.len()));
        for row in &report.entries {
            out.push_str(&format!(
                "  {}  seen {}..{} on {} day(s)  [{}]\n",
                row.mac,
                row.first_seen,
                row.last_seen,
                row.days_seen,
                row.ips.join("; ")
            ));
        }
        out
    }

    fn comparison(report: &ComparisonReport) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "━━━ Comparison result ━━━".bold()));
        out.push_str(&format!("Active on network:  {}\n", report.observed_total));
        out.push_str(&format!("Authorized entries: {}\n", report.authorized_total));
        if report.skipped_records > 0 {
            out.push_str(&format!(
                "{}\n",
                format!("{} records skipped", report.skipped_records).yellow()
            ));
        }
        out.push('\n');

        Self::section(
            &mut out,
            &format!("Unauthorized but active ({})", report.unauthorized.len()),
            &report.unauthorized,
            |s| s.red().bold().to_string(),
        );
        Self::section(
            &mut out,
            &format!("Authorized but inactive ({})", report.inactive.len()),
            &report.inactive,
            |s| s.yellow().bold().to_string(),
        );
        Self::section(
            &mut out,
            &format!("Newly seen ({})", report.newly_seen.len()),
            &report.newly_seen,
            |s| s.green().bold().to_string(),
        );

        out
    }

    fn section(
        out: &mut String,
        title: &str,
        rows: &[ComparisonRow],
        style: impl Fn(&str) -> String,
    ) {
        out.push_str(&format!("{}\n", style(title)));
        for row in rows {
            let mut line = format!("  {}", row.mac);
            if !row.ips.is_empty() {
                line.push_str(&format!("  [{}]", row.ips.join("; ")));
            }
            if let Some(last_seen) = row.last_seen {
                line.push_str(&format!("  last seen {last_seen}"));
            }
            line.push('\n');
            out.push_str(&line);
        }
        out.push('\n');
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        Ok(match report {
            Report::Monthly(monthly) => Self::monthly(monthly),
            Report::Comparison(comparison) => Self::comparison(comparison),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::MonthlyView;
    use crate::reconciler::{reconcile, AuthorizationSet};
    use crate::reporter::ComparisonReport;
    use crate::test_utils::fixtures::{date, store};

    #[test]
    fn test_terminal_comparison_sections_and_counts() {
        let observed = store(
            "2024-12-15",
            &[
                ("10.0.0.5", "aa:bb:cc:00:00:02"),
                ("10.0.0.9", "aa:bb:cc:00:00:03"),
            ],
        );
        let authorized =
            AuthorizationSet::from_tokens(["aa:bb:cc:00:00:01", "aa:bb:cc:00:00:02"]);
        let result = reconcile(&observed, &authorized, None, None);
        let report = Report::Comparison(ComparisonReport::build(
            &result,
            &observed,
            &authorized,
            None,
        ));

        let text = TerminalRenderer::new().render(&report).unwrap();
        assert!(text.contains("Comparison result"));
        assert!(text.contains("Active on network:  2"));
        assert!(text.contains("Unauthorized but active (1)"));
        assert!(text.contains("Authorized but inactive (1)"));
        assert!(text.contains("Newly seen (2)"));
        assert!(text.contains("aa:bb:cc:00:00:03"));
    }

    #[test]
    fn test_terminal_monthly_summary() {
        let stores = vec![(
            date("2024-12-01"),
            store("2024-12-01", &[("10.0.0.5", "aa:bb:cc:00:00:01")]),
        )];
        let view = MonthlyView::fold(&stores).unwrap();
        let report = Report::Monthly(MonthlyReport::from_view(2024, 12, &view));

        let text = TerminalRenderer::new().render(&report).unwrap();
        assert!(text.contains("Monthly report 2024/12"));
        assert!(text.contains("Unique MACs: 1"));
        assert!(text.contains("aa:bb:cc:00:00:01"));
    }
}

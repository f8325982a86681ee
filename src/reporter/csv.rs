//! CSV rendering: the archival tabular format consumed by operators and
//! downstream tooling. Rows are sorted by canonical MAC and multiple IPs are
//! semicolon-joined, so output on unchanged input is byte-identical.

use crate::error::Result;
use crate::reporter::{ComparisonReport, ComparisonRow, MonthlyReport, Renderer, Report};

pub struct CsvRenderer;

impl CsvRenderer {
    pub fn new() -> Self {
        Self
    }

    fn monthly(report: &MonthlyReport) -> String {
        let mut out = String::from("MAC,IPs,First_Seen,Last_Seen,Days_Seen\n");
        for row in &report.entries {
            out.push_str(&format!(
                "{},{},{},{},{}\n",
                row.mac,
                row.ips.join(";"),
                row.first_seen,
                row.last_seen,
                row.days_seen
            ));
        }
        out
    }

    fn comparison(report: &ComparisonReport) -> String {
        let mut out = String::from("MAC,IPs,Category,Last_Seen\n");
        let mut section = |rows: &[ComparisonRow], category: &str| {
            for row in rows {
                let last_seen = row
                    .last_seen
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                out.push_str(&format!(
                    "{},{},{},{}\n",
                    row.mac,
                    row.ips.join(";"),
                    category,
                    last_seen
                ));
            }
        };
        section(&report.unauthorized, "unauthorized");
        section(&report.inactive, "inactive");
        section(&report.newly_seen, "newly_seen");
        out
    }
}

impl Default for CsvRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CsvRenderer {
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
    fn test_monthly_csv_layout() {
        let stores = vec![
            (
                date("2024-12-01"),
                store(
                    "2024-12-01",
                    &[
                        ("10.0.0.5", "aa:bb:cc:00:00:01"),
                        ("10.0.0.6", "aa:bb:cc:00:00:01"),
                    ],
                ),
            ),
            (
                date("2024-12-03"),
                store("2024-12-03", &[("10.0.0.5", "aa:bb:cc:00:00:01")]),
            ),
        ];
        let view = MonthlyView::fold(&stores).unwrap();
        let report = Report::Monthly(MonthlyReport::from_view(2024, 12, &view));
        let text = CsvRenderer::new().render(&report).unwrap();

        assert_eq!(
            text,
            "MAC,IPs,First_Seen,Last_Seen,Days_Seen\n\
             aa:bb:cc:00:00:01,10.0.0.5;10.0.0.6,2024-12-01,2024-12-03,2\n"
        );
    }

    #[test]
    fn test_comparison_csv_sections() {
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

        let text = CsvRenderer::new().render(&report).unwrap();
        assert!(text.starts_with("MAC,IPs,Category,Last_Seen\n"));
        assert!(text.contains("aa:bb:cc:00:00:03,10.0.0.9,unauthorized,"));
        assert!(text.contains("aa:bb:cc:00:00:01,,inactive,"));
        assert!(text.contains("aa:bb:cc:00:00:02,10.0.0.5,newly_seen,"));
    }

    #[test]
    fn test_comparison_csv_reparses_to_the_same_sets() {
        use crate::types::MacAddress;
        use std::collections::BTreeSet;

        let observed = store(
            "2024-12-15",
            &[
                ("10.0.0.5", "aa:bb:cc:00:00:02"),
                ("10.0.0.9", "aa:bb:cc:00:00:03"),
                ("10.0.0.11", "aa:bb:cc:00:00:04"),
            ],
        );
        let previous = store("2024-12-14", &[("10.0.0.5", "aa:bb:cc:00:00:02")]);
        let authorized =
            AuthorizationSet::from_tokens(["aa:bb:cc:00:00:01", "aa:bb:cc:00:00:02"]);
        let result = reconcile(&observed, &authorized, Some(&previous), None);
        let report = Report::Comparison(ComparisonReport::build(
            &result,
            &observed,
            &authorized,
            None,
        ));

        let text = CsvRenderer::new().render(&report).unwrap();
        let mut unauthorized: BTreeSet<MacAddress> = BTreeSet::new();
        let mut inactive: BTreeSet<MacAddress> = BTreeSet::new();
        let mut newly_seen: BTreeSet<MacAddress> = BTreeSet::new();
        for line in text.lines().skip(1) {
            let fields: Vec<&str> = line.split(',').collect();
            let mac = MacAddress::parse(fields[0]).unwrap();
            match fields[2] {
                "unauthorized" => unauthorized.insert(mac),
                "inactive" => inactive.insert(mac),
                "newly_seen" => newly_seen.insert(mac),
                other => panic!("unexpected category: {other}"),
            };
        }

        assert_eq!(unauthorized, result.unauthorized);
        assert_eq!(inactive, result.inactive);
        assert_eq!(newly_seen, result.newly_seen);
    }

    #[test]
    fn test_rendering_is_stable() {
        let observed = store("2024-12-15", &[("10.0.0.5", "aa:bb:cc:00:00:02")]);
        let authorized = AuthorizationSet::from_tokens(["aa:bb:cc:00:00:02"]);
        let result = reconcile(&observed, &authorized, None, None);
        let report = Report::Comparison(ComparisonReport::build(
            &result,
            &observed,
            &authorized,
            None,
        ));

        let renderer = CsvRenderer::new();
        assert_eq!(
            renderer.render(&report).unwrap(),
            renderer.render(&report).unwrap()
        );
    }
}

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Csv,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "mac-audit",
    version,
    about = "Collects MAC presence data and reconciles it against the authorization directory",
    long_about = "mac-audit gathers ARP tables over SNMP, queries authorized MACs from LDAP, \
                  folds daily snapshots into monthly reports, and flags unauthorized or \
                  inactive devices."
)]
pub struct Cli {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect ARP tables from the configured devices via SNMP
    CollectArp {
        /// Device IP list file, one per line (overrides the config file)
        #[arg(long)]
        device_file: Option<PathBuf>,
    },
    /// Query authorized MACs from the LDAP directory
    QueryLdap {
        /// Copy the resulting list to an additional path
        #[arg(long)]
        copy_to: Option<PathBuf>,
    },
    /// Fold a month of daily snapshots into the monthly report
    MonthlyReport {
        /// Month to aggregate (YYYY-MM; default: previous month)
        #[arg(long)]
        month: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Csv)]
        format: ReportFormat,
    },
    /// Compare an observed snapshot against the authorized set
    Compare {
        /// ARP snapshot CSV to compare
        #[arg(long)]
        arp_file: PathBuf,
        /// Authorized-MAC list file (default: the configured ldap output)
        #[arg(long)]
        ldap_file: Option<PathBuf>,
        /// Previous snapshot CSV used to compute newly-seen MACs
        #[arg(long)]
        previous: Option<PathBuf>,
        /// Inactivity lookback window in days; builds activity history from
        /// the current month's daily snapshots
        #[arg(long)]
        inactive_days: Option<u32>,
        /// Write the rendered report to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Terminal)]
        format: ReportFormat,
    },
}

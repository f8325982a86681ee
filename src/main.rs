use clap::Parser;
use mac_audit::handlers::{
    handle_collect_arp, handle_compare, handle_monthly_report, handle_query_ldap, CompareOpts,
};
use mac_audit::{Cli, Command, Config};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.as_deref());
    let config_found = config_path.exists();
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if !config_found {
        tracing::warn!(
            "config file {} not found, using defaults",
            config_path.display()
        );
    }

    match cli.command {
        Command::CollectArp { device_file } => {
            handle_collect_arp(&config, device_file.as_deref())
        }
        Command::QueryLdap { copy_to } => handle_query_ldap(&config, copy_to.as_deref()),
        Command::MonthlyReport { month, format } => {
            handle_monthly_report(&config, month.as_deref(), format)
        }
        Command::Compare {
            arp_file,
            ldap_file,
            previous,
            inactive_days,
            output,
            format,
        } => handle_compare(
            &config,
            &CompareOpts {
                arp_file,
                ldap_file,
                previous,
                inactive_days,
                output,
                format,
            },
        ),
    }
}

//! `query-ldap`: refresh the authorized-MAC list from the directory.

use crate::collectors::LdapQuery;
use crate::config::Config;
use crate::error::{MacAuditError, Result};
use crate::snapshot;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};

pub fn handle_query_ldap(config: &Config, copy_to: Option<&Path>) -> ExitCode {
    match run(config, copy_to) {
        Ok(code) => code,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, copy_to: Option<&Path>) -> Result<ExitCode> {
    let password = config.ldap.password()?;
    let query = LdapQuery::new(
        &config.ldap.server,
        &config.ldap.bind_dn,
        &password,
        &config.ldap.base_dn,
    )?;

    let authorized = query.query()?;
    if authorized.is_empty() {
        warn!("directory query returned no authorized MACs");
    }
    if authorized.skipped() > 0 {
        warn!("{} directory entries skipped", authorized.skipped());
    }
    info!("directory holds {} authorized MACs", authorized.len());

    snapshot::save_authorized(&authorized, &config.output.ldap_output)?;
    println!("wrote {}", config.output.ldap_output.display());

    if let Some(dest) = copy_to {
        fs::copy(&config.output.ldap_output, dest).map_err(|e| MacAuditError::Write {
            path: dest.display().to_string(),
            source: e,
        })?;
        println!("copied to {}", dest.display());
    }
    Ok(ExitCode::SUCCESS)
}

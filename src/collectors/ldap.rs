//! LDAP directory collector.
//!
//! Shells out to `ldapsearch` and extracts `uid` attributes, which hold the
//! authorized MACs as bare 12-hex-digit tokens. Normalization and
//! skip-counting happen in the shared `AuthorizationSet` builder.

use crate::error::{MacAuditError, Result};
use crate::reconciler::AuthorizationSet;
use regex::Regex;
use std::process::Command;

pub struct LdapQuery {
    server: String,
    bind_dn: String,
    password: String,
    base_dn: String,
    uid_pattern: Regex,
}

impl LdapQuery {
    pub fn new(
        server: impl Into<String>,
        bind_dn: impl Into<String>,
        password: impl Into<String>,
        base_dn: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            server: server.into(),
            bind_dn: bind_dn.into(),
            password: password.into(),
            base_dn: base_dn.into(),
            uid_pattern: Regex::new(r"uid:\s*(\S+)")?,
        })
    }

    fn search(&self) -> Result<String> {
        let output = Command::new("ldapsearch")
            .args([
                "-H",
                &self.server,
                "-s",
                "sub",
                "-x",
                "-D",
                &self.bind_dn,
                "-w",
                &self.password,
                "-b",
                &self.base_dn,
                "uid=*",
            ])
            .output()
            .map_err(|err| {
                if err.kind() == std::io::ErrorKind::NotFound {
                    MacAuditError::Collector(
                        "ldapsearch not found; install ldap-utils".to_string(),
                    )
                } else {
                    MacAuditError::Collector(format!("failed to run ldapsearch: {err}"))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MacAuditError::Collector(format!(
                "ldapsearch failed: {}",
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Extract raw uid tokens from ldapsearch output.
    pub fn parse_uids<'a>(&self, output: &'a str) -> Vec<&'a str> {
        self.uid_pattern
            .captures_iter(output)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Query the directory and normalize the result into an authorization
    /// set.
    pub fn query(&self) -> Result<AuthorizationSet> {
        tracing::info!("querying LDAP at {}", self.server);
        let output = self.search()?;
        let uids = self.parse_uids(&output);
        tracing::info!("found {} uid entries", uids.len());

        let set = AuthorizationSet::from_tokens(uids);
        if set.skipped() > 0 {
            tracing::warn!("{} directory entries were not valid MACs", set.skipped());
        }
        Ok(set)
    }
}

//! Configuration loading.
//!
//! Settings come from a YAML file (default `config.yaml` next to the working
//! directory); every field has a default so a missing file just means
//! defaults plus a warning. The LDAP bind password is never stored in the
//! file; only the name of the environment variable that holds it is.

use crate::collectors::DEFAULT_ARP_OID;
use crate::error::{MacAuditError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub snmp: SnmpConfig,
    pub ldap: LdapConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnmpConfig {
    pub communities: Vec<String>,
    pub oid: String,
    pub device_ips: Vec<String>,
}

impl Default for SnmpConfig {
    fn default() -> Self {
        Self {
            communities: vec!["public".to_string()],
            oid: DEFAULT_ARP_OID.to_string(),
            device_ips: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LdapConfig {
    pub server: String,
    pub bind_dn: String,
    pub password_env: String,
    pub base_dn: String,
}

impl LdapConfig {
    /// Resolve the bind password from the configured environment variable.
    pub fn password(&self) -> Result<String> {
        std::env::var(&self.password_env)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                MacAuditError::Config(format!(
                    "environment variable {} is not set",
                    self.password_env
                ))
            })
    }
}

impl Default for LdapConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            bind_dn: String::new(),
            password_env: "LDAP_PASSWORD".to_string(),
            base_dn: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub daily_dir: PathBuf,
    pub monthly_dir: PathBuf,
    pub ldap_output: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            daily_dir: PathBuf::from("./output/daily"),
            monthly_dir: PathBuf::from("./output/monthly"),
            ldap_output: PathBuf::from("./output/ldap_mac.txt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// The effective config file path: explicit when given, `config.yaml`
    /// otherwise.
    pub fn resolve_path(path: Option<&Path>) -> &Path {
        path.unwrap_or_else(|| Path::new("config.yaml"))
    }

    /// Load configuration from an explicit path, or `config.yaml` when none
    /// is given. A missing file yields defaults; an unparseable file is an
    /// error. The caller decides how to surface the missing-file case, since
    /// loading happens before the log subscriber is up.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(path);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| MacAuditError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_yaml::from_str(&content)
            .map_err(|e| MacAuditError::Config(format!("{}: {e}", path.display())))
    }
}

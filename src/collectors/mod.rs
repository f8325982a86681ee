//! External collectors.
//!
//! Thin boundary adapters around the external query tools (`snmpwalk`,
//! `ldapsearch`). They produce the raw material the core consumes; the core
//! itself never invokes them. Protocol details, credentials, and timeout
//! policy all live out here, not in the reconciliation engine.

mod ldap;
mod snmp;

pub use ldap::LdapQuery;
pub use snmp::{SnmpCollector, DEFAULT_ARP_OID};

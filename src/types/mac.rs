//! Canonical MAC address value type.
//!
//! Every MAC entering the system passes through [`MacAddress::parse`] exactly
//! once; after that, equality and ordering are plain value comparisons and the
//! canonical rendering is always `aa:bb:cc:dd:ee:ff` (lowercase, colon
//! separated).

use crate::error::MacAuditError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 48-bit hardware address in canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// The all-zero address, reported by some devices for incomplete ARP
    /// entries and filtered out by the collectors.
    pub const ZERO: MacAddress = MacAddress([0; 6]);

    /// Parse a raw MAC token into its canonical form.
    ///
    /// Accepts colon, hyphen, and dot-grouped separator styles as well as
    /// bare or space-grouped hex digits, in any case. A trailing `#` comment
    /// and surrounding whitespace are stripped before validation. Anything
    /// that does not clean up to exactly 12 hex digits is rejected; the input
    /// is never truncated or padded.
    pub fn parse(raw: &str) -> Result<Self, MacAuditError> {
        let token = match raw.split_once('#') {
            Some((head, _comment)) => head,
            None => raw,
        };
        let token = token.trim();

        let mut digits = [0u8; 12];
        let mut count = 0usize;
        for c in token.chars() {
            if let Some(d) = c.to_digit(16) {
                if count == 12 {
                    return Err(MacAuditError::Malformed {
                        token: raw.to_string(),
                        reason: "more than 12 hex digits",
                    });
                }
                digits[count] = d as u8;
                count += 1;
            } else if matches!(c, ':' | '-' | '.') || c.is_whitespace() {
                continue;
            } else {
                return Err(MacAuditError::Malformed {
                    token: raw.to_string(),
                    reason: "non-hex character",
                });
            }
        }

        if count != 12 {
            return Err(MacAuditError::Malformed {
                token: raw.to_string(),
                reason: "expected 12 hex digits",
            });
        }

        let mut octets = [0u8; 6];
        for (i, octet) in octets.iter_mut().enumerate() {
            *octet = (digits[2 * i] << 4) | digits[2 * i + 1];
        }
        Ok(Self(octets))
    }

    /// The six raw octets.
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Whether this is the all-zero placeholder address.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl FromStr for MacAddress {
    type Err = MacAuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

//! Shared fixtures for unit tests.

pub mod fixtures {
    use crate::store::ObservationStore;
    use crate::types::MacAddress;
    use chrono::NaiveDate;

    /// Parse a MAC literal, panicking on bad test input.
    pub fn mac(s: &str) -> MacAddress {
        MacAddress::parse(s).unwrap()
    }

    /// Parse a `YYYY-MM-DD` date literal.
    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Build a dated store from `(ip, mac)` literals.
    pub fn store(date_str: &str, records: &[(&str, &str)]) -> ObservationStore {
        ObservationStore::build(date(date_str), records.iter().copied())
    }
}

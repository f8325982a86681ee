//! Core value types.

mod mac;

pub use mac::MacAddress;

//! # Host Model
//!
//! A probe target as it appears in the catalog. The address is kept as the
//! raw string handed to the diagnostic tools; no parsing or resolution
//! happens here.

use std::fmt;

/// One entry of the host catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Host {
    address: String,
    requires_dns: bool,
}

impl Host {
    /// Creates a host and classifies it with [`looks_numeric`].
    pub fn new(address: impl Into<String>) -> Self {
        let address: String = address.into();
        let requires_dns: bool = !looks_numeric(&address);
        Self {
            address,
            requires_dns,
        }
    }

    /// Creates a host with an explicit resolution flag.
    pub fn with_dns(address: impl Into<String>, requires_dns: bool) -> Self {
        Self {
            address: address.into(),
            requires_dns,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn requires_dns(&self) -> bool {
        self.requires_dns
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// Returns `true` when the address is nothing but digits once dots are removed.
///
/// Only dotted decimal literals pass. Bare integers like `16843009` also pass,
/// while IPv6 literals do not and are treated as names.
pub fn looks_numeric(address: &str) -> bool {
    address
        .chars()
        .filter(|c| *c != '.')
        .all(|c| c.is_ascii_digit())
}

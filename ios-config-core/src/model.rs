use std::net::Ipv4Addr;

use serde::Serialize;

use crate::address::AddressPrefix;

/// Administrative state of an interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminStatus {
    #[default]
    Up,
    /// A bare `shutdown` line was present in the stanza.
    Down,
}

impl AdminStatus {
    pub fn is_up(self) -> bool {
        self == AdminStatus::Up
    }
}

/// One ` ip address <addr> <mask> [secondary]` line of a stanza.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressEntry {
    pub prefix: AddressPrefix,
    pub secondary: bool,
    /// Inbound ACL bound after this entry, empty if none.
    pub acl_in: String,
    /// Outbound ACL bound after this entry, empty if none.
    pub acl_out: String,
}

impl AddressEntry {
    pub fn host(&self) -> Ipv4Addr {
        self.prefix.host()
    }
}

/// One `interface` stanza.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceBlock {
    pub name: String,
    /// Empty for the global routing table.
    pub vrf: String,
    pub status: AdminStatus,
    pub addresses: Vec<AddressEntry>,
}

/// A stanza whose scan stopped at the line safety limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruncatedBlock {
    pub interface: String,
    /// 1-based line number of the `interface` line.
    pub line_number: usize,
    pub scanned_lines: usize,
}

/// Everything extracted from one configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigDocument {
    /// Empty when the file never declares one.
    pub hostname: String,
    pub interfaces: Vec<InterfaceBlock>,
    pub truncated: Vec<TruncatedBlock>,
}

/// An interface address whose prefix contains a queried address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub hostname: String,
    pub interface: String,
    pub vrf: String,
    pub status: AdminStatus,
    pub secondary: bool,
    /// The queried address equals the configured host address.
    pub exact: bool,
    pub prefix: AddressPrefix,
    pub acl_in: String,
    pub acl_out: String,
}

impl MatchRecord {
    pub(crate) fn new(
        hostname: &str,
        block: &InterfaceBlock,
        entry: &AddressEntry,
        exact: bool,
    ) -> Self {
        Self {
            hostname: hostname.to_string(),
            interface: block.name.clone(),
            vrf: block.vrf.clone(),
            status: block.status,
            secondary: entry.secondary,
            exact,
            prefix: entry.prefix,
            acl_in: entry.acl_in.clone(),
            acl_out: entry.acl_out.clone(),
        }
    }
}

//! Interface lookup primitives for router and switch configuration backups.
//!
//! Reads plain-text, indentation-structured device configuration (IOS style),
//! extracts `interface` stanzas with their VRF, administrative status,
//! addresses and ACL bindings, and finds the interfaces whose subnet
//! contains a given IPv4 address.

pub mod address;
pub mod extract;
pub mod lines;
pub mod matcher;
pub mod model;
pub mod scan;

pub use address::{
    address_equals, parse_address, parse_mask, prefix_contains, AddressError, AddressPrefix,
};
pub use extract::{extract, extract_with_options, ExtractOptions, DEFAULT_MAX_BLOCK_LINES};
pub use lines::LineSource;
pub use matcher::match_document;
pub use model::{
    AddressEntry, AdminStatus, ConfigDocument, InterfaceBlock, MatchRecord, TruncatedBlock,
};
pub use scan::{
    scan, scan_file, FileTruncation, ScanError, ScanOutcome, ScanRequest, SkippedFile, TargetRole,
};

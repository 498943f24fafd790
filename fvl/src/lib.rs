//! Find which device and interface own an IPv4 address by scanning a
//! directory of router/switch configuration backups.
//!
//! The parsing and matching engine lives in `ios-config-core`; this crate
//! supplies the pieces around it:
//!
//! - [`config`] — run configuration from flags, `CISCONFS` and a TOML file
//! - [`select`] — picks text backups out of the directory listing
//! - [`report`] — terminal rendering of match records

pub mod config;
pub mod report;
pub mod select;

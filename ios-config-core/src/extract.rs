//! Line-oriented extraction of `interface` stanzas.
//!
//! The extractor walks the file once. Non-indented lines are top-level
//! directives; an `interface` line opens a stanza that runs over the
//! following indented lines and closes at the first line without a leading
//! space (or at end of file). Each stanza is turned into one complete
//! [`InterfaceBlock`] value: VRF, administrative status and every address
//! entry with the ACLs bound after it.
//!
//! Malformed lines inside a stanza (short VRF or ACL lines, bad masks) are
//! skipped individually and never abort the stanza or the file.

use log::{debug, warn};
use thiserror::Error;

use crate::address::{AddressError, AddressPrefix};
use crate::lines::{field, fields, is_indented, LineSource};
use crate::model::{AddressEntry, AdminStatus, ConfigDocument, InterfaceBlock, TruncatedBlock};

/// Default cap on indented lines scanned for one stanza.
pub const DEFAULT_MAX_BLOCK_LINES: usize = 4096;

/// Tunables for [`extract_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Safety limit for runaway stanzas. Hitting it is reported in
    /// [`ConfigDocument::truncated`].
    pub max_block_lines: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_block_lines: DEFAULT_MAX_BLOCK_LINES,
        }
    }
}

/// A stanza line that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum LineError {
    #[error("`{keyword}` line has no field {index}")]
    MissingField { keyword: &'static str, index: usize },
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error("access-group direction must be `in` or `out`, found `{0}`")]
    AclDirection(String),
}

/// The two spellings of an interface VRF binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VrfSyntax {
    /// ` vrf forwarding NAME`
    Forwarding,
    /// ` ip vrf forwarding NAME`
    IpVrfForwarding,
}

impl VrfSyntax {
    fn detect(line: &str) -> Option<Self> {
        if line.starts_with(" vrf forwarding") {
            Some(VrfSyntax::Forwarding)
        } else if line.starts_with(" ip vrf forwarding") {
            Some(VrfSyntax::IpVrfForwarding)
        } else {
            None
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            VrfSyntax::Forwarding => "vrf forwarding",
            VrfSyntax::IpVrfForwarding => "ip vrf forwarding",
        }
    }

    fn name_index(self) -> usize {
        match self {
            VrfSyntax::Forwarding => 2,
            VrfSyntax::IpVrfForwarding => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AclDirection {
    In,
    Out,
}

/// Recognised stanza statements.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StanzaLine {
    Vrf(String),
    Address {
        prefix: AddressPrefix,
        secondary: bool,
    },
    Shutdown,
    AccessGroup {
        name: String,
        direction: AclDirection,
    },
}

impl StanzaLine {
    /// `Ok(None)` for lines the extractor does not care about.
    fn parse(line: &str) -> Result<Option<Self>, LineError> {
        if let Some(syntax) = VrfSyntax::detect(line) {
            let index = syntax.name_index();
            let name = field(line, index).ok_or(LineError::MissingField {
                keyword: syntax.keyword(),
                index,
            })?;
            return Ok(Some(StanzaLine::Vrf(name.to_string())));
        }

        if line.starts_with(" ip address ") {
            let parts = fields(line);
            let (Some(addr), Some(mask)) = (parts.get(2), parts.get(3)) else {
                return Err(LineError::MissingField {
                    keyword: "ip address",
                    index: 3,
                });
            };
            let prefix = AddressPrefix::from_address_mask(addr, mask)?;
            let secondary = parts.iter().skip(4).any(|p| *p == "secondary");
            return Ok(Some(StanzaLine::Address { prefix, secondary }));
        }

        if line.starts_with(" ip access-group") {
            let parts = fields(line);
            if parts.len() < 4 {
                return Err(LineError::MissingField {
                    keyword: "ip access-group",
                    index: 3,
                });
            }
            let direction = match parts[parts.len() - 1] {
                "in" => AclDirection::In,
                "out" => AclDirection::Out,
                other => return Err(LineError::AclDirection(other.to_string())),
            };
            return Ok(Some(StanzaLine::AccessGroup {
                name: parts[2].to_string(),
                direction,
            }));
        }

        if is_shutdown(line) {
            return Ok(Some(StanzaLine::Shutdown));
        }

        Ok(None)
    }
}

/// A bare `shutdown` token, not inside a description and not negated.
fn is_shutdown(line: &str) -> bool {
    let parts = fields(line);
    parts.contains(&"shutdown") && !parts.contains(&"description") && parts.first() != Some(&"no")
}

/// Extract with [`ExtractOptions::default`].
pub fn extract(source: &LineSource) -> ConfigDocument {
    extract_with_options(source, &ExtractOptions::default())
}

/// Run the stanza scanner over one file's lines.
pub fn extract_with_options(source: &LineSource, options: &ExtractOptions) -> ConfigDocument {
    let lines = source.lines();
    let mut doc = ConfigDocument::default();
    let mut hostname_seen = false;
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx].as_str();

        if !hostname_seen {
            if let Some(name) = hostname_directive(line) {
                doc.hostname = name;
                hostname_seen = true;
                idx += 1;
                continue;
            }
        }

        let Some(name) = interface_directive(line) else {
            idx += 1;
            continue;
        };

        let body_start = idx + 1;
        let (body, truncated) = stanza_body(&lines[body_start..], options.max_block_lines);
        if truncated {
            warn!(
                "interface {name} at line {} exceeds {} lines; remaining stanza lines ignored",
                idx + 1,
                options.max_block_lines
            );
            doc.truncated.push(TruncatedBlock {
                interface: name.clone(),
                line_number: idx + 1,
                scanned_lines: body.len(),
            });
        }
        doc.interfaces.push(build_block(name, body, body_start));
        idx = body_start + body.len();
    }

    doc
}

/// Name declared by a top-level `hostname NAME` line.
fn hostname_directive(line: &str) -> Option<String> {
    let rest = line.strip_prefix("hostname")?;
    let mut chars = rest.chars();
    if !chars.next()?.is_whitespace() {
        return None;
    }
    let name = chars.as_str().trim_end();
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

fn interface_directive(line: &str) -> Option<String> {
    line.strip_prefix("interface ")?;
    Some(field(line, 1).unwrap_or_default().to_string())
}

/// The indented lines following an `interface` line, capped at `limit`.
fn stanza_body(rest: &[String], limit: usize) -> (&[String], bool) {
    let indented = rest
        .iter()
        .take_while(|line| is_indented(line))
        .take(limit.saturating_add(1))
        .count();
    if indented > limit {
        (&rest[..limit], true)
    } else {
        (&rest[..indented], false)
    }
}

fn build_block(name: String, body: &[String], first_line_idx: usize) -> InterfaceBlock {
    let mut vrf = String::new();
    let mut status = AdminStatus::Up;
    let mut addresses = Vec::new();

    for (offset, line) in body.iter().enumerate() {
        match StanzaLine::parse(line) {
            Ok(Some(StanzaLine::Vrf(found))) => vrf = found,
            Ok(Some(StanzaLine::Shutdown)) => status = AdminStatus::Down,
            Ok(Some(StanzaLine::Address { prefix, secondary })) => {
                let (acl_in, acl_out) = acl_bindings(&body[offset + 1..]);
                addresses.push(AddressEntry {
                    prefix,
                    secondary,
                    acl_in,
                    acl_out,
                });
            }
            // Picked up by the address entries above it.
            Ok(Some(StanzaLine::AccessGroup { .. })) | Ok(None) => {}
            Err(err) => debug!(
                "interface {name}: skipping line {}: {err}",
                first_line_idx + offset + 1
            ),
        }
    }

    InterfaceBlock {
        name,
        vrf,
        status,
        addresses,
    }
}

/// ACL names bound by the stanza lines after an address entry.
fn acl_bindings(following: &[String]) -> (String, String) {
    let mut acl_in = String::new();
    let mut acl_out = String::new();
    for line in following {
        if let Ok(Some(StanzaLine::AccessGroup { name, direction })) = StanzaLine::parse(line) {
            match direction {
                AclDirection::In => acl_in = name,
                AclDirection::Out => acl_out = name,
            }
        }
    }
    (acl_in, acl_out)
}

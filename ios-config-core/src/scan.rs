//! Multi-file aggregation of source and destination matches.

use std::fmt::{self, Display, Formatter};
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::address::{parse_address, AddressError};
use crate::extract::{extract_with_options, ExtractOptions};
use crate::lines::LineSource;
use crate::matcher::match_document;
use crate::model::{MatchRecord, TruncatedBlock};

/// Which side of a lookup a target address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetRole {
    Source,
    Destination,
}

impl Display for TargetRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TargetRole::Source => write!(f, "source"),
            TargetRole::Destination => write!(f, "destination"),
        }
    }
}

/// Conditions that stop a scan before any match is produced.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid {role} address `{text}`: {source}")]
    InvalidTargetAddress {
        role: TargetRole,
        text: String,
        source: AddressError,
    },
    #[error("no configuration files to scan")]
    NoCandidateFiles,
}

/// Input of [`scan`].
#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    /// Directory the file names are resolved against.
    pub base_dir: PathBuf,
    /// Candidate file names, already filtered by the caller.
    pub files: Vec<String>,
    /// Source address text; blank means "not queried".
    pub source: String,
    /// Destination address text; blank means "not queried".
    pub destination: String,
    pub extract: ExtractOptions,
}

impl ScanRequest {
    /// Parsed source and destination addresses; `None` for a blank side.
    ///
    /// Callers can run this before touching the filesystem to reject bad
    /// input early.
    pub fn targets(&self) -> Result<(Option<Ipv4Addr>, Option<Ipv4Addr>), ScanError> {
        Ok((
            parse_target(TargetRole::Source, &self.source)?,
            parse_target(TargetRole::Destination, &self.destination)?,
        ))
    }
}

/// A file that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// A truncated stanza and the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTruncation {
    pub path: PathBuf,
    #[serde(flatten)]
    pub block: TruncatedBlock,
}

/// Result of a completed scan. Empty match lists are valid outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    pub source: Vec<MatchRecord>,
    pub destination: Vec<MatchRecord>,
    pub skipped: Vec<SkippedFile>,
    pub truncated: Vec<FileTruncation>,
    pub files_scanned: usize,
}

/// Parse every candidate file once and collect matches for both targets.
///
/// Invalid target text and an empty file list are the only errors; files
/// that cannot be read are logged and listed in [`ScanOutcome::skipped`].
pub fn scan(request: &ScanRequest) -> Result<ScanOutcome, ScanError> {
    let (source, destination) = request.targets()?;

    if request.files.is_empty() {
        return Err(ScanError::NoCandidateFiles);
    }

    let mut outcome = ScanOutcome::default();
    for name in &request.files {
        let path = request.base_dir.join(name);
        let lines = match LineSource::read(&path) {
            Ok(lines) => lines,
            Err(err) => {
                warn!("skipping {}: {err}", path.display());
                outcome.skipped.push(SkippedFile {
                    path,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        outcome.files_scanned += 1;

        let document = extract_with_options(&lines, &request.extract);
        debug!(
            "{}: hostname={:?} interfaces={}",
            path.display(),
            document.hostname,
            document.interfaces.len()
        );

        if let Some(target) = source {
            outcome.source.extend(match_document(&document, target));
        }
        if let Some(target) = destination {
            outcome.destination.extend(match_document(&document, target));
        }
        outcome
            .truncated
            .extend(document.truncated.into_iter().map(|block| FileTruncation {
                path: path.clone(),
                block,
            }));
    }

    Ok(outcome)
}

/// Convenience wrapper for a single file and target.
pub fn scan_file(
    path: &Path,
    target: Ipv4Addr,
    options: &ExtractOptions,
) -> std::io::Result<Vec<MatchRecord>> {
    let lines = LineSource::read(path)?;
    Ok(match_document(&extract_with_options(&lines, options), target))
}

fn parse_target(role: TargetRole, text: &str) -> Result<Option<Ipv4Addr>, ScanError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    parse_address(text)
        .map(Some)
        .map_err(|source| ScanError::InvalidTargetAddress {
            role,
            text: text.to_string(),
            source,
        })
}

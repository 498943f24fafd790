//! Run configuration, resolved once from flags, environment and an optional
//! TOML settings file.

use std::fs;
use std::path::{Path, PathBuf};

use ios_config_core::{ExtractOptions, ScanRequest, DEFAULT_MAX_BLOCK_LINES};
use serde::Deserialize;
use thiserror::Error;

use crate::select::DEFAULT_SKIP_EXTENSIONS;

/// Optional settings file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub cfg_dir: Option<PathBuf>,
    pub max_block_lines: Option<usize>,
    pub skip_extensions: Option<Vec<String>>,
}

/// Values supplied on the command line (or via `CISCONFS`).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub cfg_dir: Option<PathBuf>,
    pub source: String,
    pub destination: Option<String>,
    pub verbose: bool,
    pub max_block_lines: Option<usize>,
}

/// Errors returned while resolving the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("no backup directory given; use --cfg-dir, CISCONFS or cfg_dir in the settings file")]
    MissingDir,
    #[error("backup directory {0} does not exist or is not a directory")]
    NotADirectory(String),
    #[error("max_block_lines must be at least 1")]
    InvalidBlockLimit,
}

/// Everything one lookup needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FvlConfig {
    pub cfg_dir: PathBuf,
    pub source: String,
    pub destination: String,
    pub verbose: bool,
    pub extract: ExtractOptions,
    pub skip_extensions: Vec<String>,
}

impl FvlConfig {
    /// Merge overrides over file settings over defaults.
    pub fn resolve(overrides: Overrides, settings: FileSettings) -> Result<Self, ConfigError> {
        let cfg_dir = overrides
            .cfg_dir
            .or(settings.cfg_dir)
            .ok_or(ConfigError::MissingDir)?;
        if !cfg_dir.is_dir() {
            return Err(ConfigError::NotADirectory(cfg_dir.display().to_string()));
        }

        let max_block_lines = overrides
            .max_block_lines
            .or(settings.max_block_lines)
            .unwrap_or(DEFAULT_MAX_BLOCK_LINES);
        if max_block_lines == 0 {
            return Err(ConfigError::InvalidBlockLimit);
        }

        let skip_extensions = settings.skip_extensions.unwrap_or_else(|| {
            DEFAULT_SKIP_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect()
        });

        Ok(Self {
            cfg_dir,
            source: overrides.source.trim().to_string(),
            destination: overrides
                .destination
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            verbose: overrides.verbose,
            extract: ExtractOptions { max_block_lines },
            skip_extensions,
        })
    }

    /// Build the scan input for the selected files.
    pub fn scan_request(&self, files: Vec<String>) -> ScanRequest {
        ScanRequest {
            base_dir: self.cfg_dir.clone(),
            files,
            source: self.source.clone(),
            destination: self.destination.clone(),
            extract: self.extract,
        }
    }
}

/// Load settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<FileSettings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_settings(&raw, path.display().to_string())
}

fn parse_settings(raw: &str, path: String) -> Result<FileSettings, ConfigError> {
    toml::from_str(raw).map_err(|source| ConfigError::Parse { path, source })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn overrides(dir: &Path) -> Overrides {
        Overrides {
            cfg_dir: Some(dir.to_path_buf()),
            source: " 10.0.0.1 ".to_string(),
            ..Overrides::default()
        }
    }

    #[test]
    fn parses_settings_file() {
        let settings = parse_settings(
            r#"
cfg_dir = "/srv/backups"
max_block_lines = 200
skip_extensions = ["bak", "old"]
"#,
            "inline".to_string(),
        )
        .expect("parse");
        assert_eq!(
            settings,
            FileSettings {
                cfg_dir: Some(PathBuf::from("/srv/backups")),
                max_block_lines: Some(200),
                skip_extensions: Some(vec!["bak".to_string(), "old".to_string()]),
            }
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = parse_settings("cfgdir = \"/x\"", "inline".to_string()).expect_err("unknown key");
        assert!(err.to_string().contains("failed to parse settings file inline"));
    }

    #[test]
    fn flags_beat_settings_and_defaults_fill_gaps() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = FileSettings {
            cfg_dir: Some(PathBuf::from("/nonexistent")),
            max_block_lines: Some(64),
            skip_extensions: None,
        };
        let config = FvlConfig::resolve(overrides(dir.path()), settings).expect("resolve");
        assert_eq!(config.cfg_dir, dir.path());
        assert_eq!(config.source, "10.0.0.1");
        assert_eq!(config.destination, "");
        assert_eq!(config.extract.max_block_lines, 64);
        assert_eq!(config.skip_extensions, ["bak", "backup", "save"]);
    }

    #[test]
    fn missing_or_bad_directory_is_an_error() {
        let err = FvlConfig::resolve(Overrides::default(), FileSettings::default())
            .expect_err("no dir");
        assert!(matches!(err, ConfigError::MissingDir));

        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("not-a-dir.cfg");
        fs::write(&file, "hostname x\n").expect("write");
        let err = FvlConfig::resolve(overrides(&file), FileSettings::default())
            .expect_err("file is not a dir");
        assert!(matches!(err, ConfigError::NotADirectory(_)));
    }

    #[test]
    fn zero_block_limit_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut o = overrides(dir.path());
        o.max_block_lines = Some(0);
        let err = FvlConfig::resolve(o, FileSettings::default()).expect_err("zero limit");
        assert!(matches!(err, ConfigError::InvalidBlockLimit));
    }

    #[test]
    fn scan_request_carries_resolved_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut o = overrides(dir.path());
        o.destination = Some("192.0.2.1 ".to_string());
        let config = FvlConfig::resolve(o, FileSettings::default()).expect("resolve");
        let request = config.scan_request(vec!["a.cfg".to_string()]);
        assert_eq!(request.base_dir, dir.path());
        assert_eq!(request.destination, "192.0.2.1");
        assert_eq!(request.extract.max_block_lines, DEFAULT_MAX_BLOCK_LINES);
    }
}

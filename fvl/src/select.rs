use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::debug;
use thiserror::Error;

/// Extensions of editor and rotation leftovers that are never scanned.
pub const DEFAULT_SKIP_EXTENSIONS: [&str; 3] = ["bak", "backup", "save"];

/// Errors returned while listing the backup directory.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("failed to read backup directory {path}: {source}")]
    ReadDir { path: String, source: io::Error },
}

/// Names of the files in `dir` worth scanning, sorted.
///
/// Skips sub-directories, dotfiles, names with an extension listed in
/// `skip_extensions`, and files whose first line is not valid UTF-8.
pub fn select_candidates(dir: &Path, skip_extensions: &[String]) -> Result<Vec<String>, SelectError> {
    let read_err = |source| SelectError::ReadDir {
        path: dir.display().to_string(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let Ok(name) = entry.file_name().into_string() else {
            debug!("skipping non UTF-8 file name {:?}", entry.file_name());
            continue;
        };
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(true) {
            continue;
        }
        if is_ignored_name(&name, skip_extensions) {
            debug!("skipping {name}: hidden or backup copy");
            continue;
        }
        match looks_like_text(&entry.path()) {
            Ok(true) => names.push(name),
            Ok(false) => debug!("skipping {name}: not a text file"),
            Err(err) => debug!("skipping {name}: {err}"),
        }
    }

    names.sort();
    Ok(names)
}

/// Dotfiles and names ending in one of the ignored extensions.
pub fn is_ignored_name(name: &str, skip_extensions: &[String]) -> bool {
    if name.starts_with('.') {
        return true;
    }
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| skip_extensions.iter().any(|skip| skip == ext))
        .unwrap_or(false)
}

/// True when the first line of the file decodes as UTF-8.
pub fn looks_like_text(path: &Path) -> io::Result<bool> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut first = Vec::new();
    reader.read_until(b'\n', &mut first)?;
    Ok(std::str::from_utf8(&first).is_ok())
}

//! Local filesystem helpers

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Shorthand for the user's home directory
const HOME_SYMBOL: &str = "~";

/// Expand a leading `~` into the home directory and make the path absolute
///
/// Relative paths are resolved against the process working directory. The
/// path does not need to exist.
pub fn absolute_path(path: &str) -> Result<PathBuf> {
    let expanded = expand_home(path)?;
    Ok(std::path::absolute(expanded)?)
}

/// Replace a leading `~` (alone or followed by a separator) with the home directory
pub fn expand_home(path: &str) -> Result<PathBuf> {
    let Some(rest) = path.strip_prefix(HOME_SYMBOL) else {
        return Ok(PathBuf::from(path));
    };

    // `~user` is not supported; leave it untouched
    let rest = if rest.is_empty() {
        rest
    } else if let Some(stripped) = rest.strip_prefix(std::path::is_separator) {
        stripped
    } else {
        return Ok(PathBuf::from(path));
    };

    let home = dirs::home_dir()
        .ok_or_else(|| Error::Config("Could not determine home directory".into()))?;
    Ok(home.join(rest))
}

/// Final path component, used as the default local or remote file name
pub fn base_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

/// Move `from` to `to`, falling back to copy and delete across filesystems
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
            tracing::debug!(from = %from.display(), to = %to.display(), "rename crosses devices, copying");
            std::fs::copy(from, to)?;
            std::fs::remove_file(from)?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

//! Path helpers: executable lookup on `PATH` and `~` expansion.

use std::path::{Path, PathBuf};

use crate::error::CheckError;

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a command by iterating over `path_entries`.
///
/// Returns the first match that is a regular file and executable. A command
/// containing a path separator is checked as-is instead of searched.
pub fn resolve_command(command: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    if command.is_empty() {
        return None;
    }

    let direct = Path::new(command);
    if direct.components().count() > 1 {
        return (direct.is_file() && is_executable(direct)).then(|| absolutize(direct));
    }

    for dir in path_entries {
        // An empty PATH entry means the current directory.
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir.as_path()
        };
        for candidate in candidates(dir, command) {
            if candidate.is_file() && is_executable(&candidate) {
                return Some(absolutize(&candidate));
            }
        }
    }
    None
}

/// Resolve a command on the current process `PATH`.
pub fn find_in_path(command: &str) -> Option<PathBuf> {
    resolve_command(command, &parse_system_path())
}

#[cfg(windows)]
fn candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
    let exts = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    std::iter::once(dir.join(command))
        .chain(
            exts.split(';')
                .filter(|e| !e.is_empty())
                .map(|ext| dir.join(format!("{}{}", command, ext))),
        )
        .collect()
}

#[cfg(not(windows))]
fn candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
    vec![dir.join(command)]
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Replace every `~` in `path` with the current user's home directory.
///
/// Paths without `~` are returned unchanged and never touch the home lookup.
///
/// # Errors
///
/// Returns [`CheckError::HomeDirUnavailable`] if `path` contains `~` and the
/// home directory cannot be determined.
pub fn clean_home(path: &str) -> Result<PathBuf, CheckError> {
    clean_home_with(path, dirs::home_dir().as_deref())
}

/// [`clean_home`] with an explicit home directory.
pub fn clean_home_with(path: &str, home: Option<&Path>) -> Result<PathBuf, CheckError> {
    if !path.contains('~') {
        return Ok(PathBuf::from(path));
    }

    let home = home.ok_or_else(|| CheckError::HomeDirUnavailable {
        path: path.to_string(),
    })?;
    Ok(PathBuf::from(
        path.replace('~', &home.to_string_lossy()),
    ))
}

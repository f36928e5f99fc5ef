//! Filesystem helpers for the Sillage CLI, built on `cap-std` and `camino`.
//!
//! Every operation resolves an ambient directory handle for the parent of
//! the target path and then acts relative to it, so the CLI never touches
//! paths outside the directory a user named.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// What an input path refers to on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPath {
    /// A regular file.
    File,
    /// Something other than a regular file, such as a directory.
    NotFile,
    /// Nothing exists at the path, or its parent directory is missing.
    Missing,
}

/// Classify `path` without following it outside its parent directory.
///
/// # Errors
/// Returns the underlying IO error when the path cannot be inspected for a
/// reason other than it not existing.
pub fn inspect_input(path: &Utf8Path) -> io::Result<InputPath> {
    let metadata = open_parent_dir(path).and_then(|(dir, name)| dir.metadata(name.as_str()));
    match metadata {
        Ok(meta) if meta.is_file() => Ok(InputPath::File),
        Ok(_) => Ok(InputPath::NotFile),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(InputPath::Missing),
        Err(err) => Err(err),
    }
}

/// Create (or truncate) `path` for writing, creating missing parent
/// directories first.
///
/// # Errors
/// Propagates IO errors from directory creation or opening the file.
pub fn create_output_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent_dir(path)?;
    dir.create(name.as_str())
}

/// Resolve the parent directory of `path` and return it with the file name.
///
/// A bare file name resolves against the current directory.
///
/// # Errors
/// Fails when `path` has no file name or its parent cannot be opened.
pub fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Create the parent directory chain for `path` if it is missing.
///
/// # Errors
/// Propagates IO errors from resolving the base directory or creating the
/// chain.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }
    let (base, relative) = split_base_dir(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Split `dir` into an ambient base directory handle and the path beneath it.
///
/// Absolute paths resolve from the filesystem root (or the drive prefix on
/// Windows); relative paths resolve from the current directory.
///
/// # Errors
/// Fails for non-UTF-8 prefixes or when the base directory cannot be opened.
pub fn split_base_dir(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let (base, relative) = match dir.as_std_path().components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let base = Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR.to_string());
            let relative = strip(dir, &base).or_else(|_| strip(dir, Utf8Path::new(prefix)))?;
            (base, relative)
        }
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = strip(dir, &base)?;
            (base, relative)
        }
        _ => (Utf8PathBuf::from("."), dir.to_path_buf()),
    };
    let handle = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((handle, relative))
}

fn strip(path: &Utf8Path, base: &Utf8Path) -> io::Result<Utf8PathBuf> {
    path.strip_prefix(base)
        .map(Utf8Path::to_path_buf)
        .map_err(|_| io::Error::other(format!("{path} is not beneath {base}")))
}

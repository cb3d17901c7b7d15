use std::fs;
use std::io;
use std::path::Path;

/// Ensure a regular file exists at `p`, creating parent directories as needed.
///
/// An existing regular file is left untouched. Anything else at `p` (a directory,
/// a symlink, dangling or not) is an error; symlinks are never followed.
pub fn ensure_file_exists(p: &Path) -> io::Result<()> {
    match fs::symlink_metadata(p) {
        Ok(meta) => return require_regular_file(p, &meta),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    if let Some(parent) = p.parent() {
        fs::create_dir_all(parent)?;
    }
    // O_EXCL: never writes through a symlink created in the meantime.
    match fs::OpenOptions::new().write(true).create_new(true).open(p) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            require_regular_file(p, &fs::symlink_metadata(p)?)
        }
        Err(e) => Err(e),
    }
}

fn require_regular_file(p: &Path, meta: &fs::Metadata) -> io::Result<()> {
    if meta.file_type().is_file() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "{} exists but is not a regular file",
            p.display()
        )))
    }
}

/// Remove whatever sits at `p`: directories recursively, anything else (files, symlinks) as a file.
///
/// Symlinks are never followed. Returns `Ok(false)` when nothing existed.
pub fn remove_path_all(p: &Path) -> io::Result<bool> {
    let meta = match fs::symlink_metadata(p) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    let res = if meta.is_dir() {
        fs::remove_dir_all(p)
    } else {
        fs::remove_file(p)
    };
    match res {
        Ok(()) => Ok(true),
        // Vanished between the stat and the removal.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

//! View name resolution over view directories.
//!
//! [`ViewLoader`] maps a view name such as `"users/list"` to a file inside one
//! of the registered view directories. It only finds and reads files; parsing
//! is left to the render engine.
//!
//! # Resolution
//!
//! 1. Directories are searched in registration order; the first hit wins.
//! 2. Within a directory the exact name is tried first, then the name with
//!    each of [`VIEW_EXTENSIONS`] appended, in priority order.
//! 3. Names that could escape a directory (`..` segments, absolute paths,
//!    backslashes) never resolve.
//!
//! | Priority | Extension |
//! |----------|-----------|
//! | 1 (highest) | `.jinja` |
//! | 2 | `.jinja2` |
//! | 3 | `.j2` |
//! | 4 | `.html` |
//! | 5 (lowest) | `.txt` |

use std::io;
use std::path::{Path, PathBuf};

use log::trace;

use crate::error::ViewError;

/// Recognized view file extensions in priority order.
pub const VIEW_EXTENSIONS: &[&str] = &[".jinja", ".jinja2", ".j2", ".html", ".txt"];

/// Finds view sources in an ordered list of directories.
#[derive(Debug, Clone, Default)]
pub struct ViewLoader {
    dirs: Vec<PathBuf>,
}

impl ViewLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a view directory.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Io`] if the path is not an existing directory.
    pub fn add_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ViewError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(ViewError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("view directory not found: {}", path.display()),
            )));
        }
        self.dirs.push(path.to_path_buf());
        Ok(())
    }

    /// Registered directories, in search order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Returns the path a view name resolves to, if any.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if !is_safe_name(name) {
            trace!("refusing unsafe view name {:?}", name);
            return None;
        }
        for dir in &self.dirs {
            for candidate in candidates(name) {
                let path = dir.join(&candidate);
                if path.is_file() {
                    trace!("view {:?} resolved to {}", name, path.display());
                    return Some(path);
                }
            }
        }
        trace!("view {:?} not found in {} directories", name, self.dirs.len());
        None
    }

    /// Reads the source of a view.
    ///
    /// Returns `Ok(None)` when the name does not resolve.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Io`] if the resolved file cannot be read.
    pub fn load(&self, name: &str) -> Result<Option<String>, ViewError> {
        match self.resolve(name) {
            Some(path) => std::fs::read_to_string(&path).map(Some).map_err(|err| {
                ViewError::Io(io::Error::new(
                    err.kind(),
                    format!("{}: {}", path.display(), err),
                ))
            }),
            None => Ok(None),
        }
    }
}

fn candidates(name: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(name.to_string())
        .chain(VIEW_EXTENSIONS.iter().map(move |ext| format!("{}{}", name, ext)))
}

fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('\\')
        && !Path::new(name).is_absolute()
        && name.split('/').all(|segment| segment != "..")
}

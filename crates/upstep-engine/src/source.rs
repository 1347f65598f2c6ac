//! Script resource namespaces.
//!
//! Migration scripts live either as loose files under a directory tree or as
//! resources compiled into the host binary. Both are exposed through
//! [`ScriptSource`]; configuration picks one at startup.

use crate::error::ExtractionError;
use rust_embed::RustEmbed;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Recognized script extension.
pub const SCRIPT_EXT: &str = "sql";

/// A namespace of migration scripts: list relative paths, read one by path.
pub trait ScriptSource {
    /// Short identifier for log lines.
    fn kind(&self) -> &'static str;

    /// Relative paths of every candidate script, sorted for reproducibility.
    fn list(&self) -> Result<Vec<String>, ExtractionError>;

    /// Full text of the script at `path`.
    fn read(&self, path: &str) -> Result<String, ExtractionError>;
}

/// Loose `.sql` files under a root directory, any nesting depth.
///
/// Dotfiles and dot-directories are skipped; non-`.sql` files are ignored.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn collect_scripts(root: &Path, dir: &Path, out: &mut Vec<String>) -> Result<(), ExtractionError> {
    let listing = std::fs::read_dir(dir).map_err(|e| ExtractionError::List {
        path: dir.display().to_string(),
        source: e,
    })?;
    for entry in listing {
        let entry = entry.map_err(|e| ExtractionError::List {
            path: dir.display().to_string(),
            source: e,
        })?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            collect_scripts(root, &path, out)?;
        } else if path.extension().is_some_and(|ext| ext == SCRIPT_EXT) {
            let rel = path.strip_prefix(root).unwrap_or(&path);
            // Forward slashes regardless of platform, so names compare the
            // same everywhere.
            let name = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            out.push(name);
        }
    }
    Ok(())
}

impl ScriptSource for DirSource {
    fn kind(&self) -> &'static str {
        "dir"
    }

    fn list(&self) -> Result<Vec<String>, ExtractionError> {
        let mut out = Vec::new();
        collect_scripts(&self.root, &self.root, &mut out)?;
        out.sort();
        Ok(out)
    }

    fn read(&self, path: &str) -> Result<String, ExtractionError> {
        std::fs::read_to_string(self.root.join(path)).map_err(|e| ExtractionError::Read {
            name: path.to_string(),
            source: e,
        })
    }
}

/// Scripts compiled into the host binary via `rust_embed`.
///
/// The host derives `RustEmbed` over its own script folder and instantiates
/// `EmbeddedSource<Assets>`; the engine never learns the folder path.
pub struct EmbeddedSource<E: RustEmbed> {
    _marker: PhantomData<E>,
}

impl<E: RustEmbed> EmbeddedSource<E> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E: RustEmbed> Default for EmbeddedSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RustEmbed> ScriptSource for EmbeddedSource<E> {
    fn kind(&self) -> &'static str {
        "embedded"
    }

    fn list(&self) -> Result<Vec<String>, ExtractionError> {
        let mut out: Vec<String> = E::iter()
            .filter(|p| Path::new(p.as_ref()).extension().is_some_and(|ext| ext == SCRIPT_EXT))
            .map(|p| p.into_owned())
            .collect();
        out.sort();
        Ok(out)
    }

    fn read(&self, path: &str) -> Result<String, ExtractionError> {
        let file = E::get(path).ok_or_else(|| ExtractionError::Read {
            name: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such embedded resource"),
        })?;
        String::from_utf8(file.data.into_owned()).map_err(|_| ExtractionError::InvalidUtf8 {
            name: path.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;

// Acquisition — ensuring the compressed dataset files exist locally

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{DataError, Result};
use crate::variant::Variant;

/// Supplies compressed dataset files that are not already present locally.
///
/// Implementations own their transport (HTTP mirror, object store, local
/// cache) and must leave the named file at `dest` on success. Failures are
/// surfaced to callers as [`DataError::Acquisition`].
pub trait Source {
    fn provide(&self, name: &str, dest: &Path) -> io::Result<()>;
}

/// A source backed by a local directory, e.g. an offline mirror.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Source for DirSource {
    fn provide(&self, name: &str, dest: &Path) -> io::Result<()> {
        fs::copy(self.root.join(name), dest)?;
        Ok(())
    }
}

/// Ask `source` for each of the variant's compressed files that is absent
/// from `dir`. A file already present, plain or `.gz`, is left alone.
pub fn fetch_missing(dir: &Path, variant: Variant, source: &dyn Source) -> Result<()> {
    fs::create_dir_all(dir)?;
    for name in variant.files().all() {
        let plain = dir.join(name);
        let gz_name = format!("{name}.gz");
        let gz = dir.join(&gz_name);
        if plain.exists() || gz.exists() {
            continue;
        }

        info!("fetching {gz_name}");
        source
            .provide(&gz_name, &gz)
            .map_err(|source| DataError::Acquisition {
                name: gz_name.clone(),
                source,
            })?;
    }
    Ok(())
}

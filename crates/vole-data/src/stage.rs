// Staging — decompressed working copies with scoped cleanup

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use log::{info, warn};

use crate::error::{DataError, Result};

/// Decompressed working copies of a set of dataset files.
///
/// For each logical name, a plain file in the directory is used as-is and
/// never touched; otherwise `<name>.gz` is unpacked into a scratch file next
/// to it. Scratch files are removed when the value is dropped, including
/// when staging itself fails partway through.
#[derive(Debug)]
pub struct StagedFiles {
    entries: Vec<Entry>,
}

#[derive(Debug)]
struct Entry {
    name: String,
    path: PathBuf,
    scratch: bool,
}

impl StagedFiles {
    /// Stage every name in `names` from `dir`.
    ///
    /// Fails with [`DataError::MissingFile`] when a name exists in neither
    /// plain nor `.gz` form; scratch files already written are cleaned up on
    /// the way out.
    pub fn prepare(dir: &Path, names: &[&str]) -> Result<Self> {
        let mut staged = Self {
            entries: Vec::with_capacity(names.len()),
        };

        for &name in names {
            let plain = dir.join(name);
            if plain.exists() {
                staged.entries.push(Entry {
                    name: name.to_string(),
                    path: plain,
                    scratch: false,
                });
                continue;
            }

            let gz = dir.join(format!("{name}.gz"));
            if !gz.exists() {
                return Err(DataError::MissingFile(plain));
            }

            info!("unpacking {}", gz.display());
            // Register the scratch path before writing so a failed unpack
            // still gets cleaned up by Drop.
            staged.entries.push(Entry {
                name: name.to_string(),
                path: plain.clone(),
                scratch: true,
            });
            let mut decoder = GzDecoder::new(File::open(&gz)?);
            let mut out = File::create(&plain)?;
            io::copy(&mut decoder, &mut out)?;
        }

        Ok(staged)
    }

    /// Path of a staged logical name.
    pub fn path(&self, name: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.path.as_path())
    }

    /// Read the staged bytes for a logical name.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        match self.path(name) {
            Some(path) => Ok(fs::read(path)?),
            None => Err(DataError::MissingFile(PathBuf::from(name))),
        }
    }
}

impl Drop for StagedFiles {
    fn drop(&mut self) {
        for e in &self.entries {
            if e.scratch && e.path.exists() {
                if let Err(err) = fs::remove_file(&e.path) {
                    warn!("could not remove scratch file {}: {err}", e.path.display());
                }
            }
        }
    }
}

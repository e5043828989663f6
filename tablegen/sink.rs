//! Destinations for generated artifacts.

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{emit::Artifact, Error, Result};

pub trait Sink {
    fn write(&mut self, artifact: &Artifact) -> Result<()>;
}

/// Writes each artifact into a directory, replacing any previous file
/// atomically.
#[derive(Debug)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Sink for DirSink {
    fn write(&mut self, artifact: &Artifact) -> Result<()> {
        let path = self.dir.join(&artifact.name);
        let mut file = NamedTempFile::new_in(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        if let Err(e) = file.write_all(&artifact.bytes()) {
            return Err(Error::io(file.path(), e));
        }
        file.persist(&path).map_err(|e| Error::io(&path, e.error))?;
        tracing::debug!(path = %path.display(), "wrote artifact");
        Ok(())
    }
}

/// Keeps artifacts in memory, keyed by file name.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.files
            .get(name)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

impl Sink for MemorySink {
    fn write(&mut self, artifact: &Artifact) -> Result<()> {
        self.files.insert(artifact.name.clone(), artifact.bytes());
        Ok(())
    }
}

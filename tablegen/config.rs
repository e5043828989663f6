//! Generator configuration, read from an optional TOML file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use serde::Deserialize;

use crate::{dump::DEFAULT_DUMP_FILE, emit::HeaderTemplate, patch::PatchConfig, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory receiving every artifact.
    pub output_dir: PathBuf,
    /// Name of the cleaned schema dump.
    pub dump_file: String,
    pub headers: HeadersConfig,
    pub patch: PatchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            dump_file: DEFAULT_DUMP_FILE.to_string(),
            headers: HeadersConfig::default(),
            patch: PatchConfig::default(),
        }
    }
}

/// Optional header template files; relative paths resolve against the
/// configuration file's directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadersConfig {
    pub table: Option<PathBuf>,
    pub data: Option<PathBuf>,
}

impl Config {
    pub fn from_toml(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = Self::from_toml(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent() {
            config.headers.resolve(base);
        }
        Ok(config)
    }

    /// Header templates for the table and sample data modules.
    pub fn header_templates(
        &self,
        generated_at: &DateTime<Local>,
    ) -> Result<(HeaderTemplate, HeaderTemplate)> {
        let table = match &self.headers.table {
            Some(path) => read_template(path)?,
            None => HeaderTemplate::table_default(generated_at),
        };
        let data = match &self.headers.data {
            Some(path) => read_template(path)?,
            None => HeaderTemplate::data_default(generated_at),
        };
        Ok((table, data))
    }
}

impl HeadersConfig {
    fn resolve(&mut self, base: &Path) {
        for path in [&mut self.table, &mut self.data].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

fn read_template(path: &Path) -> Result<HeaderTemplate> {
    fs::read_to_string(path)
        .map(HeaderTemplate::new)
        .map_err(|e| Error::io(path, e))
}

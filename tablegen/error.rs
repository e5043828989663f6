use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("schema catalog error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("table {table} has no primary key")]
    MissingPrimaryKey { table: String },
    #[error("table {table} has a composite primary key ({})", columns.join(", "))]
    CompositePrimaryKey { table: String, columns: Vec<String> },
    #[error("column {table}.{column} has unmapped type `{declared}`")]
    UnmappedType {
        table: String,
        column: String,
        declared: String,
    },
    #[error("index {index} has no INDEX keyword: `{definition}`")]
    MalformedIndex { index: String, definition: String },
    #[error("seed value for {table}.{column} is a blob")]
    UnsupportedSeedValue { table: String, column: String },
    #[error("patch table {table} has no field {field}")]
    PatchField { table: String, field: String },
    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("formatting error")]
    Fmt(#[from] std::fmt::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

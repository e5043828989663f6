//! Schema introspection.
//!
//! The schema source is executed into an in-memory SQLite database and read
//! back through `sqlite_master` and `PRAGMA table_info`, so the engine does
//! all of the SQL parsing.

use rusqlite::{types::ValueRef, Connection};

use crate::{
    model::{Index, SeedRow, SeedValue},
    Error, Result,
};

/// A column as reported by the catalog, before type mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub ordinal: usize,
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

/// Read-only view of a loaded schema.
pub trait Catalog {
    /// `(name, definition)` pairs sorted by name, engine tables excluded.
    fn list_tables(&self) -> Result<Vec<(String, String)>>;
    /// Columns in declaration order.
    fn list_columns(&self, table: &str) -> Result<Vec<ColumnInfo>>;
    /// Declared indices sorted by name, engine-generated ones excluded.
    fn list_indices(&self, table: &str) -> Result<Vec<Index>>;
    /// Rows present after the schema was loaded, in storage order.
    fn list_rows(&self, table: &str) -> Result<Vec<SeedRow>>;
}

pub struct SqliteCatalog {
    conn: Connection,
}

impl SqliteCatalog {
    /// Load a schema script into a fresh in-memory database.
    pub fn load(sql: &str) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(sql)?;
        Ok(Self { conn })
    }
}

impl Catalog for SqliteCatalog {
    fn list_tables(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, sql FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name",
        )?;
        let tables = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tables)
    }

    fn list_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let query = format!("PRAGMA table_info({})", quote_ident(table));
        let mut stmt = self.conn.prepare(&query)?;

        // PRAGMA table_info returns: cid, name, type, notnull, dflt_value, pk
        let columns = stmt
            .query_map([], |row| {
                let cid: i64 = row.get(0)?;
                let notnull: i64 = row.get(3)?;
                let pk: i64 = row.get(5)?;
                Ok(ColumnInfo {
                    ordinal: cid as usize,
                    name: row.get(1)?,
                    declared_type: row.get::<_, String>(2)?.to_uppercase(),
                    not_null: notnull != 0,
                    primary_key: pk != 0,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(columns)
    }

    fn list_indices(&self, table: &str) -> Result<Vec<Index>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, sql FROM sqlite_master \
             WHERE type = 'index' AND tbl_name = ?1 \
             AND name NOT LIKE 'sqlite_autoindex_%' AND sql IS NOT NULL \
             ORDER BY name",
        )?;
        let indices = stmt
            .query_map([table], |row| {
                Ok(Index {
                    name: row.get(0)?,
                    definition: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(indices)
    }

    fn list_rows(&self, table: &str) -> Result<Vec<SeedRow>> {
        let query = format!("SELECT * FROM {}", quote_ident(table));
        let mut stmt = self.conn.prepare(&query)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query([])?;
        let mut seed_rows = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                let value = match row.get_ref(i)? {
                    ValueRef::Null => SeedValue::Null,
                    ValueRef::Integer(v) => SeedValue::Integer(v),
                    ValueRef::Real(v) => SeedValue::Real(v),
                    ValueRef::Text(bytes) => {
                        SeedValue::Text(String::from_utf8_lossy(bytes).into_owned())
                    }
                    ValueRef::Blob(_) => {
                        return Err(Error::UnsupportedSeedValue {
                            table: table.to_string(),
                            column: name.clone(),
                        })
                    }
                };
                values.push((name.clone(), value));
            }
            seed_rows.push(SeedRow::new(values));
        }
        Ok(seed_rows)
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

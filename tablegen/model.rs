//! Per-table model assembled from the catalog and the registry.

use std::iter;

use crate::{
    catalog::{Catalog, ColumnInfo},
    registry::{self, DeclaredType, TypeMapping},
    statement::TableStatements,
    Error, Result,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Position assigned by the catalog; also the result-set column index.
    pub ordinal: usize,
    pub name: String,
    pub declared_type: DeclaredType,
    pub nullable: bool,
    pub primary_key: bool,
}

impl Field {
    pub fn mapping(&self) -> TypeMapping {
        self.declared_type.mapping()
    }

    /// Identifier used in the generated column enumeration.
    pub fn col_id(&self) -> String {
        format!("COL_ID_{}", self.name.to_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub name: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeedValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SeedValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SeedValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One pre-populated row, keyed by field name in storage column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeedRow {
    values: Vec<(String, SeedValue)>,
}

impl SeedRow {
    pub fn new(values: Vec<(String, SeedValue)>) -> Self {
        Self { values }
    }

    pub fn get(&self, field: &str) -> Option<&SeedValue> {
        self.values
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(field))
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SeedValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn values(&self) -> impl Iterator<Item = &SeedValue> {
        self.values.iter().map(|(_, value)| value)
    }
}

#[derive(Debug, Clone)]
pub struct TableModel {
    pub name: String,
    pub class_basename: String,
    /// Declaration order.
    pub fields: Vec<Field>,
    primary: usize,
    pub indices: Vec<Index>,
    pub seed_rows: Vec<SeedRow>,
    pub statements: TableStatements,
}

impl TableModel {
    /// Introspect one table and assemble its model.
    pub fn build(catalog: &dyn Catalog, name: &str, definition: &str) -> Result<Self> {
        let fields = catalog
            .list_columns(name)?
            .into_iter()
            .map(|column| field_from_column(name, column))
            .collect::<Result<Vec<_>>>()?;
        let indices = catalog.list_indices(name)?;
        let seed_rows = catalog.list_rows(name)?;
        let model = Self::new(name, definition, fields, indices, seed_rows)?;
        tracing::debug!(
            table = name,
            fields = model.fields.len(),
            indices = model.indices.len(),
            seed_rows = model.seed_rows.len(),
            "built table model"
        );
        Ok(model)
    }

    pub fn new(
        name: &str,
        definition: &str,
        fields: Vec<Field>,
        indices: Vec<Index>,
        seed_rows: Vec<SeedRow>,
    ) -> Result<Self> {
        let keys: Vec<usize> = fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.primary_key)
            .map(|(pos, _)| pos)
            .collect();
        let primary = match keys.as_slice() {
            [pos] => *pos,
            [] => {
                return Err(Error::MissingPrimaryKey {
                    table: name.to_string(),
                })
            }
            _ => {
                return Err(Error::CompositePrimaryKey {
                    table: name.to_string(),
                    columns: keys.iter().map(|pos| fields[*pos].name.clone()).collect(),
                })
            }
        };

        let mut model = Self {
            name: name.to_string(),
            class_basename: registry::class_basename(name).into_owned(),
            fields,
            primary,
            indices,
            seed_rows,
            statements: TableStatements::default(),
        };
        model.statements = TableStatements::new(&model, definition)?;
        Ok(model)
    }

    pub fn primary(&self) -> &Field {
        &self.fields[self.primary]
    }

    /// Every field except the primary key, declaration order kept.
    pub fn others(&self) -> impl Iterator<Item = &Field> {
        let primary = self.primary;
        self.fields
            .iter()
            .enumerate()
            .filter(move |(pos, _)| *pos != primary)
            .map(|(_, field)| field)
    }

    /// Column enumeration order: primary key first.
    pub fn columns(&self) -> impl Iterator<Item = &Field> {
        iter::once(self.primary()).chain(self.others())
    }

    /// Statement parameter order: primary key last.
    pub fn bind_order(&self) -> impl Iterator<Item = &Field> {
        self.others().chain(iter::once(self.primary()))
    }

    pub fn col_name(&self) -> String {
        format!("{}Col", self.class_basename)
    }

    pub fn row_name(&self) -> String {
        format!("{}Row", self.class_basename)
    }

    pub fn data_name(&self) -> String {
        format!("{}Data", self.class_basename)
    }

    pub fn table_name(&self) -> String {
        format!("{}Table", self.class_basename)
    }
}

fn field_from_column(table: &str, column: ColumnInfo) -> Result<Field> {
    let declared_type = column
        .declared_type
        .parse::<DeclaredType>()
        .map_err(|_| Error::UnmappedType {
            table: table.to_string(),
            column: column.name.clone(),
            declared: column.declared_type.clone(),
        })?;
    Ok(Field {
        ordinal: column.ordinal,
        name: column.name,
        declared_type,
        nullable: !column.not_null && !column.primary_key,
        primary_key: column.primary_key,
    })
}

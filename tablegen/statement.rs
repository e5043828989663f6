//! SQL statement texts embedded in the generated table modules.
//!
//! All of them are derived once, when the table model is built, from the
//! model's own field orderings.

use std::fmt::{self, Display};

use itertools::Itertools;

use crate::{
    literal::Literal,
    model::{Index, TableModel},
    Error, Result,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableStatements {
    pub create: CreateTable,
    pub drop: DropTable,
    pub indices: Vec<CreateIndex>,
    pub insert: Insert,
    pub update: Update,
    pub delete: Delete,
    pub select: Select,
    pub seed: Vec<SeedInsert>,
}

impl TableStatements {
    pub fn new(model: &TableModel, definition: &str) -> Result<Self> {
        let table = model.name.clone();
        let key = model.primary().name.clone();
        Ok(Self {
            create: CreateTable {
                definition: definition.to_string(),
            },
            drop: DropTable {
                table: table.clone(),
            },
            indices: model
                .indices
                .iter()
                .map(CreateIndex::if_not_exists)
                .collect::<Result<_>>()?,
            insert: Insert {
                table: table.clone(),
                columns: model.bind_order().map(|f| f.name.clone()).collect(),
            },
            update: Update {
                table: table.clone(),
                columns: model.others().map(|f| f.name.clone()).collect(),
                key: key.clone(),
            },
            delete: Delete {
                table: table.clone(),
                key,
            },
            select: Select {
                table: table.clone(),
                columns: model.fields.iter().map(|f| f.name.clone()).collect(),
            },
            seed: model
                .seed_rows
                .iter()
                .map(|row| SeedInsert {
                    table: table.clone(),
                    values: row.values().map(Literal::classify).collect(),
                })
                .collect(),
        })
    }
}

/// The table definition exactly as the schema declared it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTable {
    pub definition: String,
}

impl Display for CreateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.definition)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropTable {
    pub table: String,
}

impl Display for DropTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP TABLE IF EXISTS {}", self.table)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIndex {
    pub definition: String,
}

impl CreateIndex {
    /// Rewrites an index definition so it is a no-op when the index exists.
    ///
    /// `IF NOT EXISTS` goes right after the `INDEX` keyword; the rest of the
    /// text is kept as is.
    pub fn if_not_exists(index: &Index) -> Result<Self> {
        let text = index.definition.as_str();
        let malformed = || Error::MalformedIndex {
            index: index.name.clone(),
            definition: text.to_string(),
        };

        let mut rest = text;
        let mut offset = 0;
        for _ in 0..3 {
            let trimmed = rest.trim_start();
            offset += rest.len() - trimmed.len();
            let word_len = trimmed
                .find(|c: char| c.is_whitespace())
                .unwrap_or(trimmed.len());
            let word = &trimmed[..word_len];
            offset += word_len;
            rest = &trimmed[word_len..];

            if word.eq_ignore_ascii_case("INDEX") {
                let already = rest
                    .split_whitespace()
                    .take(3)
                    .map(str::to_uppercase)
                    .eq(["IF", "NOT", "EXISTS"]);
                let definition = if already {
                    text.to_string()
                } else {
                    format!("{} IF NOT EXISTS{}", &text[..offset], &text[offset..])
                };
                return Ok(Self { definition });
            }
        }
        Err(malformed())
    }
}

impl Display for CreateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.definition)
    }
}

/// Parameterised insert; columns are in bind order, primary key last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
}

impl Insert {
    pub fn placeholders(&self) -> usize {
        self.columns.len()
    }
}

impl Display for Insert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "INSERT INTO {}({}) VALUES({})",
            self.table,
            self.columns.iter().join(", "),
            self.columns.iter().map(|_| "?").join(", ")
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Update {
    pub table: String,
    pub columns: Vec<String>,
    pub key: String,
}

impl Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            // nothing to set, keep a single key parameter
            return write!(
                f,
                "UPDATE {} SET {} = {} WHERE {} = ?",
                self.table, self.key, self.key, self.key
            );
        }
        write!(
            f,
            "UPDATE {} SET {} WHERE {} = ?",
            self.table,
            self.columns.iter().map(|c| format!("{c} = ?")).join(", "),
            self.key
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delete {
    pub table: String,
    pub key: String,
}

impl Display for Delete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {} WHERE {} = ?", self.table, self.key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Select {
    pub table: String,
    pub columns: Vec<String>,
}

impl Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SELECT {} FROM {}",
            self.columns.iter().join(", "),
            self.table
        )
    }
}

/// Positional insert of one seed row.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedInsert {
    pub table: String,
    pub values: Vec<Literal>,
}

impl SeedInsert {
    /// A row with any wrapped value must be assembled at runtime.
    pub fn is_formatted(&self) -> bool {
        self.values.iter().any(Literal::is_wrapped)
    }

    /// Statement text; wrapped values become `'%s'` slots and `%` in plain
    /// values is doubled when the text is a format string.
    pub fn text(&self) -> String {
        let formatted = self.is_formatted();
        let values = self
            .values
            .iter()
            .map(|value| match value {
                Literal::Plain(token) if formatted => token.replace('%', "%%"),
                Literal::Plain(token) => token.clone(),
                Literal::Localized(_) | Literal::Wide(_) => "'%s'".to_string(),
            })
            .join(", ");
        format!("INSERT INTO {} VALUES ({values})", self.table)
    }

    /// Source text of the formatting arguments, in column order.
    pub fn arguments(&self) -> Vec<String> {
        self.values.iter().filter_map(Literal::argument).collect()
    }
}

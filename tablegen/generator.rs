//! One generation pass: schema text in, artifacts out.

use std::{fs, path::Path};

use chrono::{DateTime, Local};

use crate::{
    catalog::{Catalog, SqliteCatalog},
    config::Config,
    dump,
    emit::{self, Artifact, HeaderTemplate},
    model::TableModel,
    patch::{self, PatchVariant},
    sink::Sink,
    Error, Result,
};

/// Output kinds, toggled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputKinds {
    /// Cleaned schema dump.
    pub dump: bool,
    /// Table interface and implementation modules.
    pub tables: bool,
    /// Sample data modules.
    pub data: bool,
    /// Patch scripts for the designated seed table.
    pub patch: bool,
}

impl OutputKinds {
    pub const NONE: Self = Self {
        dump: false,
        tables: false,
        data: false,
        patch: false,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// The selection itself, or the default one when nothing is selected.
    pub fn or_default(self) -> Self {
        if self.is_empty() {
            Self::default()
        } else {
            self
        }
    }
}

impl Default for OutputKinds {
    fn default() -> Self {
        Self {
            tables: true,
            patch: true,
            ..Self::NONE
        }
    }
}

pub struct Generator {
    config: Config,
    kinds: OutputKinds,
    table_header: HeaderTemplate,
    data_header: HeaderTemplate,
}

impl Generator {
    pub fn new(config: Config, kinds: OutputKinds, generated_at: &DateTime<Local>) -> Result<Self> {
        let (table_header, data_header) = config.header_templates(generated_at)?;
        Ok(Self {
            config,
            kinds,
            table_header,
            data_header,
        })
    }

    pub fn with_headers(
        config: Config,
        kinds: OutputKinds,
        table_header: HeaderTemplate,
        data_header: HeaderTemplate,
    ) -> Self {
        Self {
            config,
            kinds,
            table_header,
            data_header,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Renders every enabled artifact without writing anything.
    ///
    /// Tables are visited in name order; any schema or model error aborts
    /// the whole pass.
    pub fn render(&self, source_name: &str, source: &str) -> Result<Vec<Artifact>> {
        let mut artifacts = Vec::new();
        if self.kinds.dump {
            artifacts.push(Artifact {
                name: self.config.dump_file.clone(),
                description: "clean database without translation".to_string(),
                contents: dump::render(source_name, source),
                bom: false,
            });
        }

        let catalog = SqliteCatalog::load(source)?;
        let mut patched = false;
        for (name, definition) in catalog.list_tables()? {
            let model = TableModel::build(&catalog, &name, &definition)?;
            if self.kinds.tables {
                artifacts.push(emit::table_interface(&model, &self.table_header));
                artifacts.push(emit::table_implementation(&model, &self.table_header));
            }
            if self.kinds.data {
                artifacts.push(emit::data_interface(&model, &self.data_header));
                artifacts.push(emit::data_implementation(&model, &self.data_header));
            }
            if self.kinds.patch && name.eq_ignore_ascii_case(&self.config.patch.table) {
                artifacts.extend(self.patches(&model)?);
                patched = true;
            }
        }
        if self.kinds.patch && !patched {
            tracing::warn!(
                table = %self.config.patch.table,
                "patch table not found in schema, no patch written"
            );
        }
        Ok(artifacts)
    }

    fn patches(&self, model: &TableModel) -> Result<[Artifact; 2]> {
        let patch = &self.config.patch;
        let artifact = |name: &str, variant| -> Result<Artifact> {
            Ok(Artifact {
                name: name.to_string(),
                description: format!("patch for {}", model.name),
                contents: patch::render(model, patch, variant)?,
                bom: false,
            })
        };
        Ok([
            artifact(&patch.full_file, PatchVariant::Full)?,
            artifact(&patch.unicode_file, PatchVariant::UnicodeOnly)?,
        ])
    }

    /// Renders everything, then writes it; returns what was written.
    pub fn run(&self, source_name: &str, source: &str, sink: &mut dyn Sink) -> Result<Vec<Artifact>> {
        let artifacts = self.render(source_name, source)?;
        for artifact in &artifacts {
            sink.write(artifact)?;
        }
        tracing::info!(
            source = source_name,
            artifacts = artifacts.len(),
            "generation finished"
        );
        Ok(artifacts)
    }

    pub fn run_file(&self, schema: &Path, sink: &mut dyn Sink) -> Result<Vec<Artifact>> {
        let source = fs::read_to_string(schema).map_err(|e| Error::io(schema, e))?;
        let source_name = schema
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| schema.display().to_string());
        self.run(&source_name, &source, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    const SCHEMA: &str = "
CREATE TABLE TAG_V1(TAGID INTEGER PRIMARY KEY, TAGNAME TEXT NOT NULL, ACTIVE INTEGER);
CREATE TABLE CURRENCYFORMATS_V1(CURRENCYID INTEGER PRIMARY KEY, CURRENCYNAME TEXT, CURRENCY_SYMBOL TEXT);
INSERT INTO CURRENCYFORMATS_V1 VALUES (1, '_tr_Euro', '€');
";

    fn generator(kinds: OutputKinds) -> Generator {
        Generator::with_headers(
            Config::default(),
            kinds,
            HeaderTemplate::new("// @file\n"),
            HeaderTemplate::new("// @file\n"),
        )
    }

    fn names(artifacts: &[Artifact]) -> Vec<&str> {
        artifacts.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_default_kinds() {
        assert_eq!(OutputKinds::NONE.or_default(), OutputKinds::default());
        let data_only = OutputKinds {
            data: true,
            ..OutputKinds::NONE
        };
        assert_eq!(data_only.or_default(), data_only);
    }

    #[test]
    fn test_tables_in_name_order() {
        let artifacts = generator(OutputKinds::default())
            .render("tables.sql", SCHEMA)
            .unwrap();
        assert_eq!(
            names(&artifacts),
            [
                "CurrencyTable.h",
                "CurrencyTable.cpp",
                "patch_currency.sql",
                "patch_currency_utf8.sql",
                "TagTable.h",
                "TagTable.cpp",
            ]
        );
    }

    #[test]
    fn test_all_kinds() {
        let kinds = OutputKinds {
            dump: true,
            tables: false,
            data: true,
            patch: false,
        };
        let mut sink = MemorySink::default();
        generator(kinds).run("tables.sql", SCHEMA, &mut sink).unwrap();
        assert_eq!(
            sink.files.keys().map(String::as_str).collect::<Vec<_>>(),
            ["CurrencyData.cpp", "CurrencyData.h", "TagData.cpp", "TagData.h", "tables_en.sql"]
        );
        assert!(sink.text("tables_en.sql").unwrap().contains("'Euro'"));
    }

    #[test]
    fn test_error_writes_nothing() {
        let schema = format!("{SCHEMA}\nCREATE TABLE BAD(A TEXT);");
        let mut sink = MemorySink::default();
        let err = generator(OutputKinds::default())
            .run("tables.sql", &schema, &mut sink)
            .unwrap_err();
        assert!(matches!(err, Error::MissingPrimaryKey { table } if table == "BAD"));
        assert!(sink.files.is_empty());
    }

    #[test]
    fn test_missing_patch_table_is_skipped() {
        let artifacts = generator(OutputKinds::default())
            .render("tables.sql", "CREATE TABLE K(ID INTEGER PRIMARY KEY);")
            .unwrap();
        assert_eq!(names(&artifacts), ["K_Table.h", "K_Table.cpp"]);
    }
}

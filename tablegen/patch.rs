//! Upsert scripts for the seed rows of one designated table.
//!
//! Each seed row becomes an `INSERT OR IGNORE` of its natural key and
//! display name followed by an `UPDATE OR IGNORE` of every other value,
//! keyed by the natural key. Localization markers never reach the script.

use std::fmt::Write;

use itertools::Itertools;
use serde::Deserialize;

use crate::{
    literal::{format_real, sql_quote, strip_all_markers},
    model::{SeedRow, SeedValue, TableModel},
    Error, Result,
};

/// `[patch]` section of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchConfig {
    /// Table whose seed rows are patched.
    pub table: String,
    /// Update key; not required to be the primary key.
    pub natural_key: String,
    /// Inserted together with the natural key.
    pub name_field: String,
    pub full_file: String,
    pub unicode_file: String,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            table: "CURRENCYFORMATS_V1".to_string(),
            natural_key: "CURRENCY_SYMBOL".to_string(),
            name_field: "CURRENCYNAME".to_string(),
            full_file: "patch_currency.sql".to_string(),
            unicode_file: "patch_currency_utf8.sql".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchVariant {
    Full,
    /// Only rows writing at least one non-ASCII value.
    UnicodeOnly,
}

/// Renders one patch script.
///
/// Rows sharing a natural key overwrite each other when the script runs;
/// nothing here checks that the key is unique.
pub fn render(model: &TableModel, config: &PatchConfig, variant: PatchVariant) -> Result<String> {
    for field in [&config.natural_key, &config.name_field] {
        if !model.fields.iter().any(|f| f.name.eq_ignore_ascii_case(field)) {
            return Err(Error::PatchField {
                table: model.name.clone(),
                field: field.clone(),
            });
        }
    }

    let mut script = String::new();
    writeln!(script, "-- Seed data patch for {} --", model.name)?;
    write!(
        script,
        "-- This script adds missing rows and overwrites their parameters."
    )?;
    if variant == PatchVariant::UnicodeOnly {
        write!(script, "\n-- Only rows with unicode text are affected.")?;
    }

    let primary = &model.primary().name;
    for row in &model.seed_rows {
        let assignments = row
            .iter()
            .filter(|(name, _)| {
                !name.eq_ignore_ascii_case(primary) && !name.eq_ignore_ascii_case(&config.natural_key)
            })
            .map(|(name, value)| format!("{name}={}", patch_value(value)))
            .join(", ");
        let key = patch_value(field_value(row, &config.natural_key));
        let display = patch_value(field_value(row, &config.name_field));
        if variant == PatchVariant::UnicodeOnly
            && [&assignments, &key, &display].iter().all(|s| s.is_ascii())
        {
            continue;
        }
        write!(
            script,
            "\nINSERT OR IGNORE INTO {table} ({name_field}, {natural_key}) VALUES ({display}, {key});",
            table = model.name,
            name_field = config.name_field,
            natural_key = config.natural_key,
        )?;
        if assignments.is_empty() {
            continue;
        }
        write!(
            script,
            "\nUPDATE OR IGNORE {} SET {assignments} WHERE {}={key};",
            model.name, config.natural_key
        )?;
    }
    writeln!(script)?;
    Ok(script)
}

fn field_value<'a>(row: &'a SeedRow, field: &str) -> &'a SeedValue {
    row.get(field).unwrap_or(&SeedValue::Null)
}

/// Plain SQL token with every marker occurrence removed.
fn patch_value(value: &SeedValue) -> String {
    match value {
        SeedValue::Null => "NULL".to_string(),
        SeedValue::Integer(i) => sql_quote(&i.to_string()),
        SeedValue::Real(r) => sql_quote(&format_real(*r)),
        SeedValue::Text(text) => sql_quote(&strip_all_markers(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{literal::LOCALIZATION_MARKER, model::tests::field, registry::DeclaredType};

    fn row(id: i64, name: &str, symbol: &str, scale: f64) -> SeedRow {
        SeedRow::new(vec![
            ("CURRENCYID".into(), SeedValue::Integer(id)),
            ("CURRENCYNAME".into(), SeedValue::Text(name.into())),
            ("CURRENCY_SYMBOL".into(), SeedValue::Text(symbol.into())),
            ("SCALE".into(), SeedValue::Real(scale)),
            ("PFX_SYMBOL".into(), SeedValue::Null),
        ])
    }

    fn currency_model(rows: Vec<SeedRow>) -> TableModel {
        TableModel::new(
            "CURRENCYFORMATS_V1",
            "CREATE TABLE CURRENCYFORMATS_V1(CURRENCYID INTEGER PRIMARY KEY, CURRENCYNAME TEXT, CURRENCY_SYMBOL TEXT, SCALE REAL, PFX_SYMBOL TEXT)",
            vec![
                field(0, "CURRENCYID", DeclaredType::Integer, true),
                field(1, "CURRENCYNAME", DeclaredType::Text, false),
                field(2, "CURRENCY_SYMBOL", DeclaredType::Text, false),
                field(3, "SCALE", DeclaredType::Real, false),
                field(4, "PFX_SYMBOL", DeclaredType::Text, false),
            ],
            vec![],
            rows,
        )
        .unwrap()
    }

    #[test]
    fn test_full_patch_strips_markers() {
        let model = currency_model(vec![
            row(1, "_tr_Euro", "€", 100.0),
            row(2, "_tr_US Dollar", "USD", 0.01),
        ]);
        let script = render(&model, &PatchConfig::default(), PatchVariant::Full).unwrap();
        assert!(script.starts_with("-- Seed data patch for CURRENCYFORMATS_V1 --\n"));
        assert!(script.contains(
            "\nINSERT OR IGNORE INTO CURRENCYFORMATS_V1 (CURRENCYNAME, CURRENCY_SYMBOL) VALUES ('Euro', '€');\nUPDATE OR IGNORE CURRENCYFORMATS_V1 SET CURRENCYNAME='Euro', SCALE='100.0', PFX_SYMBOL=NULL WHERE CURRENCY_SYMBOL='€';"
        ));
        assert!(script.contains("VALUES ('US Dollar', 'USD');"));
        assert!(script.contains("SCALE='0.01'"));
        assert!(!script.contains(LOCALIZATION_MARKER));
        assert!(!script.contains("CURRENCYID="));
        assert!(script.ends_with(";\n"));
    }

    #[test]
    fn test_unicode_patch_keeps_only_non_ascii_rows() {
        let model = currency_model(vec![
            row(1, "_tr_Euro", "€", 100.0),
            row(2, "_tr_US Dollar", "$", 100.0),
            row(3, "日本円", "JPY", 1.0),
        ]);
        let script = render(&model, &PatchConfig::default(), PatchVariant::UnicodeOnly).unwrap();
        assert!(script.contains("\n-- Only rows with unicode text are affected."));
        assert!(script.contains("WHERE CURRENCY_SYMBOL='€';"));
        assert!(script.contains("SET CURRENCYNAME='日本円'"));
        assert!(!script.contains("US Dollar"));
    }

    #[test]
    fn test_unicode_natural_key_qualifies() {
        let model = currency_model(vec![SeedRow::new(vec![
            ("CURRENCYID".into(), SeedValue::Integer(2)),
            ("CURRENCYNAME".into(), SeedValue::Text("_tr_Euro".into())),
            ("CURRENCY_SYMBOL".into(), SeedValue::Text("€".into())),
        ])]);
        let script = render(&model, &PatchConfig::default(), PatchVariant::UnicodeOnly).unwrap();
        assert!(script.contains(
            "\nINSERT OR IGNORE INTO CURRENCYFORMATS_V1 (CURRENCYNAME, CURRENCY_SYMBOL) VALUES ('Euro', '€');\nUPDATE OR IGNORE CURRENCYFORMATS_V1 SET CURRENCYNAME='Euro' WHERE CURRENCY_SYMBOL='€';"
        ));
    }

    #[test]
    fn test_spliced_marker_is_stripped() {
        let model = currency_model(vec![row(1, "_t_tr_r_Euro", "EUR", 100.0)]);
        let script = render(&model, &PatchConfig::default(), PatchVariant::Full).unwrap();
        assert!(script.contains("VALUES ('Euro', 'EUR');"));
        assert!(!script.contains(LOCALIZATION_MARKER));
    }

    #[test]
    fn test_missing_natural_key_field() {
        let model = currency_model(vec![]);
        let config = PatchConfig {
            natural_key: "ISO".into(),
            ..PatchConfig::default()
        };
        let err = render(&model, &config, PatchVariant::Full).unwrap_err();
        assert!(matches!(err, Error::PatchField { field, .. } if field == "ISO"));
    }
}

//! Static name and type lookup tables.
//!
//! Everything here is a process-wide constant: the schema-table to class
//! basename overrides, the declared-type to target-type mapping, and the
//! field names that get special sort treatment.

use std::{borrow::Cow, fmt::Display, str::FromStr};

/// Schema table name to generated class basename, sorted by table name.
const TABLE_BASENAMES: &[(&str, &str)] = &[
    ("ACCOUNTLIST_V1", "Account"),
    ("ASSETS_V1", "Asset"),
    ("ATTACHMENT_V1", "Attachment"),
    ("BILLSDEPOSITS_V1", "Scheduled"),
    ("BUDGETSPLITTRANSACTIONS_V1", "ScheduledSplit"),
    ("BUDGETTABLE_V1", "Budget"),
    ("BUDGETYEAR_V1", "BudgetPeriod"),
    ("CATEGORY_V1", "Category"),
    ("CHECKINGACCOUNT_V1", "Transaction"),
    ("CURRENCYFORMATS_V1", "Currency"),
    ("CURRENCYHISTORY_V1", "CurrencyHistory"),
    ("CUSTOMFIELDDATA_V1", "FieldValue"),
    ("CUSTOMFIELD_V1", "Field"),
    ("INFOTABLE_V1", "Info"),
    ("PAYEE_V1", "Payee"),
    ("REPORT_V1", "Report"),
    ("SETTING_V1", "Setting"),
    ("SHAREINFO_V1", "TransactionShare"),
    ("SPLITTRANSACTIONS_V1", "TransactionSplit"),
    ("STOCKHISTORY_V1", "StockHistory"),
    ("STOCK_V1", "Stock"),
    ("TAGLINK_V1", "TagLink"),
    ("TAG_V1", "Tag"),
    ("TRANSLINK_V1", "TransactionLink"),
    ("USAGE_V1", "Usage"),
];

/// Fields sorted by lower-cased, locale-aware comparison.
const DISPLAY_NAME_FIELDS: &[&str] = &["ACCOUNTNAME", "CATEGNAME", "PAYEENAME", "SUBCATEGNAME"];

/// Fields sorted by their translated form.
const LOCALIZED_NAME_FIELDS: &[&str] = &["CURRENCYNAME"];

/// Returns the class basename for a schema table.
///
/// Tables without an explicit entry fall back to `<table>_`.
pub fn class_basename(table: &str) -> Cow<'static, str> {
    match TABLE_BASENAMES.binary_search_by_key(&table, |&(name, _)| name) {
        Ok(pos) => Cow::Borrowed(TABLE_BASENAMES[pos].1),
        Err(_) => Cow::Owned(format!("{table}_")),
    }
}

/// Column types accepted in a schema definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    Text,
    Numeric,
    Integer,
    Real,
    Blob,
    Date,
}

impl DeclaredType {
    pub const ALL: [DeclaredType; 6] = [
        DeclaredType::Text,
        DeclaredType::Numeric,
        DeclaredType::Integer,
        DeclaredType::Real,
        DeclaredType::Blob,
        DeclaredType::Date,
    ];

    /// Target value type and result-set accessor for this declared type.
    pub const fn mapping(self) -> TypeMapping {
        match self {
            DeclaredType::Text => TypeMapping::new("wxString", "GetString", ValueKind::Text),
            DeclaredType::Numeric => TypeMapping::new("double", "GetDouble", ValueKind::Real),
            DeclaredType::Integer => TypeMapping::new("int64", "GetInt64", ValueKind::Integer),
            DeclaredType::Real => TypeMapping::new("double", "GetDouble", ValueKind::Real),
            DeclaredType::Blob => TypeMapping::new("wxString", "GetString", ValueKind::Text),
            DeclaredType::Date => TypeMapping::new("wxDateTime", "GetDateTime", ValueKind::Date),
        }
    }
}

impl FromStr for DeclaredType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TEXT" => Ok(DeclaredType::Text),
            "NUMERIC" => Ok(DeclaredType::Numeric),
            "INTEGER" => Ok(DeclaredType::Integer),
            "REAL" => Ok(DeclaredType::Real),
            "BLOB" => Ok(DeclaredType::Blob),
            "DATE" => Ok(DeclaredType::Date),
            _ => Err(()),
        }
    }
}

impl Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeclaredType::Text => "TEXT",
            DeclaredType::Numeric => "NUMERIC",
            DeclaredType::Integer => "INTEGER",
            DeclaredType::Real => "REAL",
            DeclaredType::Blob => "BLOB",
            DeclaredType::Date => "DATE",
        };
        write!(f, "{name}")
    }
}

/// How a generated member behaves: drives initialisation, JSON and
/// comparison code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Real,
    Integer,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    pub value_type: &'static str,
    pub accessor: &'static str,
    pub kind: ValueKind,
}

impl TypeMapping {
    const fn new(value_type: &'static str, accessor: &'static str, kind: ValueKind) -> Self {
        Self {
            value_type,
            accessor,
            kind,
        }
    }
}

/// Comparison used by a generated `SorterBy<FIELD>` functor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortRule {
    /// Lower-cased, locale collated.
    CaseInsensitive,
    /// Compared on the translated display form.
    Localized,
    Natural,
}

impl SortRule {
    pub fn for_field(name: &str) -> Self {
        if DISPLAY_NAME_FIELDS.contains(&name) {
            SortRule::CaseInsensitive
        } else if LOCALIZED_NAME_FIELDS.contains(&name) {
            SortRule::Localized
        } else {
            SortRule::Natural
        }
    }
}

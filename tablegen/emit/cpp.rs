//! Per-member C++ snippets shared by the row and data emitters.

use std::fmt::{self, Formatter};

use crate::{
    model::{Field, TableModel},
    registry::{SortRule, ValueKind},
};

/// Member declarations, primary key first and marked as such.
pub(super) fn write_members(f: &mut Formatter<'_>, model: &TableModel) -> fmt::Result {
    for field in model.columns() {
        write!(f, "\n    {} {};", field.mapping().value_type, field.name)?;
        if field.primary_key {
            write!(f, " // primary key")?;
        }
    }
    writeln!(f)
}

/// Default constructor body: only numeric members are initialised.
pub(super) fn write_default_ctor(
    f: &mut Formatter<'_>,
    model: &TableModel,
    owner: &str,
) -> fmt::Result {
    write!(f, "\n{owner}::{owner}()\n{{")?;
    for field in &model.fields {
        match field.mapping().kind {
            ValueKind::Real => write!(f, "\n    {} = 0.0;", field.name)?,
            ValueKind::Integer => write!(f, "\n    {} = 0;", field.name)?,
            ValueKind::Text | ValueKind::Date => {}
        }
    }
    writeln!(f, "\n}}")
}

pub(super) fn write_assign(f: &mut Formatter<'_>, model: &TableModel, owner: &str) -> fmt::Result {
    write!(
        f,
        "\n{owner}& {owner}::operator= (const {owner}& other)\n{{\n    if (this == &other) return *this;\n"
    )?;
    for field in &model.fields {
        write!(f, "\n    {0} = other.{0};", field.name)?;
    }
    writeln!(f, "\n\n    return *this;\n}}")
}

/// Full-value comparison; text compares exactly.
pub(super) fn write_equals(f: &mut Formatter<'_>, model: &TableModel, owner: &str) -> fmt::Result {
    write!(f, "\nbool {owner}::equals(const {owner}* other) const\n{{")?;
    for field in &model.fields {
        match field.mapping().kind {
            ValueKind::Text => write!(
                f,
                "\n    if (!{0}.IsSameAs(other->{0})) return false;",
                field.name
            )?,
            _ => write!(f, "\n    if ( {0} != other->{0}) return false;", field.name)?,
        }
    }
    writeln!(f, "\n\n    return true;\n}}")
}

/// One `SorterBy<FIELD>` functor per field.
pub(super) fn write_sorters(f: &mut Formatter<'_>, model: &TableModel, owner: &str) -> fmt::Result {
    for field in &model.fields {
        let name = &field.name;
        write!(
            f,
            "\n    struct SorterBy{name}\n    {{\n        bool operator()(const {owner}& x, const {owner}& y)\n        {{"
        )?;
        match SortRule::for_field(name) {
            SortRule::CaseInsensitive => write!(
                f,
                "\n            // Locale case-insensitive\n            return std::wcscoll(x.{name}.Lower().wc_str(), y.{name}.Lower().wc_str()) < 0;\n"
            )?,
            SortRule::Localized => write!(
                f,
                "\n            return wxGetTranslation(x.{name}) < wxGetTranslation(y.{name});\n"
            )?,
            SortRule::Natural => write!(f, "\n            return x.{name} < y.{name};\n")?,
        }
        writeln!(f, "        }}\n    }};")?;
    }
    Ok(())
}

/// JSON writer calls for one member.
pub(super) fn json_value(field: &Field) -> String {
    let name = &field.name;
    match field.mapping().kind {
        ValueKind::Integer => format!("json_writer.Int64({name}.GetValue());"),
        ValueKind::Real => format!("json_writer.Double({name});"),
        ValueKind::Text => format!("json_writer.String({name}.utf8_str());"),
        ValueKind::Date => format!("json_writer.String({name}.FormatISOCombined().utf8_str());"),
    }
}

/// Value assigned into an HTML report row or template slot.
pub(super) fn html_value(field: &Field) -> String {
    let name = &field.name;
    match field.mapping().kind {
        ValueKind::Integer => format!("{name}.GetValue()"),
        ValueKind::Date => format!("{name}.FormatISOCombined()"),
        ValueKind::Real | ValueKind::Text => name.clone(),
    }
}

/// Predicate for a `match(const Col::<FIELD>&)` overload.
pub(super) fn match_expr(field: &Field) -> String {
    let name = &field.name;
    match field.mapping().kind {
        ValueKind::Text => format!("{name}.CmpNoCase(col.m_value) == 0"),
        _ => format!("{name} == col.m_value"),
    }
}

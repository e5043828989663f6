use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use super::cpp;
use crate::{literal::CppStr, model::TableModel, statement::SeedInsert};

/// Implementation module: row bodies, statement texts, seed population.
pub struct TableImplementation<'a>(pub &'a TableModel);

impl Display for TableImplementation<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let model = self.0;
        let ct = model.table_name();
        let cd = model.data_name();
        write!(
            f,
            "\n#include \"_TableFactory.tpp\"\n#include \"{ct}.h\"\n#include \"data/{cd}.h\"\n"
        )?;
        write!(
            f,
            "\ntemplate class TableFactory<{ct}, {cd}>;\ntemplate class mmCache<int64, {cd}>;\n"
        )?;

        write_col(f, model)?;
        cpp::write_default_ctor(f, model, &model.row_name())?;
        write_binding(f, model)?;
        write_json(f, model)?;
        write_html(f, model)?;
        cpp::write_assign(f, model, &model.row_name())?;
        cpp::write_equals(f, model, &model.row_name())?;
        write_table_ctor(f, model)?;
        write_ensure_data(f, model)
    }
}

fn write_col(f: &mut Formatter<'_>, model: &TableModel) -> fmt::Result {
    let cc = model.col_name();
    let names = model
        .columns()
        .map(|field| format!("    \"{}\"", field.name))
        .join(",\n");
    let primary_id = model.primary().col_id();
    write!(
        f,
        "\n// List of column names in database table {},\n// in the order of {cc}::COL_ID.\nconst wxArrayString {cc}::COL_NAME_A = {{\n{names}\n}};\n",
        model.name
    )?;
    writeln!(
        f,
        "\nconst {cc}::COL_ID {cc}::PRIMARY_ID = {primary_id};\nconst wxString {cc}::PRIMARY_NAME = COL_NAME_A[{primary_id}];"
    )
}

fn write_binding(f: &mut Formatter<'_>, model: &TableModel) -> fmt::Result {
    let cr = model.row_name();
    write!(
        f,
        "\n// Bind a Row record to database insert statement.\nvoid {cr}::to_insert_stmt(wxSQLite3Statement& stmt, int64 id) const\n{{"
    )?;
    // same ordering as the insert statement's column list
    for (pos, field) in model.bind_order().enumerate() {
        let value = if field.primary_key { "id" } else { field.name.as_str() };
        write!(f, "\n    stmt.Bind({}, {value});", pos + 1)?;
    }
    writeln!(f, "\n}}")?;

    write!(
        f,
        "\n{cr}& {cr}::from_select_result(wxSQLite3ResultSet& q)\n{{"
    )?;
    for field in &model.fields {
        write!(
            f,
            "\n    {} = q.{}({});",
            field.name,
            field.mapping().accessor,
            field.ordinal
        )?;
    }
    writeln!(f, "\n\n    return *this;\n}}")
}

fn write_json(f: &mut Formatter<'_>, model: &TableModel) -> fmt::Result {
    let cr = model.row_name();
    writeln!(
        f,
        "\n// Return the data record as a json string\nwxString {cr}::to_json() const\n{{\n    StringBuffer json_buffer;\n    PrettyWriter<StringBuffer> json_writer(json_buffer);\n\n    json_writer.StartObject();\n    as_json(json_writer);\n    json_writer.EndObject();\n\n    return json_buffer.GetString();\n}}"
    )?;

    write!(
        f,
        "\n// Add the field data as json key:value pairs\nvoid {cr}::as_json(PrettyWriter<StringBuffer>& json_writer) const\n{{"
    )?;
    let pairs = model
        .fields
        .iter()
        .map(|field| {
            format!(
                "\n    json_writer.Key(\"{}\");\n    {}\n",
                field.name,
                cpp::json_value(field)
            )
        })
        .join("");
    write!(f, "{pairs}")?;
    writeln!(f, "}}")
}

fn write_html(f: &mut Formatter<'_>, model: &TableModel) -> fmt::Result {
    let cr = model.row_name();
    write!(f, "\nrow_t {cr}::to_html_row() const\n{{\n    row_t row;\n")?;
    for field in &model.fields {
        write!(f, "\n    row(L\"{}\") = {};", field.name, cpp::html_value(field))?;
    }
    writeln!(f, "\n\n    return row;\n}}")?;

    write!(f, "\nvoid {cr}::to_html_template(html_template& t) const\n{{")?;
    for field in &model.fields {
        write!(f, "\n    t(L\"{}\") = {};", field.name, cpp::html_value(field))?;
    }
    writeln!(f, "\n}}")
}

fn write_table_ctor(f: &mut Formatter<'_>, model: &TableModel) -> fmt::Result {
    let ct = model.table_name();
    let stmts = &model.statements;
    let indices = stmts
        .indices
        .iter()
        .map(|index| format!("\n        {}", CppStr(&index.to_string())))
        .join(",");

    writeln!(f, "\n{ct}::{ct}()\n{{")?;
    writeln!(f, "    m_table_name = {};", CppStr(&model.name))?;
    writeln!(f, "\n    m_create_query = {};", CppStr(&stmts.create.to_string()))?;
    writeln!(f, "\n    m_drop_query = {};", CppStr(&stmts.drop.to_string()))?;
    writeln!(f, "\n    m_index_query_a = {{{indices}\n    }};")?;
    writeln!(f, "\n    m_insert_query = {};", CppStr(&stmts.insert.to_string()))?;
    writeln!(f, "\n    m_update_query = {};", CppStr(&stmts.update.to_string()))?;
    writeln!(f, "\n    m_delete_query = {};", CppStr(&stmts.delete.to_string()))?;
    writeln!(f, "\n    m_select_query = {};", CppStr(&stmts.select.to_string()))?;
    writeln!(f, "}}")
}

/// Seed rows, inserted inside a single transaction.
fn write_ensure_data(f: &mut Formatter<'_>, model: &TableModel) -> fmt::Result {
    let seed = &model.statements.seed;
    if seed.is_empty() {
        return Ok(());
    }
    write!(
        f,
        "\nvoid {}::ensure_data()\n{{\n    m_db->Begin();",
        model.table_name()
    )?;
    for stmt in seed {
        write!(f, "\n    m_db->ExecuteUpdate({});", seed_expr(stmt))?;
    }
    writeln!(f, "\n    m_db->Commit();\n}}")
}

/// A plain row is one string literal; a row with wrapped values is
/// assembled with `wxString::Format` so the wrapped parts resolve at
/// runtime.
fn seed_expr(stmt: &SeedInsert) -> String {
    let text = CppStr(&stmt.text()).to_string();
    if !stmt.is_formatted() {
        return text;
    }
    format!("wxString::Format({text}, {})", stmt.arguments().join(", "))
}

use std::fmt::{self, Display, Formatter};

use super::cpp;
use crate::model::TableModel;

/// Interface module: column enumeration, row aggregate and table class.
pub struct TableInterface<'a>(pub &'a TableModel);

impl Display for TableInterface<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let model = self.0;
        write!(f, "\n#pragma once\n\n#include \"_TableBase.h\"\n")?;
        write_col(f, model)?;
        write_row(f, model)?;
        write_table(f, model)?;
        write_inline(f, model)
    }
}

fn write_col(f: &mut Formatter<'_>, model: &TableModel) -> fmt::Result {
    let cc = model.col_name();
    write!(f, "\n// Columns in database table {}\nstruct {cc}\n{{", model.name)?;

    write!(f, "\n    enum COL_ID\n    {{")?;
    for (pos, field) in model.columns().enumerate() {
        if pos == 0 {
            write!(f, "\n        {} = 0", field.col_id())?;
        } else {
            write!(f, ",\n        {}", field.col_id())?;
        }
    }
    writeln!(f, ",\n        COL_ID_size\n    }};")?;

    writeln!(f, "\n    static const wxArrayString COL_NAME_A;")?;
    writeln!(f, "    static const COL_ID PRIMARY_ID;")?;
    writeln!(f, "    static const wxString PRIMARY_NAME;")?;
    writeln!(
        f,
        "\n    static wxString col_name(COL_ID col_id) {{ return COL_NAME_A[col_id]; }}"
    )?;

    for field in model.columns() {
        let name = &field.name;
        let col_id = field.col_id();
        let ty = field.mapping().value_type;
        writeln!(f, "\n    struct {name} : public TableOpV<{ty}>\n    {{")?;
        writeln!(f, "        static COL_ID col_id() {{ return {col_id}; }}")?;
        writeln!(
            f,
            "        static wxString col_name() {{ return COL_NAME_A[{col_id}]; }}"
        )?;
        writeln!(
            f,
            "        explicit {name}(const {ty} &v): TableOpV<{ty}>(OP_EQ, v) {{}}"
        )?;
        writeln!(
            f,
            "        explicit {name}(OP op, const {ty} &v): TableOpV<{ty}>(op, v) {{}}"
        )?;
        writeln!(f, "    }};")?;
    }
    writeln!(f, "}};")
}

fn write_row(f: &mut Formatter<'_>, model: &TableModel) -> fmt::Result {
    let cr = model.row_name();
    let pk = &model.primary().name;
    write!(
        f,
        "\n// A single record in database table {}\nstruct {cr}\n{{\n    using Col = {};\n",
        model.name,
        model.col_name()
    )?;
    cpp::write_members(f, model)?;

    writeln!(f, "\n    explicit {cr}();")?;
    writeln!(f, "    explicit {cr}(wxSQLite3ResultSet& q);")?;
    writeln!(f, "    {cr}(const {cr}& other) = default;")?;

    writeln!(f, "\n    int64 id() const {{ return {pk}; }}")?;
    writeln!(f, "    void id(const int64 id) {{ {pk} = id; }}")?;
    writeln!(f, "    void to_insert_stmt(wxSQLite3Statement& stmt, int64 id) const;")?;
    writeln!(f, "    void to_update_stmt(wxSQLite3Statement& stmt) const;")?;
    writeln!(f, "    {cr}& from_select_result(wxSQLite3ResultSet& q);")?;
    writeln!(f, "    wxString to_json() const;")?;
    writeln!(f, "    void as_json(PrettyWriter<StringBuffer>& json_writer) const;")?;
    writeln!(f, "    row_t to_html_row() const;")?;
    writeln!(f, "    void to_html_template(html_template& t) const;")?;
    writeln!(f, "    void destroy() {{ delete this; }}")?;

    writeln!(f, "\n    {cr}& operator= (const {cr}& other);")?;
    writeln!(f, "    {cr}& clone_from(const {cr}& other);")?;
    writeln!(f, "    bool equals(const {cr}* other) const;")?;
    writeln!(
        f,
        "    bool operator< (const {cr}& other) const {{ return id() < other.id(); }}"
    )?;
    writeln!(
        f,
        "    bool operator< (const {cr}* other) const {{ return id() < other->id(); }}"
    )?;

    writeln!(
        f,
        "\n    template<typename C>\n    bool match(const C&)\n    {{\n        return false;\n    }}"
    )?;
    for field in &model.fields {
        writeln!(
            f,
            "\n    bool match(const Col::{}& col)\n    {{\n        return {};\n    }}",
            field.name,
            cpp::match_expr(field)
        )?;
    }
    writeln!(
        f,
        "\n    template<typename Arg1, typename... Args>\n    bool match(const Arg1& arg1, const Args&... args)\n    {{\n        return (match(arg1) && ... && match(args));\n    }}"
    )?;

    cpp::write_sorters(f, model, &cr)?;
    writeln!(f, "}};")
}

fn write_table(f: &mut Formatter<'_>, model: &TableModel) -> fmt::Result {
    let ct = model.table_name();
    write!(
        f,
        "\n// Interface to database table {}\nstruct {ct} : public TableBase\n{{\n    using Row = {};\n    using Col = typename Row::Col;\n",
        model.name,
        model.row_name()
    )?;
    writeln!(f, "\n    {ct}();\n    ~{ct}() {{}}")?;
    if !model.seed_rows.is_empty() {
        writeln!(f, "\n    void ensure_data() override;")?;
    }
    writeln!(f, "}};")
}

fn write_inline(f: &mut Formatter<'_>, model: &TableModel) -> fmt::Result {
    let cr = model.row_name();
    writeln!(
        f,
        "\ninline {cr}::{cr}(wxSQLite3ResultSet& q)\n{{\n    from_select_result(q);\n}}"
    )?;
    writeln!(
        f,
        "\ninline void {cr}::to_update_stmt(wxSQLite3Statement& stmt) const\n{{\n    to_insert_stmt(stmt, id());\n}}"
    )?;
    writeln!(
        f,
        "\ninline {cr}& {cr}::clone_from(const {cr}& other)\n{{\n    *this = other;\n    id(-1);\n    return *this;\n}}"
    )
}

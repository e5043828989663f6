use std::fmt::{self, Display, Formatter};

use super::cpp;
use crate::model::TableModel;

/// Editable sample aggregate; every behaviour goes through the row type.
pub struct DataInterface<'a>(pub &'a TableModel);

impl Display for DataInterface<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let model = self.0;
        let ct = model.table_name();
        let cr = model.row_name();
        let cd = model.data_name();
        let pk = &model.primary().name;

        write!(
            f,
            "\n// PLEASE EDIT!\n//\n// This is only sample code re-used from \"table/{ct}.h\".\n//\n// The data structure can be refined by:\n// * using more user-friendly field names\n// * using stronger field types\n// * adding enumerations for fields with limited choices\n// * demultiplexing composite values in database columns\n"
        )?;
        write!(
            f,
            "\n#pragma once\n\n#include \"table/_TableBase.h\"\n#include \"table/{ct}.h\"\n"
        )?;

        write!(
            f,
            "\n// User-friendly representation of a record in table {}.\nstruct {cd}\n{{",
            model.name
        )?;
        cpp::write_members(f, model)?;

        writeln!(f, "\n    explicit {cd}();")?;
        writeln!(f, "    explicit {cd}(wxSQLite3ResultSet& q);")?;
        writeln!(f, "    {cd}(const {cd}& other) = default;")?;

        writeln!(f, "\n    int64 id() const {{ return {pk}; }}")?;
        writeln!(f, "    void id(const int64 id) {{ {pk} = id; }}")?;
        writeln!(f, "    {cr} to_row() const;")?;
        writeln!(f, "    {cd}& from_row(const {cr}& row);")?;
        writeln!(f, "    void to_insert_stmt(wxSQLite3Statement& stmt, int64 id) const;")?;
        writeln!(f, "    void to_update_stmt(wxSQLite3Statement& stmt) const;")?;
        writeln!(f, "    {cd}& from_select_result(wxSQLite3ResultSet& q);")?;
        writeln!(f, "    wxString to_json() const;")?;
        writeln!(f, "    void as_json(PrettyWriter<StringBuffer>& json_writer) const;")?;
        writeln!(f, "    row_t to_html_row() const;")?;
        writeln!(f, "    void to_html_template(html_template& t) const;")?;
        writeln!(f, "    void destroy() {{ delete this; }}")?;

        writeln!(f, "\n    {cd}& operator= (const {cd}& other);")?;
        writeln!(f, "    {cd}& clone_from(const {cd}& other);")?;
        writeln!(f, "    bool equals(const {cd}* other) const;")?;
        writeln!(
            f,
            "    bool operator< (const {cd}& other) const {{ return id() < other.id(); }}"
        )?;
        writeln!(
            f,
            "    bool operator< (const {cd}* other) const {{ return id() < other->id(); }}"
        )?;

        cpp::write_sorters(f, model, &cd)?;
        writeln!(f, "}};")?;

        write_delegates(f, &cd, &cr)
    }
}

fn write_delegates(f: &mut Formatter<'_>, cd: &str, cr: &str) -> fmt::Result {
    writeln!(
        f,
        "\ninline {cd}::{cd}(wxSQLite3ResultSet& q)\n{{\n    from_select_result(q);\n}}"
    )?;
    writeln!(
        f,
        "\ninline void {cd}::to_insert_stmt(wxSQLite3Statement& stmt, int64 id) const\n{{\n    to_row().to_insert_stmt(stmt, id);\n}}"
    )?;
    writeln!(
        f,
        "\ninline void {cd}::to_update_stmt(wxSQLite3Statement& stmt) const\n{{\n    to_row().to_update_stmt(stmt);\n}}"
    )?;
    writeln!(
        f,
        "\ninline {cd}& {cd}::from_select_result(wxSQLite3ResultSet& q)\n{{\n    return from_row({cr}().from_select_result(q));\n}}"
    )?;
    writeln!(
        f,
        "\ninline wxString {cd}::to_json() const\n{{\n    return to_row().to_json();\n}}"
    )?;
    writeln!(
        f,
        "\ninline void {cd}::as_json(PrettyWriter<StringBuffer>& json_writer) const\n{{\n    to_row().as_json(json_writer);\n}}"
    )?;
    writeln!(
        f,
        "\ninline row_t {cd}::to_html_row() const\n{{\n    return to_row().to_html_row();\n}}"
    )?;
    writeln!(
        f,
        "\ninline void {cd}::to_html_template(html_template& t) const\n{{\n    to_row().to_html_template(t);\n}}"
    )?;
    writeln!(
        f,
        "\ninline {cd}& {cd}::clone_from(const {cd}& other)\n{{\n    *this = other;\n    id(-1);\n    return *this;\n}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::tag_model;

    #[test]
    fn test_marked_as_editable() {
        let text = DataInterface(&tag_model()).to_string();
        assert!(text.starts_with("\n// PLEASE EDIT!\n"));
        assert!(text.contains("re-used from \"table/TagTable.h\""));
        assert!(text.contains("#include \"table/TagTable.h\"\n"));
    }

    #[test]
    fn test_same_members_as_row() {
        let text = DataInterface(&tag_model()).to_string();
        assert!(text.contains(
            "struct TagData\n{\n    int64 TAGID; // primary key\n    wxString TAGNAME;\n    int64 ACTIVE;\n"
        ));
        assert!(text.contains("    TagRow to_row() const;\n"));
        assert!(text.contains("    TagData& from_row(const TagRow& row);\n"));
        assert!(text.contains("    struct SorterByTAGNAME\n"));
    }

    #[test]
    fn test_behaviour_is_delegated() {
        let text = DataInterface(&tag_model()).to_string();
        assert!(text.contains("    return from_row(TagRow().from_select_result(q));\n"));
        assert!(text.contains(
            "inline wxString TagData::to_json() const\n{\n    return to_row().to_json();\n}\n"
        ));
        assert!(text.contains("    return to_row().to_html_row();\n"));
        assert!(!text.contains("json_writer.Key"));
        assert!(!text.contains("stmt.Bind"));
    }
}

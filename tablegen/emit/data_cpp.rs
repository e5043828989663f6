use std::fmt::{self, Display, Formatter};

use super::cpp;
use crate::model::TableModel;

/// Sample aggregate bodies: conversions to and from the row type.
pub struct DataImplementation<'a>(pub &'a TableModel);

impl Display for DataImplementation<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let model = self.0;
        let cr = model.row_name();
        let cd = model.data_name();
        write!(
            f,
            "\n// PLEASE EDIT!\n// This is only sample code re-used from \"table/{}.cpp\".\n\n#include \"{cd}.h\"\n",
            model.table_name()
        )?;
        cpp::write_default_ctor(f, model, &cd)?;

        write!(
            f,
            "\n// Convert {cd} to {cr}\n{cr} {cd}::to_row() const\n{{\n    {cr} row;\n"
        )?;
        for field in &model.fields {
            write!(f, "\n    row.{0} = {0};", field.name)?;
        }
        writeln!(f, "\n\n    return row;\n}}")?;

        write!(
            f,
            "\n// Convert {cr} to {cd}\n{cd}& {cd}::from_row(const {cr}& row)\n{{"
        )?;
        for field in &model.fields {
            write!(
                f,
                "\n    {0} = row.{0}; // {1}",
                field.name,
                field.mapping().value_type
            )?;
        }
        writeln!(f, "\n\n    return *this;\n}}")?;

        cpp::write_assign(f, model, &cd)?;
        cpp::write_equals(f, model, &cd)
    }
}

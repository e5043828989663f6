//! Source emitters.
//!
//! Each emitter is a `Display` wrapper over a [`TableModel`]; the artifact
//! helpers below put a provenance header in front and name the file.

mod cpp;
mod data_h;
mod data_cpp;
mod table_cpp;
mod table_h;

use chrono::{DateTime, Datelike, Local};

use crate::model::TableModel;

pub use data_cpp::DataImplementation;
pub use data_h::DataInterface;
pub use table_cpp::TableImplementation;
pub use table_h::TableInterface;

pub const INTERFACE_EXT: &str = "h";
pub const IMPLEMENTATION_EXT: &str = "cpp";

const UTF8_BOM: &str = "\u{feff}";

/// A generated text blob, ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    /// One-line description printed when the artifact is written.
    pub description: String,
    pub contents: String,
    /// Whether the file starts with a UTF-8 byte-order mark.
    pub bom: bool,
}

impl Artifact {
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.contents.len() + UTF8_BOM.len());
        if self.bom {
            bytes.extend_from_slice(UTF8_BOM.as_bytes());
        }
        bytes.extend_from_slice(self.contents.as_bytes());
        bytes
    }
}

/// Header placed at the top of every generated module.
///
/// `@file` is replaced by the file name and `@brief` by a one-line
/// description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
    text: String,
}

impl HeaderTemplate {
    pub const FILE: &'static str = "@file";
    pub const BRIEF: &'static str = "@brief";

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn render(&self, file: &str, brief: &str) -> String {
        self.text
            .replace(Self::FILE, file)
            .replace(Self::BRIEF, brief)
    }

    /// Banner for the table modules, stamped with the generation time.
    pub fn table_default(generated_at: &DateTime<Local>) -> Self {
        Self::new(format!(
            "// -*- C++ -*-
//=============================================================================
/**
 *      Copyright: (c) {year} the tablegen authors
 *
 *      @file
 *
 *      @brief
 *
 *      @author [tablegen {version}]
 *
 *      Revision History:
 *          AUTO GENERATED at {stamp}.
 *          DO NOT EDIT!
 */
//=============================================================================
",
            year = generated_at.year(),
            version = env!("CARGO_PKG_VERSION"),
            stamp = generated_at.format("%Y-%m-%d %H:%M:%S%.6f"),
        ))
    }

    /// Banner for the sample data modules, which are meant to be edited.
    pub fn data_default(generated_at: &DateTime<Local>) -> Self {
        Self::new(format!(
            "/*******************************************************
 Copyright (C) {year} the tablegen authors

 @file

 @brief

 Generated once by tablegen as a starting point; edit freely.
 ********************************************************/
",
            year = generated_at.year(),
        ))
    }
}

pub fn table_interface(model: &TableModel, header: &HeaderTemplate) -> Artifact {
    let name = format!("{}.{INTERFACE_EXT}", model.table_name());
    Artifact {
        contents: format!(
            "{}{}",
            header.render(&name, &format!("Interface to database table {}", model.name)),
            TableInterface(model)
        ),
        description: format!("source code for {}", model.name),
        name,
        bom: true,
    }
}

pub fn table_implementation(model: &TableModel, header: &HeaderTemplate) -> Artifact {
    let name = format!("{}.{IMPLEMENTATION_EXT}", model.table_name());
    Artifact {
        contents: format!(
            "{}{}",
            header.render(
                &name,
                &format!("Implementation of the interface to database table {}", model.name)
            ),
            TableImplementation(model)
        ),
        description: format!("source code for {}", model.name),
        name,
        bom: true,
    }
}

pub fn data_interface(model: &TableModel, header: &HeaderTemplate) -> Artifact {
    let name = format!("{}.{INTERFACE_EXT}", model.data_name());
    Artifact {
        contents: format!(
            "{}{}",
            header.render(&name, &data_brief(model)),
            DataInterface(model)
        ),
        description: format!("sample data structure for {}", model.name),
        name,
        bom: false,
    }
}

pub fn data_implementation(model: &TableModel, header: &HeaderTemplate) -> Artifact {
    let name = format!("{}.{IMPLEMENTATION_EXT}", model.data_name());
    Artifact {
        contents: format!(
            "{}{}",
            header.render(&name, &data_brief(model)),
            DataImplementation(model)
        ),
        description: format!("sample data structure for {}", model.name),
        name,
        bom: false,
    }
}

fn data_brief(model: &TableModel) -> String {
    format!(
        "Sample data structure for a single record in table {}",
        model.name
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::tests::tag_model;

    fn stamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_header_substitution() {
        let header = HeaderTemplate::new("// @file: @brief\n");
        assert_eq!(header.render("A.h", "about A"), "// A.h: about A\n");
    }

    #[test]
    fn test_default_table_header_is_stamped() {
        let text = HeaderTemplate::table_default(&stamp()).render("TagTable.h", "brief");
        assert!(text.contains("AUTO GENERATED at 2025-03-14 09:26:53.000000."));
        assert!(text.contains("DO NOT EDIT!"));
        assert!(text.contains(" *      TagTable.h\n"));
        assert!(!text.contains(HeaderTemplate::FILE));
        assert!(!text.contains(HeaderTemplate::BRIEF));
    }

    #[test]
    fn test_artifact_names() {
        let model = tag_model();
        let header = HeaderTemplate::new("// @file\n");
        let h = table_interface(&model, &header);
        assert_eq!(h.name, "TagTable.h");
        assert!(h.contents.starts_with("// TagTable.h\n"));
        assert!(h.bytes().starts_with(UTF8_BOM.as_bytes()));
        assert_eq!(table_implementation(&model, &header).name, "TagTable.cpp");

        let d = data_interface(&model, &header);
        assert_eq!(d.name, "TagData.h");
        assert_eq!(d.bytes(), d.contents.as_bytes());
        assert_eq!(data_implementation(&model, &header).name, "TagData.cpp");
    }
}

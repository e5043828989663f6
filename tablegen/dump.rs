//! Schema source with every localization marker removed.

use crate::literal::strip_all_markers;

pub const DEFAULT_DUMP_FILE: &str = "tables_en.sql";

pub fn render(source_name: &str, source: &str) -> String {
    let banner = format!(
        "-- NOTE:\n-- This file has been AUTO GENERATED from {source_name}\n-- All translation markers have been removed.\n-- This file can be used to manually generate a database.\n\n"
    );
    banner + &strip_all_markers(source)
}

//! Normalization applied to every loaded document
//!
//! Upstream schemas carry a few inconsistencies that would otherwise produce
//! colliding or unexported names. Each correction is one [`Fixup`] row keyed on
//! a message name prefix; every row whose prefix matches is applied, in table
//! order, after comment trimming.

use crate::naming::to_pascal_case;
use crate::schema::{ElemType, Field, MessageData};

/// Lines of license text at the top of every schema document.
pub const LICENSE_PREAMBLE_LINES: usize = 14;

/// A name-prefix keyed correction.
pub struct Fixup {
    pub prefix: &'static str,
    pub apply: fn(&mut MessageData),
}

/// Corrections for known upstream schema inconsistencies.
pub const FIXUPS: &[Fixup] = &[
    Fixup {
        prefix: "IncrementalAlterConfigs",
        apply: rename_incremental_structs,
    },
    Fixup {
        prefix: "CreateTopicsRequest",
        apply: export_field_names,
    },
];

/// Run comment trimming and every matching [`FIXUPS`] row.
pub fn apply_fixups(msg: &mut MessageData) {
    msg.comments = trim_comments(&msg.comments);
    let name = msg.name.clone();
    for fixup in FIXUPS.iter().filter(|f| name.starts_with(f.prefix)) {
        tracing::debug!(message = %name, prefix = fixup.prefix, "applying schema fixup");
        (fixup.apply)(msg);
    }
}

/// Drop the license preamble, then blank comment lines at either end.
///
/// Text with fewer than [`LICENSE_PREAMBLE_LINES`] complete lines trims to
/// nothing.
pub fn trim_comments(comments: &str) -> String {
    let mut rest = comments;
    for _ in 0..LICENSE_PREAMBLE_LINES {
        match rest.find('\n') {
            Some(i) => rest = &rest[i + 1..],
            None => return String::new(),
        }
    }

    let mut lines: Vec<&str> = rest.split_inclusive('\n').collect();
    while lines.first().is_some_and(|l| is_blank_comment(l)) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| is_blank_comment(l)) {
        lines.pop();
    }
    lines.concat()
}

fn is_blank_comment(line: &str) -> bool {
    line.strip_prefix("//")
        .is_some_and(|rest| rest.trim().is_empty())
}

fn rename_incremental_structs(msg: &mut MessageData) {
    fn rename(field: &mut Field) {
        if let ElemType::Struct(name) = &mut field.ty.elem {
            let prefix = match name.as_str() {
                "AlterConfigsResource" | "AlterConfigsResourceResponse" => Some("Incremental"),
                "AlterableConfig" => Some("Incrementally"),
                _ => None,
            };
            if let Some(prefix) = prefix {
                name.insert_str(0, prefix);
            }
        }
        field.fields.iter_mut().for_each(rename);
    }
    msg.fields.iter_mut().for_each(rename);
}

fn export_field_names(msg: &mut MessageData) {
    fn export(field: &mut Field) {
        if field.name.starts_with(|c: char| c.is_ascii_lowercase()) {
            field.name = to_pascal_case(&field.name);
        }
        field.fields.iter_mut().for_each(export);
    }
    msg.fields.iter_mut().for_each(export);
}

#[cfg(test)]
#[path = "fixups/fixups_tests.rs"]
mod fixups_tests;

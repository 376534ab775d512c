use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use umya_spreadsheet::Worksheet;

use crate::regions::merge_region;
use crate::rows::{add_and_copy_rows, copy_rows_after, delete_rows, remove_row};
use crate::validation::set_dropdown;

/// One structural edit against a worksheet. The facade surface over the row
/// and region primitives; serialized form matches the usual tagged-op shape.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SheetEditOp {
    DeleteRow {
        row: u32,
    },
    DeleteRows {
        rows: Vec<u32>,
    },
    CopyRows {
        template_row: u32,
        #[serde(default = "default_count")]
        count: u32,
        #[serde(default)]
        copy_values: bool,
    },
    AddAndCopyRows {
        template_row: u32,
        add_count: u32,
        #[serde(default)]
        jump: u32,
        #[serde(default)]
        copy_values: bool,
    },
    MergeRegion {
        first_row: u32,
        last_row: u32,
        first_col: u32,
        last_col: u32,
    },
    SetDropdown {
        first_row: u32,
        last_row: u32,
        first_col: u32,
        last_col: u32,
        values: Vec<String>,
    },
}

fn default_count() -> u32 {
    1
}

#[derive(Debug, Default, Serialize, JsonSchema)]
pub struct EditSummary {
    pub ops_applied: usize,
    pub counts: BTreeMap<String, u64>,
    pub warnings: Vec<String>,
}

/// Applies every op in order against an in-memory worksheet. Parameter
/// violations fail the whole batch; boundary no-ops (out-of-range deletes,
/// degenerate merges) are tolerated and surfaced as warnings.
pub fn apply_sheet_edits(sheet: &mut Worksheet, ops: &[SheetEditOp]) -> Result<EditSummary> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut warnings: Vec<String> = Vec::new();

    for op in ops {
        match op {
            SheetEditOp::DeleteRow { row } => {
                let last_row = sheet.get_highest_row();
                if remove_row(sheet, *row) {
                    bump(&mut counts, "rows_deleted", 1);
                } else {
                    warnings.push(format!(
                        "delete_row {row} is outside the sheet extent (last row {last_row}); ignored"
                    ));
                }
            }
            SheetEditOp::DeleteRows { rows } => {
                let removed = delete_rows(sheet, rows)?;
                if removed < rows.len() as u64 {
                    warnings.push(format!(
                        "delete_rows: {} of {} listed rows were outside the sheet extent; ignored",
                        rows.len() as u64 - removed,
                        rows.len()
                    ));
                }
                bump(&mut counts, "rows_deleted", removed);
            }
            SheetEditOp::CopyRows {
                template_row,
                count,
                copy_values,
            } => {
                copy_rows_after(sheet, *template_row, *count, *copy_values)?;
                bump(&mut counts, "rows_copied", *count as u64);
            }
            SheetEditOp::AddAndCopyRows {
                template_row,
                add_count,
                jump,
                copy_values,
            } => {
                add_and_copy_rows(sheet, *template_row, *add_count, *jump, *copy_values)?;
                bump(&mut counts, "rows_added", *add_count as u64);
            }
            SheetEditOp::MergeRegion {
                first_row,
                last_row,
                first_col,
                last_col,
            } => {
                if merge_region(sheet, *first_row, *last_row, *first_col, *last_col)? {
                    bump(&mut counts, "regions_merged", 1);
                } else {
                    warnings.push(format!(
                        "merge_region ({first_row},{first_col})..({last_row},{last_col}) spans a single cell; ignored"
                    ));
                }
            }
            SheetEditOp::SetDropdown {
                first_row,
                last_row,
                first_col,
                last_col,
                values,
            } => {
                set_dropdown(sheet, *first_row, *last_row, *first_col, *last_col, values)?;
                bump(&mut counts, "validations_set", 1);
            }
        }
    }

    Ok(EditSummary {
        ops_applied: ops.len(),
        counts,
        warnings,
    })
}

/// File-level wrapper: read the workbook, apply the batch to one sheet, and
/// save back. A failing batch leaves the file untouched.
pub fn apply_sheet_edits_to_file(
    path: &Path,
    sheet_name: &str,
    ops: &[SheetEditOp],
) -> Result<EditSummary> {
    let mut book = umya_spreadsheet::reader::xlsx::read(path)
        .with_context(|| format!("failed to open workbook '{}'", path.display()))?;

    let sheet = book
        .get_sheet_by_name_mut(sheet_name)
        .ok_or_else(|| anyhow!("sheet '{}' not found", sheet_name))?;

    let summary = apply_sheet_edits(sheet, ops)?;

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .with_context(|| format!("failed to save workbook '{}'", path.display()))?;
    Ok(summary)
}

fn bump(counts: &mut BTreeMap<String, u64>, key: &str, by: u64) {
    counts
        .entry(key.to_string())
        .and_modify(|value| *value += by)
        .or_insert(by);
}

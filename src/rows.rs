use anyhow::{Result, bail};
use umya_spreadsheet::Worksheet;

use crate::cells::copy_cell;
use crate::regions::remap_regions_for_row_copy;
use crate::shift::{ShiftOptions, shift_rows};

/// Removes a single row. A row before the last one is closed over by
/// shifting its successors up; the last row is cleared outright without
/// involving the shifter. Anything outside the sheet extent is a silent
/// no-op so bulk callers stay resilient to boundary input; the return value
/// says whether a row was actually removed.
pub fn remove_row(sheet: &mut Worksheet, row: u32) -> bool {
    let last_row = sheet.get_highest_row();
    if row == 0 || row > last_row {
        tracing::debug!(row, last_row, "remove_row outside sheet extent; nothing to do");
        return false;
    }
    if row < last_row {
        shift_rows(sheet, row + 1, last_row, -1, ShiftOptions::default());
    } else {
        clear_row(sheet, row);
    }
    true
}

fn clear_row(sheet: &mut Worksheet, row: u32) {
    let cols: Vec<u32> = sheet
        .get_cell_collection()
        .iter()
        .filter(|cell| *cell.get_coordinate().get_row_num() == row)
        .map(|cell| *cell.get_coordinate().get_col_num())
        .collect();
    for col in cols {
        sheet.remove_cell((col, row));
    }
    if sheet.get_row_dimension(&row).is_some() {
        sheet.get_row_dimension_mut(&row).set_height(0f64);
    }
}

/// Deletes every listed row, compensating for the upward slide caused by
/// each prior deletion: the k-th deletion lands on `rows[k] - k`. Returns
/// the number of rows actually removed; listed rows beyond the extent are
/// skipped, not counted.
///
/// The compensation is only correct for strictly ascending input, and a
/// wrong ordering would silently delete the wrong rows, so the precondition
/// is enforced up front instead of trusted.
pub fn delete_rows(sheet: &mut Worksheet, rows: &[u32]) -> Result<u64> {
    for pair in rows.windows(2) {
        if pair[1] <= pair[0] {
            bail!(
                "delete_rows requires strictly ascending row numbers (got {} after {})",
                pair[1],
                pair[0]
            );
        }
    }
    let mut removed = 0u64;
    for (deleted, row) in rows.iter().enumerate() {
        if remove_row(sheet, row - deleted as u32) {
            removed += 1;
        }
    }
    Ok(removed)
}

/// Clones `source_row` onto `target_row`: row height, merged regions
/// anchored at the source, and every populated cell (style, comment, and,
/// when `copy_value`, the typed value).
pub fn clone_row(sheet: &mut Worksheet, source_row: u32, target_row: u32, copy_value: bool) {
    if let Some(height) = sheet
        .get_row_dimension(&source_row)
        .map(|dim| *dim.get_height())
    {
        sheet.get_row_dimension_mut(&target_row).set_height(height);
    }
    remap_regions_for_row_copy(sheet, source_row, target_row);
    let cols: Vec<u32> = sheet
        .get_cell_collection()
        .iter()
        .filter(|cell| *cell.get_coordinate().get_row_num() == source_row)
        .map(|cell| *cell.get_coordinate().get_col_num())
        .collect();
    for col in cols {
        copy_cell(sheet, (col, source_row), (col, target_row), copy_value);
    }
}

/// Copies the template row into `copy_count` fresh rows directly below it,
/// pushing everything that followed further down in one shift.
pub fn copy_rows_after(
    sheet: &mut Worksheet,
    template_row: u32,
    copy_count: u32,
    copy_value: bool,
) -> Result<()> {
    if template_row == 0 {
        bail!("copy_rows requires template_row >= 1");
    }
    if copy_count == 0 {
        return Ok(());
    }
    let last_row = sheet.get_highest_row();
    shift_rows(
        sheet,
        template_row + 1,
        last_row,
        copy_count as i32,
        ShiftOptions::for_insert(),
    );
    for count in 1..=copy_count {
        let target_row = template_row + count;
        copy_row_dimension(sheet, template_row, target_row);
        clone_row(sheet, template_row, target_row, copy_value);
    }
    Ok(())
}

/// Inserts `add_count` template copies, each landing `jump` rows below the
/// row it copies. Iteration `i` re-reads row `template_row + i` as its
/// source, so with `jump = 0` the call copies a template block downward in
/// place; sources at increasing offsets from the original template are
/// assumed to stay stable across iterations.
pub fn add_and_copy_rows(
    sheet: &mut Worksheet,
    template_row: u32,
    add_count: u32,
    jump: u32,
    copy_value: bool,
) -> Result<()> {
    if template_row == 0 {
        bail!("add_and_copy_rows requires template_row >= 1");
    }
    for index in 0..add_count {
        let source_row = template_row + index;
        let target_row = template_row + jump + index + 1;
        let last_row = sheet.get_highest_row();
        shift_rows(sheet, target_row, last_row, 1, ShiftOptions::for_insert());
        copy_row_dimension(sheet, source_row, target_row);
        clone_row(sheet, source_row, target_row, copy_value);
    }
    Ok(())
}

fn copy_row_dimension(sheet: &mut Worksheet, source_row: u32, target_row: u32) {
    let snapshot = sheet
        .get_row_dimension(&source_row)
        .map(|dim| (*dim.get_height(), dim.get_style().clone()));
    if let Some((height, style)) = snapshot {
        let target = sheet.get_row_dimension_mut(&target_row);
        target.set_height(height);
        target.set_style(style);
    }
}

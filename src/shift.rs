use std::collections::BTreeSet;

use umya_spreadsheet::{Cell, Comment, Worksheet};

/// umya writes no `ht` attribute for a zero height, so the row falls back to
/// the sheet default when rendered.
const DEFAULT_ROW_HEIGHT: f64 = 0.0;

/// Flags carried by [`shift_rows`], mirroring the height handling of the
/// underlying model's shift primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftOptions {
    /// Destination rows inherit the source row heights.
    pub copy_row_height: bool,
    /// Vacated source rows revert to the default height.
    pub reset_original_height: bool,
}

impl ShiftOptions {
    /// The flag set used when opening a gap for an insertion: heights travel
    /// with their rows, vacated rows keep whatever height they had.
    pub fn for_insert() -> Self {
        Self {
            copy_row_height: true,
            reset_original_height: false,
        }
    }
}

/// Moves every row in the inclusive range `[from_row, to_row]` by `offset`
/// positions (positive = down), overwriting whatever occupied the
/// destination. Rows outside the range are untouched; vacated source rows
/// end up empty. Comments anchored in the range travel with their rows.
///
/// Merged regions are deliberately not remapped here; callers that
/// duplicate rows own that step (see `regions::remap_regions_for_row_copy`).
pub fn shift_rows(
    sheet: &mut Worksheet,
    from_row: u32,
    to_row: u32,
    offset: i32,
    opts: ShiftOptions,
) {
    if from_row == 0 || from_row > to_row || offset == 0 {
        tracing::debug!(from_row, to_row, offset, "shift_rows: empty range or zero offset");
        return;
    }

    let moved: Vec<Cell> = sheet
        .get_cell_collection()
        .iter()
        .filter(|cell| {
            let row = *cell.get_coordinate().get_row_num();
            row >= from_row && row <= to_row
        })
        .map(|cell| (*cell).clone())
        .collect();

    // Rows that must be empty before re-insertion: the sources and the
    // destinations they overwrite.
    let mut clear_rows: BTreeSet<u32> = (from_row..=to_row).collect();
    for row in from_row..=to_row {
        if let Some(dest) = shifted(row, offset) {
            clear_rows.insert(dest);
        }
    }
    let stale: Vec<(u32, u32)> = sheet
        .get_cell_collection()
        .iter()
        .filter_map(|cell| {
            let coord = cell.get_coordinate();
            let row = *coord.get_row_num();
            clear_rows
                .contains(&row)
                .then(|| (*coord.get_col_num(), row))
        })
        .collect();
    for (col, row) in stale {
        sheet.remove_cell((col, row));
    }

    for cell in &moved {
        let coord = cell.get_coordinate();
        let col = *coord.get_col_num();
        let Some(new_row) = shifted(*coord.get_row_num(), offset) else {
            // Pushed above the top edge; the row's content is discarded.
            continue;
        };
        let target = sheet.get_cell_mut((col, new_row));
        target.set_style(cell.get_style().clone());
        *target.get_cell_value_mut() = cell.get_cell_value().clone();
    }

    move_row_heights(sheet, from_row, to_row, offset, opts);
    move_comments(sheet, from_row, to_row, offset, &clear_rows);
}

fn shifted(row: u32, offset: i32) -> Option<u32> {
    let dest = i64::from(row) + i64::from(offset);
    u32::try_from(dest).ok().filter(|r| *r >= 1)
}

fn move_row_heights(
    sheet: &mut Worksheet,
    from_row: u32,
    to_row: u32,
    offset: i32,
    opts: ShiftOptions,
) {
    if opts.copy_row_height {
        // Snapshot before writing: with an overlapping shift a destination
        // row doubles as a later source, and a live read would smear the
        // first height across the rest of the range.
        let heights: Vec<(u32, f64)> = (from_row..=to_row)
            .map(|row| {
                let height = sheet
                    .get_row_dimension(&row)
                    .map(|dim| *dim.get_height())
                    .unwrap_or(DEFAULT_ROW_HEIGHT);
                (row, height)
            })
            .collect();
        for (row, height) in heights {
            if let Some(dest) = shifted(row, offset) {
                sheet.get_row_dimension_mut(&dest).set_height(height);
            }
        }
    }
    if opts.reset_original_height {
        for row in from_row..=to_row {
            // A source row that doubles as a destination was overwritten,
            // not vacated.
            let re_occupied = shifted(row, -offset)
                .is_some_and(|origin| origin >= from_row && origin <= to_row);
            if !re_occupied && sheet.get_row_dimension(&row).is_some() {
                sheet
                    .get_row_dimension_mut(&row)
                    .set_height(DEFAULT_ROW_HEIGHT);
            }
        }
    }
}

fn move_comments(
    sheet: &mut Worksheet,
    from_row: u32,
    to_row: u32,
    offset: i32,
    clear_rows: &BTreeSet<u32>,
) {
    if sheet.get_comments().is_empty() {
        return;
    }
    let mut changed = false;
    let mut kept: Vec<Comment> = Vec::with_capacity(sheet.get_comments().len());
    for comment in sheet.get_comments().iter() {
        let row = *comment.get_coordinate().get_row_num();
        if row >= from_row && row <= to_row {
            if let Some(dest) = shifted(row, offset) {
                let mut moved = comment.clone();
                moved.get_coordinate_mut().set_row_num(dest);
                kept.push(moved);
            }
            changed = true;
        } else if clear_rows.contains(&row) {
            // Anchored on an overwritten destination row; dropped with the
            // row's old content.
            changed = true;
        } else {
            kept.push(comment.clone());
        }
    }
    if changed {
        *sheet.get_comments_mut() = kept.into();
    }
}

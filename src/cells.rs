use umya_spreadsheet::helper::coordinate::coordinate_from_index;
use umya_spreadsheet::{Cell, CellRawValue, CellValue, Worksheet};

/// Copies style, comment, and (optionally) the typed value from one cell to
/// another on the same sheet. Coordinates are `(col, row)`, 1-based.
///
/// Styles and comments are shared annotations: the target receives the same
/// style the source points at, never a restyled derivative. Formulas are not
/// re-established on the target; under value copy the formula's textual
/// form re-enters as a plain string (see [`write_value`]).
pub fn copy_cell(sheet: &mut Worksheet, source: (u32, u32), target: (u32, u32), copy_value: bool) {
    let Some(source_cell) = sheet.get_cell(source) else {
        return;
    };
    let style = source_cell.get_style().clone();
    let value = source_cell.get_cell_value().clone();

    let target_cell = sheet.get_cell_mut(target);
    target_cell.set_style(style);
    if copy_value {
        write_value(target_cell, &value);
    }

    copy_comment(sheet, source, target);
}

/// Writes `source`'s typed value onto `cell`, preserving the value tag.
///
/// The match is exhaustive over the model's value variants: text stays
/// text, numbers stay numeric, booleans stay boolean, empty writes nothing.
/// Two sources lose their tag: a formula-tagged source stores its formula
/// *text* as a non-evaluating string, and an error-tagged source keeps its
/// error text (`#DIV/0!` and friends) but re-enters through value
/// detection, which has no error arm, so the copy is tagged as plain text.
pub(crate) fn write_value(cell: &mut Cell, source: &CellValue) {
    if source.is_formula() {
        cell.set_value_string(source.get_formula().to_string());
        return;
    }
    let raw = source.get_raw_value();
    if raw.is_error() {
        cell.set_value(source.get_value().to_string());
        return;
    }
    match raw {
        CellRawValue::String(text) => {
            cell.set_value_string(text.to_string());
        }
        CellRawValue::RichText(text) => {
            cell.set_value_string(text.get_text().to_string());
        }
        CellRawValue::Lazy(text) => {
            // Not yet parsed by the model; re-detection on write is the
            // closest thing to the original tag.
            cell.set_value(text.to_string());
        }
        CellRawValue::Numeric(number) => {
            cell.set_value_number(*number);
        }
        CellRawValue::Bool(flag) => {
            cell.set_value_bool(*flag);
        }
        CellRawValue::Error(_) => unreachable!("error values are handled above"),
        CellRawValue::Empty => {}
    }
}

/// Comments live on the worksheet keyed by coordinate; carrying one across a
/// cell copy means cloning it and re-anchoring the clone on the target.
fn copy_comment(sheet: &mut Worksheet, source: (u32, u32), target: (u32, u32)) {
    let source_addr = coordinate_from_index(&source.0, &source.1);
    let found = sheet
        .get_comments()
        .iter()
        .find(|comment| comment.get_coordinate().get_coordinate() == source_addr)
        .cloned();
    if let Some(mut comment) = found {
        let target_addr = coordinate_from_index(&target.0, &target.1);
        sheet
            .get_comments_mut()
            .retain(|existing| existing.get_coordinate().get_coordinate() != target_addr);
        comment.get_coordinate_mut().set_coordinate(target_addr);
        sheet.get_comments_mut().push(comment);
    }
}

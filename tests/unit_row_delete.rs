use anyhow::Result;
use sheet_ops::{delete_rows, remove_row};

fn labeled_sheet(rows: u32) -> umya_spreadsheet::Spreadsheet {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
    for row in 1..=rows {
        sheet
            .get_cell_mut((1, row))
            .set_value(format!("R{row}"));
    }
    book
}

fn column_a(sheet: &umya_spreadsheet::Worksheet, rows: u32) -> Vec<String> {
    (1..=rows)
        .map(|row| {
            sheet
                .get_cell((1, row))
                .map(|cell| cell.get_value().to_string())
                .unwrap_or_default()
        })
        .collect()
}

#[test]
fn deleting_a_middle_row_shifts_successors_up() -> Result<()> {
    let mut book = labeled_sheet(5);
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();

    remove_row(sheet, 3);

    assert_eq!(column_a(sheet, 4), vec!["R1", "R2", "R4", "R5"]);
    assert!(sheet.get_cell("A5").is_none());
    assert_eq!(sheet.get_highest_row(), 4);
    Ok(())
}

#[test]
fn deleting_the_last_row_clears_it_in_place() -> Result<()> {
    let mut book = labeled_sheet(3);
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();

    remove_row(sheet, 3);

    assert_eq!(column_a(sheet, 2), vec!["R1", "R2"]);
    assert!(sheet.get_cell("A3").is_none());
    assert_eq!(sheet.get_highest_row(), 2);
    Ok(())
}

#[test]
fn rows_outside_the_extent_are_silently_ignored() -> Result<()> {
    let mut book = labeled_sheet(3);
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();

    assert!(!remove_row(sheet, 0));
    assert!(!remove_row(sheet, 9));

    assert_eq!(column_a(sheet, 3), vec!["R1", "R2", "R3"]);
    Ok(())
}

#[test]
fn bulk_deletion_compensates_for_earlier_removals() -> Result<()> {
    let mut book = labeled_sheet(8);
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();

    assert_eq!(delete_rows(sheet, &[3, 5, 7])?, 3);

    assert_eq!(column_a(sheet, 5), vec!["R1", "R2", "R4", "R6", "R8"]);
    assert_eq!(sheet.get_highest_row(), 5);
    Ok(())
}

#[test]
fn bulk_deletion_reports_only_actual_removals() -> Result<()> {
    let mut book = labeled_sheet(3);
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();

    assert_eq!(delete_rows(sheet, &[2, 9])?, 1);

    assert_eq!(column_a(sheet, 2), vec!["R1", "R3"]);
    Ok(())
}

#[test]
fn bulk_deletion_can_take_out_every_listed_row_including_the_last() -> Result<()> {
    let mut book = labeled_sheet(4);
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();

    assert_eq!(delete_rows(sheet, &[1, 4])?, 2);

    assert_eq!(column_a(sheet, 2), vec!["R2", "R3"]);
    Ok(())
}

#[test]
fn unsorted_bulk_input_is_rejected_before_any_mutation() -> Result<()> {
    let mut book = labeled_sheet(5);
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();

    assert!(delete_rows(sheet, &[5, 3]).is_err());
    assert!(delete_rows(sheet, &[2, 2]).is_err());

    assert_eq!(column_a(sheet, 5), vec!["R1", "R2", "R3", "R4", "R5"]);
    Ok(())
}

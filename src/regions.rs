use anyhow::{Result, bail};
use umya_spreadsheet::Worksheet;
use umya_spreadsheet::helper::coordinate::{coordinate_from_index, index_from_coordinate};

/// Rectangular bounds of a merged region, 1-based inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionBounds {
    pub first_row: u32,
    pub last_row: u32,
    pub first_col: u32,
    pub last_col: u32,
}

impl RegionBounds {
    pub fn to_range(self) -> String {
        format!(
            "{}:{}",
            coordinate_from_index(&self.first_col, &self.first_row),
            coordinate_from_index(&self.last_col, &self.last_row)
        )
    }

    fn overlaps(self, other: RegionBounds) -> bool {
        !(self.last_row < other.first_row
            || other.last_row < self.first_row
            || self.last_col < other.first_col
            || other.last_col < self.first_col)
    }
}

pub(crate) fn parse_region(range: &str) -> Option<RegionBounds> {
    let (start, end) = match range.split_once(':') {
        Some((start, end)) => (start, end),
        None => (range, range),
    };
    let (first_col, first_row, _, _) = index_from_coordinate(start.trim());
    let (last_col, last_row, _, _) = index_from_coordinate(end.trim());
    Some(RegionBounds {
        first_row: first_row?,
        last_row: last_row?,
        first_col: first_col?,
        last_col: last_col?,
    })
}

/// Every merged region of the sheet, parsed into numeric bounds.
pub fn merged_regions(sheet: &Worksheet) -> Vec<RegionBounds> {
    sheet
        .get_merge_cells()
        .iter()
        .filter_map(|range| parse_region(&range.get_range()))
        .collect()
}

/// Adds a merged region over the given rectangle. A window that spans no
/// second row and no second column is tolerated as a no-op; a request
/// overlapping an existing region violates the sheet invariant and fails.
pub fn merge_region(
    sheet: &mut Worksheet,
    first_row: u32,
    last_row: u32,
    first_col: u32,
    last_col: u32,
) -> Result<bool> {
    if !(first_row < last_row || first_col < last_col) {
        tracing::debug!(first_row, first_col, "merge window spans a single cell; ignored");
        return Ok(false);
    }
    if first_row == 0 || first_col == 0 || first_row > last_row || first_col > last_col {
        bail!("merge region must be a normalized 1-based rectangle");
    }
    let candidate = RegionBounds {
        first_row,
        last_row,
        first_col,
        last_col,
    };
    for existing in merged_regions(sheet) {
        if candidate.overlaps(existing) {
            bail!(
                "merge request {} overlaps existing region {}",
                candidate.to_range(),
                existing.to_range()
            );
        }
    }
    sheet.add_merge_cells(candidate.to_range());
    Ok(true)
}

/// Duplicates every region anchored at `source_row` onto `target_row`,
/// keeping the column span and the row-span height. Regions anchored on any
/// other row, including multi-row merges that span across `source_row`,
/// are left untouched, so their visual span can desynchronize when rows
/// shift beneath them. Known limitation, kept for fidelity with the
/// row-copy contract.
pub fn remap_regions_for_row_copy(sheet: &mut Worksheet, source_row: u32, target_row: u32) -> u64 {
    let copies: Vec<String> = merged_regions(sheet)
        .into_iter()
        .filter(|region| region.first_row == source_row)
        .map(|region| {
            RegionBounds {
                first_row: target_row,
                last_row: target_row + (region.last_row - region.first_row),
                first_col: region.first_col,
                last_col: region.last_col,
            }
            .to_range()
        })
        .collect();
    let added = copies.len() as u64;
    for range in copies {
        sheet.add_merge_cells(range);
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ranges_and_single_cells() {
        let bounds = parse_region("B2:D5").unwrap();
        assert_eq!(bounds.first_row, 2);
        assert_eq!(bounds.last_row, 5);
        assert_eq!(bounds.first_col, 2);
        assert_eq!(bounds.last_col, 4);
        assert_eq!(bounds.to_range(), "B2:D5");

        let cell = parse_region("C3").unwrap();
        assert_eq!(cell.first_row, 3);
        assert_eq!(cell.last_row, 3);
        assert_eq!(cell.first_col, 3);
        assert_eq!(cell.last_col, 3);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_region("nope").is_none());
    }

    #[test]
    fn single_cell_and_fully_inverted_windows_are_noops_but_half_inverted_fails() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();

        assert_eq!(merge_region(sheet, 2, 2, 2, 2).unwrap(), false);
        assert_eq!(merge_region(sheet, 4, 2, 3, 1).unwrap(), false);
        // Rows inverted while the columns span a real window is malformed,
        // not degenerate.
        assert!(merge_region(sheet, 4, 2, 1, 3).is_err());
        assert!(merge_region(sheet, 0, 2, 1, 3).is_err());
        assert!(merged_regions(sheet).is_empty());
    }
}

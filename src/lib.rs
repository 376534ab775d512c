//! Row-structure editing primitives for xlsx worksheets.
//!
//! The crate performs index-consistent structural edits on a worksheet held
//! in memory by `umya-spreadsheet`: shifting contiguous row ranges to open
//! or close gaps, deleting rows singly or in bulk, cloning rows with their
//! styles, heights, comments, and typed values, duplicating merged regions
//! anchored at a copied row, and attaching explicit-list dropdown
//! validations. [`batch`] exposes the whole surface as a serializable op
//! enum plus an applier, in memory or straight against an xlsx file.
//!
//! All row and column indices are 1-based, matching the underlying model.
//! Nothing here locks: a worksheet must only ever be mutated from one
//! logical request at a time.

pub mod batch;
pub mod cells;
pub mod download;
pub mod errors;
pub mod filetype;
pub mod regions;
pub mod rows;
pub mod shift;
pub mod validation;

pub use batch::{EditSummary, SheetEditOp, apply_sheet_edits, apply_sheet_edits_to_file};
pub use cells::copy_cell;
pub use download::{EXCEL_CONTENT_TYPE, attachment_headers, attachment_headers_encoded};
pub use errors::{DownloadError, FileTypeError};
pub use filetype::FileKind;
pub use regions::{RegionBounds, merge_region, merged_regions, remap_regions_for_row_copy};
pub use rows::{add_and_copy_rows, clone_row, copy_rows_after, delete_rows, remove_row};
pub use shift::{ShiftOptions, shift_rows};
pub use validation::{ListValidation, build_list_validation, set_dropdown};

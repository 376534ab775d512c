use anyhow::{Result, anyhow, bail};
use umya_spreadsheet::helper::coordinate::coordinate_from_index;
use umya_spreadsheet::{DataValidation, DataValidationValues, DataValidations, Worksheet};

/// Longest formula1 the workbook format accepts for an in-cell explicit
/// list, quotes included.
const EXPLICIT_LIST_LIMIT: usize = 255;

/// The validation object built for a dropdown request. Which variant comes
/// back depends on what the workbook format can express for the constraint,
/// never on caller choice.
#[derive(Debug)]
pub enum ListValidation {
    /// In-cell explicit list with the invalid-input error alert enabled.
    /// The model carries no `showDropDown` attribute, so the native arrow
    /// cannot be suppressed; the alert is the styled half of the contract.
    Styled(DataValidation),
    /// Compatibility fallback for oversized lists: the constraint alone,
    /// no error alert.
    Plain(DataValidation),
}

/// Builds the list constraint for `values` over `sqref`, choosing the
/// variant by the in-cell formula capability of the format.
pub fn build_list_validation(values: &[String], sqref: &str) -> Result<ListValidation> {
    if values.is_empty() {
        bail!("dropdown requires at least one allowed value");
    }
    if let Some(bad) = values.iter().find(|value| value.contains('"')) {
        bail!("dropdown value '{bad}' contains a double quote, which the list formula cannot carry");
    }
    let formula = format!("\"{}\"", values.join(","));

    let mut validation = DataValidation::default();
    validation.set_type(DataValidationValues::List);
    validation.set_allow_blank(true);
    validation.set_formula1(formula.clone());
    validation
        .get_sequence_of_references_mut()
        .set_sqref(sqref.to_string());

    if formula.len() <= EXPLICIT_LIST_LIMIT {
        Ok(ListValidation::Styled(validation))
    } else {
        tracing::warn!(
            sqref,
            formula_len = formula.len(),
            "explicit list exceeds the in-cell formula limit; falling back to the plain dropdown"
        );
        Ok(ListValidation::Plain(validation))
    }
}

/// Restricts the rectangle to an explicit value list, attaching exactly one
/// data validation. A repeated call for the same range replaces the earlier
/// validation instead of stacking a duplicate.
pub fn set_dropdown(
    sheet: &mut Worksheet,
    first_row: u32,
    last_row: u32,
    first_col: u32,
    last_col: u32,
    values: &[String],
) -> Result<()> {
    if first_row == 0 || first_col == 0 || first_row > last_row || first_col > last_col {
        bail!("dropdown range must be a normalized 1-based rectangle");
    }
    let sqref = format!(
        "{}:{}",
        coordinate_from_index(&first_col, &first_row),
        coordinate_from_index(&last_col, &last_row)
    );

    let validation = match build_list_validation(values, &sqref)? {
        ListValidation::Styled(mut validation) => {
            validation.set_show_error_message(true);
            validation
        }
        ListValidation::Plain(validation) => validation,
    };

    if sheet.get_data_validations_mut().is_none() {
        sheet.set_data_validations(DataValidations::default());
    }
    let validations = sheet
        .get_data_validations_mut()
        .ok_or_else(|| anyhow!("failed to initialize data validations"))?;
    validations
        .get_data_validation_list_mut()
        .retain(|existing| existing.get_sequence_of_references().get_sqref() != sqref);
    validations.add_data_validation_list(validation);
    Ok(())
}

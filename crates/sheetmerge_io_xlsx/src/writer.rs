//! XLSX writer kernel that serializes the merged output sheet.

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::conf::{N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::spec::{MergeError, SpecOutputSheet};
use crate::util::{cast_col_num, cast_row_num, sanitize_sheet_name};

/// Serialize `sheet` as a single-sheet `.xlsx` workbook held in memory.
///
/// Empty cell texts are left blank. The whole call fails when the grid does not
/// fit in one worksheet or the workbook cannot be encoded.
pub fn write_output_workbook(
    sheet: &SpecOutputSheet,
    sheet_name: &str,
) -> Result<Vec<u8>, MergeError> {
    validate_excel_limits(sheet)?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sanitize_sheet_name(sheet_name, "_"))
        .map_err(derive_xlsx_error)?;

    for (n_idx_row, l_cells) in sheet.rows().iter().enumerate() {
        write_row(worksheet, n_idx_row, l_cells)?;
    }

    workbook.save_to_buffer().map_err(derive_xlsx_error)
}

fn validate_excel_limits(sheet: &SpecOutputSheet) -> Result<(), MergeError> {
    let n_rows = sheet.height();
    let n_cols = sheet.width();
    if n_rows > N_NROWS_EXCEL_MAX || n_cols > N_NCOLS_EXCEL_MAX {
        return Err(MergeError::ExcelLimitExceeded { n_rows, n_cols });
    }
    Ok(())
}

fn write_row(
    worksheet: &mut Worksheet,
    n_idx_row: usize,
    l_cells: &[String],
) -> Result<(), MergeError> {
    let n_row = cast_row_num(n_idx_row).map_err(MergeError::Serialize)?;
    for (n_idx_col, value) in l_cells.iter().enumerate() {
        if value.is_empty() {
            continue;
        }
        let n_col = cast_col_num(n_idx_col).map_err(MergeError::Serialize)?;
        worksheet
            .write_string(n_row, n_col, value)
            .map_err(derive_xlsx_error)?;
    }
    Ok(())
}

fn derive_xlsx_error(err: XlsxError) -> MergeError {
    MergeError::Serialize(format!("xlsx write error: {err}"))
}

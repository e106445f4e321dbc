//! Stateless helper utilities used by the merge kernel.

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::SpecInputFile;

////////////////////////////////////////////////////////////////////////////////
// #region InputOrdering

/// Sort inputs ascending by name (plain byte order, extension included).
///
/// Names are not parsed as dates. Equal names fall back to comparing the
/// sources so the order never depends on the caller's sequence.
pub fn sort_input_files(files: &mut [SpecInputFile]) {
    files.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.source.cmp(&b.source)));
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RowShaping

/// Drop trailing empty cell texts of one row.
pub fn trim_trailing_empty_cells(cells: &mut Vec<String>) {
    while cells.last().is_some_and(String::is_empty) {
        cells.pop();
    }
}

/// Drop trailing rows that hold no cells.
pub fn trim_trailing_empty_rows(rows: &mut Vec<Vec<String>>) {
    while rows.last().is_some_and(Vec::is_empty) {
        rows.pop();
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region IndexCasting

/// Cast a 0-based row index to the writer's row type.
pub fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

/// Cast a 0-based column index to the writer's column type.
pub fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

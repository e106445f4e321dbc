//! Merge constants and default preset factories.

use crate::spec::SpecMergeOptions;

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Name of the single sheet in the merged workbook.
pub const C_SHEET_NAME_DEFAULT: &str = "Sheet1";
/// Media type of the merged workbook.
pub const C_MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// File-name globs recognized as workbooks when scanning directories.
pub const TUP_WORKBOOK_PATTERNS_DEFAULT: [&str; 5] =
    ["*.xlsx", "*.xlsm", "*.xlsb", "*.xls", "*.ods"];

/// Build default merge options.
pub fn derive_default_merge_options() -> SpecMergeOptions {
    SpecMergeOptions::default()
}

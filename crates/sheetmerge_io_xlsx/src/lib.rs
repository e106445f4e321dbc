//! `sheetmerge_io_xlsx` v1:
//! Rust-side workbook merge kernel.
//!
//! Pipeline modules:
//! - `conf`   : constants and default presets
//! - `spec`   : inputs/state/options/errors
//! - `report` : per-merge report model
//! - `util`   : pure helper functions
//! - `reader` : workbook decoding into text rows
//! - `merge`  : ordering, header dedup and row append
//! - `writer` : output workbook serialization
pub mod conf;
pub mod merge;
pub mod reader;
pub mod report;
pub mod spec;
pub mod util;
pub mod writer;

#[cfg(test)]
mod testutil;

pub use conf::{
    C_MIME_XLSX, C_SHEET_NAME_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX,
    N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL, TUP_WORKBOOK_PATTERNS_DEFAULT,
};
pub use merge::{append_sheet_rows, append_workbook, merge_workbooks, plan_merge};
pub use reader::{decode_input_file, decode_workbook_bytes};
pub use report::{ReportMerge, ReportMergeBuilder, SpecFileReport, SpecSheetReport};
pub use spec::{
    EnumInputSource, EnumMergeOutcome, MergeError, SpecAppendStats, SpecDecodedSheet,
    SpecDecodedWorkbook, SpecInputFile, SpecMergeOptions, SpecMergeOutput, SpecMergeState,
    SpecOutputSheet,
};
pub use util::{sanitize_sheet_name, sort_input_files};
pub use writer::write_output_workbook;

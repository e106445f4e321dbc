//! Shared merge specification models.

use std::fmt;
use std::path::PathBuf;

use crate::conf::C_SHEET_NAME_DEFAULT;
use crate::report::ReportMerge;

////////////////////////////////////////////////////////////////////////////////
// #region InputSpecification

/// Where the bytes of one input workbook come from.
///
/// Variant order participates in the tie-break of [`crate::util::sort_input_files`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnumInputSource {
    /// Workbook bytes already held in memory (e.g. an HTTP upload part).
    Bytes(Vec<u8>),
    /// Workbook stored on the local filesystem; opened lazily during the merge.
    Path(PathBuf),
}

/// One named input workbook. `name` is the ordering key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecInputFile {
    /// File name as supplied by the caller, extension included.
    pub name: String,
    /// Byte source.
    pub source: EnumInputSource,
}

impl SpecInputFile {
    /// Build an input from in-memory bytes.
    pub fn from_bytes(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            source: EnumInputSource::Bytes(content.into()),
        }
    }

    /// Build an input from a filesystem path; the name is the path's file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let name = path
            .file_name()
            .map(|val| val.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self {
            name,
            source: EnumInputSource::Path(path),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DecodedWorkbook

/// One sheet of a decoded workbook, with either its text rows or the read failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDecodedSheet {
    /// Sheet name as stored in the workbook.
    pub sheet_name: String,
    /// Rows read from `A1`, each row a list of cell texts.
    pub rows: Result<Vec<Vec<String>>, String>,
}

/// Decoded workbook: sheets in stored order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecDecodedWorkbook {
    /// Sheets in workbook order.
    pub sheets: Vec<SpecDecodedSheet>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OutputSheet

/// Growing output grid addressed by 1-based `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecOutputSheet {
    rows: Vec<Vec<String>>,
}

impl SpecOutputSheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of materialized rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// All rows, index 0 holding output row 1.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Read cell `(row, col)`, both 1-based. `None` when never written.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        if row == 0 || col == 0 {
            return None;
        }
        self.rows
            .get(row - 1)
            .and_then(|l_cells| l_cells.get(col - 1))
            .map(String::as_str)
    }

    /// Make sure rows `1..=row` exist.
    pub fn ensure_row(&mut self, row: usize) {
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
    }

    /// Write cell `(row, col)`, both 1-based. Index 0 is "not yet written" and ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, value: String) {
        if row == 0 || col == 0 {
            return;
        }
        self.ensure_row(row);
        let l_cells = &mut self.rows[row - 1];
        if l_cells.len() < col {
            l_cells.resize(col, String::new());
        }
        l_cells[col - 1] = value;
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MergeState

/// Explicit accumulator threaded through every append step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecMergeState {
    /// Next output row (1-based). Starts at 1 and only grows.
    pub row_cursor: usize,
    /// Output grid written so far.
    pub sheet: SpecOutputSheet,
}

impl SpecMergeState {
    /// Fresh state: cursor at row 1, empty sheet.
    pub fn new() -> Self {
        Self {
            row_cursor: 1,
            sheet: SpecOutputSheet::new(),
        }
    }

    /// Number of rows copied so far.
    pub fn rows_written(&self) -> usize {
        self.row_cursor - 1
    }
}

impl Default for SpecMergeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters produced by one [`crate::merge::append_sheet_rows`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecAppendStats {
    /// Rows present in the source sheet.
    pub cnt_rows_read: usize,
    /// Rows copied into the output.
    pub cnt_rows_copied: usize,
    /// Source row 0 was dropped by the header rule.
    pub if_header_skipped: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MergeOptionsAndOutput

/// Merge call options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecMergeOptions {
    /// Name of the single output sheet (sanitized before use).
    pub sheet_name: String,
}

impl Default for SpecMergeOptions {
    fn default() -> Self {
        Self {
            sheet_name: C_SHEET_NAME_DEFAULT.to_string(),
        }
    }
}

/// Successful merge result.
#[derive(Debug, Clone)]
pub struct SpecMergeOutput {
    /// Serialized `.xlsx` bytes.
    pub content: Vec<u8>,
    /// Per-file/per-sheet outcomes.
    pub report: ReportMerge,
}

/// Outcome of one file or one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumMergeOutcome {
    /// Contributed to the output (possibly zero rows).
    Merged,
    /// Left out; reason text.
    Skipped(String),
}

impl EnumMergeOutcome {
    /// Whether the item was skipped.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// "Whole merge failed" errors. Per-file and per-sheet failures never surface here.
#[derive(Debug)]
pub enum MergeError {
    /// Output grid does not fit in one Excel worksheet.
    ExcelLimitExceeded {
        /// Output height.
        n_rows: usize,
        /// Output width.
        n_cols: usize,
    },
    /// Workbook encoding failed.
    Serialize(String),
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExcelLimitExceeded { n_rows, n_cols } => write!(
                f,
                "Merged sheet exceeds Excel limits: rows={n_rows} cols={n_cols}"
            ),
            Self::Serialize(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for MergeError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_sheet_uses_one_based_addressing() {
        let mut sheet = SpecOutputSheet::new();
        sheet.set_cell(2, 3, "x".to_string());

        assert_eq!(sheet.height(), 2);
        assert_eq!(sheet.width(), 3);
        assert_eq!(sheet.cell(2, 3), Some("x"));
        assert_eq!(sheet.cell(2, 1), Some(""));
        assert_eq!(sheet.cell(1, 1), None);
        assert_eq!(sheet.cell(0, 3), None);
    }

    #[test]
    fn output_sheet_ignores_row_zero() {
        let mut sheet = SpecOutputSheet::new();
        sheet.set_cell(0, 1, "x".to_string());
        sheet.set_cell(1, 0, "y".to_string());
        assert_eq!(sheet.height(), 0);
    }

    #[test]
    fn input_from_path_uses_file_name() {
        let file = SpecInputFile::from_path("/tmp/in/2024-01.xlsx");
        assert_eq!(file.name, "2024-01.xlsx");
        assert!(matches!(file.source, EnumInputSource::Path(_)));
    }

    #[test]
    fn merge_error_display() {
        let err = MergeError::ExcelLimitExceeded {
            n_rows: 2_000_000,
            n_cols: 3,
        };
        assert_eq!(
            err.to_string(),
            "Merged sheet exceeds Excel limits: rows=2000000 cols=3"
        );
    }
}

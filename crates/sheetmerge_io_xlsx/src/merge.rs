//! Merge orchestration: order, ingest, flatten, append, serialize.

use crate::reader::decode_input_file;
use crate::report::{ReportMerge, ReportMergeBuilder, SpecFileReport, SpecSheetReport};
use crate::spec::{
    EnumMergeOutcome, MergeError, SpecAppendStats, SpecDecodedWorkbook, SpecInputFile,
    SpecMergeOptions, SpecMergeOutput, SpecMergeState,
};
use crate::util::sort_input_files;
use crate::writer::write_output_workbook;

/// Merge all rows of all sheets of `files` into one single-sheet workbook.
///
/// This function performs:
/// 1. Name-ordering of the inputs (caller order is irrelevant).
/// 2. Per-file decode; undecodable files are skipped.
/// 3. Per-sheet append; unreadable sheets are skipped.
/// 4. Serialization of the accumulated sheet.
///
/// Returns [`MergeError`] only when serialization fails. Zero inputs produce
/// a workbook with zero data rows.
pub fn merge_workbooks(
    files: Vec<SpecInputFile>,
    options: &SpecMergeOptions,
) -> Result<SpecMergeOutput, MergeError> {
    let (state, report) = plan_merge(files);
    let content = write_output_workbook(&state.sheet, &options.sheet_name)?;
    tracing::info!("{report}");
    Ok(SpecMergeOutput { content, report })
}

/// Run ordering, decoding and appending without serializing.
pub fn plan_merge(mut files: Vec<SpecInputFile>) -> (SpecMergeState, ReportMerge) {
    sort_input_files(&mut files);

    let mut state = SpecMergeState::new();
    let mut builder_report = ReportMergeBuilder::default();

    for file in &files {
        // Decoded content is dropped at the end of each iteration.
        match decode_input_file(file) {
            Ok(workbook) => {
                let (state_next, file_report) = append_workbook(state, &file.name, &workbook);
                state = state_next;
                builder_report.add_file(file_report);
            }
            Err(reason) => {
                tracing::warn!(file = %file.name, "skipping file: {reason}");
                builder_report.add_file(SpecFileReport::skipped(&file.name, reason));
            }
        }
    }

    let n_rows_written = state.rows_written() as u64;
    (state, builder_report.build(n_rows_written))
}

/// Append every readable sheet of one decoded workbook, in stored order.
pub fn append_workbook(
    mut state: SpecMergeState,
    file_name: &str,
    workbook: &SpecDecodedWorkbook,
) -> (SpecMergeState, SpecFileReport) {
    let mut l_sheet_reports = Vec::with_capacity(workbook.sheets.len());

    for sheet in &workbook.sheets {
        match &sheet.rows {
            Ok(l_rows) => {
                let (state_next, stats) = append_sheet_rows(state, l_rows);
                state = state_next;
                tracing::debug!(
                    file = %file_name,
                    sheet = %sheet.sheet_name,
                    rows_read = stats.cnt_rows_read,
                    rows_copied = stats.cnt_rows_copied,
                    "merged sheet"
                );
                l_sheet_reports.push(SpecSheetReport::merged(&sheet.sheet_name, stats));
            }
            Err(reason) => {
                tracing::warn!(
                    file = %file_name,
                    sheet = %sheet.sheet_name,
                    "skipping sheet: {reason}"
                );
                l_sheet_reports.push(SpecSheetReport::skipped(&sheet.sheet_name, reason));
            }
        }
    }

    let file_report = SpecFileReport {
        file_name: file_name.to_string(),
        outcome: EnumMergeOutcome::Merged,
        sheets: l_sheet_reports,
    };
    (state, file_report)
}

/// Copy one sheet's rows to the output at the cursor.
///
/// Row 0 is dropped when anything has already been written (`row_cursor != 1`).
/// Every other row is copied cell by cell to `(row_cursor, col + 1)` and the
/// cursor advances by one, empty rows included.
pub fn append_sheet_rows(
    mut state: SpecMergeState,
    rows: &[Vec<String>],
) -> (SpecMergeState, SpecAppendStats) {
    let mut stats = SpecAppendStats {
        cnt_rows_read: rows.len(),
        ..Default::default()
    };

    for (n_idx_row, row) in rows.iter().enumerate() {
        if n_idx_row == 0 && state.row_cursor != 1 {
            stats.if_header_skipped = true;
            continue;
        }

        state.sheet.ensure_row(state.row_cursor);
        for (n_idx_col, value) in row.iter().enumerate() {
            state
                .sheet
                .set_cell(state.row_cursor, n_idx_col + 1, value.clone());
        }
        state.row_cursor += 1;
        stats.cnt_rows_copied += 1;
    }

    (state, stats)
}

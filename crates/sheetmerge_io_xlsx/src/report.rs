//! Merge report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use crate::spec::{EnumMergeOutcome, SpecAppendStats};

/// Outcome of one sheet within one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetReport {
    /// Sheet name as stored in the source workbook.
    pub sheet_name: String,
    /// Merged or skipped (row-read failure).
    pub outcome: EnumMergeOutcome,
    /// Rows read from the sheet.
    pub cnt_rows_read: usize,
    /// Rows copied into the output.
    pub cnt_rows_copied: usize,
    /// Source row 0 was dropped as a repeated header.
    pub if_header_skipped: bool,
}

impl SpecSheetReport {
    /// Report for a sheet whose rows were appended.
    pub fn merged(sheet_name: impl Into<String>, stats: SpecAppendStats) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            outcome: EnumMergeOutcome::Merged,
            cnt_rows_read: stats.cnt_rows_read,
            cnt_rows_copied: stats.cnt_rows_copied,
            if_header_skipped: stats.if_header_skipped,
        }
    }

    /// Report for a sheet whose rows could not be read.
    pub fn skipped(sheet_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            outcome: EnumMergeOutcome::Skipped(reason.into()),
            cnt_rows_read: 0,
            cnt_rows_copied: 0,
            if_header_skipped: false,
        }
    }
}

/// Outcome of one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFileReport {
    /// Input file name.
    pub file_name: String,
    /// Merged or skipped (decode failure).
    pub outcome: EnumMergeOutcome,
    /// Per-sheet outcomes; empty when the file was skipped.
    pub sheets: Vec<SpecSheetReport>,
}

impl SpecFileReport {
    /// Report for a file that could not be decoded.
    pub fn skipped(file_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: EnumMergeOutcome::Skipped(reason.into()),
            sheets: vec![],
        }
    }

    /// Rows this file contributed to the output.
    pub fn rows_copied(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.cnt_rows_copied).sum()
    }
}

/// Aggregate outcome of one merge run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportMerge {
    /// Files in merge order (sorted by name).
    pub files: Vec<SpecFileReport>,
    /// Rows written to the output sheet.
    pub cnt_rows_written: u64,
    /// Non-fatal warnings, one per skipped file or sheet.
    pub warnings: Vec<String>,
}

impl ReportMerge {
    /// Number of files that were decoded and merged.
    pub fn files_merged(&self) -> usize {
        self.files.iter().filter(|f| !f.outcome.is_skipped()).count()
    }

    /// Number of files skipped on decode failure.
    pub fn files_skipped(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_skipped()).count()
    }

    /// Number of sheets merged across all files.
    pub fn sheets_merged(&self) -> usize {
        self.files
            .iter()
            .flat_map(|f| f.sheets.iter())
            .filter(|s| !s.outcome.is_skipped())
            .count()
    }

    /// Number of sheets skipped on row-read failure.
    pub fn sheets_skipped(&self) -> usize {
        self.files
            .iter()
            .flat_map(|f| f.sheets.iter())
            .filter(|s| s.outcome.is_skipped())
            .count()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_files".to_string(), self.files.len() as u64);
        dict_counts.insert("cnt_files_merged".to_string(), self.files_merged() as u64);
        dict_counts.insert("cnt_files_skipped".to_string(), self.files_skipped() as u64);
        dict_counts.insert("cnt_sheets_merged".to_string(), self.sheets_merged() as u64);
        dict_counts.insert(
            "cnt_sheets_skipped".to_string(),
            self.sheets_skipped() as u64,
        );
        dict_counts.insert("cnt_rows_written".to_string(), self.cnt_rows_written);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} files={} merged={} skipped={} sheets={} sheets_skipped={} rows={} warnings={}",
            dict_counts["cnt_files"],
            dict_counts["cnt_files_merged"],
            dict_counts["cnt_files_skipped"],
            dict_counts["cnt_sheets_merged"],
            dict_counts["cnt_sheets_skipped"],
            dict_counts["cnt_rows_written"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportMerge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[MERGE]"))
    }
}

/// Mutable accumulator for merge outcomes.
#[derive(Debug, Default, Clone)]
pub struct ReportMergeBuilder {
    /// See [`ReportMerge::files`].
    pub files: Vec<SpecFileReport>,
    /// See [`ReportMerge::warnings`].
    pub warnings: Vec<String>,
}

impl ReportMergeBuilder {
    /// Add one file report; skipped files and sheets also become warnings.
    pub fn add_file(&mut self, file_report: SpecFileReport) {
        if let EnumMergeOutcome::Skipped(reason) = &file_report.outcome {
            self.warnings
                .push(format!("Skipped file {:?}: {reason}", file_report.file_name));
        }
        for sheet_report in &file_report.sheets {
            if let EnumMergeOutcome::Skipped(reason) = &sheet_report.outcome {
                self.warnings.push(format!(
                    "Skipped sheet {:?} of {:?}: {reason}",
                    sheet_report.sheet_name, file_report.file_name
                ));
            }
        }
        self.files.push(file_report);
    }

    /// Finalize builder into immutable report.
    pub fn build(self, cnt_rows_written: u64) -> ReportMerge {
        ReportMerge {
            files: self.files,
            cnt_rows_written,
            warnings: self.warnings,
        }
    }
}

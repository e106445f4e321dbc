//! Workbook decoding into plain text rows.

use std::io::Cursor;

use calamine::{Data, ExcelDateTime, Range, Reader, open_workbook_auto_from_rs};

use crate::spec::{EnumInputSource, SpecDecodedSheet, SpecDecodedWorkbook, SpecInputFile};
use crate::util::{trim_trailing_empty_cells, trim_trailing_empty_rows};

/// Decode one input into sheets of text rows.
///
/// Path sources are read here and the handle is released before decoding.
/// Any failure means "skip this file".
pub fn decode_input_file(file: &SpecInputFile) -> Result<SpecDecodedWorkbook, String> {
    match &file.source {
        EnumInputSource::Bytes(v_content) => decode_workbook_bytes(v_content),
        EnumInputSource::Path(path) => {
            let v_content = std::fs::read(path)
                .map_err(|err| format!("Failed to open {}: {err}", path.display()))?;
            decode_workbook_bytes(&v_content)
        }
    }
}

/// Decode workbook bytes (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`).
///
/// The container must open; individual sheets may still fail and carry
/// their own error in [`SpecDecodedSheet::rows`].
pub fn decode_workbook_bytes(v_content: &[u8]) -> Result<SpecDecodedWorkbook, String> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(v_content))
        .map_err(|err| format!("Failed to decode workbook: {err}"))?;

    let l_sheets = workbook
        .sheet_names()
        .into_iter()
        .map(|sheet_name| {
            let rows = workbook
                .worksheet_range(&sheet_name)
                .map(|range| derive_text_rows_from_range(&range))
                .map_err(|err| format!("Failed to read rows: {err}"));
            SpecDecodedSheet { sheet_name, rows }
        })
        .collect();

    Ok(SpecDecodedWorkbook { sheets: l_sheets })
}

/// Flatten a used range into rows anchored at `A1`.
///
/// Rows and columns before the used range become empty rows/cells, trailing
/// empty cells are trimmed per row and trailing empty rows are dropped.
pub fn derive_text_rows_from_range(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((n_row_start, n_col_start)) = range.start() else {
        return vec![];
    };

    let mut l_rows: Vec<Vec<String>> = vec![Vec::new(); n_row_start as usize];
    for row in range.rows() {
        let mut l_cells = vec![String::new(); n_col_start as usize];
        l_cells.extend(row.iter().map(derive_cell_text));
        trim_trailing_empty_cells(&mut l_cells);
        l_rows.push(l_cells);
    }
    trim_trailing_empty_rows(&mut l_rows);
    l_rows
}

/// Textual representation of one cell.
pub fn derive_cell_text(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::String(val) => val.clone(),
        Data::Int(val) => val.to_string(),
        Data::Float(val) => format!("{val}"),
        Data::Bool(val) => if *val { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(err) => err.to_string(),
        Data::DateTime(dt) => derive_datetime_text(dt),
        Data::DateTimeIso(val) | Data::DurationIso(val) => val.clone(),
    }
}

/// Render a date-formatted serial number.
///
/// Dates become `YYYY-MM-DD`, with ` HH:MM:SS` appended when the serial has a
/// time part. Time-only serials (below one day) render as `HH:MM:SS`.
/// Durations render as elapsed `H:MM:SS` and may exceed 24 hours.
pub fn derive_datetime_text(dt: &ExcelDateTime) -> String {
    let n_value = dt.as_f64();
    if dt.is_duration() {
        let n_secs_total = (n_value * 86_400.0).round() as i64;
        let c_sign = if n_secs_total < 0 { "-" } else { "" };
        let n_secs = n_secs_total.abs();
        return format!(
            "{c_sign}{}:{:02}:{:02}",
            n_secs / 3600,
            n_secs / 60 % 60,
            n_secs % 60
        );
    }

    let (n_year, n_month, n_day, n_hour, n_min, n_sec, _) = dt.to_ymd_hms_milli();
    let c_time = format!("{n_hour:02}:{n_min:02}:{n_sec:02}");
    if (0.0..1.0).contains(&n_value) {
        return c_time;
    }
    let c_date = format!("{n_year:04}-{n_month:02}-{n_day:02}");
    if n_value.fract() == 0.0 {
        c_date
    } else {
        format!("{c_date} {c_time}")
    }
}

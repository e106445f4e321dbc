//! In-memory workbook fixtures for unit tests.

use std::io::Cursor;

use calamine::{Reader, open_workbook_auto_from_rs};
use rust_xlsxwriter::Workbook;

/// Build `.xlsx` bytes from `(sheet_name, rows)` pairs; empty texts are left blank.
pub fn build_xlsx_bytes(sheets: &[(&str, &[&[&str]])]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for (sheet_name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*sheet_name).expect("sheet name");
        for (n_idx_row, row) in rows.iter().enumerate() {
            for (n_idx_col, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                worksheet
                    .write_string(n_idx_row as u32, n_idx_col as u16, *value)
                    .expect("write cell");
            }
        }
    }
    workbook.save_to_buffer().expect("save fixture")
}

/// Read back every sheet of `.xlsx` bytes as `(sheet_name, text rows)`.
pub fn read_xlsx_rows(v_content: &[u8]) -> Vec<(String, Vec<Vec<String>>)> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(v_content)).expect("open output");
    workbook
        .sheet_names()
        .into_iter()
        .map(|sheet_name| {
            let range = workbook.worksheet_range(&sheet_name).expect("read range");
            (sheet_name, crate::reader::derive_text_rows_from_range(&range))
        })
        .collect()
}

/// Shorthand for building owned text rows.
pub fn rows(l_rows: &[&[&str]]) -> Vec<Vec<String>> {
    l_rows
        .iter()
        .map(|row| row.iter().map(|val| val.to_string()).collect())
        .collect()
}

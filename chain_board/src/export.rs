//! Spreadsheet export of report tables and forecast pivots.

use std::path::Path;

use anyhow::Context;
use rust_xlsxwriter::{Workbook, Worksheet};

use demand_forecast::ForecastPivot;

use crate::reports::Report;

/// A typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
}

/// Write one worksheet of headers + rows into a new workbook.
pub fn build_workbook(
    sheet: &str,
    headers: &[String],
    rows: &[Vec<Cell>],
) -> anyhow::Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet)
        .with_context(|| format!("invalid worksheet name '{sheet}'"))?;

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, header)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, r, col as u16, cell)?;
        }
    }

    Ok(workbook)
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> anyhow::Result<()> {
    match cell {
        Cell::Text(text) => worksheet.write_string(row, col, text)?,
        Cell::Int(value) => worksheet.write_number(row, col, *value as f64)?,
        Cell::Float(value) => worksheet.write_number(row, col, *value)?,
    };
    Ok(())
}

/// Save a single-sheet table export.
pub fn save_table(
    path: &Path,
    sheet: &str,
    headers: &[String],
    rows: &[Vec<Cell>],
) -> anyhow::Result<()> {
    let mut workbook = build_workbook(sheet, headers, rows)?;
    workbook
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Save a report as a single named worksheet.
pub fn save_report(path: &Path, report: &Report) -> anyhow::Result<()> {
    let headers = vec![report.label_header.clone(), report.value_header.clone()];
    let rows: Vec<Vec<Cell>> = report
        .rows
        .iter()
        .map(|(label, value)| vec![Cell::Text(label.clone()), Cell::Float(*value)])
        .collect();
    save_table(path, "Report", &headers, &rows)
}

/// Save the product-by-restaurant forecast pivot.
pub fn save_pivot(path: &Path, pivot: &ForecastPivot) -> anyhow::Result<()> {
    let (headers, rows) = pivot_table(pivot);
    save_table(path, "Forecast", &headers, &rows)
}

/// The pivot as (headers, rows) for export or printing.
pub fn pivot_table(pivot: &ForecastPivot) -> (Vec<String>, Vec<Vec<Cell>>) {
    let mut headers = vec!["Product".to_string()];
    headers.extend(pivot.restaurants().iter().cloned());

    let rows = pivot
        .rows()
        .map(|(product, cells)| {
            let mut row = vec![Cell::Text(product.to_string())];
            row.extend(cells.iter().map(|c| Cell::Int(*c)));
            row
        })
        .collect();

    (headers, rows)
}

/// Render a workbook to bytes instead of a file.
pub fn workbook_bytes(
    sheet: &str,
    headers: &[String],
    rows: &[Vec<Cell>],
) -> anyhow::Result<Vec<u8>> {
    let mut workbook = build_workbook(sheet, headers, rows)?;
    let bytes = workbook
        .save_to_buffer()
        .context("failed to render workbook")?;
    Ok(bytes)
}

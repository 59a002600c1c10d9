//! Tabular views of the registry.

use std::io::Write;
use std::path::Path;

use dog_map_dataset::Table;
use dog_map_dog_models::{DogRecord, columns};

use crate::RenderError;

/// Projects matching records onto the filtered-table columns
/// (`Age_Group`, `Gender`, `City_District`, `City_Quarter`, `Breed1`,
/// `Breed_Type`).
#[must_use]
pub fn filtered_table(records: &[&DogRecord]) -> Table {
    project(records, columns::FILTERED_TABLE)
}

/// Projects records onto arbitrary normalized columns. Unknown columns
/// render as empty cells.
#[must_use]
pub fn project(records: &[&DogRecord], fields: &[&str]) -> Table {
    Table {
        headers: fields.iter().map(|c| (*c).to_string()).collect(),
        rows: records
            .iter()
            .map(|r| {
                fields
                    .iter()
                    .map(|c| r.column_value(c).unwrap_or_default())
                    .collect()
            })
            .collect(),
    }
}

/// Writes `table` as aligned plain text, showing at most `limit` rows.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn write_text<W: Write>(
    table: &Table,
    out: &mut W,
    limit: Option<usize>,
) -> std::io::Result<()> {
    let shown = limit.map_or(table.rows.len(), |l| l.min(table.rows.len()));
    let rows = &table.rows[..shown];

    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &table.headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &rule, &widths)?;
    for row in rows {
        write_row(out, row, &widths)?;
    }

    if shown < table.rows.len() {
        writeln!(out, "... {} more rows", table.rows.len() - shown)?;
    }
    writeln!(out, "({} rows)", table.rows.len())
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> std::io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

/// Writes `table` as comma-separated values.
///
/// # Errors
///
/// Returns [`RenderError::Csv`] if writing fails.
pub fn write_csv<W: Write>(table: &Table, out: W) -> Result<(), RenderError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes `table` as a CSV file at `path`.
///
/// # Errors
///
/// Returns [`RenderError`] if the file cannot be created or written.
pub fn save_csv(table: &Table, path: &Path) -> Result<(), RenderError> {
    let file = std::fs::File::create(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(table, file)?;
    log::info!("Wrote {} table rows to {}", table.len(), path.display());
    Ok(())
}

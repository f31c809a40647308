use crate::summary::CountryRecord;

use super::model::{Column, Table, TableError, TablePage, TableRow};

/// Projects records onto `columns` and sorts them by `sort_column`.
/// The sort is stable, so rows with equal keys keep their input order.
pub fn build_table(
    records: &[CountryRecord],
    columns: &[Column],
    sort_column: Column,
    ascending: bool,
) -> Result<Table, TableError> {
    if columns.is_empty() {
        return Err(TableError::EmptyColumnSet);
    }
    let sort_at = columns
        .iter()
        .position(|column| *column == sort_column)
        .ok_or(TableError::SortColumnNotProjected(sort_column.name()))?;

    let mut rows: Vec<TableRow> = records
        .iter()
        .map(|record| TableRow {
            cells: columns.iter().map(|column| column.cell(record)).collect(),
        })
        .collect();

    rows.sort_by(|left, right| {
        let left = &left.cells[sort_at];
        let right = &right.cells[sort_at];
        if ascending {
            left.cmp(right)
        } else {
            right.cmp(left)
        }
    });

    Ok(Table {
        columns: columns.to_vec(),
        rows,
    })
}

/// Slices the table into consecutive pages of `rows_per_page` rows; the last
/// page may be shorter. Concatenating the pages in order reproduces the table.
pub fn split_table(table: &Table, rows_per_page: usize) -> Result<Vec<TablePage>, TableError> {
    if rows_per_page == 0 {
        return Err(TableError::InvalidPageSize);
    }

    Ok(table
        .rows
        .chunks(rows_per_page)
        .enumerate()
        .map(|(index, chunk)| TablePage {
            columns: table.columns.clone(),
            rows: chunk.to_vec(),
            index: index + 1,
        })
        .collect())
}

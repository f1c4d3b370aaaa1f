use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::snapshot::{Record, Snapshot, cell, find_id_column};
use crate::store::SheetStore;

/// A person's row, resolved from their identifier
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Located {
    /// 1-based spreadsheet row number
    pub row_index: u32,
    pub headers: Vec<String>,
    #[serde(rename = "data")]
    pub record: Record,
    pub id_column_index: usize,
}

/// Find the row whose identifier cell equals `identifier`
///
/// Reads a fresh snapshot of the whole data tab. Matching is string-exact
/// against the trimmed identifier and the first matching row wins.
///
/// # Errors
/// * `AppError::NoIdColumn` - no header mentions badge, batch or roll
/// * `AppError::NotFound` - no data row carries the identifier
/// * `AppError::Store` - the snapshot could not be read
pub async fn locate<S: SheetStore>(store: &S, identifier: &str) -> AppResult<Located> {
    let snapshot = Snapshot::new(store.read_all().await?);
    locate_in(&snapshot, identifier)
}

/// Same as [`locate`] over an already fetched snapshot
pub fn locate_in(snapshot: &Snapshot, identifier: &str) -> AppResult<Located> {
    let headers = snapshot.headers();
    let id_col = find_id_column(headers).ok_or(AppError::NoIdColumn)?;
    let wanted = identifier.trim();

    let (row_index, row) = snapshot
        .data_rows()
        .find(|(_, row)| cell(row, id_col) == wanted)
        .ok_or(AppError::NotFound)?;

    log::debug!("identifier matched row {row_index} (column {id_col})");

    Ok(Located {
        row_index,
        headers: headers.to_vec(),
        record: Record::from_row(headers, row),
        id_column_index: id_col,
    })
}

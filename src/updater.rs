//! Record Updater: diff submitted values against the live row, then write,
//! log and highlight what changed.
//!
//! The row write is the commit point. The audit append and the highlight run
//! afterwards as independent steps: both are attempted even when the other
//! fails, and a failure in either is reported without undoing the write. A
//! retried request sees the already written values and produces an empty diff,
//! so retries never duplicate audit rows.

use crate::audit::{AuditClock, AuditEntry};
use crate::error::{AppError, AppResult};
use crate::snapshot::cell;
use crate::store::{HIGHLIGHT, SheetStore};

/// Edits submitted for one row
#[derive(Clone, Debug, Default)]
pub struct UpdateRequest {
    /// 1-based spreadsheet row number
    pub row: u32,
    /// Field name -> proposed value, in submission order
    pub changes: Vec<(String, String)>,
    /// Identifier of the person submitting, for the audit log
    pub submitter: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldChange {
    pub column: usize,
    pub field: String,
    pub old_value: String,
    pub new_value: String,
}

/// Result of diffing proposed values against the current row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowDiff {
    /// Current row padded to header width, with new values substituted
    pub row: Vec<String>,
    pub changes: Vec<FieldChange>,
}

impl RowDiff {
    pub fn columns(&self) -> Vec<usize> {
        self.changes.iter().map(|c| c.column).collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Changed column indices, 0-based, in submission order
    pub changed: Vec<usize>,
}

/// Compare proposed values to the current row
///
/// Unknown field names are skipped. A field submitted twice is compared
/// against the live value each time and the last differing value wins in the
/// row buffer.
pub fn diff_row(headers: &[String], current: &[String], proposed: &[(String, String)]) -> RowDiff {
    let mut row: Vec<String> = (0..headers.len())
        .map(|col| cell(current, col).to_string())
        .collect();
    let mut changes: Vec<FieldChange> = Vec::new();

    for (field, new_value) in proposed {
        let Some(column) = headers.iter().position(|h| h == field) else {
            continue;
        };

        let old_value = cell(current, column);
        if old_value == new_value {
            continue;
        }

        row[column] = new_value.clone();
        match changes.iter_mut().find(|c| c.column == column) {
            Some(existing) => existing.new_value = new_value.clone(),
            None => changes.push(FieldChange {
                column,
                field: field.clone(),
                old_value: old_value.to_string(),
                new_value: new_value.clone(),
            }),
        }
    }

    RowDiff { row, changes }
}

/// Apply `request` to its row
///
/// # Errors
/// * `AppError::Validation` - row 0 (missing) or the header row
/// * `AppError::NotFound` - the row is empty or past the end of the sheet
/// * `AppError::Store` - reading or writing the row failed; nothing changed
/// * `AppError::PartialUpdate` - the row was written but logging or
///   highlighting failed
pub async fn update<S: SheetStore>(
    store: &S,
    request: &UpdateRequest,
    clock: &AuditClock,
) -> AppResult<UpdateOutcome> {
    if request.row == 0 {
        return Err(AppError::Validation("rowIndex required"));
    }
    if request.row == 1 {
        return Err(AppError::Validation("rowIndex must point at a data row"));
    }

    let headers = store.read_row(1).await?;
    let current = store.read_row(request.row).await?;
    if current.is_empty() {
        // Rows past the end of the sheet are never created through an edit.
        return Err(AppError::NotFound);
    }
    let diff = diff_row(&headers, &current, &request.changes);

    if diff.changes.is_empty() {
        log::info!("row {}: no changes submitted by {}", request.row, request.submitter);
        return Ok(UpdateOutcome::default());
    }

    store.write_row(request.row, &diff.row).await?;
    log::info!(
        "row {}: {} field(s) updated by {}",
        request.row,
        diff.changes.len(),
        request.submitter
    );

    let stamp = clock.now();
    let log_rows: Vec<Vec<String>> = diff
        .changes
        .iter()
        .map(|change| {
            AuditEntry {
                timestamp: stamp.clone(),
                user_id: request.submitter.clone(),
                field: change.field.clone(),
                old_value: change.old_value.clone(),
                new_value: change.new_value.clone(),
                row: request.row,
            }
            .to_row()
        })
        .collect();

    let columns = diff.columns();
    let logged = store.append_audit(&log_rows).await;
    let painted = store.highlight(request.row, &columns, HIGHLIGHT).await;

    if let Err(source) = logged {
        if let Err(format_err) = &painted {
            log::error!("row {}: highlight failed: {format_err}", request.row);
        }
        return Err(AppError::PartialUpdate {
            row: request.row,
            step: "audit append",
            source,
        });
    }
    if let Err(source) = painted {
        return Err(AppError::PartialUpdate {
            row: request.row,
            step: "highlight",
            source,
        });
    }

    Ok(UpdateOutcome { changed: columns })
}

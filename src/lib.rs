/*!
# Roster Bridge

A small web service that lets people find their own row in a shared
spreadsheet by badge, batch or roll number and correct it, with every change
audited and highlighted in the sheet.

## Overview

The service sits between a browser form and a hosted spreadsheet. It owns no
data: every request reads a fresh copy of what it needs from the sheet.

## Architecture

### Request flow
1. The browser posts an identifier to `/api/login`.
2. The **Record Locator** finds the identifier column by header name
   (`badge`, `batch` or `roll`, case-insensitive, leftmost wins) and returns
   the first row whose identifier cell matches.
3. The browser renders the fields and posts the edited ones to `/api/update`.
4. The **Record Updater** re-reads the live row, diffs it against the
   submission, writes the row back, appends one audit row per changed field to
   `History_Log` and paints the changed cells.

### Consistency
The row write is the commit point. The audit append and the highlight are
attempted independently afterwards; a failure in either is reported as a
server error but the written values stay. Retrying the same request yields an
empty diff, so nothing is logged twice. Concurrent edits of one row are last
write wins.

## Modules

- **column**: column-letter arithmetic and A1 row ranges
- **snapshot**: sheet snapshot, identifier column detection, records
- **locator**: record lookup by identifier
- **updater**: diff, write, audit, highlight
- **audit**: audit entries and regional timestamps
- **store**: the `SheetStore` trait every backend implements
- **google**: Google Sheets API backend with service account auth
- **memory**: in-process backend for tests and local runs
- **config**: environment configuration
- **error**: error taxonomy and HTTP mapping
- **app**: routing and server bootstrap

## REST API Endpoints

- `POST /api/login` - `{userId}` to `{rowIndex, headers, data, idColumnIndex}`
- `POST /api/update` - `{rowIndex, updates, userId}` to `{message, changed}`
- `GET /healthz` - liveness
*/

pub mod app;
pub mod audit;
pub mod column;
pub mod config;
pub mod error;
pub mod google;
pub mod locator;
pub mod memory;
pub mod snapshot;
pub mod store;
pub mod updater;

/// Re-export the types most callers need
pub use error::{AppError, AppResult};
pub use locator::{Located, locate};
pub use memory::MemoryStore;
pub use store::{SheetStore, StoreError};
pub use updater::{UpdateOutcome, UpdateRequest, update};

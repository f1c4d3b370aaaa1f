//! Seam between the request handlers and the hosted spreadsheet.
//!
//! Implementations address the first tab of one spreadsheet for data and a
//! separate append-only tab for the audit log.

use std::future::Future;
use thiserror::Error;

/// Failures talking to the spreadsheet store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("could not sign service account assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("malformed upstream response: {0}")]
    Malformed(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Background fill, each channel in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// Pale yellow painted behind every edited cell
pub const HIGHLIGHT: Rgb = Rgb {
    red: 1.0,
    green: 1.0,
    blue: 0.6,
};

/// Access to the hosted tabular-data store
///
/// Row numbers are 1-based like the spreadsheet UI; column indices are 0-based.
pub trait SheetStore: Send + Sync + 'static {
    /// Every row of the data tab, header row first
    fn read_all(&self) -> impl Future<Output = StoreResult<Vec<Vec<String>>>> + Send;

    /// All cells of one row of the data tab, empty when the row does not exist
    fn read_row(&self, row: u32) -> impl Future<Output = StoreResult<Vec<String>>> + Send;

    /// Replace one row of the data tab starting at column A
    fn write_row(
        &self,
        row: u32,
        values: &[String],
    ) -> impl Future<Output = StoreResult<()>> + Send;

    /// Append rows to the audit log tab
    fn append_audit(&self, rows: &[Vec<String>]) -> impl Future<Output = StoreResult<()>> + Send;

    /// Paint the background of the given cells of one row
    fn highlight(
        &self,
        row: u32,
        columns: &[usize],
        color: Rgb,
    ) -> impl Future<Output = StoreResult<()>> + Send;
}

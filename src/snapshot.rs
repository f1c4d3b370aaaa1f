use lazy_static::lazy_static;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

lazy_static! {
    // Header fragments that mark the column people identify themselves by.
    static ref ID_HEADER_REGEX: Regex = Regex::new(r"badge|batch|roll").unwrap();
}

/// Full copy of the sheet rows fetched for a single request
///
/// Row 0 is the header row. Every other row is read relative to the header
/// order, with missing trailing cells read as empty strings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    rows: Vec<Vec<String>>,
}

impl Snapshot {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Snapshot { rows }
    }

    /// Header row, empty when the sheet has no rows at all
    pub fn headers(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Data rows paired with their 1-based spreadsheet row number
    pub fn data_rows(&self) -> impl Iterator<Item = (u32, &[String])> {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, row)| (i as u32 + 1, row.as_slice()))
    }
}

/// Cell text at `col`, or `""` when the row is short
pub fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}

/// Leftmost header whose lowercased text contains `badge`, `batch` or `roll`
pub fn find_id_column(headers: &[String]) -> Option<usize> {
    headers
        .iter()
        .position(|h| ID_HEADER_REGEX.is_match(&h.to_lowercase()))
}

/// One sheet row viewed as an ordered header -> value mapping
///
/// Serializes as a JSON object in header order. A repeated header keeps its
/// first position and takes the value of its last column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn from_row(headers: &[String], row: &[String]) -> Self {
        let mut fields: Vec<(String, String)> = Vec::with_capacity(headers.len());

        for (col, header) in headers.iter().enumerate() {
            let value = cell(row, col).to_string();
            match fields.iter_mut().find(|(name, _)| name == header) {
                Some(existing) => existing.1 = value,
                None => fields.push((header.clone(), value)),
            }
        }

        Record { fields }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

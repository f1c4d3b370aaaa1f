use std::collections::HashSet;
use std::sync::RwLock;

use crate::store::{Rgb, SheetStore, StoreError, StoreResult};

/// Store operation that can be made to fail
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    Read,
    Write,
    Append,
    Format,
}

/// A cell that received a background fill
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Painted {
    pub row: u32,
    pub column: usize,
    pub color: Rgb,
}

/// In-process spreadsheet used for tests and local runs
///
/// Keeps the data tab, the audit tab and the painted cells in memory. Any
/// step can be switched to fail to reproduce upstream outages.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Vec<String>>>,
    audit: RwLock<Vec<Vec<String>>>,
    painted: RwLock<Vec<Painted>>,
    failing: RwLock<HashSet<Step>>,
}

impl MemoryStore {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        MemoryStore {
            rows: RwLock::new(rows),
            ..Default::default()
        }
    }

    /// Build from string literals, header row first
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    pub fn fail(&self, step: Step) {
        self.failing.write().unwrap().insert(step);
    }

    pub fn recover(&self, step: Step) {
        self.failing.write().unwrap().remove(&step);
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.read().unwrap().clone()
    }

    pub fn audit_rows(&self) -> Vec<Vec<String>> {
        self.audit.read().unwrap().clone()
    }

    pub fn painted(&self) -> Vec<Painted> {
        self.painted.read().unwrap().clone()
    }

    fn check(&self, step: Step) -> StoreResult<()> {
        if self.failing.read().unwrap().contains(&step) {
            return Err(StoreError::Unavailable(format!("{step:?} disabled")));
        }
        Ok(())
    }
}

impl SheetStore for MemoryStore {
    async fn read_all(&self) -> StoreResult<Vec<Vec<String>>> {
        self.check(Step::Read)?;
        Ok(self.rows())
    }

    async fn read_row(&self, row: u32) -> StoreResult<Vec<String>> {
        self.check(Step::Read)?;
        let rows = self.rows.read().unwrap();
        Ok(row
            .checked_sub(1)
            .and_then(|i| rows.get(i as usize))
            .cloned()
            .unwrap_or_default())
    }

    async fn write_row(&self, row: u32, values: &[String]) -> StoreResult<()> {
        self.check(Step::Write)?;
        let index = row
            .checked_sub(1)
            .ok_or_else(|| StoreError::Malformed("row 0 does not exist".to_string()))?
            as usize;

        let mut rows = self.rows.write().unwrap();
        if rows.len() <= index {
            rows.resize(index + 1, Vec::new());
        }
        rows[index] = values.to_vec();
        Ok(())
    }

    async fn append_audit(&self, rows: &[Vec<String>]) -> StoreResult<()> {
        self.check(Step::Append)?;
        self.audit.write().unwrap().extend_from_slice(rows);
        Ok(())
    }

    async fn highlight(&self, row: u32, columns: &[usize], color: Rgb) -> StoreResult<()> {
        self.check(Step::Format)?;
        let mut painted = self.painted.write().unwrap();
        painted.extend(columns.iter().map(|&column| Painted { row, column, color }));
        Ok(())
    }
}

use chrono::{DateTime, FixedOffset, Utc};

/// India Standard Time, the zone audit stamps are written in by default
pub const DEFAULT_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Stamps audit entries in a fixed regional offset
#[derive(Clone, Copy, Debug)]
pub struct AuditClock {
    offset: FixedOffset,
}

impl AuditClock {
    pub fn new(offset: FixedOffset) -> Self {
        AuditClock { offset }
    }

    pub fn now(&self) -> String {
        self.stamp(Utc::now())
    }

    /// Format like `19/10/2026, 3:04:05 pm`
    pub fn stamp(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.offset)
            .format("%d/%m/%Y, %-I:%M:%S %P")
            .to_string()
    }
}

impl Default for AuditClock {
    fn default() -> Self {
        // The constant is well inside the valid offset range.
        AuditClock::new(FixedOffset::east_opt(DEFAULT_OFFSET_SECS).unwrap())
    }
}

/// One immutable log row recording a single field change
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditEntry {
    pub timestamp: String,
    pub user_id: String,
    pub field: String,
    pub old_value: String,
    pub new_value: String,
    pub row: u32,
}

impl AuditEntry {
    /// Cells in `History_Log!A:F` column order
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.user_id.clone(),
            self.field.clone(),
            self.old_value.clone(),
            self.new_value.clone(),
            self.row.to_string(),
        ]
    }
}

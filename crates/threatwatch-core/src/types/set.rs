use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ThreatRecord;

/// The threat records currently held in memory.
///
/// A set is replaced wholesale by every successful fetch; it is never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatSet {
    /// URL the records were fetched from
    #[serde(default)]
    pub source: Option<String>,

    /// When the fetch completed
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,

    /// Records in feed order
    #[serde(default)]
    pub records: Vec<ThreatRecord>,
}

impl ThreatSet {
    /// The empty set held before any fetch succeeds
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            source: None,
            fetched_at: None,
            records: Vec::new(),
        }
    }

    /// A set freshly fetched from `source`
    #[must_use]
    pub fn from_feed(source: impl Into<String>, records: Vec<ThreatRecord>) -> Self {
        Self {
            source: Some(source.into()),
            fetched_at: Some(Utc::now()),
            records,
        }
    }

    /// Number of records held
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in feed order
    #[must_use]
    pub fn records(&self) -> &[ThreatRecord] {
        &self.records
    }

    /// Iterate over records in feed order
    pub fn iter(&self) -> std::slice::Iter<'_, ThreatRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ThreatSet {
    type Item = &'a ThreatRecord;
    type IntoIter = std::slice::Iter<'a, ThreatRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

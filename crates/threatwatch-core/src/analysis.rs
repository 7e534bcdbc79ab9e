//! Risk analysis over held threat records.

use serde::Serialize;

use crate::{Result, ThreatRecord};

/// Severity at or above which a record is flagged as high risk
pub const HIGH_RISK_THRESHOLD: f64 = 7.0;

/// Severity assumed for records without a `severity` field
const DEFAULT_SEVERITY: f64 = 0.0;

/// Returns true if the record meets the high-risk threshold.
pub fn is_high_risk(record: &ThreatRecord) -> Result<bool> {
    let severity = record.severity()?.unwrap_or(DEFAULT_SEVERITY);
    Ok(severity >= HIGH_RISK_THRESHOLD)
}

/// Select the high-risk records, preserving their order.
///
/// The first record with a malformed severity aborts the scan.
pub fn high_risk(records: &[ThreatRecord]) -> Result<Vec<ThreatRecord>> {
    let mut flagged = Vec::new();

    for (index, record) in records.iter().enumerate() {
        if is_high_risk(record).map_err(|e| e.at_index(index))? {
            flagged.push(record.clone());
        }
    }

    Ok(flagged)
}

/// Counts describing a threat set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskSummary {
    /// Records held
    pub total: usize,
    /// Records at or above the threshold
    pub high_risk: usize,
    /// Records without a severity field
    pub missing_severity: usize,
}

/// Summarize a list of records.
pub fn summarize(records: &[ThreatRecord]) -> Result<RiskSummary> {
    let mut summary = RiskSummary {
        total: records.len(),
        ..RiskSummary::default()
    };

    for (index, record) in records.iter().enumerate() {
        match record.severity().map_err(|e| e.at_index(index))? {
            None => summary.missing_severity += 1,
            Some(severity) if severity >= HIGH_RISK_THRESHOLD => summary.high_risk += 1,
            Some(_) => {}
        }
    }

    Ok(summary)
}

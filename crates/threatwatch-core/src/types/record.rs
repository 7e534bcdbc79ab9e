use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Result, ThreatError};

/// Field holding a record's numeric severity
pub const SEVERITY_FIELD: &str = "severity";

/// One entry of a threat feed.
///
/// Records are opaque: they are stored exactly as the feed sent them and only
/// the `severity` field is ever examined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreatRecord(Value);

impl ThreatRecord {
    /// Wrap a raw JSON value without inspecting it
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Look up a top-level field, if the record is an object
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The record's severity.
    ///
    /// `Ok(None)` means the record has no `severity` field. Any JSON number is
    /// accepted; other value types are an error, as is a record that is not an
    /// object at all.
    pub fn severity(&self) -> Result<Option<f64>> {
        let Some(fields) = self.0.as_object() else {
            return Err(ThreatError::InvalidRecord { index: 0 });
        };

        match fields.get(SEVERITY_FIELD) {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| {
                ThreatError::InvalidSeverity { index: 0, found: n.to_string() }
            }),
            Some(other) => Err(ThreatError::InvalidSeverity {
                index: 0,
                found: other.to_string(),
            }),
        }
    }

    /// Borrow the underlying JSON
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for ThreatRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ThreatRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_and_float_severity() {
        assert_eq!(ThreatRecord::new(json!({"severity": 9})).severity().unwrap(), Some(9.0));
        assert_eq!(ThreatRecord::new(json!({"severity": 6.5})).severity().unwrap(), Some(6.5));
    }

    #[test]
    fn test_missing_severity() {
        let record = ThreatRecord::new(json!({"id": "x"}));
        assert_eq!(record.severity().unwrap(), None);
    }

    #[test]
    fn test_non_numeric_severity() {
        for value in [json!("high"), json!(true), json!(null), json!([7])] {
            let record = ThreatRecord::new(json!({ "severity": value }));
            assert!(matches!(
                record.severity(),
                Err(ThreatError::InvalidSeverity { .. })
            ));
        }
    }

    #[test]
    fn test_non_object_record() {
        let record = ThreatRecord::new(json!("10.0.0.1"));
        assert!(matches!(record.severity(), Err(ThreatError::InvalidRecord { .. })));
    }

    #[test]
    fn test_serializes_verbatim() {
        let raw = json!({"severity": 8, "ioc": {"type": "ip", "value": "203.0.113.9"}});
        let record = ThreatRecord::from(raw.clone());
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
        assert_eq!(record.get("ioc").unwrap()["type"], "ip");
    }
}

use serde_json::Value;

use super::ThreatRecord;
use crate::{Result, ThreatError};

/// Top-level key holding the list of records in a feed document
pub const DATA_KEY: &str = "data";

/// Pull the record list out of a parsed feed document.
///
/// A document without a `data` key yields no records. The records themselves
/// are taken verbatim and in order.
pub fn extract_records(document: Value) -> Result<Vec<ThreatRecord>> {
    let Value::Object(mut fields) = document else {
        return Err(ThreatError::UnexpectedShape(format!(
            "expected a JSON object at the top level, got {}",
            kind(&document)
        )));
    };

    match fields.remove(DATA_KEY) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.into_iter().map(ThreatRecord::new).collect()),
        Some(other) => Err(ThreatError::UnexpectedShape(format!(
            "expected `{DATA_KEY}` to be an array, got {}",
            kind(&other)
        ))),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_data_array_in_order() {
        let doc = json!({"data": [{"severity": 9}, {"severity": 5}, {"id": "x"}], "meta": 1});
        let records = extract_records(doc).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].as_value(), &json!({"severity": 9}));
        assert_eq!(records[2].as_value(), &json!({"id": "x"}));
    }

    #[test]
    fn test_missing_data_is_empty() {
        assert!(extract_records(json!({"status": "ok"})).unwrap().is_empty());
    }

    #[test]
    fn test_records_are_not_type_checked() {
        let records = extract_records(json!({"data": [1, "two", null]})).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_rejects_non_object_document() {
        let err = extract_records(json!([{"severity": 9}])).unwrap_err();
        assert!(matches!(err, ThreatError::UnexpectedShape(_)));
    }

    #[test]
    fn test_rejects_non_array_data() {
        for data in [json!(null), json!({"severity": 9}), json!("none")] {
            let err = extract_records(json!({ "data": data })).unwrap_err();
            assert!(matches!(err, ThreatError::UnexpectedShape(_)));
        }
    }
}

//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tabled::{settings::Style, Table, Tabled};
use threatwatch::{ThreatRecord, HIGH_RISK_THRESHOLD, SEVERITY_FIELD};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, csv, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Column used for records that are not JSON objects.
const VALUE_COLUMN: &str = "value";

#[derive(Tabled)]
struct ThreatRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl ThreatRow {
    fn new(index: usize, record: &ThreatRecord) -> Self {
        let severity = match record.get(SEVERITY_FIELD) {
            None => "-".dimmed().to_string(),
            Some(Value::Number(n)) if n.as_f64().is_some_and(|s| s >= HIGH_RISK_THRESHOLD) => {
                n.to_string().red().bold().to_string()
            }
            Some(other) => other.to_string(),
        };

        let details = match record.as_value() {
            Value::Object(fields) => {
                let rest: serde_json::Map<String, Value> = fields
                    .iter()
                    .filter(|(key, _)| key.as_str() != SEVERITY_FIELD)
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                Value::Object(rest).to_string()
            }
            other => other.to_string(),
        };

        Self { index: index + 1, severity, details }
    }
}

/// Render records as a table.
pub fn records_table(records: &[ThreatRecord]) -> String {
    let rows: Vec<ThreatRow> = records
        .iter()
        .enumerate()
        .map(|(i, record)| ThreatRow::new(i, record))
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render records as CSV.
///
/// The header is the union of top-level keys in the order records yield them. Strings are
/// written bare, every other value as JSON.
pub fn records_csv(records: &[ThreatRecord]) -> Result<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        match record.as_value() {
            Value::Object(fields) => {
                for key in fields.keys() {
                    if !columns.iter().any(|c| c == key) {
                        columns.push(key.clone());
                    }
                }
            }
            _ => {
                if !columns.iter().any(|c| c == VALUE_COLUMN) {
                    columns.push(VALUE_COLUMN.to_string());
                }
            }
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    if !columns.is_empty() {
        writer.write_record(&columns)?;
    }

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| {
                let cell = match record.as_value() {
                    Value::Object(fields) => fields.get(column),
                    other if column == VALUE_COLUMN => Some(other),
                    _ => None,
                };
                cell.map(csv_cell).unwrap_or_default()
            })
            .collect();
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(String::from_utf8(bytes)?)
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Print records in a machine-readable format.
///
/// Returns false for [`OutputFormat::Pretty`], which each command renders
/// itself.
pub fn print_records(records: &[ThreatRecord], format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(records)?),
        OutputFormat::Csv => print!("{}", records_csv(records)?),
        OutputFormat::Pretty => return Ok(false),
    }
    Ok(true)
}

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::formatter::{PLACEHOLDER, format_number};

/// Metadata and column profiles for one profiled dataset.
///
/// Read-only once loaded; a column's index in `columns` is its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "file", alias = "sourceFile")]
    pub source_file: String,
    #[serde(default, rename = "date", alias = "generatedAt")]
    pub generated_at: String,
    #[serde(default, rename = "rows", alias = "rowCount", deserialize_with = "null_as_zero")]
    pub row_count: u64,
    #[serde(default)]
    pub columns: Vec<ColumnProfile>,
}

impl ReportDocument {
    /// Human readable generation time; falls back to the raw text
    pub fn generated_at_display(&self) -> String {
        let raw = self.generated_at.trim();
        if raw.is_empty() {
            return PLACEHOLDER.to_string();
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.format("%Y-%m-%d %H:%M:%S").to_string();
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return dt.format("%Y-%m-%d %H:%M:%S").to_string();
        }
        if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return d.format("%Y-%m-%d").to_string();
        }
        raw.to_string()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Statistics for a single column as produced upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    #[serde(default, alias = "index")]
    pub position: Option<usize>,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type", alias = "dataType")]
    pub data_type: String,
    #[serde(default, rename = "records", alias = "recordCount", deserialize_with = "null_as_zero")]
    pub record_count: u64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub null_values: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub non_null_values: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub duplicate_values: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub distinct_values: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub non_unique_values: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub unique_values: u64,

    #[serde(default)]
    pub min_value: DisplayValue,
    #[serde(default)]
    pub median_value: DisplayValue,
    #[serde(default)]
    pub max_value: DisplayValue,
    #[serde(default)]
    pub min_value_frequency: Option<u64>,
    #[serde(default)]
    pub median_value_frequency: Option<u64>,
    #[serde(default)]
    pub max_value_frequency: Option<u64>,

    #[serde(default)]
    pub min_length: Option<f64>,
    #[serde(default)]
    pub median_length: Option<f64>,
    #[serde(default)]
    pub max_length: Option<f64>,
    #[serde(default)]
    pub average_length: Option<f64>,

    #[serde(default)]
    pub value_counts: ValueCounts,
}

/// Counts written as `null` read the same as absent ones
fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

/// A best-effort invariant that the upstream producer did not uphold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyIssue {
    NullSplitMismatch { null: u64, non_null: u64, records: u64 },
    UniqueExceedsDistinct { unique: u64, distinct: u64 },
    DistinctExceedsNonNull { distinct: u64, non_null: u64 },
    RecordCountMismatch { records: u64, row_count: u64 },
}

impl fmt::Display for ConsistencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyIssue::NullSplitMismatch { null, non_null, records } => write!(
                f,
                "null ({null}) + non-null ({non_null}) != records ({records})"
            ),
            ConsistencyIssue::UniqueExceedsDistinct { unique, distinct } => {
                write!(f, "unique ({unique}) > distinct ({distinct})")
            }
            ConsistencyIssue::DistinctExceedsNonNull { distinct, non_null } => {
                write!(f, "distinct ({distinct}) > non-null ({non_null})")
            }
            ConsistencyIssue::RecordCountMismatch { records, row_count } => {
                write!(f, "records ({records}) != report rows ({row_count})")
            }
        }
    }
}

impl ColumnProfile {
    /// Check the per-column invariants the producer is expected to keep.
    /// Never fails; the viewer shows whatever numbers it was given.
    pub fn consistency_issues(&self, row_count: u64) -> Vec<ConsistencyIssue> {
        let mut issues = Vec::new();
        if self.null_values.saturating_add(self.non_null_values) != self.record_count {
            issues.push(ConsistencyIssue::NullSplitMismatch {
                null: self.null_values,
                non_null: self.non_null_values,
                records: self.record_count,
            });
        }
        if self.unique_values > self.distinct_values {
            issues.push(ConsistencyIssue::UniqueExceedsDistinct {
                unique: self.unique_values,
                distinct: self.distinct_values,
            });
        }
        if self.distinct_values > self.non_null_values {
            issues.push(ConsistencyIssue::DistinctExceedsNonNull {
                distinct: self.distinct_values,
                non_null: self.non_null_values,
            });
        }
        if self.record_count != row_count {
            issues.push(ConsistencyIssue::RecordCountMismatch {
                records: self.record_count,
                row_count,
            });
        }
        issues
    }
}

/// A display-only statistic value (string, number, bool or missing)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayValue(serde_json::Value);

impl DisplayValue {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        Self(serde_json::Value::String(value.to_string()))
    }
}

impl From<i64> for DisplayValue {
    fn from(value: i64) -> Self {
        Self(serde_json::Value::from(value))
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::Null => f.write_str(PLACEHOLDER),
            serde_json::Value::String(s) => f.write_str(s),
            serde_json::Value::Bool(b) => write!(f, "{b}"),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => write!(f, "{i}"),
                (_, Some(u), _) => write!(f, "{u}"),
                (_, _, Some(x)) => f.write_str(&format_number(x)),
                _ => write!(f, "{n}"),
            },
            other => write!(f, "{other}"),
        }
    }
}

/// Value → occurrence count, kept in the order the producer wrote them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueCounts(Vec<(String, u64)>);

impl ValueCounts {
    pub fn new(entries: Vec<(String, u64)>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(value, count)| (value.as_str(), *count))
    }

    pub fn get(&self, value: &str) -> Option<u64> {
        self.0.iter().find(|(v, _)| v == value).map(|(_, c)| *c)
    }
}

impl Serialize for ValueCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (value, count) in &self.0 {
            map.serialize_entry(value, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ValueCounts {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueCountsVisitor;

        impl<'de> Visitor<'de> for ValueCountsVisitor {
            type Value = ValueCounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of value to occurrence count")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((value, count)) = access.next_entry::<String, Option<u64>>()? {
                    entries.push((value, count.unwrap_or_default()));
                }
                Ok(ValueCounts(entries))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ValueCounts::default())
            }
        }

        deserializer.deserialize_any(ValueCountsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_value_counts_preserve_document_order() {
        let counts: ValueCounts =
            serde_json::from_str(r#"{"zeta": 1, "alpha": 9, "mid": 4}"#).unwrap();
        let keys: Vec<&str> = counts.iter().map(|(v, _)| v).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(counts.get("alpha"), Some(9));
    }

    #[test]
    fn test_value_counts_null_is_empty() {
        let counts: ValueCounts = serde_json::from_value(json!(null)).unwrap();
        assert!(counts.is_empty());
    }

    #[test]
    fn test_column_profile_accepts_producer_names() {
        let column: ColumnProfile = serde_json::from_value(json!({
            "position": 0,
            "name": "city",
            "type": "string",
            "records": 10,
            "nullValues": 2,
            "nonNullValues": 8,
            "minValue": "Aachen",
            "maxValueFrequency": 4,
            "averageLength": 6.25,
            "valueCounts": {"Berlin": 3}
        }))
        .unwrap();

        assert_eq!(column.data_type, "string");
        assert_eq!(column.record_count, 10);
        assert_eq!(column.min_value.to_string(), "Aachen");
        assert!(column.median_value.is_missing());
        assert_eq!(column.max_value_frequency, Some(4));
        assert_eq!(column.min_length, None);
        assert_eq!(column.value_counts.len(), 1);
    }

    #[test]
    fn test_null_counts_and_fractional_lengths() {
        let column: ColumnProfile = serde_json::from_value(json!({
            "records": null,
            "nullValues": null,
            "nonNullValues": 4,
            "medianLength": 4.5,
            "maxLength": 9,
            "valueCounts": {"a": 3, "b": null}
        }))
        .unwrap();

        assert_eq!(column.record_count, 0);
        assert_eq!(column.null_values, 0);
        assert_eq!(column.non_null_values, 4);
        assert_eq!(column.median_length, Some(4.5));
        assert_eq!(column.max_length, Some(9.0));
        assert_eq!(column.value_counts.get("b"), Some(0));
    }

    #[test]
    fn test_column_profile_aliases() {
        let column: ColumnProfile = serde_json::from_value(json!({
            "dataType": "int",
            "recordCount": 5
        }))
        .unwrap();
        assert_eq!(column.data_type, "int");
        assert_eq!(column.record_count, 5);
        assert_eq!(column.position, None);
    }

    #[test]
    fn test_display_value_rendering() {
        assert_eq!(DisplayValue::from("x").to_string(), "x");
        assert_eq!(DisplayValue::from(42).to_string(), "42");
        assert_eq!(DisplayValue::new(json!(2.5)).to_string(), "2.5");
        assert_eq!(DisplayValue::new(json!(true)).to_string(), "true");
        assert_eq!(DisplayValue::default().to_string(), PLACEHOLDER);
    }

    #[test]
    fn test_consistency_issues() {
        let mut column: ColumnProfile = serde_json::from_value(json!({
            "records": 10,
            "nullValues": 2,
            "nonNullValues": 8,
            "distinctValues": 7,
            "uniqueValues": 7
        }))
        .unwrap();
        assert!(column.consistency_issues(10).is_empty());

        column.unique_values = 9;
        column.non_null_values = 5;
        let issues = column.consistency_issues(12);
        assert_eq!(issues.len(), 4);
        assert_eq!(
            issues[0].to_string(),
            "null (2) + non-null (5) != records (10)"
        );
    }

    #[test]
    fn test_generated_at_display() {
        let mut doc = ReportDocument {
            name: "r".to_string(),
            source_file: "f.csv".to_string(),
            generated_at: "2024-03-01T10:15:00Z".to_string(),
            row_count: 0,
            columns: Vec::new(),
        };
        assert_eq!(doc.generated_at_display(), "2024-03-01 10:15:00");

        doc.generated_at = "2024-03-01".to_string();
        assert_eq!(doc.generated_at_display(), "2024-03-01");

        doc.generated_at = "last tuesday".to_string();
        assert_eq!(doc.generated_at_display(), "last tuesday");

        doc.generated_at = String::new();
        assert_eq!(doc.generated_at_display(), PLACEHOLDER);
    }
}

use tracing::debug;

use crate::core::formatter::{PLACEHOLDER, format_number};
use crate::core::{ColumnProfile, DisplayValue, Formatter, Percent};
use crate::services::view::DetailView;

/// Scalar statistics of the selected column, laid out for the detail region
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    pub position: usize,
    pub name: String,
    pub data_type: String,
    pub record_count: u64,
    pub value_stats: Vec<ValueStat>,
    pub ratios: Vec<RatioStat>,
    pub lengths: Vec<LengthStat>,
    pub issues: Vec<String>,
}

/// Min/median/max value with how often it occurs
#[derive(Debug, Clone, PartialEq)]
pub struct ValueStat {
    pub label: &'static str,
    pub value: DisplayValue,
    pub frequency: Option<u64>,
}

/// A count paired with its share of the column's records
#[derive(Debug, Clone, PartialEq)]
pub struct RatioStat {
    pub label: &'static str,
    pub count: u64,
    pub percent: Percent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LengthStat {
    pub label: &'static str,
    pub value: String,
}

impl DetailPanel {
    pub fn ratio(&self, label: &str) -> Option<&RatioStat> {
        self.ratios.iter().find(|r| r.label == label)
    }

    pub fn value_stat(&self, label: &str) -> Option<&ValueStat> {
        self.value_stats.iter().find(|v| v.label == label)
    }

    pub fn length(&self, label: &str) -> Option<&LengthStat> {
        self.lengths.iter().find(|l| l.label == label)
    }

    /// Flattened `(label, text)` pairs in layout order, for simple renderers
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        out.push(("Column".to_string(), self.name.clone()));
        out.push(("Type".to_string(), self.data_type.clone()));
        out.push(("Records".to_string(), self.record_count.to_string()));
        for stat in &self.value_stats {
            out.push((
                format!("{} value", stat.label),
                format!("{} ({})", stat.value, optional(stat.frequency)),
            ));
        }
        for ratio in &self.ratios {
            out.push((
                ratio.label.to_string(),
                format!("{} ({})", ratio.count, ratio.percent),
            ));
        }
        for length in &self.lengths {
            out.push((format!("{} length", length.label), length.value.clone()));
        }
        out
    }
}

fn optional(value: Option<u64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string())
}

fn length_text(value: Option<f64>, formatter: &Formatter) -> String {
    value
        .map(|v| formatter.round(v))
        .filter(|v| v.is_finite())
        .map_or_else(|| PLACEHOLDER.to_string(), format_number)
}

/// Projects a column's scalar fields onto the detail region
#[derive(Debug, Default)]
pub struct DetailPanelBinder {
    formatter: Formatter,
}

impl DetailPanelBinder {
    pub fn new(formatter: Formatter) -> Self {
        Self { formatter }
    }

    pub fn project(&self, position: usize, column: &ColumnProfile, row_count: u64) -> DetailPanel {
        let records = column.record_count;
        let ratio = |label: &'static str, count: u64| RatioStat {
            label,
            count,
            percent: self.formatter.percent(count, records),
        };

        DetailPanel {
            position,
            name: column.name.clone(),
            data_type: column.data_type.clone(),
            record_count: records,
            value_stats: vec![
                ValueStat {
                    label: "Min",
                    value: column.min_value.clone(),
                    frequency: column.min_value_frequency,
                },
                ValueStat {
                    label: "Median",
                    value: column.median_value.clone(),
                    frequency: column.median_value_frequency,
                },
                ValueStat {
                    label: "Max",
                    value: column.max_value.clone(),
                    frequency: column.max_value_frequency,
                },
            ],
            ratios: vec![
                ratio("Null", column.null_values),
                ratio("Non-null", column.non_null_values),
                ratio("Duplicate", column.duplicate_values),
                ratio("Distinct", column.distinct_values),
                ratio("Non-unique", column.non_unique_values),
                ratio("Unique", column.unique_values),
            ],
            lengths: vec![
                LengthStat {
                    label: "Min",
                    value: length_text(column.min_length, &self.formatter),
                },
                LengthStat {
                    label: "Median",
                    value: length_text(column.median_length, &self.formatter),
                },
                LengthStat {
                    label: "Average",
                    value: length_text(column.average_length, &self.formatter),
                },
                LengthStat {
                    label: "Max",
                    value: length_text(column.max_length, &self.formatter),
                },
            ],
            issues: column
                .consistency_issues(row_count)
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    pub fn bind<V: DetailView + ?Sized>(
        &self,
        position: usize,
        column: &ColumnProfile,
        row_count: u64,
        view: &mut V,
    ) -> DetailPanel {
        let panel = self.project(position, column, row_count);
        debug!(position, column = %panel.name, "binding detail panel");
        view.bind_detail(&panel);
        panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn column(value: serde_json::Value) -> ColumnProfile {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_percentages_of_record_count() {
        let binder = DetailPanelBinder::default();
        let panel = binder.project(
            0,
            &column(json!({
                "name": "code",
                "records": 10,
                "nullValues": 2,
                "nonNullValues": 8,
                "duplicateValues": 1,
                "distinctValues": 7,
                "nonUniqueValues": 3,
                "uniqueValues": 7
            })),
            10,
        );

        assert_eq!(panel.ratio("Null").unwrap().percent.value(), Some(20.0));
        assert_eq!(panel.ratio("Non-null").unwrap().percent.value(), Some(80.0));
        assert_eq!(panel.ratio("Distinct").unwrap().percent.value(), Some(70.0));
        assert_eq!(panel.ratio("Duplicate").unwrap().percent.to_string(), "10%");
        assert!(panel.issues.is_empty());
    }

    #[test]
    fn test_zero_records_render_placeholders() {
        let binder = DetailPanelBinder::default();
        let panel = binder.project(
            3,
            &column(json!({"name": "empty", "records": 0, "nullValues": 0})),
            0,
        );

        for ratio in &panel.ratios {
            assert_eq!(ratio.percent, Percent::Undefined);
            assert_eq!(ratio.percent.to_string(), PLACEHOLDER);
        }
        let entries = panel.entries();
        assert!(entries.iter().all(|(_, text)| !text.contains("NaN")));
        assert!(entries.iter().all(|(_, text)| !text.contains("inf")));
    }

    #[test]
    fn test_value_and_length_stats() {
        let binder = DetailPanelBinder::default();
        let panel = binder.project(
            1,
            &column(json!({
                "records": 4,
                "minValue": "a",
                "minValueFrequency": 1,
                "maxValue": 9.5,
                "minLength": 1,
                "maxLength": 12,
                "averageLength": 4.666666666
            })),
            4,
        );

        let min = panel.value_stat("Min").unwrap();
        assert_eq!(min.value.to_string(), "a");
        assert_eq!(min.frequency, Some(1));
        assert_eq!(panel.value_stat("Max").unwrap().value.to_string(), "9.5");
        assert!(panel.value_stat("Median").unwrap().value.is_missing());

        assert_eq!(panel.length("Average").unwrap().value, "4.6667");
        assert_eq!(panel.length("Median").unwrap().value, PLACEHOLDER);
        assert_eq!(panel.length("Max").unwrap().value, "12");
    }

    #[test]
    fn test_fractional_median_length() {
        let binder = DetailPanelBinder::new(Formatter::with_decimals(2));
        let panel = binder.project(
            0,
            &column(json!({
                "records": 4,
                "nullValues": null,
                "minLength": 2,
                "medianLength": 4.5,
                "maxLength": 7.0,
                "averageLength": 4.333333
            })),
            4,
        );

        assert_eq!(panel.length("Min").unwrap().value, "2");
        assert_eq!(panel.length("Median").unwrap().value, "4.5");
        assert_eq!(panel.length("Max").unwrap().value, "7");
        assert_eq!(panel.length("Average").unwrap().value, "4.33");
        assert_eq!(panel.ratio("Null").unwrap().percent.to_string(), "0%");
    }

    #[test]
    fn test_entries_layout_order() {
        let binder = DetailPanelBinder::default();
        let panel = binder.project(0, &column(json!({"name": "x", "records": 1})), 1);
        let labels: Vec<String> = panel.entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels[0], "Column");
        assert_eq!(labels[3], "Min value");
        assert_eq!(labels[6], "Null");
        assert_eq!(labels.last().unwrap(), "Max length");
    }
}

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use serde_json::json;

use profiletui::core::{Bucket, Percent, RowKey, TableContainer, formatter};
use profiletui::render::text;
use profiletui::services::{Activation, DistributionChartBuilder, FrequencyTableBuilder};
use profiletui::{Formatter, MemoryView, ReportController, ReportError, ReportModel};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("sample-data")
        .join("profile-report.json")
}

fn sample() -> ReportController<MemoryView> {
    let model = ReportModel::from_path(&sample_path()).unwrap();
    ReportController::mount(model, MemoryView::new())
}

#[test]
fn test_sample_report_loads() {
    let controller = sample();
    let overview = controller.view().overview.clone().unwrap();
    assert_eq!(overview.name, "customers");
    assert_eq!(overview.source_file, "customers.csv");
    assert_eq!(overview.row_count, 10);
    assert_eq!(overview.column_count, 4);

    let columns = controller.view().table(TableContainer::Columns).unwrap();
    assert_eq!(columns.len(), 4);
    assert_eq!(controller.active_position(), Some(0));
}

#[test]
fn test_round_trip_percentages() {
    let model = ReportModel::load(json!({
        "report": {
            "name": "t", "file": "t.csv", "date": "2024-01-01", "rows": 10,
            "columns": [
                {"name": "letters", "records": 10, "nullValues": 2, "nonNullValues": 8,
                 "duplicateValues": 1, "distinctValues": 7, "nonUniqueValues": 3,
                 "uniqueValues": 7, "valueCounts": {"a": 5, "b": 3, "c": 2}},
                {"name": "other", "records": 10, "nonNullValues": 10}
            ]
        }
    }))
    .unwrap();
    let mut controller = ReportController::mount(model, MemoryView::new());
    assert_eq!(controller.activate(0), Some(Activation::Unchanged(0)));

    let detail = controller.view().detail.clone().unwrap();
    assert_eq!(detail.ratio("Null").unwrap().percent, Percent::Value(20.0));
    assert_eq!(detail.ratio("Non-null").unwrap().percent, Percent::Value(80.0));
    assert_eq!(detail.ratio("Distinct").unwrap().percent, Percent::Value(70.0));

    let frequencies = controller.view().table(TableContainer::Frequencies).unwrap();
    let rows: Vec<(String, String, String)> = frequencies
        .rows
        .iter()
        .map(|row| {
            (
                row.cells[0].to_string(),
                row.cells[1].to_string(),
                row.cells[2].to_string(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("a".to_string(), "5".to_string(), "50%".to_string()),
            ("b".to_string(), "3".to_string(), "30%".to_string()),
            ("c".to_string(), "2".to_string(), "20%".to_string()),
        ]
    );
}

#[test]
fn test_selection_switch_replaces_detail() {
    let mut controller = sample();
    controller.activate(1);
    let country = controller.view().detail.clone().unwrap();
    controller.activate(2);
    let email = controller.view().detail.clone().unwrap();

    let fresh = profiletui::services::DetailPanelBinder::default().project(
        2,
        controller.model().column(2).unwrap(),
        controller.model().document().row_count,
    );
    assert_eq!(email, fresh);
    assert_ne!(email.ratio("Null"), country.ratio("Null"));
    assert!(email.value_stat("Median").unwrap().value.is_missing());

    let active: Vec<usize> = controller
        .column_table()
        .active_rows()
        .map(|row| row.position)
        .collect();
    assert_eq!(active, vec![2]);
    assert_eq!(
        controller.view().active_row(TableContainer::Columns),
        Some(RowKey::new(2))
    );
}

#[test]
fn test_exclusive_selection_over_any_sequence() {
    let mut controller = sample();
    for position in [3, 3, 1, 0, 9, 2, 2, 1, 0, 3] {
        controller.activate(position);
        assert_eq!(controller.column_table().active_rows().count(), 1);
        let active = controller.active_position().unwrap();
        assert_eq!(
            controller.view().active_row(TableContainer::Columns),
            Some(RowKey::new(active))
        );
    }
    // the out-of-range request was the only failure
    assert_eq!(controller.view().errors.len(), 1);
}

#[test]
fn test_k_selections_leave_one_widget_each() {
    let mut controller = sample();
    let sequence = [1, 2, 3, 0, 1, 2];
    for position in sequence {
        controller.activate(position);
    }
    let k = sequence.len() + 1; // plus the initial selection
    let view = controller.view();

    assert_eq!(view.live_tables(TableContainer::Frequencies), 1);
    assert_eq!(view.live_charts(), 1);
    assert_eq!(controller.selection().frequency().teardowns(), k - 1);
    assert_eq!(controller.selection().chart().teardowns(), k - 1);
    assert_eq!(view.scrolls, k);
    assert_eq!(view.stale_destroys, 0);

    let live = view.table(TableContainer::Frequencies).unwrap();
    assert_eq!(
        live.len(),
        controller.model().column(2).unwrap().value_counts.len()
    );
}

#[test]
fn test_reclick_does_not_rebuild() {
    let mut controller = sample();
    controller.activate(1);
    let created = (controller.view().tables_created, controller.view().charts_created);

    assert_eq!(controller.activate(1), Some(Activation::Unchanged(1)));
    assert_eq!(
        (controller.view().tables_created, controller.view().charts_created),
        created
    );
    assert_eq!(controller.view().scrolls, 2);
}

#[test]
fn test_zero_record_column_renders_placeholders() {
    let mut controller = sample();
    controller.activate(3);

    let detail = controller.view().detail.clone().unwrap();
    for ratio in &detail.ratios {
        assert_eq!(ratio.percent.to_string(), formatter::PLACEHOLDER);
    }
    assert!(detail.issues.iter().any(|i| i.contains("report rows")));

    let (series, height) = controller.view().chart().unwrap();
    assert!(series.is_empty());
    assert_eq!(height, Some(controller.view().detail_height));
    assert!(controller.view().table(TableContainer::Frequencies).unwrap().is_empty());
}

#[test]
fn test_bucket_omission() {
    let controller = sample();
    let model = controller.model();

    let id = DistributionChartBuilder::build_series(model.column(0).unwrap());
    assert_eq!(id.value_of(Bucket::Null), None);
    assert_eq!(id.labels, vec!["Unique".to_string()]);

    let email = DistributionChartBuilder::build_series(model.column(2).unwrap());
    assert_eq!(email.value_of(Bucket::Null), Some(3));
    assert_eq!(email.labels[0], "Null");
}

#[test]
fn test_frequency_rows_follow_stored_order() {
    let controller = sample();
    let builder = FrequencyTableBuilder::new(Formatter::default());
    let rows = builder.build(controller.model().column(1).unwrap());
    let values: Vec<&str> = rows.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(values, vec!["Norway", "Spain", "Austria"]);
}

#[test]
fn test_malformed_documents_fail_fast() {
    assert!(matches!(
        ReportModel::load(json!({"rows": 3})),
        Err(ReportError::MalformedDocument(_))
    ));
    assert!(matches!(
        ReportModel::load(json!({"report": {"name": "x"}})),
        Err(ReportError::MalformedDocument(_))
    ));
    assert!(matches!(
        ReportModel::load(json!({"report": {"columns": [{"records": "ten"}]}})),
        Err(ReportError::MalformedColumn { index: 0, .. })
    ));
    assert!(matches!(
        ReportModel::from_path(&PathBuf::from("missing/report.json")),
        Err(ReportError::Io { .. })
    ));
}

#[test]
fn test_print_output() {
    let mut controller = sample();
    controller.activate(1);
    let out = text::render(controller.view());

    assert!(out.contains("Report: customers  (customers.csv)"));
    assert!(out.contains("Column 1: country (string)"));
    assert!(out.contains("Norway"));
    assert!(out.contains("6.3333"));
    assert!(out.contains("Distribution"));
}

use tracing::debug;

use crate::core::{Bucket, ColumnProfile, WidgetId};
use crate::services::view::{ChartWidgets, DetailView, WidgetSlot};

/// Bar series for the per-column distribution chart
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChartSeries {
    pub buckets: Vec<Bucket>,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value_of(&self, bucket: Bucket) -> Option<u64> {
        self.buckets
            .iter()
            .position(|b| *b == bucket)
            .map(|i| self.values[i])
    }
}

fn bucket_count(column: &ColumnProfile, bucket: Bucket) -> u64 {
    match bucket {
        Bucket::Null => column.null_values,
        Bucket::Duplicate => column.duplicate_values,
        Bucket::NonUnique => column.non_unique_values,
        Bucket::Unique => column.unique_values,
    }
}

/// Owns the chart widget and rebuilds it for every newly selected column
#[derive(Debug, Default)]
pub struct DistributionChartBuilder {
    slot: WidgetSlot,
}

impl DistributionChartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-empty buckets in fixed order. Buckets may overlap, so the values
    /// need not add up to the record count.
    pub fn build_series(column: &ColumnProfile) -> ChartSeries {
        let mut series = ChartSeries::default();
        for bucket in Bucket::ordered() {
            let count = bucket_count(column, bucket);
            if count > 0 {
                series.buckets.push(bucket);
                series.labels.push(bucket.to_string());
                series.values.push(count);
            }
        }
        series
    }

    /// Tear down the previous chart, create one for `column`, then size it
    /// to the detail region.
    pub fn rebuild<V>(&mut self, column: &ColumnProfile, view: &mut V) -> WidgetId
    where
        V: ChartWidgets + DetailView + ?Sized,
    {
        let series = Self::build_series(column);
        let id = self.slot.rebuild(
            view,
            |v, old| v.destroy_chart(old),
            |v| v.create_chart(&series),
        );
        let height = view.detail_height();
        view.resize_chart(id, height);
        debug!(chart = %id, bars = series.len(), height, "rebuilt distribution chart");
        id
    }

    pub fn clear<V: ChartWidgets + ?Sized>(&mut self, view: &mut V) {
        self.slot.dispose(view, |v, old| v.destroy_chart(old));
    }

    pub fn handle(&self) -> Option<WidgetId> {
        self.slot.handle()
    }

    pub fn teardowns(&self) -> usize {
        self.slot.teardowns()
    }
}

use crate::comparison::{AlgorithmMetrics, ComparisonResult, Metric};

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCell {
    pub text: String,
    pub best: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub algorithm: String,
    pub distance: MetricCell,
    pub time: MetricCell,
    pub operations: MetricCell,
}

impl ComparisonRow {
    pub fn cell(&self, metric: Metric) -> &MetricCell {
        match metric {
            Metric::Distance => &self.distance,
            Metric::Time => &self.time,
            Metric::Operations => &self.operations,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    pub headers: [&'static str; 4],
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub text: String,
    /// Share of the chart maximum, in [0, 1]
    pub fraction: f64,
    pub best: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub metric: Metric,
    pub title: &'static str,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub table: ComparisonTable,
    pub charts: Vec<BarChart>,
}

/// Projects one comparison run into a ranked table and a bar chart per metric.
/// Every metric is treated as lower-is-better; all cells tied on the minimum are marked.
#[derive(Default)]
pub struct ComparisonRenderer;

impl ComparisonRenderer {
    pub fn render(&self, results: &ComparisonResult) -> ComparisonView {
        ComparisonView {
            table: self.table(results),
            charts: Metric::ALL
                .iter()
                .map(|&metric| self.chart(results, metric))
                .collect(),
        }
    }

    fn table(&self, results: &ComparisonResult) -> ComparisonTable {
        let best_distance = results.best(Metric::Distance);
        let best_time = results.best(Metric::Time);
        let best_operations = results.best(Metric::Operations);

        let rows = results
            .iter()
            .map(|(algorithm, metrics)| ComparisonRow {
                algorithm: algorithm.to_owned(),
                distance: MetricCell {
                    text: cell_text(Metric::Distance, metrics),
                    best: Some(metrics.distance) == best_distance,
                },
                time: MetricCell {
                    text: cell_text(Metric::Time, metrics),
                    best: Some(metrics.time) == best_time,
                },
                operations: MetricCell {
                    text: cell_text(Metric::Operations, metrics),
                    best: Some(metrics.operations as f64) == best_operations,
                },
            })
            .collect();

        ComparisonTable {
            headers: [
                "Algorithm",
                Metric::Distance.column_title(),
                Metric::Time.column_title(),
                Metric::Operations.column_title(),
            ],
            rows,
        }
    }

    fn chart(&self, results: &ComparisonResult, metric: Metric) -> BarChart {
        let best = results.best(metric);
        let max = results.max(metric).unwrap_or(0.0);

        let bars = results
            .iter()
            .map(|(algorithm, metrics)| {
                let value = metric.value(metrics);
                Bar {
                    label: short_label(algorithm),
                    value,
                    text: value.to_string(),
                    fraction: if max > 0.0 { value / max } else { 0.0 },
                    best: Some(value) == best,
                }
            })
            .collect();

        BarChart {
            metric,
            title: metric.chart_title(),
            bars,
        }
    }
}

fn cell_text(metric: Metric, metrics: &AlgorithmMetrics) -> String {
    match metric {
        Metric::Distance => metrics.distance.to_string(),
        Metric::Time => metrics
            .time_display
            .clone()
            .unwrap_or_else(|| format!("{:.4}s", metrics.time)),
        Metric::Operations => metrics.operations.to_string(),
    }
}

fn short_label(algorithm: &str) -> String {
    algorithm.replace(" Search", "").replace(" Algorithm", "")
}

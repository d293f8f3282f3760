use cartotrace_core::{
    comparison_renderer::{BarChart, ComparisonView, MetricCell},
    result_presenter::ResultPanel,
    sidebar::Sidebar,
    step_log::StepLogEntry,
};
use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};

const BAR_WIDTH: usize = 30;

pub fn print_points(sidebar: &Sidebar) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["#", "Point", "Lat, Lng"]);

    for (index, entry) in sidebar.entries().iter().enumerate() {
        let name = if entry.highlighted {
            Cell::new(&entry.name).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&entry.name)
        };
        table.add_row(vec![
            Cell::new(index + 1),
            name,
            Cell::new(&entry.coordinates),
        ]);
    }

    println!("{table}");
}

pub fn print_step(entry: &StepLogEntry) {
    println!("{}", entry.header());
    for line in entry.lines() {
        println!("  {line}");
    }
}

pub fn print_result(panel: &ResultPanel) {
    println!();
    println!("Total distance: {}", panel.total_distance);
    if let Some(algorithm) = panel.algorithm {
        println!("Algorithm: {algorithm}");
    }
    if let Some(elapsed) = &panel.elapsed {
        println!("Elapsed: {elapsed}");
    }
    if let Some(nodes) = panel.nodes_explored {
        println!("Nodes explored: {nodes}");
    }
    if let Some(operations) = panel.operations {
        println!("Operations: {operations}");
    }
    println!("Route:");
    for stop in &panel.route {
        println!("  {stop}");
    }
}

pub fn print_comparison(view: &ComparisonView) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(view.table.headers.to_vec());

    for row in &view.table.rows {
        table.add_row(vec![
            Cell::new(&row.algorithm),
            metric_cell(&row.distance),
            metric_cell(&row.time),
            metric_cell(&row.operations),
        ]);
    }

    println!("{table}");

    for chart in &view.charts {
        println!();
        for line in chart_lines(chart) {
            println!("{line}");
        }
    }
}

pub fn print_alert(message: &str) {
    eprintln!("! {message}");
}

fn metric_cell(cell: &MetricCell) -> Cell {
    if cell.best {
        Cell::new(format!("{} *", cell.text))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(&cell.text)
    }
}

fn chart_lines(chart: &BarChart) -> Vec<String> {
    let label_width = chart
        .bars
        .iter()
        .map(|bar| bar.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec![chart.title.to_string()];
    lines.extend(chart.bars.iter().map(|bar| {
        let padding = label_width - bar.label.chars().count();
        format!(
            "  {}{} | {} {}{}",
            bar.label,
            " ".repeat(padding),
            bar_glyphs(bar.fraction),
            bar.text,
            if bar.best { " *" } else { "" }
        )
    }));
    lines
}

fn bar_glyphs(fraction: f64) -> String {
    let cells = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(cells)
}

#[cfg(test)]
mod tests {
    use cartotrace_core::{
        comparison::{AlgorithmMetrics, ComparisonResult, Metric},
        comparison_renderer::ComparisonRenderer,
    };

    use super::*;

    fn metrics(distance: f64) -> AlgorithmMetrics {
        AlgorithmMetrics {
            distance,
            time: 0.5,
            time_display: None,
            operations: 10,
            time_unit: None,
            nodes: None,
            route: vec![],
        }
    }

    #[test]
    fn test_bar_glyphs() {
        assert_eq!(bar_glyphs(0.0), "");
        assert_eq!(bar_glyphs(1.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar_glyphs(0.5).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar_glyphs(f64::NAN), "");
    }

    #[test]
    fn test_chart_lines() {
        let results: ComparisonResult = [
            ("Greedy Best-First Search", metrics(120.0)),
            ("A* Algorithm", metrics(60.0)),
        ]
        .into_iter()
        .collect();
        let view = ComparisonRenderer.render(&results);
        let chart = view
            .charts
            .iter()
            .find(|chart| chart.metric == Metric::Distance)
            .unwrap();

        let lines = chart_lines(chart);
        assert_eq!(lines[0], "Distance (km)");
        assert!(lines[1].starts_with("  Greedy Best-First | "));
        assert!(lines[2].starts_with(&format!("  A*{} | ", " ".repeat(15))));
        assert!(lines[2].ends_with("60 *"));
    }
}

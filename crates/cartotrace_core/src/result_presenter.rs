use tracing::warn;

use crate::{
    bounds::Bounds,
    inconsistency::{DataInconsistency, InconsistencyContext},
    map_layer_manager::MapLayerManager,
    map_surface::MapSurface,
    point::{Point, find_point},
    trace::Trace,
};

/// Final state of a solve, as shown in the result panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub total_distance: String,
    pub route: Vec<String>,
    pub algorithm: Option<&'static str>,
    pub elapsed: Option<String>,
    pub nodes_explored: Option<u64>,
    pub operations: Option<u64>,
}

impl ResultPanel {
    pub fn from_trace(trace: &Trace) -> Self {
        ResultPanel {
            total_distance: format!("{:.2} km", trace.total_distance),
            route: trace
                .route
                .iter()
                .enumerate()
                .map(|(index, name)| format!("[{}] {}", index + 1, name))
                .collect(),
            algorithm: trace.algorithm.map(|algorithm| algorithm.label()),
            elapsed: trace.time.map(format_elapsed),
            nodes_explored: trace.nodes_explored,
            operations: trace.operations,
        }
    }
}

/// Seconds rendered with the largest unit that keeps the value above one.
pub fn format_elapsed(seconds: f64) -> String {
    if seconds < 0.001 {
        format!("{:.2} µs", seconds * 1_000_000.0)
    } else if seconds < 1.0 {
        format!("{:.2} ms", seconds * 1_000.0)
    } else {
        format!("{seconds:.4}s")
    }
}

#[derive(Debug, Default)]
pub struct ResultPresenter;

impl ResultPresenter {
    /// Fills `panel`, then fits the viewport around the route. The panel is rendered even
    /// when a route point is unknown; the viewport is then left as is.
    pub fn present<M: MapSurface>(
        &self,
        trace: &Trace,
        points: &[Point],
        panel: &mut Option<ResultPanel>,
        layers: &mut MapLayerManager<M>,
    ) -> Result<Option<Bounds>, DataInconsistency> {
        *panel = Some(ResultPanel::from_trace(trace));

        let mut route_points = Vec::with_capacity(trace.route.len());
        for name in &trace.route {
            match find_point(points, name) {
                Some(point) => route_points.push(point),
                None => {
                    let inconsistency = DataInconsistency {
                        context: InconsistencyContext::Route,
                        name: name.clone(),
                    };
                    warn!("Cannot fit route: {}", inconsistency);
                    return Err(inconsistency);
                }
            }
        }

        let bounds = Bounds::from_points(route_points);
        if let Some(bounds) = &bounds {
            layers.fit_bounds(bounds);
        }

        Ok(bounds)
    }
}

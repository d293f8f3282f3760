use std::time::Duration;

use tracing::debug;

use crate::{
    error::OperationError,
    geo_data_cache::GeoDataCache,
    inconsistency::{DataInconsistency, InconsistencyContext, InconsistencyTracker},
    map_layer_manager::MapLayerManager,
    map_surface::MapSurface,
    operation::OperationToken,
    point::find_point,
    route_service::RouteService,
    sidebar::Sidebar,
    step_log::{StepLog, StepLogEntry},
    trace::{EvaluationMode, Trace},
};

pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone)]
pub struct ReplayParams {
    /// Pause after each step's visuals are committed
    pub step_delay: Duration,
}

impl Default for ReplayParams {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
        }
    }
}

/// The parts of the view a replay writes to.
pub struct ReplayView<'a, M> {
    pub layers: &'a mut MapLayerManager<M>,
    pub sidebar: &'a mut Sidebar,
    pub step_log: &'a mut StepLog,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    pub steps_committed: usize,
    pub inconsistencies: Vec<DataInconsistency>,
}

type StepCallback = Box<dyn FnMut(&StepLog) + Send + Sync>;

/// Re-enacts a finished trace one step at a time. Steps never overlap: the visuals of a
/// step are committed, then the replay pauses, then the next step starts.
pub struct TraceReplayer {
    params: ReplayParams,
    on_step: Option<StepCallback>,
}

impl TraceReplayer {
    pub fn new(params: ReplayParams) -> Self {
        Self {
            params,
            on_step: None,
        }
    }

    /// Called with the step log once each step's visuals are committed.
    pub fn on_step<F>(&mut self, callback: F)
    where
        F: FnMut(&StepLog) + Send + Sync + 'static,
    {
        self.on_step = Some(Box::new(callback));
    }

    pub async fn replay<S, M>(
        &mut self,
        trace: &Trace,
        cache: &GeoDataCache<S>,
        view: ReplayView<'_, M>,
        mode: EvaluationMode,
        token: &OperationToken,
    ) -> Result<ReplayOutcome, OperationError>
    where
        S: RouteService,
        M: MapSurface,
    {
        let ReplayView {
            layers,
            sidebar,
            step_log,
        } = view;

        let mut tracker = InconsistencyTracker::default();
        step_log.clear();

        for (index, step) in trace.steps.iter().enumerate() {
            token.ensure_current()?;

            sidebar.clear_highlights();
            if let Some(current) = &step.current {
                sidebar.highlight(current);
            }

            step_log.append(StepLogEntry::from_step(step, mode));

            // Points may have been edited since the solve
            let points = cache.refresh_for(token).await?;
            sidebar.update(&points);
            layers.sync_point_markers(&points);

            // Existence is judged on the refreshed set, not on the sidebar
            if let Some(current) = &step.current {
                match find_point(&points, current) {
                    Some(_) => {
                        sidebar.highlight(current);
                    }
                    None => tracker.report(InconsistencyContext::Current, current),
                }
            }

            if let Some(name) = trace.route.get(step.step) {
                match find_point(&points, name) {
                    Some(point) => {
                        layers.upsert_point_marker(&point.name, point.lat, point.lng, true);
                    }
                    None => tracker.report(InconsistencyContext::Route, name),
                }
            }

            for candidate in &step.candidates {
                if find_point(&points, &candidate.city).is_none() {
                    tracker.report(InconsistencyContext::Candidate, &candidate.city);
                }
            }

            if let (Some(current), Some(next)) = (&step.current, &step.next) {
                match (find_point(&points, current), find_point(&points, next)) {
                    (Some(from), Some(to)) => {
                        layers.draw_segment(from, to, step.distance);
                    }
                    (from, to) => {
                        if from.is_none() {
                            tracker.report(InconsistencyContext::Current, current);
                        }
                        if to.is_none() {
                            tracker.report(InconsistencyContext::Next, next);
                        }
                    }
                }
            }

            debug!(
                "Replayed step {} ({}/{})",
                step.step,
                index + 1,
                trace.steps.len()
            );

            if let Some(callback) = self.on_step.as_mut() {
                callback(step_log);
            }

            token.pause(self.params.step_delay).await?;
        }

        step_log.deactivate_all();

        Ok(ReplayOutcome {
            steps_committed: step_log.len(),
            inconsistencies: tracker.into_found(),
        })
    }
}

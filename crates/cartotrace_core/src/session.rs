use std::sync::Arc;

use tracing::{error, info};

use crate::{
    bounds::Bounds,
    comparison::ComparisonResult,
    comparison_renderer::ComparisonRenderer,
    error::OperationError,
    geo_data_cache::GeoDataCache,
    map_layer_manager::MapLayerManager,
    map_surface::MapSurface,
    operation::{OperationGate, OperationToken},
    point::Point,
    result_presenter::ResultPresenter,
    route_service::RouteService,
    sidebar::Sidebar,
    step_log::StepLog,
    trace::{Algorithm, Trace},
    trace_replayer::{ReplayOutcome, ReplayParams, ReplayView, TraceReplayer},
    view_state::ViewState,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub trace: Trace,
    pub replay: ReplayOutcome,
    /// Region the viewport was fitted to, if the whole route resolved
    pub bounds: Option<Bounds>,
}

/// Wires the cache, the map layers and the panels together and runs the user operations
/// against them. Each operation takes a fresh token from the gate, which supersedes
/// whatever was still in flight.
pub struct Session<S, M> {
    pub(crate) service: Arc<S>,
    pub(crate) cache: GeoDataCache<S>,
    pub(crate) layers: MapLayerManager<M>,
    pub(crate) sidebar: Sidebar,
    pub(crate) step_log: StepLog,
    pub(crate) view: ViewState,
    pub(crate) gate: OperationGate,
    replayer: TraceReplayer,
    presenter: ResultPresenter,
    renderer: ComparisonRenderer,
}

impl<S, M> Session<S, M>
where
    S: RouteService,
    M: MapSurface,
{
    pub fn new(service: Arc<S>, surface: M, params: ReplayParams) -> Self {
        Self {
            cache: GeoDataCache::new(Arc::clone(&service)),
            service,
            layers: MapLayerManager::new(surface),
            sidebar: Sidebar::default(),
            step_log: StepLog::default(),
            view: ViewState::default(),
            gate: OperationGate::new(),
            replayer: TraceReplayer::new(params),
            presenter: ResultPresenter,
            renderer: ComparisonRenderer,
        }
    }

    /// A handle that can cancel the operation in flight from another task.
    pub fn gate(&self) -> OperationGate {
        self.gate.clone()
    }

    pub fn on_step<F>(&mut self, callback: F)
    where
        F: FnMut(&StepLog) + Send + Sync + 'static,
    {
        self.replayer.on_step(callback);
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    pub fn cache(&self) -> &GeoDataCache<S> {
        &self.cache
    }

    pub fn layers(&self) -> &MapLayerManager<M> {
        &self.layers
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn step_log(&self) -> &StepLog {
        &self.step_log
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub async fn load_points(&mut self) -> Result<Arc<[Point]>, OperationError> {
        let token = self.gate.begin();
        let result = self.reload(&token).await;
        self.settle("Load points", result)
    }

    pub async fn add_point(&mut self, name: &str, lat: f64, lng: f64) -> Result<bool, OperationError> {
        let token = self.gate.begin();
        let result = self.run_add(name, lat, lng, &token).await;
        self.settle("Add point", result)
    }

    pub async fn remove_point(&mut self, name: &str) -> Result<bool, OperationError> {
        let token = self.gate.begin();
        let result = self.run_remove(name, &token).await;
        self.settle("Remove point", result)
    }

    /// Requests a trace for `algorithm`, replays it and presents the final route.
    pub async fn solve(&mut self, algorithm: Algorithm) -> Result<SolveOutcome, OperationError> {
        let token = self.gate.begin();
        self.prepare_solve();

        let solved = token.until_superseded(self.service.solve(algorithm)).await;
        let result = match solved {
            Ok(Ok(trace)) => self.run_trace(trace, algorithm, &token).await,
            Ok(Err(error)) => Err(error.into()),
            Err(superseded) => Err(superseded.into()),
        };
        self.settle("Solve", result)
    }

    /// Replays a trace that was produced earlier, without asking the service to solve.
    pub async fn replay_trace(
        &mut self,
        trace: Trace,
        algorithm: Algorithm,
    ) -> Result<SolveOutcome, OperationError> {
        let token = self.gate.begin();
        self.prepare_solve();

        let result = self.run_trace(trace, algorithm, &token).await;
        self.settle("Replay", result)
    }

    pub async fn compare(&mut self) -> Result<ComparisonResult, OperationError> {
        let token = self.gate.begin();
        self.view.begin_busy("Running every algorithm...");
        self.view.result = None;
        self.view.calculation_visible = false;
        self.layers.clear_route();

        let result = self.run_compare(&token).await;
        self.settle("Compare", result)
    }

    /// Goes back to the default dataset and clears everything drawn so far.
    pub async fn reset(&mut self) -> Result<Arc<[Point]>, OperationError> {
        let token = self.gate.begin();
        let result = self.run_reset(&token).await;
        self.settle("Reset", result)
    }

    async fn run_add(
        &mut self,
        name: &str,
        lat: f64,
        lng: f64,
        token: &OperationToken,
    ) -> Result<bool, OperationError> {
        let added = self.cache.add(name, lat, lng).await?;
        token.ensure_current()?;
        if added {
            self.reload(token).await?;
        }
        Ok(added)
    }

    async fn run_remove(&mut self, name: &str, token: &OperationToken) -> Result<bool, OperationError> {
        let removed = self.cache.remove(name).await?;
        token.ensure_current()?;
        if removed {
            self.reload(token).await?;
            self.view.result = None;
        }
        Ok(removed)
    }

    fn prepare_solve(&mut self) {
        self.view.begin_busy("Computing the distance matrix...");
        self.view.hide_results();
        self.layers.clear_route();
    }

    async fn run_trace(
        &mut self,
        trace: Trace,
        algorithm: Algorithm,
        token: &OperationToken,
    ) -> Result<SolveOutcome, OperationError> {
        token.ensure_current()?;
        self.view.status = Some("Solved, replaying the search...".to_string());
        self.view.calculation_visible = true;

        let mode = trace.evaluation_mode(algorithm);
        info!(
            "Replaying {} steps of {} ({})",
            trace.steps.len(),
            trace.algorithm.unwrap_or(algorithm),
            mode.label()
        );

        let mut replay = self
            .replayer
            .replay(
                &trace,
                &self.cache,
                ReplayView {
                    layers: &mut self.layers,
                    sidebar: &mut self.sidebar,
                    step_log: &mut self.step_log,
                },
                mode,
                token,
            )
            .await?;

        let points = self.cache.refresh_for(token).await?;
        let bounds = match self
            .presenter
            .present(&trace, &points, &mut self.view.result, &mut self.layers)
        {
            Ok(bounds) => bounds,
            Err(inconsistency) => {
                if !replay
                    .inconsistencies
                    .iter()
                    .any(|found| found.name == inconsistency.name)
                {
                    replay.inconsistencies.push(inconsistency);
                }
                None
            }
        };

        Ok(SolveOutcome {
            trace,
            replay,
            bounds,
        })
    }

    async fn run_compare(&mut self, token: &OperationToken) -> Result<ComparisonResult, OperationError> {
        let results = token.until_superseded(self.service.compare()).await??;

        self.view.comparison = Some(self.renderer.render(&results));
        Ok(results)
    }

    async fn run_reset(&mut self, token: &OperationToken) -> Result<Arc<[Point]>, OperationError> {
        self.service.reset().await?;
        token.ensure_current()?;

        self.clear_view();
        self.reload(token).await
    }

    /// Every overlay, panel and log entry goes.
    pub(crate) fn clear_view(&mut self) {
        self.layers.clear_all();
        self.view.hide_results();
        self.step_log.clear();
    }

    /// Refreshes the cache and redraws the point list and the plain markers.
    pub(crate) async fn reload(&mut self, token: &OperationToken) -> Result<Arc<[Point]>, OperationError> {
        let points = self.cache.refresh_for(token).await?;
        self.sidebar.update(&points);
        self.layers.sync_point_markers(&points);
        Ok(points)
    }

    /// Clears the busy state and turns failures into alerts. Superseded operations stay silent.
    pub(crate) fn settle<T>(
        &mut self,
        operation: &str,
        result: Result<T, OperationError>,
    ) -> Result<T, OperationError> {
        self.view.end_busy();

        match &result {
            Ok(_) => info!("{} done", operation),
            Err(error) => match error.user_message() {
                Some(message) => {
                    error!("{} failed: {}", operation, error);
                    self.view.alert(message);
                }
                None => info!("{} superseded", operation),
            },
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        in_memory_service::InMemoryService, map_surface::RecordingSurface,
        route_service::GENERIC_FAILURE_MESSAGE, test_utils,
    };

    fn session(service: InMemoryService) -> Session<InMemoryService, RecordingSurface> {
        Session::new(
            Arc::new(service),
            RecordingSurface::default(),
            ReplayParams::default(),
        )
    }

    #[tokio::test]
    async fn test_load_points_draws_markers() {
        let mut session = session(InMemoryService::new(test_utils::scenario_one()));

        let points = session.load_points().await.unwrap();

        assert_eq!(points.len(), 5);
        assert_eq!(session.sidebar().len(), 5);
        assert_eq!(
            session
                .layers()
                .count_of_kind(crate::overlay::OverlayKind::PointMarker),
            5
        );
    }

    #[tokio::test]
    async fn test_failure_raises_alert_and_clears_busy() {
        let service = InMemoryService::new(test_utils::scenario_one());
        service.set_offline(true);
        let mut session = session(service);

        assert!(session.solve(Algorithm::AStar).await.is_err());
        assert!(!session.view().is_busy());
        assert_eq!(session.view().status, None);
        assert_eq!(session.view().alerts(), [GENERIC_FAILURE_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_rejected_add_keeps_previous_list() {
        let mut session = session(InMemoryService::new(test_utils::scenario_one()));
        session.load_points().await.unwrap();

        let result = session.add_point("", 1.0, 1.0).await;

        assert!(matches!(result, Err(OperationError::InvalidPoint(_))));
        assert_eq!(session.sidebar().len(), 5);
        assert_eq!(session.view_mut().take_alerts().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_hides_result_panel() {
        let service = InMemoryService::new(test_utils::abc_points())
            .with_trace(Algorithm::BestFirst, test_utils::two_step_trace());
        let mut session = Session::new(
            Arc::new(service),
            RecordingSurface::default(),
            ReplayParams {
                step_delay: std::time::Duration::ZERO,
            },
        );
        session.load_points().await.unwrap();
        session.solve(Algorithm::BestFirst).await.unwrap();
        assert!(session.view().result.is_some());

        assert_eq!(session.remove_point("B").await, Ok(true));
        assert!(session.view().result.is_none());
        assert_eq!(session.sidebar().len(), 2);

        assert_eq!(session.remove_point("Atlantis").await, Ok(false));
    }
}

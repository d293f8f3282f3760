use std::sync::Arc;

use tracing::info;

use crate::{
    error::OperationError,
    map_surface::MapSurface,
    operation::OperationToken,
    point::Point,
    route_service::RouteService,
    session::Session,
};

impl<S, M> Session<S, M>
where
    S: RouteService,
    M: MapSurface,
{
    /// Swaps the active dataset. Nothing is cleared until the service has accepted the
    /// switch, so a failed request leaves the previous scenario on screen.
    pub async fn switch_scenario(&mut self, id: u32) -> Result<Arc<[Point]>, OperationError> {
        let token = self.gate.begin();
        self.view.begin_busy(format!("Switching to scenario {id}..."));

        let result = self.run_switch(id, &token).await;
        self.settle("Switch scenario", result)
    }

    async fn run_switch(&mut self, id: u32, token: &OperationToken) -> Result<Arc<[Point]>, OperationError> {
        let announced = self.service.switch_scenario(id).await?;
        token.ensure_current()?;

        self.clear_view();
        let points = self.reload(token).await?;

        info!(
            "Switched to scenario {}: {} points ({} announced)",
            id,
            points.len(),
            announced.len()
        );
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        in_memory_service::InMemoryService,
        map_surface::RecordingSurface,
        overlay::OverlayKind,
        session::Session,
        test_utils,
        trace::Algorithm,
        trace_replayer::ReplayParams,
    };

    use super::*;

    fn session() -> Session<InMemoryService, RecordingSurface> {
        let service = InMemoryService::new(test_utils::abc_points())
            .with_scenario(2, test_utils::scenario_two())
            .with_trace(Algorithm::BestFirst, test_utils::two_step_trace());

        Session::new(
            Arc::new(service),
            RecordingSurface::default(),
            ReplayParams {
                step_delay: Duration::ZERO,
            },
        )
    }

    #[tokio::test]
    async fn test_switch_clears_previous_scenario() {
        let mut session = session();
        session.load_points().await.unwrap();
        session.solve(Algorithm::BestFirst).await.unwrap();
        assert_eq!(session.layers().count_of_kind(OverlayKind::RouteSegment), 1);

        let points = session.switch_scenario(2).await.unwrap();

        assert_eq!(&*points, test_utils::scenario_two().as_slice());
        assert_eq!(session.layers().count_of_kind(OverlayKind::RouteSegment), 0);
        assert_eq!(session.layers().count_of_kind(OverlayKind::DistanceLabel), 0);
        assert_eq!(session.layers().count_of_kind(OverlayKind::PointMarker), 4);
        for name in ["A", "B", "C"] {
            assert_eq!(session.layers().registry().marker_id(name), None);
        }
        assert!(session.view().result.is_none());
        assert!(!session.view().calculation_visible);
        assert!(session.step_log().is_empty());
    }

    #[tokio::test]
    async fn test_failed_switch_keeps_visuals() {
        let mut session = session();
        session.load_points().await.unwrap();
        session.solve(Algorithm::BestFirst).await.unwrap();

        let result = session.switch_scenario(7).await;

        assert!(matches!(result, Err(OperationError::Service(_))));
        assert_eq!(session.view().alerts(), ["Scenario 7 not found".to_string()]);
        assert_eq!(session.layers().count_of_kind(OverlayKind::RouteSegment), 1);
        assert_eq!(session.sidebar().len(), 3);
        assert!(session.view().result.is_some());
    }
}

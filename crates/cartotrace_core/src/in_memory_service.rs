use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use fxhash::FxHashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::{
    comparison::ComparisonResult,
    point::Point,
    route_service::{RouteService, ServiceError},
    trace::{Algorithm, Trace},
};

pub const DEFAULT_SCENARIO: u32 = 1;

struct InMemoryState {
    scenarios: FxHashMap<u32, Vec<Point>>,
    points: Vec<Point>,
    traces: FxHashMap<Algorithm, Trace>,
    comparison: Option<ComparisonResult>,
}

/// A route service answering from recorded traces, used for offline replays.
pub struct InMemoryService {
    state: Mutex<InMemoryState>,
    offline: AtomicBool,
    fetch_count: AtomicUsize,
}

impl InMemoryService {
    /// `points` become the default scenario, which `reset` goes back to.
    pub fn new(points: Vec<Point>) -> Self {
        let mut scenarios = FxHashMap::default();
        scenarios.insert(DEFAULT_SCENARIO, points.clone());

        Self {
            state: Mutex::new(InMemoryState {
                scenarios,
                points,
                traces: FxHashMap::default(),
                comparison: None,
            }),
            offline: AtomicBool::new(false),
            fetch_count: AtomicUsize::new(0),
        }
    }

    pub fn with_scenario(self, id: u32, points: Vec<Point>) -> Self {
        self.state.lock().scenarios.insert(id, points);
        self
    }

    pub fn with_trace(self, algorithm: Algorithm, trace: Trace) -> Self {
        self.state.lock().traces.insert(algorithm, trace);
        self
    }

    pub fn with_comparison(self, comparison: ComparisonResult) -> Self {
        self.state.lock().comparison = Some(comparison);
        self
    }

    /// While offline every call fails with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Release);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::Acquire)
    }

    pub fn point_count(&self) -> usize {
        self.state.lock().points.len()
    }

    fn ensure_online(&self) -> Result<(), ServiceError> {
        if self.offline.load(Ordering::Acquire) {
            Err(ServiceError::Transport("service is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl RouteService for InMemoryService {
    async fn fetch_points(&self) -> Result<Vec<Point>, ServiceError> {
        self.ensure_online()?;
        self.fetch_count.fetch_add(1, Ordering::AcqRel);
        Ok(self.state.lock().points.clone())
    }

    async fn add_point(&self, point: &Point) -> Result<bool, ServiceError> {
        self.ensure_online()?;
        let mut state = self.state.lock();
        match state.points.iter_mut().find(|existing| existing.name == point.name) {
            Some(existing) => *existing = point.clone(),
            None => state.points.push(point.clone()),
        }
        Ok(true)
    }

    async fn remove_point(&self, name: &str) -> Result<bool, ServiceError> {
        self.ensure_online()?;
        let mut state = self.state.lock();
        let before = state.points.len();
        state.points.retain(|point| point.name != name);
        Ok(state.points.len() < before)
    }

    async fn solve(&self, algorithm: Algorithm) -> Result<Trace, ServiceError> {
        self.ensure_online()?;
        let state = self.state.lock();
        if state.points.len() < 2 {
            return Err(ServiceError::Rejected(Some(
                "At least two points are required".to_string(),
            )));
        }

        state.traces.get(&algorithm).cloned().ok_or_else(|| {
            ServiceError::Rejected(Some(format!("No trace recorded for {algorithm}")))
        })
    }

    async fn compare(&self) -> Result<ComparisonResult, ServiceError> {
        self.ensure_online()?;
        let state = self.state.lock();
        if state.points.len() < 2 {
            return Err(ServiceError::Rejected(Some(
                "At least two points are required".to_string(),
            )));
        }

        state.comparison.clone().ok_or(ServiceError::Rejected(None))
    }

    async fn switch_scenario(&self, id: u32) -> Result<Vec<Point>, ServiceError> {
        self.ensure_online()?;
        let mut state = self.state.lock();
        let points = state
            .scenarios
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::Rejected(Some(format!("Scenario {id} not found"))))?;

        debug!("Switched to scenario {} with {} points", id, points.len());
        state.points = points.clone();
        Ok(points)
    }

    async fn reset(&self) -> Result<(), ServiceError> {
        self.ensure_online()?;
        let mut state = self.state.lock();
        state.points = state
            .scenarios
            .get(&DEFAULT_SCENARIO)
            .cloned()
            .unwrap_or_default();
        Ok(())
    }
}

use std::sync::Arc;

use fxhash::FxHashSet;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::{
    error::OperationError,
    operation::OperationToken,
    point::{Point, find_point},
    route_service::{RouteService, ServiceError},
};

/// Last successfully fetched point set. Readers always see a whole snapshot;
/// additions and removals only become visible through the next refresh.
pub struct GeoDataCache<S> {
    service: Arc<S>,
    points: RwLock<Arc<[Point]>>,
}

impl<S: RouteService> GeoDataCache<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            points: RwLock::new(Arc::from(Vec::new())),
        }
    }

    pub fn snapshot(&self) -> Arc<[Point]> {
        self.points.read().clone()
    }

    pub fn lookup(&self, name: &str) -> Option<Point> {
        find_point(&self.points.read(), name).cloned()
    }

    pub async fn refresh(&self) -> Result<Arc<[Point]>, ServiceError> {
        let points = self.fetch().await?;
        *self.points.write() = Arc::clone(&points);
        Ok(points)
    }

    /// Like [`GeoDataCache::refresh`], but drops the fetched set when `token`
    /// was superseded while the request was in flight.
    pub async fn refresh_for(&self, token: &OperationToken) -> Result<Arc<[Point]>, OperationError> {
        let points = self.fetch().await?;
        token.ensure_current()?;
        *self.points.write() = Arc::clone(&points);
        Ok(points)
    }

    pub async fn add(&self, name: &str, lat: f64, lng: f64) -> Result<bool, OperationError> {
        let point = Point::new(name.trim(), lat, lng);
        point.validate()?;

        let added = self.service.add_point(&point).await?;
        debug!("Add point {} -> {}", point.name, added);
        Ok(added)
    }

    pub async fn remove(&self, name: &str) -> Result<bool, ServiceError> {
        let removed = self.service.remove_point(name).await?;
        debug!("Remove point {} -> {}", name, removed);
        Ok(removed)
    }

    async fn fetch(&self) -> Result<Arc<[Point]>, ServiceError> {
        let fetched = self.service.fetch_points().await?;

        let mut seen = FxHashSet::default();
        let mut points = Vec::with_capacity(fetched.len());
        for point in fetched {
            if seen.insert(point.name.clone()) {
                points.push(point);
            } else {
                warn!("Ignoring duplicate point name {}", point.name);
            }
        }

        debug!("Fetched {} points", points.len());
        Ok(Arc::from(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{in_memory_service::InMemoryService, operation::OperationGate, test_utils};

    #[tokio::test]
    async fn test_refresh_is_idempotent() {
        let service = Arc::new(InMemoryService::new(test_utils::scenario_one()));
        let cache = GeoDataCache::new(Arc::clone(&service));

        let first = cache.refresh().await.unwrap();
        let second = cache.refresh().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.snapshot(), second);
        assert_eq!(service.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_add_is_not_visible_before_refresh() {
        let service = Arc::new(InMemoryService::new(test_utils::scenario_one()));
        let cache = GeoDataCache::new(service);
        cache.refresh().await.unwrap();

        assert_eq!(cache.add(" Da Nang ", 16.0544, 108.2022).await, Ok(true));
        assert_eq!(cache.lookup("Da Nang"), None);

        cache.refresh().await.unwrap();
        assert_eq!(
            cache.lookup("Da Nang"),
            Some(Point::new("Da Nang", 16.0544, 108.2022))
        );
    }

    #[tokio::test]
    async fn test_add_rejects_bad_shape_without_calling_service() {
        let service = Arc::new(InMemoryService::new(test_utils::scenario_one()));
        let cache = GeoDataCache::new(Arc::clone(&service));

        let result = cache.add("Nowhere", 123.0, 0.0).await;
        assert!(matches!(result, Err(OperationError::InvalidPoint(_))));
        assert_eq!(service.point_count(), test_utils::scenario_one().len());
    }

    #[tokio::test]
    async fn test_remove_unknown_point() {
        let service = Arc::new(InMemoryService::new(test_utils::scenario_one()));
        let cache = GeoDataCache::new(service);

        assert_eq!(cache.remove("Atlantis").await, Ok(false));
        assert_eq!(cache.remove("Bangkok").await, Ok(true));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let service = Arc::new(InMemoryService::new(test_utils::scenario_one()));
        let cache = GeoDataCache::new(Arc::clone(&service));
        let before = cache.refresh().await.unwrap();

        service.set_offline(true);
        assert!(cache.refresh().await.is_err());
        assert_eq!(cache.snapshot(), before);
    }

    #[tokio::test]
    async fn test_refresh_for_discards_superseded_result() {
        let service = Arc::new(InMemoryService::new(test_utils::scenario_one()));
        let cache = GeoDataCache::new(service);
        let gate = OperationGate::new();

        let stale = gate.begin();
        gate.begin();

        let result = cache.refresh_for(&stale).await;
        assert!(matches!(result, Err(OperationError::Superseded(_))));
        assert!(cache.snapshot().is_empty());
    }
}

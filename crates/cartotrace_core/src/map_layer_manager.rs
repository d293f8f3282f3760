use fxhash::FxHashSet;
use tracing::debug;

use crate::{
    bounds::{Bounds, FIT_PADDING},
    map_surface::MapSurface,
    overlay::{Overlay, OverlayId, OverlayKind, OverlayRegistry},
    point::Point,
};

/// Owns the overlay lifecycle: everything drawn on the surface goes through the registry,
/// so a render pass can always tear down exactly what earlier passes left behind.
pub struct MapLayerManager<M> {
    surface: M,
    registry: OverlayRegistry,
}

impl<M: MapSurface> MapLayerManager<M> {
    pub fn new(surface: M) -> Self {
        Self {
            surface,
            registry: OverlayRegistry::default(),
        }
    }

    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    pub fn count_of_kind(&self, kind: OverlayKind) -> usize {
        self.registry.count_of_kind(kind)
    }

    pub fn clear_overlays_of_kind<I>(&mut self, kinds: I) -> usize
    where
        I: IntoIterator<Item = OverlayKind>,
    {
        let kinds: FxHashSet<OverlayKind> = kinds.into_iter().collect();
        let ids = self.registry.ids_of_kinds(&kinds);

        for &id in &ids {
            self.remove(id);
        }

        debug!("Cleared {} overlays of kinds {:?}", ids.len(), kinds);
        ids.len()
    }

    /// Route segments and distance labels, the leftovers of a solve.
    pub fn clear_route(&mut self) -> usize {
        self.clear_overlays_of_kind([OverlayKind::RouteSegment, OverlayKind::DistanceLabel])
    }

    pub fn clear_all(&mut self) -> usize {
        self.clear_overlays_of_kind(OverlayKind::ALL)
    }

    /// At most one marker exists per name: the previous one is removed first.
    pub fn upsert_point_marker(
        &mut self,
        name: &str,
        lat: f64,
        lng: f64,
        highlighted: bool,
    ) -> OverlayId {
        if let Some(existing) = self.registry.marker_id(name) {
            self.remove(existing);
        }

        self.add(Overlay::PointMarker {
            name: name.to_owned(),
            position: geo::Coord { x: lng, y: lat },
            highlighted,
            popup: format!("{name}\nLat: {lat}\nLng: {lng}"),
        })
    }

    /// Leaves every point with a plain marker at its current position and drops markers of
    /// points that are gone. Markers already in that state are not touched.
    pub fn sync_point_markers(&mut self, points: &[Point]) {
        let names: FxHashSet<&str> = points.iter().map(|point| point.name.as_str()).collect();
        let stale: Vec<OverlayId> = self
            .registry
            .marker_names()
            .filter(|name| !names.contains(name))
            .filter_map(|name| self.registry.marker_id(name))
            .collect();

        for id in stale {
            self.remove(id);
        }

        for point in points {
            let unchanged = matches!(
                self.registry.marker(&point.name),
                Some(Overlay::PointMarker {
                    position,
                    highlighted: false,
                    ..
                }) if *position == point.coord()
            );
            if !unchanged {
                self.upsert_point_marker(&point.name, point.lat, point.lng, false);
            }
        }
    }

    /// A new segment between both points, and a new label at its midpoint.
    pub fn draw_segment(&mut self, from: &Point, to: &Point, distance: f64) -> (OverlayId, OverlayId) {
        let line = geo::Line::new(from.coord(), to.coord());
        let midpoint = geo::Coord {
            x: (from.lng + to.lng) / 2.0,
            y: (from.lat + to.lat) / 2.0,
        };

        let segment = self.add(Overlay::RouteSegment {
            from: from.name.clone(),
            to: to.name.clone(),
            line,
        });
        let label = self.add(Overlay::DistanceLabel {
            position: midpoint,
            text: format!("{distance:.1} km"),
        });

        (segment, label)
    }

    pub fn fit_bounds(&mut self, bounds: &Bounds) {
        self.surface.fit_bounds(bounds, FIT_PADDING);
    }

    fn add(&mut self, overlay: Overlay) -> OverlayId {
        let id = self.registry.insert(overlay);
        if let Some(overlay) = self.registry.get(id) {
            self.surface.add_overlay(id, overlay);
        }
        id
    }

    fn remove(&mut self, id: OverlayId) {
        if self.registry.remove(id).is_some() {
            self.surface.remove_overlay(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_surface::{RecordingSurface, SurfaceEvent};

    #[test]
    fn test_upsert_keeps_one_marker_per_name() {
        let mut layers = MapLayerManager::new(RecordingSurface::default());

        let first = layers.upsert_point_marker("A", 1.0, 2.0, false);
        let second = layers.upsert_point_marker("A", 1.0, 2.0, true);

        assert_ne!(first, second);
        assert_eq!(layers.count_of_kind(OverlayKind::PointMarker), 1);
        assert!(matches!(
            layers.registry().marker("A"),
            Some(Overlay::PointMarker {
                highlighted: true,
                ..
            })
        ));
        assert_eq!(layers.surface().events()[1], SurfaceEvent::Removed(first));
    }

    #[test]
    fn test_draw_segment() {
        let mut layers = MapLayerManager::new(RecordingSurface::default());
        let a = Point::new("A", 10.0, 100.0);
        let c = Point::new("C", 12.0, 104.0);

        let (segment, label) = layers.draw_segment(&a, &c, 90.0);

        assert_eq!(layers.count_of_kind(OverlayKind::RouteSegment), 1);
        assert_eq!(
            layers.registry().get(label),
            Some(&Overlay::DistanceLabel {
                position: geo::Coord { x: 102.0, y: 11.0 },
                text: "90.0 km".to_string(),
            })
        );
        assert!(matches!(
            layers.registry().get(segment),
            Some(Overlay::RouteSegment { from, to, .. }) if from == "A" && to == "C"
        ));

        let (again, _) = layers.draw_segment(&a, &c, 90.0);
        assert_ne!(again, segment);
        assert_eq!(layers.count_of_kind(OverlayKind::RouteSegment), 2);
    }

    #[test]
    fn test_clear_route_keeps_markers() {
        let mut layers = MapLayerManager::new(RecordingSurface::default());
        let a = Point::new("A", 10.0, 100.0);
        let b = Point::new("B", 11.0, 101.0);
        layers.sync_point_markers(&[a.clone(), b.clone()]);
        layers.draw_segment(&a, &b, 12.34);

        assert_eq!(layers.clear_route(), 2);
        assert_eq!(layers.count_of_kind(OverlayKind::RouteSegment), 0);
        assert_eq!(layers.count_of_kind(OverlayKind::DistanceLabel), 0);
        assert_eq!(layers.count_of_kind(OverlayKind::PointMarker), 2);

        assert_eq!(layers.clear_all(), 2);
        assert!(layers.registry().is_empty());
    }

    #[test]
    fn test_sync_drops_removed_points() {
        let mut layers = MapLayerManager::new(RecordingSurface::default());
        layers.sync_point_markers(&[Point::new("A", 1.0, 1.0), Point::new("B", 2.0, 2.0)]);
        layers.upsert_point_marker("B", 2.0, 2.0, true);

        layers.sync_point_markers(&[Point::new("B", 2.0, 2.0)]);

        assert_eq!(layers.registry().marker_id("A"), None);
        assert!(matches!(
            layers.registry().marker("B"),
            Some(Overlay::PointMarker {
                highlighted: false,
                ..
            })
        ));
        assert_eq!(layers.count_of_kind(OverlayKind::PointMarker), 1);
    }

    #[test]
    fn test_sync_only_redraws_changed_markers() {
        let mut layers = MapLayerManager::new(RecordingSurface::default());
        let points = [Point::new("A", 1.0, 1.0), Point::new("B", 2.0, 2.0)];
        layers.sync_point_markers(&points);
        let a = layers.registry().marker_id("A");
        layers.upsert_point_marker("B", 2.0, 2.0, true);
        let before = layers.surface().events().len();

        layers.sync_point_markers(&[Point::new("A", 1.0, 1.0), Point::new("B", 2.5, 2.0)]);

        assert_eq!(layers.registry().marker_id("A"), a);
        let removed = layers.surface().events()[before..]
            .iter()
            .filter(|event| matches!(event, SurfaceEvent::Removed(_)))
            .count();
        assert_eq!(removed, 1);
        assert!(matches!(
            layers.registry().marker("B"),
            Some(Overlay::PointMarker {
                highlighted: false,
                position,
                ..
            }) if position.y == 2.5
        ));
    }
}

use std::collections::BTreeMap;

use fxhash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    PointMarker,
    RouteSegment,
    DistanceLabel,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 3] = [
        OverlayKind::PointMarker,
        OverlayKind::RouteSegment,
        OverlayKind::DistanceLabel,
    ];
}

/// Handle of an overlay on the map. Never reused within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl OverlayId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    PointMarker {
        name: String,
        position: geo::Coord<f64>,
        highlighted: bool,
        popup: String,
    },
    RouteSegment {
        from: String,
        to: String,
        line: geo::Line<f64>,
    },
    DistanceLabel {
        position: geo::Coord<f64>,
        text: String,
    },
}

impl Overlay {
    pub fn kind(&self) -> OverlayKind {
        match self {
            Overlay::PointMarker { .. } => OverlayKind::PointMarker,
            Overlay::RouteSegment { .. } => OverlayKind::RouteSegment,
            Overlay::DistanceLabel { .. } => OverlayKind::DistanceLabel,
        }
    }
}

/// Every overlay currently on the map, keyed by handle, plus the marker of each point name.
#[derive(Default)]
pub struct OverlayRegistry {
    next_id: u64,
    overlays: BTreeMap<OverlayId, Overlay>,
    markers: FxHashMap<String, OverlayId>,
}

impl OverlayRegistry {
    pub fn insert(&mut self, overlay: Overlay) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;

        if let Overlay::PointMarker { name, .. } = &overlay {
            self.markers.insert(name.clone(), id);
        }

        self.overlays.insert(id, overlay);
        id
    }

    pub fn remove(&mut self, id: OverlayId) -> Option<Overlay> {
        let overlay = self.overlays.remove(&id)?;

        if let Overlay::PointMarker { name, .. } = &overlay
            && self.markers.get(name) == Some(&id)
        {
            self.markers.remove(name);
        }

        Some(overlay)
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(&id)
    }

    pub fn marker_id(&self, name: &str) -> Option<OverlayId> {
        self.markers.get(name).copied()
    }

    pub fn marker(&self, name: &str) -> Option<&Overlay> {
        self.marker_id(name).and_then(|id| self.get(id))
    }

    pub fn marker_names(&self) -> impl Iterator<Item = &str> {
        self.markers.keys().map(String::as_str)
    }

    /// Handles of every overlay of the given kinds, oldest first.
    pub fn ids_of_kinds(&self, kinds: &FxHashSet<OverlayKind>) -> Vec<OverlayId> {
        self.overlays
            .iter()
            .filter(|(_, overlay)| kinds.contains(&overlay.kind()))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn count_of_kind(&self, kind: OverlayKind) -> usize {
        self.overlays
            .values()
            .filter(|overlay| overlay.kind() == kind)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverlayId, &Overlay)> {
        self.overlays.iter().map(|(id, overlay)| (*id, overlay))
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

use crate::{
    bounds::Bounds,
    overlay::{Overlay, OverlayId},
};

/// The map substrate overlays are drawn on.
pub trait MapSurface {
    fn add_overlay(&mut self, id: OverlayId, overlay: &Overlay);

    fn remove_overlay(&mut self, id: OverlayId);

    fn fit_bounds(&mut self, bounds: &Bounds, padding: (u32, u32));
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Added(OverlayId, Overlay),
    Removed(OverlayId),
    Fitted(Bounds, (u32, u32)),
}

/// Keeps every call it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    pub fn last_fit(&self) -> Option<&Bounds> {
        self.events.iter().rev().find_map(|event| match event {
            SurfaceEvent::Fitted(bounds, _) => Some(bounds),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl MapSurface for RecordingSurface {
    fn add_overlay(&mut self, id: OverlayId, overlay: &Overlay) {
        self.events.push(SurfaceEvent::Added(id, overlay.clone()));
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        self.events.push(SurfaceEvent::Removed(id));
    }

    fn fit_bounds(&mut self, bounds: &Bounds, padding: (u32, u32)) {
        self.events.push(SurfaceEvent::Fitted(*bounds, padding));
    }
}

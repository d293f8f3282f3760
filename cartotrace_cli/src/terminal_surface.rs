use cartotrace_core::{
    bounds::Bounds,
    map_surface::MapSurface,
    overlay::{Overlay, OverlayId},
};
use tracing::{debug, info};

/// Stands in for a tile map: overlay changes go to the debug log, viewport fits to the info log.
#[derive(Default)]
pub struct TerminalSurface;

impl MapSurface for TerminalSurface {
    fn add_overlay(&mut self, id: OverlayId, overlay: &Overlay) {
        match overlay {
            Overlay::PointMarker {
                name, highlighted, ..
            } => debug!(
                "Map: marker #{} {}{}",
                id.get(),
                name,
                if *highlighted { " (highlighted)" } else { "" }
            ),
            Overlay::RouteSegment { from, to, .. } => {
                debug!("Map: segment #{} {} -> {}", id.get(), from, to)
            }
            Overlay::DistanceLabel { text, .. } => debug!("Map: label #{} {}", id.get(), text),
        }
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        debug!("Map: removed #{}", id.get());
    }

    fn fit_bounds(&mut self, bounds: &Bounds, padding: (u32, u32)) {
        let (min, max) = (bounds.min(), bounds.max());
        info!(
            "Map: fit to [{:.4}, {:.4}] - [{:.4}, {:.4}] with padding {}x{}",
            min.y, min.x, max.y, max.x, padding.0, padding.1
        );
    }
}

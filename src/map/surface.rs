use super::icons::Icon;
use crate::geo::Coordinates;
use std::collections::BTreeMap;
use tracing::trace;
use uuid::Uuid;

pub type MarkerId = Uuid;

/// The map widget the markers are drawn on.
///
/// Hosts forward their zoom-end notifications to `App::on_zoom_end`.
pub trait MapSurface {
    fn add_marker(&mut self, id: MarkerId, position: Coordinates, icon: Icon, popup: Option<&str>);
    fn remove_marker(&mut self, id: MarkerId);
    fn set_icon(&mut self, id: MarkerId, icon: Icon);
    fn set_view(&mut self, center: Coordinates, zoom: f64);
    fn fly_to(&mut self, center: Coordinates, zoom: f64);
    fn zoom(&self) -> f64;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub position: Coordinates,
    pub icon: Icon,
    pub popup: Option<String>,
}

/// Keeps the map state in memory, for headless runs
#[derive(Debug, Clone)]
pub struct RecordingMap {
    pub markers: BTreeMap<MarkerId, PlacedMarker>,
    pub center: Option<Coordinates>,
    zoom: f64,
}

impl RecordingMap {
    pub fn new(zoom: f64) -> Self {
        Self {
            markers: BTreeMap::new(),
            center: None,
            zoom,
        }
    }

    /// Simulates the user zooming; the caller still has to notify the app
    pub fn zoom_to(&mut self, zoom: f64) {
        self.zoom = zoom;
    }
}

impl Default for RecordingMap {
    fn default() -> Self {
        Self::new(12.0)
    }
}

impl MapSurface for RecordingMap {
    fn add_marker(&mut self, id: MarkerId, position: Coordinates, icon: Icon, popup: Option<&str>) {
        self.markers.insert(
            id,
            PlacedMarker {
                position,
                icon,
                popup: popup.map(str::to_string),
            },
        );
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }

    fn set_icon(&mut self, id: MarkerId, icon: Icon) {
        match self.markers.get_mut(&id) {
            Some(marker) => marker.icon = icon,
            None => trace!("Ignoring icon for unknown marker {}", id),
        }
    }

    fn set_view(&mut self, center: Coordinates, zoom: f64) {
        self.center = Some(center);
        self.zoom = zoom;
    }

    fn fly_to(&mut self, center: Coordinates, zoom: f64) {
        self.set_view(center, zoom);
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }
}

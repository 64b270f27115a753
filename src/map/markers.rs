use super::icons::{concert_icon, user_icon, venue_icon};
use super::surface::{MapSurface, MarkerId};
use super::venues::{Venue, VENUES};
use crate::geo::Coordinates;
use crate::open_data::model::Event;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

const USER_POPUP: &str = "Vous êtes ici";

/// What a marker stands for; also decides how its icon is regenerated
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerTarget {
    Event(Event),
    Venue(&'static Venue),
    User,
}

impl MarkerTarget {
    /// The record a click on this marker opens
    pub fn record(&self) -> Option<&Event> {
        match self {
            MarkerTarget::Event(event) => Some(event),
            MarkerTarget::Venue(venue) => Some(&venue.event),
            MarkerTarget::User => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub target: MarkerTarget,
}

#[derive(Debug, Default)]
pub struct MarkerRenderer {
    markers: Vec<Marker>,
}

impl MarkerRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn target(&self, id: MarkerId) -> Option<&MarkerTarget> {
        self.markers
            .iter()
            .find(|marker| marker.id == id)
            .map(|marker| &marker.target)
    }

    pub fn event_marker_count(&self) -> usize {
        self.count(|target| matches!(target, MarkerTarget::Event(_)))
    }

    pub fn venue_marker_count(&self) -> usize {
        self.count(|target| matches!(target, MarkerTarget::Venue(_)))
    }

    fn count(&self, predicate: impl Fn(&MarkerTarget) -> bool) -> usize {
        self.markers
            .iter()
            .filter(|marker| predicate(&marker.target))
            .count()
    }

    /// Replaces every event marker with one per located event; returns how many were drawn
    #[instrument(skip_all, fields(events = events.len()))]
    pub fn rebuild_markers<M: MapSurface>(&mut self, map: &mut M, events: &[Event]) -> usize {
        self.clear_event_markers(map);

        let icon = concert_icon(map.zoom());
        let mut drawn = 0;

        for event in events {
            let Some(position) = event.coordinates else {
                trace!("Skipping event without coordinates: {:?}", event.title);
                continue;
            };

            let id = Uuid::new_v4();
            map.add_marker(id, position, icon.clone(), None);
            self.markers.push(Marker {
                id,
                target: MarkerTarget::Event(event.clone()),
            });
            drawn += 1;
        }

        debug!("Drew {} event markers", drawn);

        drawn
    }

    fn clear_event_markers<M: MapSurface>(&mut self, map: &mut M) {
        self.markers.retain(|marker| match marker.target {
            MarkerTarget::Event(_) => {
                map.remove_marker(marker.id);
                false
            }
            MarkerTarget::Venue(_) | MarkerTarget::User => true,
        });
    }

    /// Draws the static venues; does nothing once they are on the map
    pub fn place_venue_markers<M: MapSurface>(&mut self, map: &mut M) {
        if self.venue_marker_count() > 0 {
            return;
        }

        let zoom = map.zoom();

        for venue in VENUES.iter() {
            let id = Uuid::new_v4();
            map.add_marker(id, venue.coordinates, venue_icon(venue.icon_asset, zoom), None);
            self.markers.push(Marker {
                id,
                target: MarkerTarget::Venue(venue),
            });
        }
    }

    pub fn place_user_marker<M: MapSurface>(&mut self, map: &mut M, position: Coordinates) {
        self.markers.retain(|marker| {
            if marker.target == MarkerTarget::User {
                map.remove_marker(marker.id);
                false
            } else {
                true
            }
        });

        let id = Uuid::new_v4();
        map.add_marker(id, position, user_icon(map.zoom()), Some(USER_POPUP));
        self.markers.push(Marker {
            id,
            target: MarkerTarget::User,
        });
    }

    /// Regenerates icons in place so marker ids (and their click bindings) survive
    pub fn on_zoom<M: MapSurface>(&self, map: &mut M) {
        let zoom = map.zoom();
        let event_icon = concert_icon(zoom);

        for marker in &self.markers {
            let icon = match marker.target {
                MarkerTarget::Event(_) => event_icon.clone(),
                MarkerTarget::Venue(venue) => venue_icon(venue.icon_asset, zoom),
                MarkerTarget::User => user_icon(zoom),
            };

            map.set_icon(marker.id, icon);
        }
    }
}

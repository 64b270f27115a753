use super::drawer::{detail_link, event_list_lines, list_cards, search_events, EventCard, EventDrawer};
use super::panels::{Drawer, Panels};
use crate::filters::engine;
use crate::filters::model::{Facet, FilterSelection};
use crate::geo::Coordinates;
use crate::map::markers::MarkerRenderer;
use crate::map::surface::{MapSurface, MarkerId};
use crate::open_data::api::APIError;
use crate::open_data::model::Event;
use crate::platform::{GeolocationError, KeyValueStore, Shell};
use chrono::{Local, NaiveDate};
use tracing::{debug, error, info, instrument, warn};

pub const ONBOARDING_FLAG: &str = "fromOnboarding";
pub const LOCATED_ZOOM: f64 = 12.0;
pub const CENTERED_ZOOM: f64 = 15.0;

const GEOLOCATION_UNAVAILABLE: &str = "Géolocalisation indisponible";

/// Every event fetched at startup
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn replace(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    pub fn all(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// The map page: events, filters, markers and panels, driven by user and network events
pub struct App<M: MapSurface, S: Shell> {
    map: M,
    shell: S,
    store: EventStore,
    selection: FilterSelection,
    pending_selection: FilterSelection,
    user_location: Option<Coordinates>,
    markers: MarkerRenderer,
    panels: Panels,
    search_term: String,
    event_drawer: Option<EventDrawer>,
    list_cards: Vec<EventCard>,
    event_list: Vec<String>,
}

impl<M: MapSurface, S: Shell> App<M, S> {
    pub fn new(map: M, shell: S) -> Self {
        Self {
            map,
            shell,
            store: EventStore::default(),
            selection: FilterSelection::default(),
            pending_selection: FilterSelection::default(),
            user_location: None,
            markers: MarkerRenderer::new(),
            panels: Panels::default(),
            search_term: String::new(),
            event_drawer: None,
            list_cards: Vec::new(),
            event_list: Vec::new(),
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn events(&self) -> &[Event] {
        self.store.all()
    }

    pub fn markers(&self) -> &MarkerRenderer {
        &self.markers
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn pending_selection(&self) -> &FilterSelection {
        &self.pending_selection
    }

    pub fn user_location(&self) -> Option<Coordinates> {
        self.user_location
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn event_drawer(&self) -> Option<&EventDrawer> {
        self.event_drawer.as_ref()
    }

    pub fn list_cards(&self) -> &[EventCard] {
        &self.list_cards
    }

    pub fn event_list(&self) -> &[String] {
        &self.event_list
    }

    /// Shows the welcome overlay once after onboarding; the flag is consumed
    pub fn on_load<K: KeyValueStore>(&mut self, storage: &mut K) {
        if storage.get(ONBOARDING_FLAG).as_deref() == Some("true") {
            debug!("Coming from onboarding");
            self.panels.welcome = true;
            storage.remove(ONBOARDING_FLAG);
        }
    }

    pub fn close_welcome_panel(&mut self) {
        self.panels.welcome = false;
    }

    #[instrument(skip_all, fields(events = events.len()))]
    pub fn load_events(&mut self, events: Vec<Event>) {
        self.store.replace(events);

        self.markers.rebuild_markers(&mut self.map, self.store.all());
        self.markers.place_venue_markers(&mut self.map);
        self.event_list = event_list_lines(self.store.all());

        info!("Loaded {} events", self.store.len());
    }

    /// Nothing is shown when the fetch failed
    pub fn on_events_loaded(&mut self, result: Result<Vec<Event>, APIError>) {
        match result {
            Ok(events) => self.load_events(events),
            Err(err) => error!("Failed to get Paris concerts: {}", err),
        }
    }

    pub fn on_geolocation(&mut self, result: Result<Coordinates, GeolocationError>) {
        match result {
            Ok(position) => {
                info!("User located at {:?}", position);
                self.user_location = Some(position);
                self.map.set_view(position, LOCATED_ZOOM);
                self.markers.place_user_marker(&mut self.map, position);
            }
            Err(err) => {
                warn!("Geolocation failed: {}", err);
                self.shell.alert(GEOLOCATION_UNAVAILABLE);
            }
        }
    }

    pub fn center_on_user(&mut self) {
        if let Some(position) = self.user_location {
            self.map.fly_to(position, CENTERED_ZOOM);
        }
    }

    pub fn on_zoom_end(&mut self) {
        self.markers.on_zoom(&mut self.map);
    }

    /// Returns whether the marker led to a drawer
    pub fn on_marker_click(&mut self, id: MarkerId) -> bool {
        let record = self
            .markers
            .target(id)
            .and_then(|target| target.record())
            .cloned();

        match record {
            Some(event) => {
                self.open_event_drawer(&event);
                true
            }
            None => false,
        }
    }

    pub fn open_event_drawer(&mut self, event: &Event) {
        self.event_drawer = Some(EventDrawer::new(event));
        self.panels.open(Drawer::Event);
    }

    pub fn close_event_drawer(&mut self) {
        self.panels.close(Drawer::Event);
    }

    /// Navigates to the detail page of the event in the drawer
    pub fn go_to_event_detail(&mut self) -> Option<String> {
        let link = detail_link(&self.event_drawer.as_ref()?.event)?;

        self.shell.navigate(&link);

        Some(link)
    }

    pub fn toggle_filter_drawer(&mut self) {
        self.panels.toggle(Drawer::Filter);
    }

    pub fn close_filter_drawer(&mut self) {
        self.panels.close(Drawer::Filter);
    }

    /// Flips a facet in the filter drawer; nothing changes until filters are applied
    pub fn toggle_facet(&mut self, facet: Facet) -> bool {
        self.pending_selection.toggle(facet)
    }

    pub fn apply_filters(&mut self) -> usize {
        self.apply_filters_at(Local::now().date_naive())
    }

    /// Returns how many event markers were drawn
    #[instrument(skip(self), fields(selection = ?self.pending_selection))]
    pub fn apply_filters_at(&mut self, today: NaiveDate) -> usize {
        self.selection = self.pending_selection.clone();

        let filtered =
            engine::apply_filters(self.store.all(), &self.selection, self.user_location, today);
        let drawn = self.markers.rebuild_markers(&mut self.map, &filtered);

        self.close_filter_drawer();

        drawn
    }

    pub fn toggle_event_list(&mut self) {
        if self.panels.toggle(Drawer::EventList) {
            self.list_cards = list_cards(self.store.all());
        }
    }

    pub fn close_event_list(&mut self) {
        self.panels.close(Drawer::EventList);
    }

    /// Opens the detail drawer for a card of the list drawer
    pub fn open_list_card(&mut self, index: usize) {
        let Some(event) = self.list_cards.get(index).map(|card| card.event.clone()) else {
            warn!("No list card at {}", index);
            return;
        };

        self.close_event_list();
        self.open_event_drawer(&event);
    }

    pub fn toggle_map_search(&mut self) {
        if !self.panels.toggle_map_search() {
            self.search_term.clear();
            self.markers.rebuild_markers(&mut self.map, self.store.all());
        }
    }

    /// Searches every fetched event; refreshes the list drawer if open, the markers otherwise
    #[instrument(skip(self))]
    pub fn search(&mut self, term: &str) {
        self.search_term = term.to_string();

        let results = search_events(self.store.all(), term);
        debug!("{} events match", results.len());

        if self.panels.event_list {
            self.list_cards = list_cards(&results);
        } else {
            self.markers.rebuild_markers(&mut self.map, &results);
        }
    }
}

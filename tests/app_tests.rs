use chrono::NaiveDate;
use parisconcerts::bootstrap::bootstrap;
use parisconcerts::config::model::{ApiConfig, Config, DebugConfig};
use parisconcerts::geo::Coordinates;
use parisconcerts::map::icons::{user_marker_size, Icon};
use parisconcerts::map::markers::MarkerTarget;
use parisconcerts::map::surface::{MapSurface, MarkerId, RecordingMap};
use parisconcerts::map::venues::VENUES;
use parisconcerts::open_data::model::{Event, Location};
use parisconcerts::platform::{
    ConsoleShell, FixedGeolocator, GeolocationError, KeyValueStore, MemoryStore,
};
use parisconcerts::ui::app::{App, CENTERED_ZOOM, LOCATED_ZOOM, ONBOARDING_FLAG};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn concert(title: &str, keywords: &[&str], date: Option<&str>, at: Option<(f64, f64)>) -> Event {
    Event {
        title: Some(title.to_string()),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        date_range: date.map(str::to_string),
        location: Location::new("Salle", "1 Rue de Paris", "Paris", "75001"),
        coordinates: at.map(|(lat, lon)| Coordinates::new(lat, lon)),
        ..Event::default()
    }
}

fn concerts() -> Vec<Event> {
    vec![
        concert("Rock au parc", &["rock"], Some("10/06/2026"), Some((48.85, 2.35))),
        concert("Jazz Night", &["jazz"], Some("05/05/2026"), Some((48.86, 2.36))),
        concert("Pop sans lieu", &["pop"], None, None),
        concert("Rock de Belleville", &["rock", "festival"], None, Some((48.87, 2.38))),
    ]
}

fn loaded_app() -> App<RecordingMap, ConsoleShell> {
    let mut app = App::new(RecordingMap::default(), ConsoleShell::default());
    app.load_events(concerts());
    app
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 5).unwrap()
}

#[test_log::test]
fn loading_should_draw_located_events_and_venues() {
    let app = loaded_app();

    assert_eq!(app.events().len(), 4);
    assert_eq!(app.markers().event_marker_count(), 3);
    assert_eq!(app.map().markers.len(), 3 + VENUES.len());
    assert_eq!(app.event_list().len(), 4);
    assert_eq!(app.event_list()[1], "Jazz Night – 05/05/2026");
}

#[test_log::test]
fn applying_filters_should_rebuild_exactly_the_filtered_markers() {
    let mut app = loaded_app();
    app.toggle_filter_drawer();
    app.toggle_facet("genre:rock".parse().unwrap());

    let drawn = app.apply_filters_at(today());

    assert_eq!(drawn, 2);
    assert_eq!(app.markers().event_marker_count(), 2);
    assert_eq!(app.markers().venue_marker_count(), VENUES.len());
    assert_eq!(app.map().markers.len(), 2 + VENUES.len());
    assert!(!app.panels().filter_drawer);
    assert!(app.panels().bottom_nav);
}

#[test_log::test]
fn filters_should_not_apply_until_requested() {
    let mut app = loaded_app();

    app.toggle_facet("date:today".parse().unwrap());

    assert!(app.selection().is_empty());
    assert_eq!(app.markers().event_marker_count(), 3);

    app.apply_filters_at(today());

    assert_eq!(app.markers().event_marker_count(), 1);
    assert!(!app.selection().is_empty());
}

#[test_log::test]
fn search_should_update_markers_when_list_is_closed() {
    let mut app = loaded_app();

    app.search("JAZZ");

    assert_eq!(app.markers().event_marker_count(), 1);

    app.search("");

    assert_eq!(app.markers().event_marker_count(), 3);
}

#[test_log::test]
fn search_should_update_list_when_it_is_open() {
    let mut app = loaded_app();
    app.toggle_event_list();
    assert_eq!(app.list_cards().len(), 4);
    assert_eq!(app.list_cards()[0].title, "Jazz Night");

    app.search("rock");

    let titles: Vec<&str> = app.list_cards().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Rock au parc", "Rock de Belleville"]);
    assert_eq!(app.markers().event_marker_count(), 3);
}

#[test_log::test]
fn hiding_search_should_restore_all_markers() {
    let mut app = loaded_app();
    app.toggle_map_search();
    assert!(!app.panels().filter_button);
    app.search("belleville");
    assert_eq!(app.markers().event_marker_count(), 1);

    app.toggle_map_search();

    assert_eq!(app.search_term(), "");
    assert_eq!(app.markers().event_marker_count(), 3);
    assert!(app.panels().filter_button);
}

#[test_log::test]
fn clicking_an_event_marker_should_open_its_drawer() {
    let mut app = loaded_app();
    let id = app
        .markers()
        .markers()
        .iter()
        .find(|m| matches!(&m.target, MarkerTarget::Event(e) if e.title.as_deref() == Some("Jazz Night")))
        .map(|m| m.id)
        .unwrap();

    assert!(app.on_marker_click(id));

    let drawer = app.event_drawer().unwrap();
    assert_eq!(drawer.title, "Jazz Night");
    assert_eq!(drawer.city.as_deref(), Some("75001 Paris"));
    assert!(app.panels().event_drawer);
    assert!(!app.panels().bottom_nav);

    app.close_event_drawer();
    assert!(app.panels().bottom_nav);
}

#[test_log::test]
fn list_card_should_close_list_and_open_drawer() {
    let mut app = loaded_app();
    app.toggle_event_list();

    app.open_list_card(0);

    assert!(!app.panels().event_list);
    assert!(app.panels().event_drawer);
    assert_eq!(app.event_drawer().unwrap().title, "Jazz Night");
}

#[test_log::test]
fn more_info_should_navigate_to_detail_page() {
    let mut app = loaded_app();
    app.open_event_drawer(&concerts()[0]);

    let link = app.go_to_event_detail().unwrap();

    assert!(link.starts_with("event-detail.html?event="));
    assert_eq!(app.shell().visited, vec![link]);
}

#[test_log::test]
fn located_user_should_be_centered_and_marked() {
    let mut app = loaded_app();
    let position = Coordinates::new(48.8566, 2.3522);

    app.on_geolocation(Ok(position));

    assert_eq!(app.user_location(), Some(position));
    assert_eq!(app.map().center, Some(position));
    assert_eq!(app.map().zoom(), LOCATED_ZOOM);

    app.center_on_user();
    assert_eq!(app.map().zoom(), CENTERED_ZOOM);

    app.on_zoom_end();
    let user = app
        .markers()
        .markers()
        .iter()
        .find(|m| m.target == MarkerTarget::User)
        .unwrap();
    assert_eq!(app.map().markers[&user.id].icon.size, user_marker_size(CENTERED_ZOOM));
}

#[test_log::test]
fn distance_filter_should_use_user_location() {
    let mut app = loaded_app();
    app.on_geolocation(Ok(Coordinates::new(48.85, 2.35)));
    app.toggle_facet("distance:1".parse().unwrap());

    let drawn = app.apply_filters_at(today());

    assert_eq!(drawn, 1);
}

#[test_log::test]
fn failed_geolocation_should_alert_once() {
    let mut app = loaded_app();

    app.on_geolocation(Err(GeolocationError::PermissionDenied));

    assert_eq!(app.shell().alerts, vec!["Géolocalisation indisponible"]);
    assert_eq!(app.user_location(), None);
}

#[test_log::test]
fn onboarding_flag_should_show_welcome_once() {
    let mut storage = MemoryStore::default();
    storage.set(ONBOARDING_FLAG, "true");
    let mut app = App::new(RecordingMap::default(), ConsoleShell::default());

    app.on_load(&mut storage);

    assert!(app.panels().welcome);
    assert_eq!(storage.get(ONBOARDING_FLAG), None);

    app.close_welcome_panel();
    app.on_load(&mut storage);
    assert!(!app.panels().welcome);
}

#[test_log::test(tokio::test)]
async fn failed_fetch_should_leave_the_map_empty() {
    let config = Config {
        debug_config: DebugConfig { event_limit: None },
        api_config: ApiConfig {
            records_url: "http://127.0.0.1:9/records".to_string(),
            ..ApiConfig::default()
        },
        user_location: None,
        state_file: PathBuf::from("unused.json"),
    };
    let mut app = App::new(RecordingMap::default(), ConsoleShell::default());

    bootstrap(
        &mut app,
        &config,
        &mut MemoryStore::default(),
        &FixedGeolocator::default(),
    )
    .await;

    assert!(app.events().is_empty());
    assert!(app.map().markers.is_empty());
    assert_eq!(app.shell().alerts.len(), 1);
}

/// Records the order in which the map is driven
#[derive(Default)]
struct CallLog {
    map: RecordingMap,
    calls: Vec<&'static str>,
}

impl MapSurface for CallLog {
    fn add_marker(&mut self, id: MarkerId, position: Coordinates, icon: Icon, popup: Option<&str>) {
        self.calls.push("add_marker");
        self.map.add_marker(id, position, icon, popup);
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.calls.push("remove_marker");
        self.map.remove_marker(id);
    }

    fn set_icon(&mut self, id: MarkerId, icon: Icon) {
        self.calls.push("set_icon");
        self.map.set_icon(id, icon);
    }

    fn set_view(&mut self, center: Coordinates, zoom: f64) {
        self.calls.push("set_view");
        self.map.set_view(center, zoom);
    }

    fn fly_to(&mut self, center: Coordinates, zoom: f64) {
        self.calls.push("fly_to");
        self.map.fly_to(center, zoom);
    }

    fn zoom(&self) -> f64 {
        self.map.zoom()
    }
}

/// Answers every page with one located concert, after a delay
async fn serve_slow_records(delay: Duration) -> String {
    const BODY: &str = r#"{"results": [{"title_fr": "Jazz Night", "keywords_fr": "jazz", "location_coordinates": {"lat": 48.86, "lon": 2.36}}]}"#;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buffer = [0u8; 1024];

                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buffer).await {
                        Ok(0) | Err(_) => return,
                        Ok(read) => request.extend_from_slice(&buffer[..read]),
                    }
                }

                tokio::time::sleep(delay).await;

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    BODY.len(),
                    BODY
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{}/records", address)
}

#[test_log::test(tokio::test)]
async fn position_should_be_applied_before_a_slower_fetch() {
    let config = Config {
        debug_config: DebugConfig { event_limit: None },
        api_config: ApiConfig {
            records_url: serve_slow_records(Duration::from_millis(100)).await,
            page_count: 1,
            ..ApiConfig::default()
        },
        user_location: None,
        state_file: PathBuf::from("unused.json"),
    };
    let position = Coordinates::new(48.8566, 2.3522);
    let mut app = App::new(CallLog::default(), ConsoleShell::default());

    bootstrap(
        &mut app,
        &config,
        &mut MemoryStore::default(),
        &FixedGeolocator {
            position: Some(position),
        },
    )
    .await;

    let calls = &app.map().calls;
    assert_eq!(calls.first(), Some(&"set_view"));
    assert_eq!(calls.get(1), Some(&"add_marker"));
    assert_eq!(app.map().map.center, Some(position));
    assert_eq!(app.user_location(), Some(position));
    assert_eq!(app.events().len(), 1);
    assert_eq!(app.markers().event_marker_count(), 1);
    assert!(app.shell().alerts.is_empty());
}


use parisconcerts::bootstrap::bootstrap;
use parisconcerts::config::env_loader::load_config;
use parisconcerts::filters::model::Facet;
use parisconcerts::map::surface::RecordingMap;
use parisconcerts::platform::{ConsoleShell, FixedGeolocator, JsonFileStore};
use parisconcerts::tracing::setup_tracing;
use parisconcerts::ui::app::App;
use itertools::Itertools;
use std::env;
use tracing::{info, warn};

/// Headless run: loads the map page, applies the facets given as arguments
/// (e.g. `genre:jazz date:this_week distance:5`) and prints the upcoming list.
#[tokio::main]
async fn main() {
    let loki = setup_tracing().await;
    let config = load_config();

    let mut storage = JsonFileStore::open(&config.state_file);
    let geolocator = FixedGeolocator {
        position: config.user_location,
    };
    let mut app = App::new(RecordingMap::default(), ConsoleShell::default());

    bootstrap(&mut app, &config, &mut storage, &geolocator).await;

    let facets: Vec<Facet> = env::args()
        .skip(1)
        .filter_map(|arg| {
            arg.parse::<Facet>()
                .inspect_err(|err| {
                    warn!(
                        "Ignoring argument: {}. Known facets: {}",
                        err,
                        Facet::all().iter().join(" ")
                    )
                })
                .ok()
        })
        .collect();

    if !facets.is_empty() {
        for facet in facets {
            app.toggle_facet(facet);
        }

        let drawn = app.apply_filters();
        info!("{} events match {:?}", drawn, app.selection());
    }

    app.toggle_event_list();

    for card in app.list_cards() {
        info!("{} | {} | {}", card.date, card.title, card.location);
    }

    if let Some((controller, handle)) = loki {
        controller.shutdown().await;
        if let Err(err) = handle.await {
            warn!("Loki task ended abnormally: {}", err);
        }
    }
}

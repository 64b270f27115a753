use crate::config::model::Config;
use crate::map::surface::MapSurface;
use crate::open_data::api::{APIError, OpenDataAPI};
use crate::open_data::model::Event;
use crate::platform::{Geolocator, KeyValueStore, Shell};
use crate::ui::app::App;
use tracing::{debug, info};

/// Starts the map page: consumes the onboarding flag, then fetches events
/// and locates the user at the same time, applying each result as soon as it arrives.
#[tracing::instrument(skip_all)]
pub async fn bootstrap<M, S, K, G>(
    app: &mut App<M, S>,
    config: &Config,
    storage: &mut K,
    geolocator: &G,
) where
    M: MapSurface,
    S: Shell,
    K: KeyValueStore,
    G: Geolocator,
{
    app.on_load(storage);

    let fetching = OpenDataAPI::get_events(&config.api_config);
    let locating = geolocator.current_position();
    tokio::pin!(fetching, locating);

    // whichever finishes first is applied first
    tokio::select! {
        biased;
        position = &mut locating => {
            app.on_geolocation(position);
            app.on_events_loaded(limit_events(fetching.await, config));
        }
        events = &mut fetching => {
            app.on_events_loaded(limit_events(events, config));
            app.on_geolocation(locating.await);
        }
    }

    info!(
        "Map ready with {} markers",
        app.markers().markers().len()
    );
}

fn limit_events(
    events: Result<Vec<Event>, APIError>,
    config: &Config,
) -> Result<Vec<Event>, APIError> {
    events.map(|mut events| {
        if let Some(Ok(limit)) = config.debug_config.event_limit.map(usize::try_from) {
            debug!("Keeping only {} events", limit);
            events.truncate(limit);
        }
        events
    })
}

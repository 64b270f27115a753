use crate::config::model::{AggregationPolicy, ApiConfig, Config, DebugConfig};
use crate::geo::Coordinates;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_STATE_FILE: &str = ".parisconcerts.json";

pub fn load_config() -> Config {
    let defaults = ApiConfig::default();

    let partial_results = load_bool_config("OPEN_DATA_PARTIAL_RESULTS", false);

    Config {
        debug_config: DebugConfig {
            event_limit: load_number_config("DEBUG_EVENT_LIMIT"),
        },
        api_config: ApiConfig {
            records_url: env::var("OPEN_DATA_URL").unwrap_or(defaults.records_url),
            page_count: load_number_config("OPEN_DATA_PAGE_COUNT").unwrap_or(defaults.page_count),
            page_size: load_number_config("OPEN_DATA_PAGE_SIZE").unwrap_or(defaults.page_size),
            keyword: env::var("OPEN_DATA_KEYWORD").unwrap_or(defaults.keyword),
            department: env::var("OPEN_DATA_DEPARTMENT").unwrap_or(defaults.department),
            max_retries: load_number_config("OPEN_DATA_MAX_RETRIES")
                .unwrap_or(defaults.max_retries),
            aggregation: if partial_results {
                AggregationPolicy::Partial
            } else {
                AggregationPolicy::AllOrNothing
            },
        },
        user_location: load_user_location(),
        state_file: env::var("STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_FILE)),
    }
}

fn load_user_location() -> Option<Coordinates> {
    let lat: Option<f64> = load_number_config("USER_LATITUDE");
    let lon: Option<f64> = load_number_config("USER_LONGITUDE");

    match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
        (None, None) => None,
        _ => panic!("USER_LATITUDE and USER_LONGITUDE must be set together"),
    }
}

fn load_bool_config(name: &str, default: bool) -> bool {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or_else(|_| {
            panic!(
                "Invalid config '{}'. Expected either 'true' or 'false'",
                name
            )
        })
}

fn load_number_config<T: FromStr>(name: &str) -> Option<T> {
    match env::var(name) {
        Ok(value) => Some(
            value
                .parse()
                .unwrap_or_else(|_| panic!("Invalid config '{}'. Expected a number.", name)),
        ),
        Err(_) => None,
    }
}

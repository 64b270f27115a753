use crate::geo::Coordinates;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub debug_config: DebugConfig,
    pub api_config: ApiConfig,
    pub user_location: Option<Coordinates>,
    pub state_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DebugConfig {
    pub event_limit: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub records_url: String,
    pub page_count: u32,
    pub page_size: u32,
    pub keyword: String,
    pub department: String,
    pub max_retries: u32,
    pub aggregation: AggregationPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            records_url: DEFAULT_RECORDS_URL.to_string(),
            page_count: 5,
            page_size: 100,
            keyword: "concert".to_string(),
            department: "Paris".to_string(),
            max_retries: 0,
            aggregation: AggregationPolicy::AllOrNothing,
        }
    }
}

pub const DEFAULT_RECORDS_URL: &str =
    "https://data.iledefrance.fr/api/explore/v2.1/catalog/datasets/evenements-publics-cibul/records";

/// How page failures affect the joined result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationPolicy {
    /// Any failed page fails the whole fetch
    AllOrNothing,
    /// Failed pages are logged and skipped
    Partial,
}

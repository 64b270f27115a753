use super::{dto::RecordsResponse, model::Event};
use crate::config::model::{AggregationPolicy, ApiConfig};
use futures::future;
use lazy_static::lazy_static;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::RetryTransientMiddleware;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tracing::{error, info, warn};

lazy_static! {
    static ref HTTP_CLIENT: Client = Client::new();
}

pub struct OpenDataAPI;

impl OpenDataAPI {
    /**
    Fetches every configured page concurrently and concatenates them in page order.
    * A failed page fails everything, unless the config asks for partial results
    */
    #[tracing::instrument(skip(config), fields(pages = config.page_count, page_size = config.page_size))]
    pub async fn get_events(config: &ApiConfig) -> Result<Vec<Event>, APIError> {
        info!("Getting events");

        let client = build_client(config.max_retries);
        let pages = (0..config.page_count).map(|page| Self::get_page(&client, config, page));

        let events: Vec<Event> = match config.aggregation {
            AggregationPolicy::AllOrNothing => future::try_join_all(pages)
                .await?
                .into_iter()
                .flatten()
                .collect(),
            AggregationPolicy::Partial => {
                let mut first_error = None;
                let mut fetched_pages = 0;
                let mut events = Vec::new();

                for (page, result) in future::join_all(pages).await.into_iter().enumerate() {
                    match result {
                        Ok(mut page_events) => {
                            fetched_pages += 1;
                            events.append(&mut page_events);
                        }
                        Err(err) => {
                            warn!("Skipping page {} due to: {}", page, err);
                            first_error.get_or_insert(err);
                        }
                    }
                }

                match first_error {
                    Some(err) if fetched_pages == 0 => return Err(err),
                    _ => events,
                }
            }
        };

        info!("Got {} events", events.len());

        Ok(events)
    }

    async fn get_page(
        client: &ClientWithMiddleware,
        config: &ApiConfig,
        page: u32,
    ) -> Result<Vec<Event>, APIError> {
        let json_response = client
            .get(&config.records_url)
            .query(&page_query(config, page))
            .send()
            .await
            .map_err(APIError::Request)?
            .error_for_status()
            .map_err(APIError::Http)?
            .text()
            .await
            .map_err(APIError::Http)?;

        match serde_json::from_str::<RecordsResponse>(&json_response) {
            Ok(parsed_response) => Ok(parsed_response
                .results
                .iter()
                .map(|response| response.to_model())
                .collect()),
            Err(e) => {
                error!("Response parse failed for page {}: {:?}", page, e);
                Err(APIError::InvalidResponse(e))
            }
        }
    }
}

fn build_client(max_retries: u32) -> ClientWithMiddleware {
    ClientBuilder::new(HTTP_CLIENT.clone())
        .with(RetryTransientMiddleware::new_with_policy(
            ExponentialBackoff::builder().build_with_max_retries(max_retries),
        ))
        .build()
}

fn page_query(config: &ApiConfig, page: u32) -> Vec<(&'static str, String)> {
    vec![
        ("limit", config.page_size.to_string()),
        ("offset", (page * config.page_size).to_string()),
        ("refine", format!("keywords_fr:\"{}\"", config.keyword)),
        (
            "refine",
            format!("location_department:\"{}\"", config.department),
        ),
    ]
}

#[derive(Debug)]
pub enum APIError {
    Request(reqwest_middleware::Error),
    Http(reqwest::Error),
    InvalidResponse(serde_json::Error),
}

impl Display for APIError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            APIError::Request(err) => write!(f, "request failed: {}", err),
            APIError::Http(err) => write!(f, "bad response: {}", err),
            APIError::InvalidResponse(err) => write!(f, "invalid response body: {}", err),
        }
    }
}

impl Error for APIError {}

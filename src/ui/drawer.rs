use crate::filters::engine::event_date;
use crate::open_data::dto::DetailRecord;
use crate::open_data::model::Event;
use chrono::NaiveDate;
use itertools::Itertools;
use rand::seq::IndexedRandom;
use tracing::warn;

pub const DETAIL_PAGE: &str = "event-detail.html";
pub const LIST_LIMIT: usize = 20;

const DRAWER_TAG: &str = "Prochain Concert";
const MORE_INFO_LABEL: &str = "En savoir plus";
const UNKNOWN_TITLE: &str = "Sans titre";
const UNKNOWN_DATE: &str = "Date à confirmer";
const UNKNOWN_PLACE: &str = "Lieu à confirmer";

/// Decorative only; unrelated to the events they illustrate
const EVENT_IMAGES: [&str; 3] = [
    "https://adamconcerts.com/wp-content/uploads/2025/10/Theodora_2026_web_META_1080x1440_SoldOut_Marseille.jpg",
    "https://files.offi.fr/programmation/3020022/images/1000/e31acdb8ecb31d76416f990de9f59a01.png",
    "https://www.parisladefense-arena.com/uploads/2025/05/visu-date-2-819x1024.jpg",
];

pub fn random_event_image() -> &'static str {
    EVENT_IMAGES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(EVENT_IMAGES[0])
}

pub fn is_event_image(url: &str) -> bool {
    EVENT_IMAGES.contains(&url)
}

/// Contents of the detail drawer
#[derive(Debug, Clone, PartialEq)]
pub struct EventDrawer {
    pub tag: &'static str,
    pub title: String,
    pub date: String,
    pub location: String,
    pub address: String,
    pub city: Option<String>,
    pub image_url: &'static str,
    pub more_info_label: &'static str,
    pub event: Event,
}

impl EventDrawer {
    pub fn new(event: &Event) -> Self {
        let location = &event.location;

        Self {
            tag: DRAWER_TAG,
            title: title_or_placeholder(event),
            date: date_or_placeholder(event),
            location: location.name.clone().unwrap_or_default(),
            address: location.address.clone().unwrap_or_default(),
            city: location.city.as_ref().map(|city| {
                format!(
                    "{} {}",
                    location.postal_code.as_deref().unwrap_or_default(),
                    city
                )
            }),
            image_url: random_event_image(),
            more_info_label: MORE_INFO_LABEL,
            event: event.clone(),
        }
    }
}

/// One card of the list drawer
#[derive(Debug, Clone, PartialEq)]
pub struct EventCard {
    pub date: String,
    pub title: String,
    pub location: String,
    pub image_url: &'static str,
    pub event: Event,
}

impl EventCard {
    pub fn new(event: &Event) -> Self {
        Self {
            date: date_or_placeholder(event),
            title: title_or_placeholder(event),
            location: event
                .location
                .name
                .clone()
                .or_else(|| event.location.address.clone())
                .unwrap_or_else(|| UNKNOWN_PLACE.to_string()),
            image_url: random_event_image(),
            event: event.clone(),
        }
    }
}

fn title_or_placeholder(event: &Event) -> String {
    event
        .title
        .clone()
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

fn date_or_placeholder(event: &Event) -> String {
    event
        .date_range
        .clone()
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// Upcoming-first cards; undated events go last, keeping their relative order
pub fn list_cards(events: &[Event]) -> Vec<EventCard> {
    events
        .iter()
        .sorted_by_key(|event| event_date(event).unwrap_or(NaiveDate::MAX))
        .take(LIST_LIMIT)
        .map(EventCard::new)
        .collect()
}

/// Lines of the plain event list, `<title> – <date>`
pub fn event_list_lines(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .map(|event| {
            format!(
                "{} – {}",
                event.title.as_deref().unwrap_or_default(),
                event.date_range.as_deref().unwrap_or_default()
            )
        })
        .collect()
}

/// Case-insensitive match on title, venue name, address and city
pub fn search_events(events: &[Event], term: &str) -> Vec<Event> {
    let term = term.trim().to_lowercase();

    if term.is_empty() {
        return events.to_vec();
    }

    events
        .iter()
        .filter(|event| {
            [
                &event.title,
                &event.location.name,
                &event.location.address,
                &event.location.city,
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&term))
        })
        .cloned()
        .collect()
}

/// Link to the detail page, carrying the whole event as URL-encoded JSON
pub fn detail_link(event: &Event) -> Option<String> {
    match serde_json::to_string(&DetailRecord::from(event)) {
        Ok(json) => {
            // literal '+' is already escaped as %2B, so any '+' left is a space
            let encoded = url::form_urlencoded::byte_serialize(json.as_bytes())
                .collect::<String>()
                .replace('+', "%20");

            Some(format!("{}?event={}", DETAIL_PAGE, encoded))
        }
        Err(err) => {
            warn!("Failed to serialize event {:?}: {}", event.uid, err);
            None
        }
    }
}

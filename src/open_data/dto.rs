use super::model::{Event, Location};
use crate::geo::Coordinates;
use serde::{Deserialize, Deserializer, Serialize};
use serde_either::SingleOrVec;
use serde_json::Value;
use tracing::trace;

#[derive(Debug, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub total_count: Option<u64>,
    pub results: Vec<EventResponse>,
}

// Note: the dataset publishes nulls and empty strings interchangeably
#[derive(Debug, Deserialize)]
pub struct EventResponse {
    #[serde(default, deserialize_with = "deserialize_str")]
    pub uid: Option<String>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub title_fr: Option<String>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub description_fr: Option<String>,
    #[serde(default)]
    pub keywords_fr: Option<SingleOrVec<String>>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub daterange_fr: Option<String>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub location_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub location_address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub location_city: Option<String>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub location_postalcode: Option<String>,
    #[serde(default)]
    pub location_coordinates: Option<ResponseCoordinates>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseCoordinates {
    pub lat: f64,
    pub lon: f64,
}

/// An event written back with the dataset's own field names, as the detail page reads it
#[derive(Debug, Serialize)]
pub struct DetailRecord {
    pub uid: Option<String>,
    pub title_fr: Option<String>,
    pub description_fr: Option<String>,
    pub keywords_fr: Vec<String>,
    pub daterange_fr: Option<String>,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
    pub location_city: Option<String>,
    pub location_postalcode: Option<String>,
    pub location_coordinates: Option<ResponseCoordinates>,
}

impl From<&Event> for DetailRecord {
    fn from(event: &Event) -> Self {
        DetailRecord {
            uid: event.uid.clone(),
            title_fr: event.title.clone(),
            description_fr: event.description.clone(),
            keywords_fr: event.keywords.clone(),
            daterange_fr: event.date_range.clone(),
            location_name: event.location.name.clone(),
            location_address: event.location.address.clone(),
            location_city: event.location.city.clone(),
            location_postalcode: event.location.postal_code.clone(),
            location_coordinates: event.coordinates.map(|coordinates| ResponseCoordinates {
                lat: coordinates.lat,
                lon: coordinates.lon,
            }),
        }
    }
}

impl EventResponse {
    pub fn to_model(&self) -> Event {
        let keywords = match self.keywords_fr.clone() {
            None => Vec::new(),
            Some(SingleOrVec::Single(keyword)) => vec![keyword],
            Some(SingleOrVec::Vec(keywords)) => keywords,
        };

        if self.location_coordinates.is_none() {
            trace!("Event {:?} has no coordinates", self.uid);
        }

        Event {
            uid: self.uid.clone(),
            title: self.title_fr.clone(),
            description: self
                .description_fr
                .as_deref()
                .map(voca_rs::strip::strip_tags),
            keywords,
            date_range: self.daterange_fr.clone(),
            location: Location {
                name: self.location_name.clone(),
                address: self.location_address.clone(),
                city: self.location_city.clone(),
                postal_code: self.location_postalcode.clone(),
            },
            coordinates: self
                .location_coordinates
                .as_ref()
                .map(|coordinates| Coordinates::new(coordinates.lat, coordinates.lon)),
        }
    }
}

fn deserialize_str<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

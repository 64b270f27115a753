use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};

/// A public event as published by the open data API
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Event {
    pub uid: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    /// Free text, e.g. "15/03/2026, 20h00"
    pub date_range: Option<String>,
    pub location: Location,
    pub coordinates: Option<Coordinates>,
}

impl Event {
    pub fn keyword_text(&self) -> String {
        self.keywords.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

impl Location {
    pub fn new(name: &str, address: &str, city: &str, postal_code: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            address: Some(address.to_string()),
            city: Some(city.to_string()),
            postal_code: Some(postal_code.to_string()),
        }
    }
}

use crate::geo::Coordinates;
use crate::open_data::model::{Event, Location};
use lazy_static::lazy_static;

/// A large Paris concert hall, drawn with its own icon
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub name: &'static str,
    pub icon_asset: &'static str,
    pub coordinates: Coordinates,
    pub event: Event,
}

impl Venue {
    fn new(
        name: &'static str,
        icon_asset: &'static str,
        coordinates: Coordinates,
        title: &str,
        location: Location,
        date_range: &str,
    ) -> Self {
        Self {
            name,
            icon_asset,
            coordinates,
            event: Event {
                title: Some(title.to_string()),
                date_range: Some(date_range.to_string()),
                location,
                coordinates: Some(coordinates),
                ..Event::default()
            },
        }
    }
}

lazy_static! {
    pub static ref VENUES: Vec<Venue> = vec![
        Venue::new(
            "Accor Arena (Bercy)",
            "Bercy.svg",
            Coordinates::new(48.8393, 2.3791),
            "Concert à l'Accor Arena",
            Location::new("Accor Arena", "8 Boulevard de Bercy", "Paris", "75012"),
            "15/03/2026",
        ),
        Venue::new(
            "Olympia",
            "Olympia.svg",
            Coordinates::new(48.8698, 2.3266),
            "Concert à l'Olympia",
            Location::new("L'Olympia", "28 Boulevard des Capucines", "Paris", "75009"),
            "22/03/2026",
        ),
        Venue::new(
            "Stade de France",
            "SDF.svg",
            Coordinates::new(48.9244, 2.3601),
            "Concert au Stade de France",
            Location::new("Stade de France", "93200 Saint-Denis", "Saint-Denis", "93200"),
            "10/06/2026",
        ),
        Venue::new(
            "Paris La Défense Arena",
            "defense arena.svg",
            Coordinates::new(48.8956, 2.2283),
            "Concert à la Paris La Défense Arena",
            Location::new("Paris La Défense Arena", "99 Jardin de l'Arche", "Nanterre", "92000"),
            "18/04/2026",
        ),
        Venue::new(
            "Zénith Paris",
            "Zenith.svg",
            Coordinates::new(48.8937, 2.3933),
            "Concert au Zénith de Paris",
            Location::new("Zénith Paris - La Villette", "211 Avenue Jean Jaurès", "Paris", "75019"),
            "05/05/2026",
        ),
    ];
}

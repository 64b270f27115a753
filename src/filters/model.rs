use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum::{EnumIter, EnumMessage, EnumString, IntoEnumIterator, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, IntoStaticStr, EnumIter, EnumMessage,
)]
#[strum(serialize_all = "snake_case")]
pub enum Genre {
    #[strum(message = "Rock")]
    Rock,
    #[strum(message = "Pop")]
    Pop,
    #[strum(message = "Jazz")]
    Jazz,
    #[strum(message = "Rap")]
    Rap,
    #[strum(message = "Électro")]
    Electro,
    #[strum(message = "Classique")]
    Classique,
    #[strum(message = "Métal")]
    Metal,
    #[strum(message = "Reggae")]
    Reggae,
}

impl Genre {
    /// Lowercase spellings searched for in keywords and titles
    pub fn match_terms(&self) -> &'static [&'static str] {
        match self {
            Genre::Rock => &["rock"],
            Genre::Pop => &["pop"],
            Genre::Jazz => &["jazz"],
            Genre::Rap => &["rap", "hip-hop", "hip hop"],
            Genre::Electro => &["électro", "electro"],
            Genre::Classique => &["classique"],
            Genre::Metal => &["métal", "metal"],
            Genre::Reggae => &["reggae"],
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, IntoStaticStr, EnumIter, EnumMessage,
)]
#[strum(serialize_all = "snake_case")]
pub enum EventType {
    #[strum(message = "Concert")]
    Concert,
    #[strum(message = "Festival")]
    Festival,
}

impl EventType {
    pub fn match_terms(&self) -> &'static [&'static str] {
        match self {
            EventType::Concert => &["concert"],
            EventType::Festival => &["festival"],
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, IntoStaticStr, EnumIter, EnumMessage,
)]
#[strum(serialize_all = "snake_case")]
pub enum DateBucket {
    #[strum(message = "Aujourd'hui")]
    Today,
    #[strum(message = "Cette semaine")]
    ThisWeek,
    #[strum(message = "Ce mois-ci")]
    ThisMonth,
    #[strum(message = "Plus tard")]
    Later,
}

/// Maximum distance from the user, or no limit at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DistanceBucket {
    Within(u32),
    Any,
}

pub const DISTANCE_BUCKETS: [DistanceBucket; 5] = [
    DistanceBucket::Within(1),
    DistanceBucket::Within(5),
    DistanceBucket::Within(10),
    DistanceBucket::Within(25),
    DistanceBucket::Any,
];

impl DistanceBucket {
    pub fn label(&self) -> String {
        match self {
            DistanceBucket::Within(km) => format!("{} km", km),
            DistanceBucket::Any => "Peu importe".to_string(),
        }
    }
}

impl Display for DistanceBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceBucket::Within(km) => write!(f, "{}", km),
            DistanceBucket::Any => write!(f, "any"),
        }
    }
}

impl FromStr for DistanceBucket {
    type Err = FacetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "any" => Ok(DistanceBucket::Any),
            km => km
                .parse()
                .map(DistanceBucket::Within)
                .map_err(|_| FacetParseError(s.to_string())),
        }
    }
}

/// One selectable value of one facet, identified as `<facet>:<bucket>` (e.g. `genre:rock`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facet {
    Genre(Genre),
    Type(EventType),
    Date(DateBucket),
    Distance(DistanceBucket),
}

impl Facet {
    /// Every selectable value, in filter drawer order
    pub fn all() -> Vec<Facet> {
        Genre::iter()
            .map(Facet::Genre)
            .chain(EventType::iter().map(Facet::Type))
            .chain(DateBucket::iter().map(Facet::Date))
            .chain(DISTANCE_BUCKETS.into_iter().map(Facet::Distance))
            .collect()
    }

    pub fn label(&self) -> String {
        match self {
            Facet::Genre(genre) => genre.get_message().unwrap_or_default().to_string(),
            Facet::Type(event_type) => event_type.get_message().unwrap_or_default().to_string(),
            Facet::Date(bucket) => bucket.get_message().unwrap_or_default().to_string(),
            Facet::Distance(bucket) => bucket.label(),
        }
    }
}

impl Display for Facet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Facet::Genre(genre) => write!(f, "genre:{}", <&str>::from(genre)),
            Facet::Type(event_type) => write!(f, "type:{}", <&str>::from(event_type)),
            Facet::Date(bucket) => write!(f, "date:{}", <&str>::from(bucket)),
            Facet::Distance(bucket) => write!(f, "distance:{}", bucket),
        }
    }
}

impl FromStr for Facet {
    type Err = FacetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || FacetParseError(s.to_string());
        let (facet, value) = s.split_once(':').ok_or_else(error)?;

        match facet {
            "genre" => value.parse().map(Facet::Genre).map_err(|_| error()),
            "type" => value.parse().map(Facet::Type).map_err(|_| error()),
            "date" => value.parse().map(Facet::Date).map_err(|_| error()),
            "distance" => value.parse().map(Facet::Distance).map_err(|_| error()),
            _ => Err(error()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetParseError(pub String);

impl Display for FacetParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown facet '{}'", self.0)
    }
}

impl std::error::Error for FacetParseError {}

/// Active facets; an empty set means that facet does not filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub genres: BTreeSet<Genre>,
    pub types: BTreeSet<EventType>,
    pub dates: BTreeSet<DateBucket>,
    pub distances: BTreeSet<DistanceBucket>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
            && self.types.is_empty()
            && self.dates.is_empty()
            && self.distances.is_empty()
    }

    pub fn contains(&self, facet: Facet) -> bool {
        match facet {
            Facet::Genre(genre) => self.genres.contains(&genre),
            Facet::Type(event_type) => self.types.contains(&event_type),
            Facet::Date(bucket) => self.dates.contains(&bucket),
            Facet::Distance(bucket) => self.distances.contains(&bucket),
        }
    }

    /// Returns whether the facet is active afterwards
    pub fn toggle(&mut self, facet: Facet) -> bool {
        fn flip<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
            if set.remove(&value) {
                false
            } else {
                set.insert(value)
            }
        }

        match facet {
            Facet::Genre(genre) => flip(&mut self.genres, genre),
            Facet::Type(event_type) => flip(&mut self.types, event_type),
            Facet::Date(bucket) => flip(&mut self.dates, bucket),
            Facet::Distance(bucket) => flip(&mut self.distances, bucket),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl FromIterator<Facet> for FilterSelection {
    fn from_iter<I: IntoIterator<Item = Facet>>(iter: I) -> Self {
        let mut selection = Self::default();

        for facet in iter {
            if !selection.contains(facet) {
                selection.toggle(facet);
            }
        }

        selection
    }
}

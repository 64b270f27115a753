use super::model::{DateBucket, DistanceBucket, FilterSelection};
use crate::geo::{distance_km, Coordinates};
use crate::open_data::model::Event;
use chrono::{Days, Months, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref EVENT_DATE: Regex =
        Regex::new(r"(\d{2})/(\d{2})/(\d{4})").expect("Failed to create event date regex");
}

/// First `DD/MM/YYYY` found in a date range, if it is a real calendar date
pub fn parse_event_date(date_range: &str) -> Option<NaiveDate> {
    let captures = EVENT_DATE.captures(date_range)?;

    NaiveDate::from_ymd_opt(
        captures[3].parse().ok()?,
        captures[2].parse().ok()?,
        captures[1].parse().ok()?,
    )
}

pub fn event_date(event: &Event) -> Option<NaiveDate> {
    event.date_range.as_deref().and_then(parse_event_date)
}

#[derive(Debug, Clone, Copy)]
struct DateWindow {
    today: NaiveDate,
    week_end: NaiveDate,
    month_end: NaiveDate,
}

impl DateWindow {
    fn starting(today: NaiveDate) -> Self {
        Self {
            today,
            week_end: today.checked_add_days(Days::new(7)).unwrap_or(NaiveDate::MAX),
            month_end: today
                .checked_add_months(Months::new(1))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    fn contains(&self, bucket: DateBucket, date: NaiveDate) -> bool {
        match bucket {
            DateBucket::Today => date == self.today,
            DateBucket::ThisWeek => self.today <= date && date <= self.week_end,
            DateBucket::ThisMonth => self.today <= date && date <= self.month_end,
            DateBucket::Later => date > self.month_end,
        }
    }
}

/// Narrows `events` to those matching every active facet of `selection`.
///
/// Within a facet any active value may match; an empty facet lets everything through.
/// Distance buckets only apply when the user location is known and none of them is `Any`.
#[tracing::instrument(skip(events, selection), fields(events = events.len()))]
pub fn apply_filters(
    events: &[Event],
    selection: &FilterSelection,
    user_location: Option<Coordinates>,
    today: NaiveDate,
) -> Vec<Event> {
    let window = DateWindow::starting(today);
    let distance_origin = user_location.filter(|_| {
        !selection.distances.is_empty() && !selection.distances.contains(&DistanceBucket::Any)
    });

    let filtered: Vec<Event> = events
        .iter()
        .filter(|event| matches_genres(event, selection))
        .filter(|event| matches_types(event, selection))
        .filter(|event| matches_dates(event, selection, &window))
        .filter(|event| match distance_origin {
            Some(origin) => matches_distances(event, selection, origin),
            None => true,
        })
        .cloned()
        .collect();

    debug!("{} of {} events kept", filtered.len(), events.len());

    filtered
}

fn matches_genres(event: &Event, selection: &FilterSelection) -> bool {
    if selection.genres.is_empty() {
        return true;
    }
    if event.keywords.is_empty() {
        return false;
    }

    let keywords = event.keyword_text().to_lowercase();
    let title = event.title.as_deref().unwrap_or_default().to_lowercase();

    selection
        .genres
        .iter()
        .flat_map(|genre| genre.match_terms())
        .any(|term| keywords.contains(term) || title.contains(term))
}

fn matches_types(event: &Event, selection: &FilterSelection) -> bool {
    if selection.types.is_empty() {
        return true;
    }
    if event.keywords.is_empty() && event.title.is_none() {
        return false;
    }

    let text = format!(
        "{} {}",
        event.keyword_text(),
        event.title.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    selection
        .types
        .iter()
        .flat_map(|event_type| event_type.match_terms())
        .any(|term| text.contains(term))
}

fn matches_dates(event: &Event, selection: &FilterSelection, window: &DateWindow) -> bool {
    if selection.dates.is_empty() {
        return true;
    }

    match event_date(event) {
        Some(date) => selection
            .dates
            .iter()
            .any(|bucket| window.contains(*bucket, date)),
        None => false,
    }
}

fn matches_distances(event: &Event, selection: &FilterSelection, origin: Coordinates) -> bool {
    let Some(coordinates) = event.coordinates else {
        return false;
    };

    let distance = distance_km(origin, coordinates);

    selection.distances.iter().any(|bucket| match bucket {
        DistanceBucket::Within(km) => distance <= f64::from(*km),
        DistanceBucket::Any => true,
    })
}

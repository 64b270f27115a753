const REFERENCE_ZOOM: f64 = 12.0;

const EVENT_SIZE: f64 = 11.0;
const EVENT_GROWTH: f64 = 1.2;
const EVENT_MIN_SIZE: f64 = 6.0;
const EVENT_MAX_SIZE: f64 = 25.0;

const VENUE_SIZE: f64 = 100.0;
const VENUE_GROWTH: f64 = 1.7;
const VENUE_MIN_SIZE: f64 = 30.0;
const VENUE_MAX_SIZE: f64 = 80.0;

const USER_SIZE_OFFSET: f64 = 5.0;

const VENUE_ASSETS_DIR: &str = "images";

#[derive(Debug, Clone, PartialEq)]
pub enum IconStyle {
    /// A CSS-styled dot
    Dot { class_name: &'static str },
    /// An external image asset
    Image {
        url: String,
        class_name: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub style: IconStyle,
    pub size: f64,
    pub anchor: (f64, f64),
    pub popup_anchor: Option<(f64, f64)>,
}

fn scaled_size(zoom: f64, reference_size: f64, growth: f64, min: f64, max: f64) -> f64 {
    (reference_size * growth.powf(zoom - REFERENCE_ZOOM)).clamp(min, max)
}

pub fn event_marker_size(zoom: f64) -> f64 {
    scaled_size(zoom, EVENT_SIZE, EVENT_GROWTH, EVENT_MIN_SIZE, EVENT_MAX_SIZE)
}

pub fn venue_marker_size(zoom: f64) -> f64 {
    scaled_size(zoom, VENUE_SIZE, VENUE_GROWTH, VENUE_MIN_SIZE, VENUE_MAX_SIZE)
}

pub fn user_marker_size(zoom: f64) -> f64 {
    event_marker_size(zoom) + USER_SIZE_OFFSET
}

fn centered(style: IconStyle, size: f64) -> Icon {
    Icon {
        style,
        size,
        anchor: (size / 2.0, size / 2.0),
        popup_anchor: None,
    }
}

pub fn concert_icon(zoom: f64) -> Icon {
    centered(
        IconStyle::Dot {
            class_name: "concert-marker",
        },
        event_marker_size(zoom),
    )
}

pub fn user_icon(zoom: f64) -> Icon {
    centered(
        IconStyle::Dot {
            class_name: "user-marker",
        },
        user_marker_size(zoom),
    )
}

pub fn venue_icon(asset: &str, zoom: f64) -> Icon {
    let size = venue_marker_size(zoom);

    Icon {
        popup_anchor: Some((0.0, -size / 2.0)),
        ..centered(
            IconStyle::Image {
                url: format!("{}/{}", VENUE_ASSETS_DIR, asset),
                class_name: "venue-marker",
            },
            size,
        )
    }
}

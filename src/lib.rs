pub mod bootstrap;
pub mod geo;
pub mod platform;
pub mod tracing;

pub mod config {
    pub mod env_loader;
    pub mod model;
}

pub mod open_data {
    pub mod api;
    pub mod dto;
    pub mod model;
}

pub mod filters {
    pub mod engine;
    pub mod model;
}

pub mod map {
    pub mod icons;
    pub mod markers;
    pub mod surface;
    pub mod venues;
}

pub mod ui {
    pub mod app;
    pub mod drawer;
    pub mod panels;
}

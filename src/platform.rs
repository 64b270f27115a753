use crate::geo::Coordinates;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::fs;
use std::future::Future;
use std::path::PathBuf;
use tracing::{info, warn};

/// One-shot position lookup
pub trait Geolocator {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    Unavailable,
    PermissionDenied,
}

impl Display for GeolocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeolocationError::Unavailable => write!(f, "position unavailable"),
            GeolocationError::PermissionDenied => write!(f, "permission denied"),
        }
    }
}

impl std::error::Error for GeolocationError {}

/// Answers with a configured position, or fails when there is none
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGeolocator {
    pub position: Option<Coordinates>,
}

impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.position.ok_or(GeolocationError::Unavailable)
    }
}

/// String key/value storage surviving between sessions
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Entries kept as a JSON object on disk, rewritten on every change
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!("Ignoring unreadable state file {:?}: {}", path, err);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };

        Self { path, entries }
    }

    fn persist(&self) {
        let result = serde_json::to_string_pretty(&self.entries)
            .map_err(std::io::Error::other)
            .and_then(|json| fs::write(&self.path, json));

        if let Err(err) = result {
            warn!("Failed to write state file {:?}: {}", self.path, err);
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist();
        }
    }
}

/// Alerts and page navigation
pub trait Shell {
    fn alert(&mut self, message: &str);
    fn navigate(&mut self, url: &str);
}

/// Logs what a browser would show, and remembers it
#[derive(Debug, Clone, Default)]
pub struct ConsoleShell {
    pub alerts: Vec<String>,
    pub visited: Vec<String>,
}

impl Shell for ConsoleShell {
    fn alert(&mut self, message: &str) {
        warn!("Alert: {}", message);
        self.alerts.push(message.to_string());
    }

    fn navigate(&mut self, url: &str) {
        info!("Navigating to {}", url);
        self.visited.push(url.to_string());
    }
}

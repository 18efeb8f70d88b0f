//! # spinmap
//!
//! Client-side state for a map-centric app: the shared camera and marker
//! store, place search with autocomplete and keyboard navigation, and a
//! decision wheel that randomly picks among labeled options.
//!
//! Map rendering, the places backend and geolocation are external
//! collaborators reached through traits, so the state logic can run and be
//! tested without a browser or network.

pub mod core;
pub mod geolocation;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod runtime;
pub mod search;
pub mod wheel;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{AppConfig, BiasPolicy, SearchConfig, WheelConfig},
    geo::{LatLng, LatLngBounds},
    store::{CameraUpdate, MapStore, MapViewState, StoreEvent},
};

pub use layers::marker::Marker;

pub use input::{events::KeyCode, events::MapEvent, handler::MapInteraction, handler::MarkerMode};

pub use search::{
    coordinator::{KeyOutcome, PlaceResolution, PlaceSearch, PlaceSearchState},
    google::GooglePlacesClient,
    prediction::PlacePrediction,
    service::PlacesService,
};

pub use wheel::engine::{Turntable, TurntableOption, TurntableState};

pub use geolocation::{locate_and_center, GeolocationProvider};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Initialise `env_logger` once; later calls are ignored
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

//! Prelude module for common spinmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use spinmap::prelude::*;`

pub use crate::core::{
    config::{AppConfig, BiasPolicy, SearchConfig, WheelConfig},
    geo::{LatLng, LatLngBounds},
    store::{CameraUpdate, MapStore, MapViewState, StoreEvent},
};

pub use crate::layers::marker::Marker;

pub use crate::input::{
    events::{EventHandled, KeyCode, MapEvent},
    handler::{MapInteraction, MarkerMode},
};

pub use crate::search::{
    coordinator::{KeyOutcome, PlaceResolution, PlaceResult, PlaceSearch, PlaceSearchState},
    google::GooglePlacesClient,
    prediction::PlacePrediction,
    service::{PlaceDetails, PlacesService, SearchArea},
};

pub use crate::wheel::{
    engine::{RngSource, RotationSource, Turntable, TurntableOption, TurntableState},
    layout::{color_for, label_placement, segment_path, LabelOptions},
};

pub use crate::geolocation::{locate_and_center, GeolocationProvider};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

//! Place search: autocomplete predictions, place resolution and the
//! services behind them

pub mod coordinator;
pub mod google;
pub mod prediction;
pub mod service;

pub use coordinator::{KeyOutcome, PlaceResolution, PlaceResult, PlaceSearch, PlaceSearchState};
pub use google::GooglePlacesClient;
pub use prediction::{PlacePrediction, RawSuggestion};
pub use service::{AutocompleteRequest, PlaceDetails, PlaceDetailsRequest, PlacesService, SearchArea};

use crate::{
    core::{config::BiasPolicy, geo::LatLng, geo::LatLngBounds},
    search::prediction::RawSuggestion,
    Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Area attached to an autocomplete request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchArea {
    /// Prefer results inside the box
    Bias(LatLngBounds),
    /// Only return results inside the box
    Restriction(LatLngBounds),
}

impl SearchArea {
    pub fn new(policy: BiasPolicy, bounds: LatLngBounds) -> Self {
        match policy {
            BiasPolicy::Bias => Self::Bias(bounds),
            BiasPolicy::Restriction => Self::Restriction(bounds),
        }
    }

    pub fn bounds(&self) -> &LatLngBounds {
        match self {
            Self::Bias(bounds) | Self::Restriction(bounds) => bounds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteRequest {
    pub input: String,
    pub region_codes: Vec<String>,
    pub primary_types: Vec<String>,
    pub area: Option<SearchArea>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetailsRequest {
    pub place_id: String,
    pub fields: Vec<String>,
    pub language: String,
    pub region: String,
}

/// Resolved place fields; any of them may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub id: Option<String>,
    pub location: Option<LatLng>,
    pub display_name: Option<String>,
    pub formatted_address: Option<String>,
}

/// Remote autocomplete and place-details lookups.
///
/// Both calls may take arbitrarily long and may fail; callers decide how
/// failures surface.
#[async_trait]
pub trait PlacesService: Send + Sync {
    /// Suggestions for partially typed input, in ranking order
    async fn autocomplete(&self, request: AutocompleteRequest) -> Result<Vec<RawSuggestion>>;

    /// Full details for one place id
    async fn place_details(&self, request: PlaceDetailsRequest) -> Result<PlaceDetails>;
}

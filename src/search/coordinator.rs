//! Place search coordination
//!
//! [`PlaceSearch`] owns the state of one search box: the query text, the
//! current predictions, the loading flag, the highlighted row and whether the
//! result popover is open. It fetches predictions as the query changes and
//! resolves a chosen prediction into a marker on the shared [`MapStore`].
//!
//! Every prediction request is tagged with a sequence number when it is
//! issued. A response is only applied if no newer request has been issued
//! since (clearing the query counts as one), so a slow early response can
//! never overwrite the results of a later query.
//!
//! Failures from the places service never leave this module: they are logged
//! and turn into an empty prediction list or a `None` resolution.

use crate::{
    core::{
        config::{AppConfig, SearchConfig},
        constants::{SEARCH_RESULT_MESSAGE, UNKNOWN_PLACE_NAME},
        geo::{LatLng, LatLngBounds},
        store::MapStore,
    },
    input::events::KeyCode,
    layers::marker::Marker,
    search::{
        prediction::{normalize_suggestions, PlacePrediction},
        service::{AutocompleteRequest, PlaceDetailsRequest, PlacesService, SearchArea},
    },
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Snapshot of one search box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceSearchState {
    pub query: String,
    pub predictions: Vec<PlacePrediction>,
    pub is_loading: bool,
    /// Highlighted prediction; `None` means nothing is highlighted
    pub selected_index: Option<usize>,
    pub is_open: bool,
}

impl PlaceSearchState {
    /// The popover shows only when open with results for a non-blank query
    pub fn is_popover_visible(&self) -> bool {
        self.is_open && !self.predictions.is_empty() && !self.query.trim().is_empty()
    }
}

/// Place fields handed to `on_place_select`-style callbacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub location: LatLng,
}

/// Outcome of resolving a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResolution {
    pub marker: Marker,
    pub place: PlaceResult,
}

/// What a key press did
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// Not applicable in the current state
    Ignored,
    /// Highlight moved to this row
    Highlighted(Option<usize>),
    /// Enter on a highlighted row; `None` when resolution failed
    Resolved(Option<PlaceResolution>),
    /// Escape closed the popover
    Dismissed,
}

/// Clears the loading flag when a fetch finishes or is dropped, unless a
/// newer request has taken over the flag.
struct LoadingGuard<'a> {
    search: &'a PlaceSearch,
    seq: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.search.is_latest(self.seq) {
            self.search.lock().is_loading = false;
        }
    }
}

pub struct PlaceSearch {
    store: MapStore,
    places: Option<Arc<dyn PlacesService>>,
    search: SearchConfig,
    language: String,
    region: String,
    state: Mutex<PlaceSearchState>,
    latest_request: AtomicU64,
}

impl std::fmt::Debug for PlaceSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceSearch")
            .field("state", &*self.lock())
            .field("has_places", &self.places.is_some())
            .finish()
    }
}

impl PlaceSearch {
    /// `places` is `None` while the search capability is unavailable; every
    /// operation is then a silent no-op
    pub fn new(store: MapStore, places: Option<Arc<dyn PlacesService>>, config: &AppConfig) -> Self {
        Self {
            store,
            places,
            search: config.search.clone(),
            language: config.language.clone(),
            region: config.region.clone(),
            state: Mutex::new(PlaceSearchState::default()),
            latest_request: AtomicU64::new(0),
        }
    }

    /// Install the places service once it becomes available
    pub fn set_places_service(&mut self, places: Arc<dyn PlacesService>) {
        self.places = Some(places);
    }

    fn lock(&self) -> MutexGuard<'_, PlaceSearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_request(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.latest_request.load(Ordering::SeqCst) == seq
    }

    pub fn state(&self) -> PlaceSearchState {
        self.lock().clone()
    }

    pub fn query(&self) -> String {
        self.lock().query.clone()
    }

    pub fn predictions(&self) -> Vec<PlacePrediction> {
        self.lock().predictions.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.lock().selected_index
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_open
    }

    pub fn is_popover_visible(&self) -> bool {
        self.lock().is_popover_visible()
    }

    /// The text field changed. A non-blank value opens the popover and
    /// fetches predictions; an empty one closes and resets everything.
    pub async fn input_changed(&self, text: &str) {
        {
            let mut state = self.lock();
            state.query = text.to_string();
            state.selected_index = None;
            state.is_open = !text.trim().is_empty();
        }
        if text.trim().is_empty() {
            self.reset_results();
        } else {
            self.get_place_predictions(text).await;
        }
    }

    /// Drop predictions and invalidate any in-flight request
    fn reset_results(&self) {
        self.next_request();
        let mut state = self.lock();
        state.predictions.clear();
        state.is_loading = false;
        state.selected_index = None;
        state.is_open = false;
    }

    fn search_area(&self) -> Option<SearchArea> {
        LatLngBounds::around(self.store.center(), self.search.bias_radius_deg)
            .map(|bounds| SearchArea::new(self.search.bias_policy, bounds))
    }

    /// Fetch predictions for `input` and replace the current list with them.
    ///
    /// Blank input (or no places service) clears the list without a request.
    pub async fn get_place_predictions(&self, input: &str) {
        let places = match &self.places {
            Some(places) if !input.trim().is_empty() => Arc::clone(places),
            _ => {
                self.next_request();
                let mut state = self.lock();
                state.predictions.clear();
                state.selected_index = None;
                state.is_loading = false;
                return;
            }
        };

        let seq = self.next_request();
        self.lock().is_loading = true;
        let _loading = LoadingGuard { search: self, seq };

        let request = AutocompleteRequest {
            input: input.to_string(),
            region_codes: self.search.region_codes.clone(),
            primary_types: self.search.primary_types.clone(),
            area: self.search_area(),
            language: Some(self.language.clone()),
        };
        let result = places.autocomplete(request).await;

        if !self.is_latest(seq) {
            log::debug!("discarding stale predictions for {:?}", input);
            return;
        }
        let predictions = match result {
            Ok(raw) => normalize_suggestions(&raw),
            Err(e) => {
                log::warn!("autocomplete failed for {:?}: {}", input, e);
                Vec::new()
            }
        };
        let mut state = self.lock();
        if state.selected_index.is_some_and(|i| i >= predictions.len()) {
            state.selected_index = None;
        }
        state.predictions = predictions;
    }

    /// Resolve a place id into a marker, add it to the store and recenter.
    ///
    /// Returns `None` when the lookup fails or the place has no usable
    /// location; the store is left untouched in that case.
    pub async fn get_place_details(&self, place_id: &str) -> Option<PlaceResolution> {
        let places = Arc::clone(self.places.as_ref()?);
        let request = PlaceDetailsRequest {
            place_id: place_id.to_string(),
            fields: self.search.detail_fields.clone(),
            language: self.language.clone(),
            region: self.region.clone(),
        };

        let details = match places.place_details(request).await {
            Ok(details) => details,
            Err(e) => {
                log::error!("place details failed for {}: {}", place_id, e);
                return None;
            }
        };
        let Some(location) = details.location.filter(LatLng::is_valid) else {
            log::warn!("place {} has no usable location", place_id);
            return None;
        };

        let marker = Marker::new(location)
            .with_name(
                details
                    .display_name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_PLACE_NAME.to_string()),
            )
            .with_message(
                details
                    .formatted_address
                    .clone()
                    .unwrap_or_else(|| SEARCH_RESULT_MESSAGE.to_string()),
            );
        if let Err(e) = self.store.add_marker(marker.clone()) {
            log::warn!("could not add marker for {}: {}", place_id, e);
            return None;
        }
        if let Err(e) = self.store.set_center(location) {
            log::warn!("could not recenter on {}: {}", place_id, e);
        }

        {
            let mut state = self.lock();
            state.query = details
                .display_name
                .clone()
                .or_else(|| details.formatted_address.clone())
                .unwrap_or_default();
            state.selected_index = None;
        }

        Some(PlaceResolution {
            marker,
            place: PlaceResult {
                place_id: details.id,
                name: details.display_name,
                formatted_address: details.formatted_address,
                location,
            },
        })
    }

    /// Pointer selection of a prediction row
    pub async fn select_prediction(&self, prediction: &PlacePrediction) -> Option<PlaceResolution> {
        self.lock().is_open = false;
        self.get_place_details(&prediction.place_id).await
    }

    pub async fn handle_key(&self, key: KeyCode) -> KeyOutcome {
        let place_id = {
            let mut state = self.lock();
            let count = state.predictions.len();
            if !state.is_open || count == 0 {
                return KeyOutcome::Ignored;
            }
            match key {
                KeyCode::ArrowDown => {
                    let next = match state.selected_index {
                        None => 0,
                        Some(i) => (i + 1).min(count - 1),
                    };
                    state.selected_index = Some(next);
                    return KeyOutcome::Highlighted(state.selected_index);
                }
                KeyCode::ArrowUp => {
                    state.selected_index = match state.selected_index {
                        None | Some(0) => None,
                        Some(i) => Some(i - 1),
                    };
                    return KeyOutcome::Highlighted(state.selected_index);
                }
                KeyCode::Escape => {
                    state.is_open = false;
                    state.selected_index = None;
                    return KeyOutcome::Dismissed;
                }
                KeyCode::Enter => match state.selected_index {
                    Some(i) if i < count => {
                        state.is_open = false;
                        state.predictions[i].place_id.clone()
                    }
                    _ => return KeyOutcome::Ignored,
                },
                _ => return KeyOutcome::Ignored,
            }
        };
        KeyOutcome::Resolved(self.get_place_details(&place_id).await)
    }

    /// Clear button: empty query, no results, popover closed
    pub fn clear(&self) {
        self.lock().query.clear();
        self.reset_results();
    }

    /// Close the popover without touching the query or results
    pub fn dismiss(&self) {
        let mut state = self.lock();
        state.is_open = false;
        state.selected_index = None;
    }
}

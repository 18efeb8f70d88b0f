use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// A labeled point of interest placed on the map.
///
/// Two markers are the same place when their name and coordinates match;
/// the message does not take part in identity. Whole-value equality
/// (`==`) is what [`MapStore::remove_marker`](crate::MapStore::remove_marker) uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Marker {
    pub fn new(position: LatLng) -> Self {
        Self {
            lat: position.lat,
            lng: position.lng,
            name: None,
            message: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    pub fn set_position(&mut self, position: LatLng) {
        self.lat = position.lat;
        self.lng = position.lng;
    }

    /// Dedup identity: `(name, lat, lng)`
    pub fn same_place(&self, other: &Marker) -> bool {
        self.name == other.name && self.lat == other.lat && self.lng == other.lng
    }

    /// Hashable form of the dedup identity
    pub(crate) fn place_key(&self) -> (Option<&str>, u64, u64) {
        (self.name.as_deref(), self.lat.to_bits(), self.lng.to_bits())
    }
}

impl From<LatLng> for Marker {
    fn from(position: LatLng) -> Self {
        Self::new(position)
    }
}

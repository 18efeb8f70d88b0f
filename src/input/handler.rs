use crate::{
    core::{
        constants::{CLICK_MARKER_MESSAGE, CLICK_MARKER_NAME},
        store::{CameraUpdate, MapStore},
    },
    input::events::{EventHandled, MapEvent},
    layers::marker::Marker,
};

/// What a click on the map does to the marker collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerMode {
    /// Every click adds a marker (duplicates of the same spot are skipped)
    #[default]
    Append,
    /// The clicked spot becomes the only marker
    Single,
}

/// Routes map-widget events into the store
#[derive(Debug, Clone)]
pub struct MapInteraction {
    store: MapStore,
    mode: MarkerMode,
}

impl MapInteraction {
    pub fn new(store: MapStore, mode: MarkerMode) -> Self {
        Self { store, mode }
    }

    pub fn mode(&self) -> MarkerMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MarkerMode) {
        self.mode = mode;
    }

    pub fn handle_event(&self, event: &MapEvent) -> EventHandled {
        match event {
            MapEvent::Click { lat_lng: None } => EventHandled::NotHandled,
            MapEvent::Click {
                lat_lng: Some(lat_lng),
            } => {
                let marker = Marker::new(*lat_lng)
                    .with_name(CLICK_MARKER_NAME)
                    .with_message(CLICK_MARKER_MESSAGE);
                let result = match self.mode {
                    MarkerMode::Append => self.store.add_marker(marker).map(|_| ()),
                    MarkerMode::Single => self.store.set_marker(marker),
                };
                match result {
                    Ok(()) => EventHandled::Handled,
                    Err(e) => {
                        log::warn!("ignoring map click: {}", e);
                        EventHandled::NotHandled
                    }
                }
            }
            MapEvent::CameraChanged { center, zoom } => {
                match self.store.set_camera(CameraUpdate::new(*center, *zoom)) {
                    Ok(()) => EventHandled::Handled,
                    Err(e) => {
                        log::warn!("ignoring camera change: {}", e);
                        EventHandled::NotHandled
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn click(lat: f64, lng: f64) -> MapEvent {
        MapEvent::Click {
            lat_lng: Some(LatLng::new(lat, lng)),
        }
    }

    #[test]
    fn test_append_mode_adds_named_marker() {
        let store = MapStore::new();
        let interaction = MapInteraction::new(store.clone(), MarkerMode::Append);

        assert_eq!(interaction.handle_event(&click(25.0, 121.0)), EventHandled::Handled);
        interaction.handle_event(&click(24.0, 120.0));
        interaction.handle_event(&click(25.0, 121.0));

        let markers = store.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].name.as_deref(), Some("新標記"));
        assert_eq!(markers[0].message.as_deref(), Some("點擊地圖新增的標記"));
    }

    #[test]
    fn test_single_mode_replaces_marker() {
        let store = MapStore::new();
        let interaction = MapInteraction::new(store.clone(), MarkerMode::Single);

        interaction.handle_event(&click(25.0, 121.0));
        interaction.handle_event(&click(24.0, 120.0));

        let markers = store.markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].position(), LatLng::new(24.0, 120.0));
    }

    #[test]
    fn test_click_without_coordinate_is_ignored() {
        let store = MapStore::new();
        let interaction = MapInteraction::new(store.clone(), MarkerMode::Append);

        let handled = interaction.handle_event(&MapEvent::Click { lat_lng: None });

        assert_eq!(handled, EventHandled::NotHandled);
        assert_eq!(store.marker_count(), 0);
    }

    #[test]
    fn test_camera_changed_updates_store() {
        let store = MapStore::new();
        let interaction = MapInteraction::new(store.clone(), MarkerMode::Append);

        interaction.handle_event(&MapEvent::CameraChanged {
            center: LatLng::new(25.1, 121.4),
            zoom: 13,
        });

        assert_eq!(store.center(), LatLng::new(25.1, 121.4));
        assert_eq!(store.zoom(), 13);
    }

    #[test]
    fn test_invalid_click_not_handled() {
        let store = MapStore::new();
        let interaction = MapInteraction::new(store.clone(), MarkerMode::Single);

        assert_eq!(
            interaction.handle_event(&click(f64::NAN, 0.0)),
            EventHandled::NotHandled
        );
        assert_eq!(store.marker_count(), 0);
    }
}

//! Map view-state store
//!
//! Single source of truth for the camera and the marker collection. Every
//! surface that reads or mutates map state holds a clone of the same
//! [`MapStore`] handle; mutations run to completion under one lock, so they
//! never interleave with each other.

use crate::{
    core::{
        constants::{DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG, DEFAULT_ZOOM},
        geo::LatLng,
    },
    layers::marker::Marker,
    prelude::HashSet,
    Result,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Render inputs for the map widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapViewState {
    pub center: LatLng,
    pub zoom: i32,
    pub markers: Vec<Marker>,
}

impl Default for MapViewState {
    fn default() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG),
            zoom: DEFAULT_ZOOM,
            markers: Vec::new(),
        }
    }
}

/// Partial camera write; `None` fields are left untouched
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraUpdate {
    pub center: Option<LatLng>,
    pub zoom: Option<i32>,
}

impl CameraUpdate {
    pub fn new(center: LatLng, zoom: i32) -> Self {
        Self {
            center: Some(center),
            zoom: Some(zoom),
        }
    }
}

/// Emitted to subscribers after every effective mutation
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    CenterChanged(LatLng),
    ZoomChanged(i32),
    /// Carries the new marker count
    MarkersChanged(usize),
}

struct StoreInner {
    state: MapViewState,
    subscribers: Vec<Sender<StoreEvent>>,
}

/// Cloneable handle to one map view-state instance
#[derive(Clone)]
pub struct MapStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl Default for MapStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MapStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapStore")
            .field("state", &self.lock().state)
            .finish()
    }
}

impl MapStore {
    /// Store starting at the default center and zoom with no markers
    pub fn new() -> Self {
        Self::with_state(MapViewState::default())
    }

    pub fn with_state(state: MapViewState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                state,
                subscribers: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `mutate` under the lock and publish the events it returns
    fn update<R>(&self, mutate: impl FnOnce(&mut MapViewState) -> (R, Vec<StoreEvent>)) -> R {
        let mut inner = self.lock();
        let (result, events) = mutate(&mut inner.state);
        if !events.is_empty() {
            inner
                .subscribers
                .retain(|tx| events.iter().all(|event| tx.send(event.clone()).is_ok()));
        }
        result
    }

    /// Receive a [`StoreEvent`] for every mutation from now on
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        let (tx, rx) = unbounded();
        self.lock().subscribers.push(tx);
        rx
    }

    pub fn snapshot(&self) -> MapViewState {
        self.lock().state.clone()
    }

    pub fn center(&self) -> LatLng {
        self.lock().state.center
    }

    pub fn zoom(&self) -> i32 {
        self.lock().state.zoom
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.lock().state.markers.clone()
    }

    pub fn marker_count(&self) -> usize {
        self.lock().state.markers.len()
    }

    pub fn set_center(&self, center: LatLng) -> Result<()> {
        let center = center.validated()?;
        log::trace!("set center ({}, {})", center.lat, center.lng);
        self.update(|state| {
            state.center = center;
            ((), vec![StoreEvent::CenterChanged(center)])
        });
        Ok(())
    }

    /// Zoom is handed to the map widget unchanged; no range check here
    pub fn set_zoom(&self, zoom: i32) {
        log::trace!("set zoom {}", zoom);
        self.update(|state| {
            state.zoom = zoom;
            ((), vec![StoreEvent::ZoomChanged(zoom)])
        });
    }

    pub fn set_camera(&self, camera: CameraUpdate) -> Result<()> {
        let center = camera.center.map(LatLng::validated).transpose()?;
        self.update(|state| {
            let mut events = Vec::new();
            if let Some(center) = center {
                state.center = center;
                events.push(StoreEvent::CenterChanged(center));
            }
            if let Some(zoom) = camera.zoom {
                state.zoom = zoom;
                events.push(StoreEvent::ZoomChanged(zoom));
            }
            ((), events)
        });
        Ok(())
    }

    /// Replace the whole marker collection
    pub fn set_markers(&self, markers: Vec<Marker>) -> Result<()> {
        for marker in &markers {
            marker.position().validated()?;
        }
        self.update(|state| {
            state.markers = markers;
            ((), vec![StoreEvent::MarkersChanged(state.markers.len())])
        });
        Ok(())
    }

    /// Replace the collection with `marker` alone
    pub fn set_marker(&self, marker: Marker) -> Result<()> {
        self.set_markers(vec![marker])
    }

    /// Append `marker` unless one with the same `(name, lat, lng)` exists.
    ///
    /// Returns `Ok(false)` when the marker was already present.
    pub fn add_marker(&self, marker: Marker) -> Result<bool> {
        marker.position().validated()?;
        let added = self.update(|state| {
            if state.markers.iter().any(|m| m.same_place(&marker)) {
                return (false, Vec::new());
            }
            state.markers.push(marker);
            (true, vec![StoreEvent::MarkersChanged(state.markers.len())])
        });
        if !added {
            log::trace!("marker already present, skipping");
        }
        Ok(added)
    }

    /// Append every marker as-is, duplicates included
    pub fn add_markers(&self, markers: Vec<Marker>) -> Result<()> {
        for marker in &markers {
            marker.position().validated()?;
        }
        self.update(|state| {
            state.markers.extend(markers);
            ((), vec![StoreEvent::MarkersChanged(state.markers.len())])
        });
        Ok(())
    }

    /// Append markers not already present, also collapsing duplicates within
    /// the batch. Returns how many were added.
    pub fn add_markers_dedup(&self, markers: Vec<Marker>) -> Result<usize> {
        for marker in &markers {
            marker.position().validated()?;
        }
        Ok(self.update(|state| {
            let mut fresh: Vec<Marker> = Vec::with_capacity(markers.len());
            {
                let mut seen: HashSet<_> = state.markers.iter().map(Marker::place_key).collect();
                for marker in &markers {
                    if seen.insert(marker.place_key()) {
                        fresh.push(marker.clone());
                    }
                }
            }
            let added = fresh.len();
            if added == 0 {
                return (0, Vec::new());
            }
            state.markers.extend(fresh);
            (added, vec![StoreEvent::MarkersChanged(state.markers.len())])
        }))
    }

    /// Remove every marker equal to `marker`; returns whether any was removed
    pub fn remove_marker(&self, marker: &Marker) -> bool {
        self.update(|state| {
            let before = state.markers.len();
            state.markers.retain(|m| m != marker);
            if state.markers.len() == before {
                (false, Vec::new())
            } else {
                (true, vec![StoreEvent::MarkersChanged(state.markers.len())])
            }
        })
    }

    pub fn clear_markers(&self) {
        self.update(|state| {
            state.markers.clear();
            ((), vec![StoreEvent::MarkersChanged(0)])
        });
    }
}

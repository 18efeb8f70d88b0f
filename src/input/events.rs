use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Keyboard keys the search box reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Tab,
    Other(u32),
}

impl KeyCode {
    /// Maps a DOM-style `KeyboardEvent.key` name
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "Enter" => KeyCode::Enter,
            "Escape" | "Esc" => KeyCode::Escape,
            "Tab" => KeyCode::Tab,
            other => KeyCode::Other(other.chars().next().map(u32::from).unwrap_or(0)),
        }
    }

    /// Checks if this key moves the highlighted prediction
    pub fn is_navigation(&self) -> bool {
        matches!(self, KeyCode::ArrowUp | KeyCode::ArrowDown)
    }
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

/// Events emitted by the map widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// Click on the map surface; `None` when the widget could not
    /// resolve the pointer to a coordinate
    Click { lat_lng: Option<LatLng> },
    /// Camera moved (pan or zoom)
    CameraChanged { center: LatLng, zoom: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(KeyCode::from_key_name("ArrowDown"), KeyCode::ArrowDown);
        assert_eq!(KeyCode::from_key_name("ArrowUp"), KeyCode::ArrowUp);
        assert_eq!(KeyCode::from_key_name("Enter"), KeyCode::Enter);
        assert_eq!(KeyCode::from_key_name("Esc"), KeyCode::Escape);
        assert_eq!(KeyCode::from_key_name("a"), KeyCode::Other('a' as u32));
        assert_eq!(KeyCode::from_key_name(""), KeyCode::Other(0));
    }

    #[test]
    fn test_navigation_keys() {
        assert!(KeyCode::ArrowUp.is_navigation());
        assert!(KeyCode::ArrowDown.is_navigation());
        assert!(!KeyCode::Enter.is_navigation());
        assert!(!KeyCode::Escape.is_navigation());
    }
}

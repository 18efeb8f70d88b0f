pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{EventHandled, KeyCode, MapEvent};
pub use handler::{MapInteraction, MarkerMode};

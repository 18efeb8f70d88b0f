//! Core constants for the map view, place search and the decision wheel.
//! Keeping them in a single place makes it easier to tweak app-wide magic numbers.

/// Latitude of the camera center at startup (Taichung).
pub const DEFAULT_CENTER_LAT: f64 = 24.1821746;

/// Longitude of the camera center at startup.
pub const DEFAULT_CENTER_LNG: f64 = 120.6591376;

/// Zoom level the map widget starts at.
pub const DEFAULT_ZOOM: i32 = 17;

/// Name given to a marker dropped by clicking the map.
pub const CLICK_MARKER_NAME: &str = "新標記";

/// Message given to a marker dropped by clicking the map.
pub const CLICK_MARKER_MESSAGE: &str = "點擊地圖新增的標記";

/// Fallback name for a resolved place without a display name.
pub const UNKNOWN_PLACE_NAME: &str = "未知地點";

/// Fallback message for a resolved place without a formatted address.
pub const SEARCH_RESULT_MESSAGE: &str = "搜尋結果";

/// Half-width, in degrees, of the location-bias box built around the center.
pub const SEARCH_BIAS_RADIUS_DEG: f64 = 0.000001;

/// Default language for place details.
pub const DEFAULT_LANGUAGE: &str = "zh-TW";

/// Default region code for autocomplete and place details.
pub const DEFAULT_REGION: &str = "tw";

/// Length of the spin animation; the result settles when it ends.
pub const SPIN_DURATION_MS: u64 = 3000;

/// Smallest rotation added by one spin (4 full turns).
pub const MIN_SPIN_ROTATION_DEG: f64 = 1440.0;

/// Largest rotation added by one spin (6 full turns, exclusive).
pub const MAX_SPIN_ROTATION_DEG: f64 = 2160.0;

/// Wheel drawing center in SVG user units.
pub const WHEEL_CENTER: (f64, f64) = (150.0, 150.0);

/// Outer radius of a wheel segment.
pub const WHEEL_RADIUS: f64 = 140.0;

/// Distance of a segment label from the wheel center.
pub const WHEEL_LABEL_RADIUS: f64 = 100.0;

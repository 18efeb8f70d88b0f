use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }

    /// Returns the coordinate if it is valid, otherwise an
    /// [`InvalidCoordinates`](crate::MapError::InvalidCoordinates) error
    pub fn validated(self) -> crate::Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(crate::MapError::InvalidCoordinates(format!(
                "({}, {})",
                self.lat, self.lng
            )))
        }
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Square box extending `radius` degrees from `center` on every side.
    ///
    /// Returns `None` when the center is not a finite coordinate, so callers
    /// can fall back to an unbiased request.
    pub fn around(center: LatLng, radius: f64) -> Option<Self> {
        if !center.lat.is_finite() || !center.lng.is_finite() {
            return None;
        }
        Some(Self::from_coords(
            center.lat - radius,
            center.lng - radius,
            center.lat + radius,
            center.lng + radius,
        ))
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(25.0330, 121.5654);
        assert_eq!(coord.lat, 25.0330);
        assert_eq!(coord.lng, 121.5654);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(!LatLng::new(f64::NAN, 121.0).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(0.0, -180.5).is_valid());
        assert!(LatLng::new(-90.0, 180.0).is_valid());
        assert!(LatLng::new(0.0, f64::INFINITY).validated().is_err());
    }

    #[test]
    fn test_bounds_around_center() {
        let center = LatLng::new(24.0, 120.0);
        let bounds = LatLngBounds::around(center, 0.5).unwrap();

        assert_eq!(bounds.south(), 23.5);
        assert_eq!(bounds.west(), 119.5);
        assert_eq!(bounds.north(), 24.5);
        assert_eq!(bounds.east(), 120.5);
        assert!(bounds.contains(&center));
        assert_eq!(bounds.center(), center);
    }

    #[test]
    fn test_bounds_around_nan_center() {
        assert!(LatLngBounds::around(LatLng::new(f64::NAN, 120.0), 0.5).is_none());
    }
}

//! One-shot device location lookup used to center the map at startup

use crate::core::{geo::LatLng, store::MapStore};
use async_trait::async_trait;

/// Device location capability
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Whether the platform offers geolocation at all
    fn is_supported(&self) -> bool {
        true
    }

    /// Current position, or `None` if the lookup failed or was denied
    async fn current_position(&self) -> Option<LatLng>;
}

/// Center the store on the device location.
///
/// Returns `true` when the center was moved. Missing support, a failed
/// lookup or an invalid fix all leave the store untouched.
pub async fn locate_and_center(store: &MapStore, provider: Option<&dyn GeolocationProvider>) -> bool {
    let Some(provider) = provider.filter(|p| p.is_supported()) else {
        log::debug!("geolocation unavailable");
        return false;
    };
    let Some(position) = provider.current_position().await else {
        log::debug!("geolocation lookup returned nothing");
        return false;
    };
    match store.set_center(position) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("ignoring geolocation fix: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPosition(Option<LatLng>, bool);

    #[async_trait]
    impl GeolocationProvider for FixedPosition {
        fn is_supported(&self) -> bool {
            self.1
        }

        async fn current_position(&self) -> Option<LatLng> {
            self.0
        }
    }

    #[tokio::test]
    async fn test_centers_on_fix() {
        let store = MapStore::new();
        let provider = FixedPosition(Some(LatLng::new(25.03, 121.56)), true);

        assert!(locate_and_center(&store, Some(&provider)).await);
        assert_eq!(store.center(), LatLng::new(25.03, 121.56));
    }

    #[tokio::test]
    async fn test_silent_on_failure() {
        let store = MapStore::new();
        let before = store.center();

        assert!(!locate_and_center(&store, None).await);
        assert!(!locate_and_center(&store, Some(&FixedPosition(None, true))).await);
        assert!(
            !locate_and_center(&store, Some(&FixedPosition(Some(LatLng::new(1.0, 1.0)), false)))
                .await
        );
        assert!(
            !locate_and_center(&store, Some(&FixedPosition(Some(LatLng::new(f64::NAN, 1.0)), true)))
                .await
        );
        assert_eq!(store.center(), before);
    }
}

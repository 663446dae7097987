use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{DirectionsRequest, Notification, Overlay, Place, RouteCandidate, Waypoint};
use crate::error::Error;

/// Resolves free-form address text. An empty list means nothing matched.
#[async_trait]
pub trait Geocoder {
    async fn geocode(&self, address: &str) -> Result<Vec<Place>, Error>;
}

/// Returns zero or more alternative routes for a request.
#[async_trait]
pub trait DirectionsProvider {
    async fn directions(&self, request: &DirectionsRequest) -> Result<Vec<RouteCandidate>, Error>;
}

/// Somewhere to draw waypoints and routes.
pub trait MapSurface {
    fn add_annotation(&self, waypoint: &Waypoint);
    /// Removes every annotation.
    fn remove_annotations(&self);
    fn add_overlay(&self, overlay: Overlay);
    /// Removes every overlay.
    fn remove_overlays(&self);
    fn fit_viewport(&self, waypoints: &[Waypoint]);
}

/// Shows a dismissible title + message to the user.
pub trait Notifier {
    fn present(&self, notification: Notification);
}

pub type DynGeocoder = Arc<dyn Geocoder + Send + Sync>;
pub type DynDirections = Arc<dyn DirectionsProvider + Send + Sync>;
pub type DynMapSurface = Arc<dyn MapSurface + Send + Sync>;
pub type DynNotifier = Arc<dyn Notifier + Send + Sync>;

mod coordinates;
mod notification;
mod route;
mod waypoint;

pub use coordinates::Coordinates;
pub use notification::{Actions, AddressPrompt, Notification};
pub use route::{DirectionsRequest, Overlay, RouteCandidate, RouteSegment, TransportMode};
pub use waypoint::{Place, Waypoint};

use geo_types::LineString;
use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Waypoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Walking,
}

impl TransportMode {
    pub fn name(&self) -> String {
        match self {
            Self::Walking => "walking".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub mode: TransportMode,
    pub alternatives: bool,
}

impl DirectionsRequest {
    /// Walking directions between two points, asking for alternate routes.
    pub fn walking(origin: Coordinates, destination: Coordinates) -> Self {
        Self {
            origin,
            destination,
            mode: TransportMode::Walking,
            alternatives: true,
        }
    }
}

/// One possible path returned by a directions provider. Distance is in metres.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub distance: f64,
    pub polyline: LineString<f64>,
}

impl RouteCandidate {
    pub fn new(distance: f64, polyline: LineString<f64>) -> Self {
        Self { distance, polyline }
    }
}

/// The chosen candidate between waypoints `index` and `index + 1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub index: usize,
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub route: RouteCandidate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub segment: usize,
    pub distance: f64,
    pub polyline: LineString<f64>,
}

impl From<&RouteSegment> for Overlay {
    fn from(segment: &RouteSegment) -> Self {
        Self {
            segment: segment.index,
            distance: segment.route.distance,
            polyline: segment.route.polyline.clone(),
        }
    }
}

#[test]
fn walking_request_asks_for_alternatives() {
    let request = DirectionsRequest::walking(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));

    assert_eq!(request.mode, TransportMode::Walking);
    assert!(request.alternatives);
    assert_eq!(request.mode.name(), "walking");
}

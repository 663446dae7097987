use geo::BoundingRect;
use geo_types::{MultiPoint, Point, Rect};
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};

use crate::api::MapSurface;
use crate::entities::{Overlay, Waypoint};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub annotations: Vec<Waypoint>,
    pub overlays: Vec<Overlay>,
    /// Bounding box (x = lng, y = lat) of the last waypoints shown.
    pub viewport: Option<Rect<f64>>,
}

/// Map surface kept in memory and read back by clients.
#[derive(Debug, Default)]
pub struct MapState {
    inner: RwLock<MapSnapshot>,
}

impl MapState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MapSnapshot {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write<F: FnOnce(&mut MapSnapshot)>(&self, f: F) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }
}

impl MapSurface for MapState {
    fn add_annotation(&self, waypoint: &Waypoint) {
        self.write(|map| {
            if !map.annotations.iter().any(|a| a.id == waypoint.id) {
                map.annotations.push(waypoint.clone());
            }
        });
    }

    fn remove_annotations(&self) {
        self.write(|map| map.annotations.clear());
    }

    fn add_overlay(&self, overlay: Overlay) {
        tracing::debug!("drawing segment {} ({} m)", overlay.segment, overlay.distance);
        self.write(|map| map.overlays.push(overlay));
    }

    fn remove_overlays(&self) {
        self.write(|map| map.overlays.clear());
    }

    fn fit_viewport(&self, waypoints: &[Waypoint]) {
        let viewport = viewport_for(waypoints);
        self.write(|map| {
            for waypoint in waypoints {
                if !map.annotations.iter().any(|a| a.id == waypoint.id) {
                    map.annotations.push(waypoint.clone());
                }
            }
            // an empty list leaves the viewport where it was
            if viewport.is_some() {
                map.viewport = viewport;
            }
        });
    }
}

pub fn viewport_for(waypoints: &[Waypoint]) -> Option<Rect<f64>> {
    let points: MultiPoint<f64> = waypoints
        .iter()
        .map(|w| Point::from(w.coordinates))
        .collect::<Vec<_>>()
        .into();

    points.bounding_rect()
}

#[test]
fn viewport_covers_all_waypoints() {
    use crate::entities::Coordinates;

    let waypoints = vec![
        Waypoint::new("A".into(), Coordinates::new(0.0, 0.0)),
        Waypoint::new("B".into(), Coordinates::new(0.0, 1.0)),
        Waypoint::new("C".into(), Coordinates::new(1.0, 1.0)),
    ];

    let rect = viewport_for(&waypoints).unwrap();
    assert_eq!(rect.min().x, 0.0);
    assert_eq!(rect.min().y, 0.0);
    assert_eq!(rect.max().x, 1.0);
    assert_eq!(rect.max().y, 1.0);
}

#[test]
fn fit_viewport_shows_annotations_once() {
    use crate::entities::Coordinates;

    let map = MapState::new();
    let waypoint = Waypoint::new("A".into(), Coordinates::new(10.0, 20.0));

    map.add_annotation(&waypoint);
    map.fit_viewport(&[waypoint.clone()]);

    let snapshot = map.snapshot();
    assert_eq!(snapshot.annotations, vec![waypoint]);
    assert!(snapshot.viewport.is_some());
}

#[test]
fn empty_fit_keeps_previous_viewport() {
    use crate::entities::Coordinates;

    let map = MapState::new();
    map.fit_viewport(&[Waypoint::new("A".into(), Coordinates::new(1.0, 2.0))]);
    let before = map.snapshot().viewport;

    map.fit_viewport(&[]);
    assert_eq!(map.snapshot().viewport, before);
}

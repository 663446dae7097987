//! Stub collaborators for engine tests.

use async_trait::async_trait;
use geo_types::LineString;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use super::Engine;
use crate::{
    api::{DirectionsProvider, Geocoder},
    entities::{Coordinates, DirectionsRequest, Place, RouteCandidate},
    error::{upstream_error, Error},
    surface::{MapState, Notifications},
};

/// Resolves "A".."D" to fixed points, "nowhere" to no match, and fails on
/// "error". When gated, every lookup waits for a permit before answering.
#[derive(Default)]
pub struct StubGeocoder {
    calls: Mutex<usize>,
    gate: Option<Semaphore>,
}

impl StubGeocoder {
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn release(&self, permits: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(permits);
        }
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, address: &str) -> Result<Vec<Place>, Error> {
        *self.calls.lock().unwrap() += 1;

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        let coordinates = match address {
            "A" => Coordinates::new(0.0, 0.0),
            "B" => Coordinates::new(0.0, 1.0),
            "C" => Coordinates::new(1.0, 1.0),
            "D" => Coordinates::new(2.0, 1.0),
            "error" => return Err(upstream_error()),
            _ => return Ok(vec![]),
        };

        Ok(vec![Place {
            formatted_address: address.into(),
            coordinates,
        }])
    }
}

type PairKey = (String, String);

/// Returns configured distances per pair, or a single 1 m route otherwise.
/// When gated, every request waits for a permit before answering.
#[derive(Default)]
pub struct StubDirections {
    routes: Mutex<HashMap<PairKey, Result<Vec<f64>, Error>>>,
    requests: Mutex<Vec<DirectionsRequest>>,
    gate: Option<Semaphore>,
}

impl StubDirections {
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    pub fn set_routes(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        distances: Result<Vec<f64>, Error>,
    ) {
        self.routes
            .lock()
            .unwrap()
            .insert((origin.into(), destination.into()), distances);
    }

    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn release(&self, permits: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(permits);
        }
    }
}

#[async_trait]
impl DirectionsProvider for StubDirections {
    async fn directions(&self, request: &DirectionsRequest) -> Result<Vec<RouteCandidate>, Error> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        let key: PairKey = (request.origin.into(), request.destination.into());
        let distances = self
            .routes
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(vec![1.0]));

        let line = LineString::from(vec![
            geo_types::Coord::from(request.origin),
            geo_types::Coord::from(request.destination),
        ]);

        Ok(distances?
            .into_iter()
            .map(|distance| RouteCandidate::new(distance, line.clone()))
            .collect())
    }
}

pub struct Harness {
    pub engine: Engine,
    pub geocoder: Arc<StubGeocoder>,
    pub directions: Arc<StubDirections>,
    pub map: Arc<MapState>,
    pub notifications: Arc<Notifications>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(StubGeocoder::default(), StubDirections::default())
    }

    /// Directions requests wait for `directions.release`.
    pub fn gated() -> Self {
        Self::with(StubGeocoder::default(), StubDirections::gated())
    }

    /// Geocoder lookups wait for `geocoder.release`.
    pub fn gated_lookups() -> Self {
        Self::with(StubGeocoder::gated(), StubDirections::default())
    }

    fn with(geocoder: StubGeocoder, directions: StubDirections) -> Self {
        let geocoder = Arc::new(geocoder);
        let directions = Arc::new(directions);
        let map = Arc::new(MapState::new());
        let notifications = Arc::new(Notifications::new());

        let engine = Engine::new(
            geocoder.clone(),
            directions.clone(),
            map.clone(),
            notifications.clone(),
        );

        Self {
            engine,
            geocoder,
            directions,
            map,
            notifications,
        }
    }
}

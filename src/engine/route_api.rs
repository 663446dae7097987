use super::{consecutive_pairs, shortest_candidate, Engine};

use futures::future::join_all;
use tokio::task::JoinHandle;

use crate::{
    entities::{Actions, DirectionsRequest, Overlay, RouteSegment, Waypoint},
    error::{invalid_state_error, routing_error, unexpected_error, Error},
};

/// Directions requests issued by one `compute_route` call, one per pair.
///
/// The requests keep running if this is dropped.
#[derive(Debug, Default)]
pub struct RouteComputation {
    handles: Vec<JoinHandle<Result<RouteSegment, Error>>>,
}

impl RouteComputation {
    pub fn requests(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every pair and returns their outcomes in pair order.
    pub async fn join(self) -> Vec<Result<RouteSegment, Error>> {
        join_all(self.handles)
            .await
            .into_iter()
            .map(|joined| {
                joined.unwrap_or_else(|err| {
                    tracing::error!("route task failed: {}", err);
                    Err(unexpected_error())
                })
            })
            .collect()
    }

    pub async fn segments(self) -> Vec<RouteSegment> {
        self.join().await.into_iter().filter_map(Result::ok).collect()
    }
}

impl Engine {
    /// Issues one walking directions request per adjacent pair of waypoints
    /// and fits the viewport without waiting for them.
    ///
    /// Each pair draws its shortest route as soon as it arrives, so segments
    /// can appear out of order. Fewer than two waypoints is a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn compute_route(&self) -> RouteComputation {
        let session = self.session.lock().await;
        let waypoints = session.waypoints();

        if waypoints.len() < 2 {
            tracing::debug!("not enough waypoints to route");
            return RouteComputation::default();
        }

        let generation = session.generation();

        let handles = consecutive_pairs(waypoints)
            .map(|(index, origin, destination)| {
                let engine = self.clone();
                let origin = origin.clone();
                let destination = destination.clone();

                tokio::spawn(async move {
                    engine
                        .route_pair(index, origin, destination, generation)
                        .await
                })
            })
            .collect::<Vec<_>>();

        tracing::info!("requested {} route segments", handles.len());

        self.map.fit_viewport(waypoints);

        RouteComputation { handles }
    }

    #[tracing::instrument(skip(self, origin, destination))]
    async fn route_pair(
        &self,
        index: usize,
        origin: Waypoint,
        destination: Waypoint,
        generation: u64,
    ) -> Result<RouteSegment, Error> {
        let request = DirectionsRequest::walking(origin.coordinates, destination.coordinates);
        let result = self.directions.directions(&request).await;

        // held until the overlay is drawn so a reset cannot slip in between
        let session = self.session.lock().await;

        if session.generation() != generation {
            tracing::debug!("session was reset, dropping segment {}", index);
            return Err(invalid_state_error());
        }

        let candidates = match result {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!("directions failed for segment {}: {}", index, err);
                return Err(self.report(routing_error()));
            }
        };

        let route = shortest_candidate(candidates).ok_or_else(|| {
            tracing::warn!("no routes for segment {}", index);
            self.report(routing_error())
        })?;

        let segment = RouteSegment {
            index,
            origin,
            destination,
            route,
        };

        self.map.add_overlay(Overlay::from(&segment));

        Ok(segment)
    }

    /// Clears the map and the session and hides the routing actions.
    #[tracing::instrument(skip(self))]
    pub async fn reset(&self) -> Actions {
        let mut session = self.session.lock().await;

        self.map.remove_overlays();
        self.map.remove_annotations();
        session.clear();

        tracing::info!("session reset");

        session.actions()
    }
}

#[test]
fn compute_route_requests_adjacent_pairs_in_order() {
    use super::test_support::Harness;
    use crate::entities::Coordinates;
    use tokio_test::block_on;

    block_on(async {
        let h = Harness::new();
        for address in ["A", "B", "C"] {
            h.engine.add_waypoint(address).await.unwrap();
        }

        let computation = h.engine.compute_route().await;
        assert_eq!(computation.requests(), 2);

        let segments = computation.segments().await;
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].origin.label, "A");
        assert_eq!(segments[0].destination.label, "B");
        assert_eq!(segments[1].origin.label, "B");
        assert_eq!(segments[1].destination.label, "C");

        let requests = h.directions.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].origin, Coordinates::new(0.0, 0.0));
        assert_eq!(requests[0].destination, Coordinates::new(0.0, 1.0));
        assert_eq!(requests[1].origin, Coordinates::new(0.0, 1.0));
        assert_eq!(requests[1].destination, Coordinates::new(1.0, 1.0));
        assert!(requests.iter().all(|r| r.alternatives));

        assert_eq!(h.map.snapshot().overlays.len(), 2);
    });
}

#[test]
fn compute_route_draws_shortest_alternative() {
    use super::test_support::Harness;
    use crate::entities::Coordinates;
    use tokio_test::block_on;

    block_on(async {
        let h = Harness::new();
        h.directions.set_routes(
            Coordinates::new(0.0, 0.0),
            Coordinates::new(0.0, 1.0),
            Ok(vec![5.0, 2.0, 8.0]),
        );
        h.engine.add_waypoint("A").await.unwrap();
        h.engine.add_waypoint("B").await.unwrap();

        // exactly two waypoints is still routable
        let segments = h.engine.compute_route().await.segments().await;
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].route.distance, 2.0);

        let overlays = h.map.snapshot().overlays;
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].distance, 2.0);
        assert_eq!(overlays[0].segment, 0);
    });
}

#[test]
fn failing_pair_does_not_stop_the_others() {
    use super::test_support::Harness;
    use crate::entities::Coordinates;
    use crate::error::upstream_error;
    use tokio_test::block_on;

    block_on(async {
        let h = Harness::new();
        h.directions.set_routes(
            Coordinates::new(0.0, 0.0),
            Coordinates::new(0.0, 1.0),
            Ok(vec![]),
        );
        h.directions.set_routes(
            Coordinates::new(1.0, 1.0),
            Coordinates::new(2.0, 1.0),
            Err(upstream_error()),
        );
        for address in ["A", "B", "C", "D"] {
            h.engine.add_waypoint(address).await.unwrap();
        }

        let outcomes = h.engine.compute_route().await.join().await;
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].as_ref().unwrap_err().is_routing_error());
        assert_eq!(outcomes[1].as_ref().unwrap().index, 1);
        assert!(outcomes[2].as_ref().unwrap_err().is_routing_error());

        let overlays = h.map.snapshot().overlays;
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].segment, 1);

        assert_eq!(h.notifications.pending().len(), 2);
        assert_eq!(h.engine.waypoints().await.len(), 4);
    });
}

#[test]
fn compute_route_with_one_waypoint_is_a_noop() {
    use super::test_support::Harness;
    use tokio_test::block_on;

    block_on(async {
        let h = Harness::new();
        assert_eq!(h.engine.compute_route().await.requests(), 0);

        h.engine.add_waypoint("A").await.unwrap();
        assert_eq!(h.engine.compute_route().await.requests(), 0);
        assert!(h.directions.requests().is_empty());
    });
}

#[test]
fn reset_clears_everything() {
    use super::test_support::Harness;
    use crate::entities::Actions;
    use tokio_test::block_on;

    block_on(async {
        let h = Harness::new();
        for address in ["A", "B", "C"] {
            h.engine.add_waypoint(address).await.unwrap();
        }
        h.engine.compute_route().await.join().await;
        assert_eq!(h.map.snapshot().overlays.len(), 2);

        let actions = h.engine.reset().await;
        assert_eq!(actions, Actions::new(false));
        assert!(h.engine.waypoints().await.is_empty());

        let snapshot = h.map.snapshot();
        assert!(snapshot.overlays.is_empty());
        assert!(snapshot.annotations.is_empty());

        // idempotent on an empty session
        assert_eq!(h.engine.reset().await, Actions::new(false));
    });
}

#[test]
fn results_arriving_after_reset_are_dropped() {
    use super::test_support::Harness;
    use tokio_test::block_on;

    block_on(async {
        let h = Harness::gated();
        for address in ["A", "B", "C"] {
            h.engine.add_waypoint(address).await.unwrap();
        }

        let computation = h.engine.compute_route().await;
        h.engine.reset().await;
        h.directions.release(computation.requests());

        let outcomes = computation.join().await;
        assert!(outcomes
            .iter()
            .all(|outcome| outcome.as_ref().unwrap_err() == &invalid_state_error()));
        assert!(h.map.snapshot().overlays.is_empty());
        assert!(h.notifications.pending().is_empty());
    });
}

#[test]
fn viewport_is_fitted_before_any_segment_arrives() {
    use super::test_support::Harness;
    use crate::api::MapSurface;
    use crate::surface::viewport_for;
    use tokio_test::block_on;

    block_on(async {
        let h = Harness::gated();
        for address in ["A", "B", "C"] {
            h.engine.add_waypoint(address).await.unwrap();
        }
        let waypoints = h.engine.waypoints().await;

        // narrow the view down to the first pin only
        h.map.fit_viewport(&waypoints[..1]);
        assert_ne!(h.map.snapshot().viewport, viewport_for(&waypoints));

        let computation = h.engine.compute_route().await;
        while h.directions.requests().len() < 2 {
            tokio::task::yield_now().await;
        }

        let snapshot = h.map.snapshot();
        assert!(snapshot.overlays.is_empty());
        assert_eq!(snapshot.viewport, viewport_for(&waypoints));

        h.directions.release(computation.requests());
        assert_eq!(computation.segments().await.len(), 2);
        assert_eq!(h.map.snapshot().overlays.len(), 2);
    });
}

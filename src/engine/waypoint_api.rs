use super::Engine;

use crate::{
    entities::Waypoint,
    error::{geocode_error, invalid_state_error, Error},
};

impl Engine {
    /// Geocodes `address` and appends the first match as a new waypoint.
    ///
    /// Any geocoder failure, or no match at all, is reported to the user as a
    /// geocode error and leaves the session untouched. A reset that happens
    /// while the lookup is in flight discards the result.
    #[tracing::instrument(skip(self))]
    pub async fn add_waypoint(&self, address: &str) -> Result<Waypoint, Error> {
        let generation = self.generation().await;

        let result = self.geocoder.geocode(address).await;

        let mut session = self.session.lock().await;

        if session.generation() != generation {
            tracing::debug!("session was reset during geocoding, dropping result");
            return Err(invalid_state_error());
        }

        let places = match result {
            Ok(places) => places,
            Err(err) => {
                tracing::warn!("geocoding failed: {}", err);
                return Err(self.report(geocode_error()));
            }
        };

        let place = places.into_iter().next().ok_or_else(|| {
            tracing::warn!("no location found");
            self.report(geocode_error())
        })?;

        let waypoint = Waypoint::new(address.into(), place.coordinates);
        let count = session.push(waypoint.clone());

        self.map.add_annotation(&waypoint);
        self.map.fit_viewport(session.waypoints());

        tracing::info!(
            "added waypoint {} at {},{} ({} total)",
            waypoint.id,
            waypoint.coordinates.lat,
            waypoint.coordinates.lng,
            count
        );

        Ok(waypoint)
    }

    /// Text from the address prompt. Missing or blank text does nothing.
    #[tracing::instrument(skip(self))]
    pub async fn submit_address(&self, text: Option<String>) -> Result<Option<Waypoint>, Error> {
        match text {
            Some(text) if !text.trim().is_empty() => Ok(Some(self.add_waypoint(&text).await?)),
            _ => Ok(None),
        }
    }
}

#[test]
fn add_waypoint_keeps_label_verbatim() {
    use super::test_support::Harness;
    use tokio_test::block_on;

    block_on(async {
        let h = Harness::new();

        let waypoint = h.engine.add_waypoint("A").await.unwrap();
        assert_eq!(waypoint.label, "A");
        assert_eq!(h.engine.waypoints().await, vec![waypoint.clone()]);
        assert_eq!(h.map.snapshot().annotations, vec![waypoint]);
        assert!(h.map.snapshot().viewport.is_some());
    });
}

#[test]
fn failed_geocode_leaves_session_unchanged() {
    use super::test_support::Harness;
    use tokio_test::block_on;

    block_on(async {
        let h = Harness::new();
        h.engine.add_waypoint("A").await.unwrap();

        for address in ["nowhere", "error"] {
            let err = h.engine.add_waypoint(address).await.unwrap_err();
            assert!(err.is_geocode_error());
        }

        assert_eq!(h.engine.waypoints().await.len(), 1);
        assert_eq!(h.map.snapshot().annotations.len(), 1);

        let notifications = h.notifications.pending();
        assert_eq!(notifications.len(), 2);
        assert!(notifications.iter().all(|n| n.title == "Error"));
    });
}

#[test]
fn blank_or_missing_text_is_ignored() {
    use super::test_support::Harness;
    use tokio_test::block_on;

    block_on(async {
        let h = Harness::new();

        assert_eq!(h.engine.submit_address(None).await.unwrap(), None);
        assert_eq!(h.engine.submit_address(Some("   ".into())).await.unwrap(), None);
        assert_eq!(h.geocoder.calls(), 0);

        let added = h.engine.submit_address(Some("B".into())).await.unwrap();
        assert_eq!(added.map(|w| w.label), Some("B".to_string()));
    });
}

#[test]
fn actions_become_visible_at_three_waypoints() {
    use super::test_support::Harness;
    use crate::entities::Actions;
    use tokio_test::block_on;

    block_on(async {
        let h = Harness::new();

        h.engine.add_waypoint("A").await.unwrap();
        h.engine.add_waypoint("B").await.unwrap();
        assert_eq!(h.engine.actions().await, Actions::new(false));

        h.engine.add_waypoint("C").await.unwrap();
        assert_eq!(h.engine.actions().await, Actions::new(true));

        h.engine.add_waypoint("D").await.unwrap();
        assert_eq!(h.engine.actions().await, Actions::new(true));
    });
}

#[test]
fn lookups_finishing_after_reset_are_dropped() {
    use super::test_support::Harness;
    use std::sync::Arc;
    use tokio_test::block_on;

    block_on(async {
        let h = Arc::new(Harness::gated_lookups());

        let failing = {
            let h = h.clone();
            tokio::spawn(async move { h.engine.add_waypoint("error").await })
        };
        let succeeding = {
            let h = h.clone();
            tokio::spawn(async move { h.engine.add_waypoint("A").await })
        };
        while h.geocoder.calls() < 2 {
            tokio::task::yield_now().await;
        }

        h.engine.reset().await;
        h.geocoder.release(2);

        assert_eq!(failing.await.unwrap().unwrap_err(), invalid_state_error());
        assert_eq!(succeeding.await.unwrap().unwrap_err(), invalid_state_error());
        assert!(h.engine.waypoints().await.is_empty());
        assert!(h.map.snapshot().annotations.is_empty());
        assert!(h.notifications.pending().is_empty());
    });
}

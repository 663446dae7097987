mod command;
mod helpers;
mod route_api;
mod session;
mod waypoint_api;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    api::{DynDirections, DynGeocoder, DynMapSurface, DynNotifier},
    entities::{Actions, Notification, Waypoint},
    error::Error,
};

pub use command::{Command, Outcome};
pub use helpers::{consecutive_pairs, shortest_candidate};
pub use route_api::RouteComputation;
pub use session::{Session, ROUTE_THRESHOLD};

/// The waypoint router. Cloning shares the same session and collaborators.
#[derive(Clone)]
pub struct Engine {
    session: Arc<Mutex<Session>>,
    geocoder: DynGeocoder,
    directions: DynDirections,
    map: DynMapSurface,
    notifier: DynNotifier,
}

impl Engine {
    pub fn new(
        geocoder: DynGeocoder,
        directions: DynDirections,
        map: DynMapSurface,
        notifier: DynNotifier,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            geocoder,
            directions,
            map,
            notifier,
        }
    }

    pub async fn waypoints(&self) -> Vec<Waypoint> {
        self.session.lock().await.waypoints().to_vec()
    }

    pub async fn actions(&self) -> Actions {
        self.session.lock().await.actions()
    }

    pub async fn generation(&self) -> u64 {
        self.session.lock().await.generation()
    }

    /// Shows `err` to the user and hands it back.
    fn report(&self, err: Error) -> Error {
        self.notifier
            .present(Notification::new("Error", err.message.clone()));
        err
    }
}

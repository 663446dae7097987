use crate::entities::{Actions, Waypoint};

/// Waypoint count at which compute/reset become available.
pub const ROUTE_THRESHOLD: usize = 3;

/// One routing session: an append-only list of waypoints until the next reset.
#[derive(Clone, Debug, Default)]
pub struct Session {
    waypoints: Vec<Waypoint>,
    actions_visible: bool,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends and returns the new count.
    pub fn push(&mut self, waypoint: Waypoint) -> usize {
        self.waypoints.push(waypoint);

        if self.waypoints.len() >= ROUTE_THRESHOLD {
            self.actions_visible = true;
        }

        self.waypoints.len()
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.actions_visible = false;
        self.generation += 1;
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn actions(&self) -> Actions {
        Actions::new(self.actions_visible)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[test]
fn actions_appear_at_third_waypoint() {
    use crate::entities::Coordinates;

    let mut session = Session::new();
    let waypoint = || Waypoint::new("x".into(), Coordinates::new(0.0, 0.0));

    session.push(waypoint());
    session.push(waypoint());
    assert!(!session.actions().compute_route);

    assert_eq!(session.push(waypoint()), 3);
    assert_eq!(session.actions(), Actions::new(true));

    session.clear();
    assert!(session.waypoints().is_empty());
    assert_eq!(session.actions(), Actions::new(false));
    assert_eq!(session.generation(), 1);
}

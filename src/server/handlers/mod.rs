pub mod map;
pub mod notifications;
pub mod route;
pub mod waypoints;

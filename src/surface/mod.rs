mod map;
mod notifications;

pub use map::{viewport_for, MapSnapshot, MapState};
pub use notifications::Notifications;

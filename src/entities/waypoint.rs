use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

/// A geocoded pin. The label is the address text exactly as the user typed it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: Uuid,
    pub label: String,
    pub coordinates: Coordinates,
}

impl Waypoint {
    pub fn new(label: String, coordinates: Coordinates) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            coordinates,
        }
    }
}

/// A location candidate returned by a geocoder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub formatted_address: String,
    pub coordinates: Coordinates,
}

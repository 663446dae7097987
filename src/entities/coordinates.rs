use geo_types::{Coord, Point};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for Coord<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Coord {
            x: coordinates.lng,
            y: coordinates.lat,
        }
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Point::new(coordinates.lng, coordinates.lat)
    }
}

// "lat,lng" as used in query strings
impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{},{}", coordinates.lat, coordinates.lng)
    }
}

#[test]
fn coordinates_into_query_string() {
    let location: String = Coordinates::new(52.52, 13.405).into();
    assert_eq!(location, "52.52,13.405");
}

#[test]
fn coordinates_into_point_swaps_axes() {
    let point: Point<f64> = Coordinates::new(1.0, 2.0).into();
    assert_eq!(point.x(), 2.0);
    assert_eq!(point.y(), 1.0);
}

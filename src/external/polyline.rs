//! Decoder for Google's encoded polyline format.
//!
//! Each value is a zigzag-encoded delta from the previous point, scaled by
//! 1e5 and emitted as 5-bit chunks offset by 63. Points come out as
//! `Coord { x: lng, y: lat }`.

use geo_types::{Coord, LineString};

use crate::error::{upstream_error, Error};

const PRECISION: f64 = 1e5;
const MAX_LAT: i64 = 90 * 100_000;
const MAX_LNG: i64 = 180 * 100_000;

pub fn decode(encoded: &str) -> Result<LineString<f64>, Error> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut coords = Vec::new();

    while index < bytes.len() {
        lat = lat
            .checked_add(next_value(bytes, &mut index)?)
            .ok_or_else(|| upstream_error())?;
        lng = lng
            .checked_add(next_value(bytes, &mut index)?)
            .ok_or_else(|| upstream_error())?;

        if lat.abs() > MAX_LAT || lng.abs() > MAX_LNG {
            return Err(upstream_error());
        }

        coords.push(Coord {
            x: lng as f64 / PRECISION,
            y: lat as f64 / PRECISION,
        });
    }

    Ok(LineString::new(coords))
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, Error> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index).ok_or_else(|| upstream_error())?;
        *index += 1;

        if !(63..=126).contains(&byte) || shift > 60 {
            return Err(upstream_error());
        }

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    if result & 1 == 1 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}

#[test]
fn decode_reference_polyline() {
    let line = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
    let points: Vec<(f64, f64)> = line.0.iter().map(|c| (c.y, c.x)).collect();

    assert_eq!(
        points,
        vec![(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)]
    );
}

#[test]
fn decode_empty_polyline() {
    assert!(decode("").unwrap().0.is_empty());
}

#[cfg(test)]
fn encode_value(value: i64) -> String {
    let mut value = if value < 0 { !(value << 1) } else { value << 1 };
    let mut encoded = String::new();

    while value >= 0x20 {
        encoded.push((((value & 0x1f) | 0x20) as u8 + 63) as char);
        value >>= 5;
    }
    encoded.push((value as u8 + 63) as char);

    encoded
}

#[test]
fn decode_huge_deltas_fails_without_panicking() {
    let point = format!("{}{}", encode_value(1 << 61), encode_value(0));
    let encoded = point.repeat(5);

    assert_eq!(decode(&encoded).unwrap_err(), upstream_error());
}

#[test]
fn decode_out_of_range_coordinates_fails() {
    let north_of_pole = format!("{}{}", encode_value(9_000_001), encode_value(0));
    assert_eq!(decode(&north_of_pole).unwrap_err(), upstream_error());

    let past_antimeridian = format!("{}{}", encode_value(0), encode_value(-18_000_001));
    assert_eq!(decode(&past_antimeridian).unwrap_err(), upstream_error());

    let edge = format!("{}{}", encode_value(9_000_000), encode_value(-18_000_000));
    let line = decode(&edge).unwrap();
    assert_eq!((line.0[0].y, line.0[0].x), (90.0, -180.0));
}

#[test]
fn decode_truncated_polyline_fails() {
    // latitude only, longitude missing
    assert_eq!(decode("_p~iF").unwrap_err(), upstream_error());
}

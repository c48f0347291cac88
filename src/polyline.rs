//! Google polyline codec for route geometry.
//!
//! Routing providers deliver route geometry as a compact string: each
//! coordinate is a signed delta from the previous one, zig-zag encoded and
//! split into 5-bit chunks with a continuation bit, biased by 63 into
//! printable ASCII, at a fixed-point scale of 1e5. Latitude and longitude
//! groups alternate. Decoding happens at the boundary; the matching engine
//! only ever sees decoded [`GeoPoint`] sequences.
//!
//! # Example
//! ```
//! use tollmatch::polyline;
//!
//! let points = polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
//! assert_eq!(points.len(), 3);
//! assert!((points[0].latitude - 38.5).abs() < 1e-9);
//! ```

use crate::error::{Result, TollMatchError};
use crate::GeoPoint;

/// Fixed-point scale: decoded integers are hundred-thousandths of a degree.
const PRECISION: f64 = 1e5;

/// Decode an encoded polyline into an ordered coordinate sequence.
///
/// An empty string yields an empty polyline. Input that ends while a
/// coordinate group still has its continuation bit set, or that leaves a
/// latitude without its longitude, fails with
/// [`TollMatchError::TruncatedPolyline`]; bytes outside the encoding
/// alphabet fail with [`TollMatchError::InvalidPolylineChar`]. Malformed
/// input is deterministic, so these errors are never worth retrying.
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        let (dlat, next) = decode_group(bytes, index)?;
        let (dlng, next) = decode_group(bytes, next)?;
        lat += dlat;
        lng += dlng;
        index = next;

        points.push(GeoPoint::new(
            lat as f64 / PRECISION,
            lng as f64 / PRECISION,
        ));
    }

    Ok(points)
}

/// Encode a coordinate sequence into the compact polyline representation.
///
/// Inverse of [`decode`]; coordinates survive a round trip to within the
/// 1e-5 degree fixed-point resolution.
pub fn encode(points: &[GeoPoint]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = (point.latitude * PRECISION).round() as i64;
        let lng = (point.longitude * PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

/// Decode one variable-length group starting at `index`.
///
/// Returns the signed delta and the offset of the byte after the group.
fn decode_group(bytes: &[u8], mut index: usize) -> Result<(i64, usize)> {
    let mut result: i64 = 0;
    let mut shift = 0u32;

    loop {
        let Some(&raw) = bytes.get(index) else {
            return Err(TollMatchError::TruncatedPolyline { index });
        };
        if !(63..=126).contains(&raw) {
            return Err(TollMatchError::InvalidPolylineChar { byte: raw, index });
        }
        // 7 chunks cover any 32-bit delta; longer groups are garbage.
        if shift > 30 {
            return Err(TollMatchError::OverlongGroup { index });
        }

        let chunk = (raw - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        index += 1;

        if chunk < 0x20 {
            break;
        }
    }

    let delta = if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    };

    Ok((delta, index))
}

/// Zig-zag encode one value and append its 5-bit chunks to `out`.
fn encode_value(value: i64, out: &mut String) {
    let mut v = if value < 0 {
        !(value << 1)
    } else {
        value << 1
    };

    while v >= 0x20 {
        out.push((((0x20 | (v & 0x1f)) + 63) as u8) as char);
        v >>= 5;
    }
    out.push(((v + 63) as u8) as char);
}

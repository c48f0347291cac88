//! Geographic utilities: great-circle distance, bearings, and spherical
//! point-to-segment projection.
//!
//! All functions take WGS84 coordinates in degrees and return distances in
//! kilometers on a sphere of radius [`EARTH_RADIUS_KM`]. Inverse trig inputs
//! are clamped to their valid domain so floating-point drift can never
//! produce NaN.

use crate::GeoPoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Central angle between two points in radians (haversine formula).
fn central_angle(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlng = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (dlng / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Great-circle distance between two points in kilometers.
///
/// Symmetric, and exactly zero for identical points. Coordinates are used
/// as given; range validation is the caller's responsibility.
///
/// # Example
/// ```
/// use tollmatch::GeoPoint;
/// use tollmatch::geo_utils::haversine_distance;
///
/// let kharghar = GeoPoint::new(19.0544, 73.0362);
/// let alibag = GeoPoint::new(18.9271, 72.8294);
/// let km = haversine_distance(&kharghar, &alibag);
/// assert!(km > 20.0 && km < 30.0);
/// ```
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    EARTH_RADIUS_KM * central_angle(a, b)
}

/// Initial bearing from one point towards another, in radians from north.
pub fn initial_bearing(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlng = (to.longitude - from.longitude).to_radians();

    let y = dlng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();
    y.atan2(x)
}

/// Result of projecting a point onto a route segment.
#[derive(Debug, Clone, Copy)]
pub struct SegmentProjection {
    /// Distance from the point to the nearest point of the segment, in km.
    pub distance_km: f64,
    /// Position of that nearest point measured along the segment from its
    /// start, in km. Clamped to `[0, segment length]`.
    pub along_km: f64,
}

/// Project a point onto the great-circle segment `start..end`.
///
/// When the perpendicular foot falls outside the segment the distance is to
/// the nearer endpoint and the along-track position snaps to that endpoint.
/// Otherwise the distance is the spherical cross-track distance and the
/// along-track position is the exact projection fraction.
pub fn project_onto_segment(
    point: &GeoPoint,
    start: &GeoPoint,
    end: &GeoPoint,
) -> SegmentProjection {
    let sigma12 = central_angle(start, end);
    let sigma13 = central_angle(start, point);

    // Zero-length segment: plain distance to the shared endpoint.
    if sigma12 == 0.0 {
        return SegmentProjection {
            distance_km: sigma13 * EARTH_RADIUS_KM,
            along_km: 0.0,
        };
    }

    let theta13 = initial_bearing(start, point);
    let theta12 = initial_bearing(start, end);

    // Foot of the perpendicular falls before the segment start.
    if (theta13 - theta12).cos() < 0.0 {
        return SegmentProjection {
            distance_km: sigma13 * EARTH_RADIUS_KM,
            along_km: 0.0,
        };
    }

    // Spherical cross-track and along-track distances.
    let cross = (sigma13.sin() * (theta13 - theta12).sin())
        .clamp(-1.0, 1.0)
        .asin();
    let along = (sigma13.cos() / cross.cos()).clamp(-1.0, 1.0).acos();

    // Foot falls beyond the segment end.
    if along > sigma12 {
        let sigma23 = central_angle(end, point);
        return SegmentProjection {
            distance_km: sigma23 * EARTH_RADIUS_KM,
            along_km: sigma12 * EARTH_RADIUS_KM,
        };
    }

    SegmentProjection {
        distance_km: cross.abs() * EARTH_RADIUS_KM,
        along_km: along * EARTH_RADIUS_KM,
    }
}

/// Distance from a point to the nearest point of a segment, in kilometers.
pub fn distance_to_segment(point: &GeoPoint, start: &GeoPoint, end: &GeoPoint) -> f64 {
    project_onto_segment(point, start, end).distance_km
}

/// Total length of a polyline in kilometers.
pub fn polyline_length(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance(&pair[0], &pair[1]))
        .sum()
}

/// Convert kilometers to approximate degrees at a given latitude.
///
/// Conservative for longitude away from the equator; used to size bounding
/// box buffers, not for distance math.
pub fn km_to_degrees(km: f64, latitude: f64) -> f64 {
    let cos_lat = latitude.to_radians().cos().abs().max(0.01);
    km / (111.32 * cos_lat)
}

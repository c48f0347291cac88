//! Synthetic route and plaza generation for stress tests and benchmarks.
//!
//! Deterministic (seeded) generators: the same seed always produces the
//! same routes and plaza sets, so benchmarks and property-style tests stay
//! reproducible.
//!
//! Feature-gated behind `synthetic` - not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use tollmatch::GeoPoint;
//! use tollmatch::synthetic::{plazas_near_route, winding_route};
//!
//! let route = winding_route(GeoPoint::new(18.0, 74.0), 120.0, 200, 42);
//! let plazas = plazas_near_route(&route, 20, 3.0, 42);
//! assert_eq!(route.len(), 200);
//! assert_eq!(plazas.len(), 20);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Bounds, GeoPoint, TollPlaza};

/// Kilometers per degree of latitude.
const KM_PER_DEGREE: f64 = 111.32;

/// Move a point by the given north/east offsets in kilometers.
fn offset_km(point: &GeoPoint, north_km: f64, east_km: f64) -> GeoPoint {
    let lat = point.latitude + north_km / KM_PER_DEGREE;
    let cos_lat = point.latitude.to_radians().cos().abs().max(0.01);
    let lng = point.longitude + east_km / (KM_PER_DEGREE * cos_lat);
    GeoPoint::new(lat, lng)
}

/// Straight route from `origin` along a fixed bearing.
///
/// ```
/// use tollmatch::synthetic::straight_route;
/// use tollmatch::GeoPoint;
/// use tollmatch::geo_utils::polyline_length;
///
/// let route = straight_route(GeoPoint::new(18.0, 74.0), 0.0, 100.0, 50);
/// assert_eq!(route.len(), 50);
/// assert!((polyline_length(&route) - 100.0).abs() < 1.0);
/// ```
pub fn straight_route(
    origin: GeoPoint,
    bearing_deg: f64,
    length_km: f64,
    point_count: usize,
) -> Vec<GeoPoint> {
    assert!(point_count >= 2, "a route needs at least two points");

    let step_km = length_km / (point_count - 1) as f64;
    let bearing = bearing_deg.to_radians();

    let mut points = Vec::with_capacity(point_count);
    let mut current = origin;
    points.push(current);
    for _ in 1..point_count {
        current = offset_km(&current, step_km * bearing.cos(), step_km * bearing.sin());
        points.push(current);
    }
    points
}

/// Winding route with bounded random heading changes per step.
pub fn winding_route(
    origin: GeoPoint,
    length_km: f64,
    point_count: usize,
    seed: u64,
) -> Vec<GeoPoint> {
    assert!(point_count >= 2, "a route needs at least two points");

    let mut rng = StdRng::seed_from_u64(seed);
    let step_km = length_km / (point_count - 1) as f64;
    // Start north-east, turn at most ~17 degrees per step.
    let mut heading = std::f64::consts::FRAC_PI_4;

    let mut points = Vec::with_capacity(point_count);
    let mut current = origin;
    points.push(current);
    for _ in 1..point_count {
        heading += rng.gen_range(-0.3..0.3);
        current = offset_km(&current, step_km * heading.cos(), step_km * heading.sin());
        points.push(current);
    }
    points
}

/// Plazas scattered within a bounded offset of random route points.
///
/// With `max_offset_km` below the match tolerance, every generated plaza
/// is a guaranteed match for the route.
pub fn plazas_near_route(
    route: &[GeoPoint],
    count: usize,
    max_offset_km: f64,
    seed: u64,
) -> Vec<TollPlaza> {
    assert!(!route.is_empty(), "route must have at least one point");

    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let anchor = route[rng.gen_range(0..route.len())];
            let north = rng.gen_range(-max_offset_km..=max_offset_km);
            let east = rng.gen_range(-max_offset_km..=max_offset_km);
            let position = offset_km(&anchor, north, east);
            TollPlaza::new(
                &format!("Synthetic Plaza {i}"),
                position.latitude,
                position.longitude,
            )
        })
        .collect()
}

/// Plazas scattered uniformly inside the given bounds.
pub fn plazas_scattered(bounds: &Bounds, count: usize, seed: u64) -> Vec<TollPlaza> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let lat = rng.gen_range(bounds.min_lat..=bounds.max_lat);
            let lng = rng.gen_range(bounds.min_lng..=bounds.max_lng);
            TollPlaza::new(&format!("Scattered Plaza {i}"), lat, lng)
        })
        .collect()
}

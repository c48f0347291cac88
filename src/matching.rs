//! Route matching strategies.
//!
//! Two independently testable strategies with different accuracy/cost
//! trade-offs coexist:
//!
//! - **Coarse**: treats the route as the straight chord between its two
//!   endpoints. A candidate is on-route when its detour over the chord
//!   (`dist_to_source + dist_to_dest - direct`) stays within a tolerance
//!   that scales with route length. Used when only endpoints are known.
//! - **Precise**: scans every segment of the actual route polyline and
//!   accepts candidates within a small constant tolerance of any segment.
//!   Used when real route geometry is available.
//!
//! Both strategies are pure functions over immutable inputs. The batch
//! entry points have rayon-parallel variants behind the `parallel`
//! feature; evaluation order never affects the result because the final
//! sort is applied after all candidates are evaluated.

use geo::{algorithm::simplify::Simplify, Coord, LineString};
use log::{debug, trace, warn};

use crate::geo_utils::{haversine_distance, project_onto_segment};
use crate::{Bounds, GeoPoint, MatchConfig, PlazaMatch, TollPlaza};

// ============================================================================
// Coarse mode (chord approximation)
// ============================================================================

/// Bounding box around a route's two endpoints with a fixed buffer.
///
/// Deliberately generous (the buffer is constant regardless of route
/// length): it is only a cheap prefilter, and [`is_near_chord`] performs
/// the real accuracy check afterwards. The returned bounds always satisfy
/// `min <= max` on both axes.
pub fn route_bounding_box(source: &GeoPoint, dest: &GeoPoint, config: &MatchConfig) -> Bounds {
    Bounds {
        min_lat: source.latitude.min(dest.latitude) - config.bbox_buffer_deg,
        max_lat: source.latitude.max(dest.latitude) + config.bbox_buffer_deg,
        min_lng: source.longitude.min(dest.longitude) - config.bbox_buffer_deg,
        max_lng: source.longitude.max(dest.longitude) + config.bbox_buffer_deg,
    }
}

/// Coarse proximity test against the straight chord between two endpoints.
///
/// A point truly on the chord satisfies the triangle equality
/// `dist_to_source + dist_to_dest == direct`; the allowed slack is
/// `max(chord_tolerance_ratio * direct, chord_tolerance_floor_km)` so that
/// short routes get a fixed floor and long routes a proportional allowance.
pub fn is_near_chord(
    source: &GeoPoint,
    dest: &GeoPoint,
    point: &GeoPoint,
    config: &MatchConfig,
) -> bool {
    let dist_to_source = haversine_distance(source, point);
    let dist_to_dest = haversine_distance(point, dest);
    let direct = haversine_distance(source, dest);

    let tolerance = (direct * config.chord_tolerance_ratio).max(config.chord_tolerance_floor_km);

    ((dist_to_source + dist_to_dest) - direct).abs() <= tolerance
}

/// Match plazas against the straight chord between two endpoints.
///
/// Candidates are prefiltered with [`route_bounding_box`], accepted via
/// [`is_near_chord`], and reported with the straight-line distance from the
/// source endpoint. Results are sorted ascending by that distance, with
/// exact duplicates removed.
pub fn match_candidates_coarse(
    source: &GeoPoint,
    dest: &GeoPoint,
    plazas: &[TollPlaza],
    config: &MatchConfig,
) -> Vec<PlazaMatch> {
    let bbox = route_bounding_box(source, dest, config);
    debug!(
        "coarse matching {} plazas against chord ({:.4}, {:.4}) -> ({:.4}, {:.4})",
        plazas.len(),
        source.latitude,
        source.longitude,
        dest.latitude,
        dest.longitude
    );

    let matches = plazas
        .iter()
        .filter_map(|plaza| match_one_coarse(source, dest, &bbox, plaza, config))
        .collect();

    finalize_matches(matches)
}

/// Parallel variant of [`match_candidates_coarse`].
///
/// Produces identical results; candidate evaluations are independent and
/// the final sort restores deterministic ordering.
#[cfg(feature = "parallel")]
pub fn match_candidates_coarse_parallel(
    source: &GeoPoint,
    dest: &GeoPoint,
    plazas: &[TollPlaza],
    config: &MatchConfig,
) -> Vec<PlazaMatch> {
    use rayon::prelude::*;

    let bbox = route_bounding_box(source, dest, config);
    let matches = plazas
        .par_iter()
        .filter_map(|plaza| match_one_coarse(source, dest, &bbox, plaza, config))
        .collect();

    finalize_matches(matches)
}

fn match_one_coarse(
    source: &GeoPoint,
    dest: &GeoPoint,
    bbox: &Bounds,
    plaza: &TollPlaza,
    config: &MatchConfig,
) -> Option<PlazaMatch> {
    let position = plaza.point();
    if !bbox.contains(&position) {
        return None;
    }
    if !is_near_chord(source, dest, &position, config) {
        return None;
    }

    trace!("plaza '{}' accepted by chord test", plaza.name);
    Some(PlazaMatch {
        name: plaza.name.clone(),
        latitude: plaza.latitude,
        longitude: plaza.longitude,
        distance_from_start_km: haversine_distance(source, &position),
    })
}

// ============================================================================
// Precise mode (segment scan)
// ============================================================================

/// Minimum distance from a point to any segment of a route, in kilometers.
///
/// Degenerate routes are defined, not errors: a single-point route yields
/// the direct distance to that point, an empty route yields `+inf`.
pub fn distance_to_route(route: &[GeoPoint], point: &GeoPoint) -> f64 {
    match route {
        [] => {
            warn!("empty route polyline supplied");
            f64::INFINITY
        }
        [only] => haversine_distance(only, point),
        _ => route
            .windows(2)
            .map(|seg| project_onto_segment(point, &seg[0], &seg[1]).distance_km)
            .fold(f64::INFINITY, f64::min),
    }
}

/// Whether a point lies within `tolerance_km` of any route segment.
pub fn is_near_route(route: &[GeoPoint], point: &GeoPoint, tolerance_km: f64) -> bool {
    distance_to_route(route, point) <= tolerance_km
}

/// Distance from the route start to a point's position along the route.
///
/// Scans segments in order, accumulating segment lengths until the first
/// segment within `tolerance_km` of the point, then adds the point's exact
/// along-track projection onto that segment. Returns `None` when no
/// segment matches.
///
/// A single-point route degenerates to a direct-distance check against the
/// lone point, reporting distance 0 on a match.
pub fn distance_from_start(
    route: &[GeoPoint],
    point: &GeoPoint,
    tolerance_km: f64,
) -> Option<f64> {
    match route {
        [] => None,
        [only] => (haversine_distance(only, point) <= tolerance_km).then_some(0.0),
        _ => {
            let mut cumulative = 0.0;
            for seg in route.windows(2) {
                let projection = project_onto_segment(point, &seg[0], &seg[1]);
                if projection.distance_km <= tolerance_km {
                    return Some(cumulative + projection.along_km);
                }
                cumulative += haversine_distance(&seg[0], &seg[1]);
            }
            None
        }
    }
}

/// Match plazas against actual route geometry.
///
/// Every plaza within `route_tolerance_km` of any segment is reported with
/// its distance from the route start. Results are sorted ascending by that
/// distance, with exact duplicates removed.
pub fn match_candidates(
    route: &[GeoPoint],
    plazas: &[TollPlaza],
    config: &MatchConfig,
) -> Vec<PlazaMatch> {
    debug!(
        "precise matching {} plazas against {} route points",
        plazas.len(),
        route.len()
    );

    let matches = plazas
        .iter()
        .filter_map(|plaza| match_one(route, plaza, config.route_tolerance_km))
        .collect();

    finalize_matches(matches)
}

/// Parallel variant of [`match_candidates`].
///
/// Produces identical results; candidate evaluations are independent and
/// the final sort restores deterministic ordering.
#[cfg(feature = "parallel")]
pub fn match_candidates_parallel(
    route: &[GeoPoint],
    plazas: &[TollPlaza],
    config: &MatchConfig,
) -> Vec<PlazaMatch> {
    use rayon::prelude::*;

    let matches = plazas
        .par_iter()
        .filter_map(|plaza| match_one(route, plaza, config.route_tolerance_km))
        .collect();

    finalize_matches(matches)
}

fn match_one(route: &[GeoPoint], plaza: &TollPlaza, tolerance_km: f64) -> Option<PlazaMatch> {
    let along = distance_from_start(route, &plaza.point(), tolerance_km)?;
    trace!(
        "plaza '{}' matched {:.2} km from route start",
        plaza.name,
        along
    );

    Some(PlazaMatch {
        name: plaza.name.clone(),
        latitude: plaza.latitude,
        longitude: plaza.longitude,
        distance_from_start_km: along,
    })
}

/// Simplify a dense route polyline before the precise scan.
///
/// Douglas-Peucker simplification followed by a uniform-sampling cap at
/// `max_route_points`. Invalid coordinates are dropped.
pub fn simplify_route(points: &[GeoPoint], config: &MatchConfig) -> Vec<GeoPoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let coords: Vec<Coord> = points
        .iter()
        .filter(|p| p.is_valid())
        .map(|p| Coord {
            x: p.longitude,
            y: p.latitude,
        })
        .collect();

    if coords.len() <= 2 {
        return coords.iter().map(|c| GeoPoint::new(c.y, c.x)).collect();
    }

    let line = LineString::new(coords);
    let simplified = line.simplify(&config.simplification_tolerance_deg);

    let final_coords: Vec<Coord> = if simplified.0.len() > config.max_route_points as usize {
        let step = simplified.0.len() as f64 / config.max_route_points as f64;
        (0..config.max_route_points)
            .map(|i| simplified.0[(i as f64 * step) as usize])
            .collect()
    } else {
        simplified.0
    };

    final_coords.iter().map(|c| GeoPoint::new(c.y, c.x)).collect()
}

/// Sort matches by distance from start and drop exact duplicates.
fn finalize_matches(mut matches: Vec<PlazaMatch>) -> Vec<PlazaMatch> {
    matches.sort_by(|a, b| a.distance_from_start_km.total_cmp(&b.distance_from_start_km));
    matches.dedup_by(|a, b| {
        a.name == b.name && a.latitude == b.latitude && a.longitude == b.longitude
    });
    matches
}

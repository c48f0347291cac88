//! Tests for matching module

use tollmatch::matching::*;
use tollmatch::{GeoPoint, MatchConfig, TollPlaza};

const BANGALORE: GeoPoint = GeoPoint {
    latitude: 12.9716,
    longitude: 77.5946,
};
const PUNE: GeoPoint = GeoPoint {
    latitude: 18.5204,
    longitude: 73.8567,
};
const KHARGHAR: GeoPoint = GeoPoint {
    latitude: 19.0544,
    longitude: 73.0362,
};
const ALIBAG: GeoPoint = GeoPoint {
    latitude: 18.9271,
    longitude: 72.8294,
};

fn midpoint(a: &GeoPoint, b: &GeoPoint) -> GeoPoint {
    GeoPoint::new(
        (a.latitude + b.latitude) / 2.0,
        (a.longitude + b.longitude) / 2.0,
    )
}

// ========================================================================
// Coarse mode
// ========================================================================

#[test]
fn test_bounding_box_invariant_holds_for_any_input_order() {
    let config = MatchConfig::default();
    for (a, b) in [(&KHARGHAR, &ALIBAG), (&ALIBAG, &KHARGHAR)] {
        let bbox = route_bounding_box(a, b, &config);
        assert!(bbox.min_lat <= bbox.max_lat);
        assert!(bbox.min_lng <= bbox.max_lng);
    }
}

#[test]
fn test_bounding_box_includes_buffer() {
    let config = MatchConfig::default();
    let bbox = route_bounding_box(&KHARGHAR, &ALIBAG, &config);

    assert!(bbox.min_lat <= ALIBAG.latitude - 1.0);
    assert!(bbox.max_lat >= KHARGHAR.latitude + 1.0);
    assert!(bbox.min_lng <= ALIBAG.longitude - 1.0);
    assert!(bbox.max_lng >= KHARGHAR.longitude + 1.0);
}

#[test]
fn test_chord_accepts_midpoint() {
    let mid = midpoint(&KHARGHAR, &ALIBAG);
    assert!(is_near_chord(&KHARGHAR, &ALIBAG, &mid, &MatchConfig::default()));
}

#[test]
fn test_chord_rejects_far_point() {
    // Bangalore is hundreds of km off the Kharghar-Alibag axis.
    assert!(!is_near_chord(
        &KHARGHAR,
        &ALIBAG,
        &BANGALORE,
        &MatchConfig::default()
    ));
}

#[test]
fn test_coarse_match_reports_distance_from_source() {
    let mid = midpoint(&KHARGHAR, &ALIBAG);
    let plazas = vec![
        TollPlaza::new("Mid Plaza", mid.latitude, mid.longitude),
        TollPlaza::new("Bangalore Plaza", BANGALORE.latitude, BANGALORE.longitude),
    ];

    let matches =
        match_candidates_coarse(&KHARGHAR, &ALIBAG, &plazas, &MatchConfig::default());

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].name, "Mid Plaza");
    // Straight-line distance from the source endpoint, about half the chord.
    assert!(matches[0].distance_from_start_km > 10.0);
    assert!(matches[0].distance_from_start_km < 16.0);
}

#[test]
fn test_coarse_match_sorts_by_distance() {
    let near = GeoPoint::new(19.02, 72.99);
    let mid = midpoint(&KHARGHAR, &ALIBAG);
    let plazas = vec![
        TollPlaza::new("Far", mid.latitude, mid.longitude),
        TollPlaza::new("Near", near.latitude, near.longitude),
    ];

    let matches =
        match_candidates_coarse(&KHARGHAR, &ALIBAG, &plazas, &MatchConfig::default());

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].name, "Near");
    assert_eq!(matches[1].name, "Far");
    assert!(matches[0].distance_from_start_km <= matches[1].distance_from_start_km);
}

// ========================================================================
// Precise mode
// ========================================================================

#[test]
fn test_point_on_segment_interior_has_near_zero_distance() {
    let route = [KHARGHAR, ALIBAG];
    let mid = midpoint(&KHARGHAR, &ALIBAG);
    assert!(distance_to_route(&route, &mid) < 0.1);
}

#[test]
fn test_empty_route_matches_nothing() {
    let route: [GeoPoint; 0] = [];
    assert_eq!(distance_to_route(&route, &KHARGHAR), f64::INFINITY);
    assert!(!is_near_route(&route, &KHARGHAR, 5.0));
    assert_eq!(distance_from_start(&route, &KHARGHAR, 5.0), None);
}

#[test]
fn test_single_point_route_degenerates_to_direct_check() {
    let route = [KHARGHAR];

    // The identical point reports matched at the route start.
    assert!(is_near_route(&route, &KHARGHAR, 5.0));
    assert_eq!(distance_from_start(&route, &KHARGHAR, 5.0), Some(0.0));

    // A distant point stays unmatched.
    assert!(!is_near_route(&route, &BANGALORE, 5.0));
    assert_eq!(distance_from_start(&route, &BANGALORE, 5.0), None);
}

#[test]
fn test_distance_from_start_increases_along_route() {
    let mid = midpoint(&BANGALORE, &PUNE);
    let route = [BANGALORE, mid, PUNE];

    // Points 10% into the first segment and 90% into the second.
    let near_start = GeoPoint::new(
        BANGALORE.latitude + 0.1 * (mid.latitude - BANGALORE.latitude),
        BANGALORE.longitude + 0.1 * (mid.longitude - BANGALORE.longitude),
    );
    let near_end = GeoPoint::new(
        mid.latitude + 0.9 * (PUNE.latitude - mid.latitude),
        mid.longitude + 0.9 * (PUNE.longitude - mid.longitude),
    );

    let start_dist = distance_from_start(&route, &near_start, 5.0).unwrap();
    let end_dist = distance_from_start(&route, &near_end, 5.0).unwrap();

    assert!(end_dist > start_dist, "{end_dist} <= {start_dist}");
}

#[test]
fn test_end_to_end_kharghar_alibag_candidate() {
    let route = [KHARGHAR, ALIBAG];
    let candidate = GeoPoint::new(19.00, 73.00);

    assert!(is_near_route(&route, &candidate, 5.0));

    let along = distance_from_start(&route, &candidate, 5.0).unwrap();
    let total = tollmatch::geo_utils::polyline_length(&route);
    assert!(along > 0.0 && along < total, "got {along}, total {total}");
    // The candidate projects a handful of km down the segment.
    assert!(along > 4.0 && along < 9.0, "got {along}");
}

#[test]
fn test_match_candidates_filters_and_sorts() {
    let route = [KHARGHAR, ALIBAG];
    let plazas = vec![
        TollPlaza::new("Near End", 18.94, 72.85),
        TollPlaza::new("Near Start", 19.05, 73.03),
        TollPlaza::new("Off Route", BANGALORE.latitude, BANGALORE.longitude),
        TollPlaza::new("Interior", 19.00, 73.00),
    ];

    let matches = match_candidates(&route, &plazas, &MatchConfig::default());

    let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Near Start", "Interior", "Near End"]);
    assert!(matches
        .windows(2)
        .all(|w| w[0].distance_from_start_km <= w[1].distance_from_start_km));
}

#[test]
fn test_match_candidates_deduplicates_exact_duplicates() {
    let route = [KHARGHAR, ALIBAG];
    let plazas = vec![
        TollPlaza::new("Interior", 19.00, 73.00),
        TollPlaza::new("Interior", 19.00, 73.00),
    ];

    let matches = match_candidates(&route, &plazas, &MatchConfig::default());
    assert_eq!(matches.len(), 1);
}

#[test]
fn test_custom_tolerance_widens_the_corridor() {
    let route = [KHARGHAR, ALIBAG];
    // ~11 km off the segment.
    let offside = GeoPoint::new(19.05, 72.83);

    assert!(!is_near_route(&route, &offside, 5.0));
    assert!(is_near_route(&route, &offside, 20.0));
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_serial() {
    let route = [BANGALORE, midpoint(&BANGALORE, &PUNE), PUNE];
    let plazas: Vec<TollPlaza> = (0..50)
        .map(|i| {
            let f = i as f64 / 50.0;
            TollPlaza::new(
                &format!("Plaza {i}"),
                BANGALORE.latitude + f * (PUNE.latitude - BANGALORE.latitude),
                BANGALORE.longitude + f * (PUNE.longitude - BANGALORE.longitude),
            )
        })
        .collect();

    let config = MatchConfig::default();
    let serial = match_candidates(&route, &plazas, &config);
    let parallel = match_candidates_parallel(&route, &plazas, &config);
    assert_eq!(serial, parallel);

    let serial_coarse = match_candidates_coarse(&BANGALORE, &PUNE, &plazas, &config);
    let parallel_coarse =
        match_candidates_coarse_parallel(&BANGALORE, &PUNE, &plazas, &config);
    assert_eq!(serial_coarse, parallel_coarse);
}

// ========================================================================
// Route simplification
// ========================================================================

#[test]
fn test_simplify_route_drops_collinear_points() {
    // Densely sampled straight line collapses towards its endpoints.
    let points: Vec<GeoPoint> = (0..100)
        .map(|i| {
            let f = i as f64 / 99.0;
            GeoPoint::new(19.0 + f * 0.5, 73.0 + f * 0.5)
        })
        .collect();

    let simplified = simplify_route(&points, &MatchConfig::default());
    assert!(simplified.len() < points.len());
    assert!(simplified.len() >= 2);
}

#[test]
fn test_simplify_route_short_input_passthrough() {
    let points = vec![KHARGHAR, ALIBAG];
    assert_eq!(simplify_route(&points, &MatchConfig::default()), points);
}

#[test]
fn test_simplify_route_respects_point_cap() {
    let mut config = MatchConfig::default();
    config.simplification_tolerance_deg = 0.0;
    config.max_route_points = 50;

    let points: Vec<GeoPoint> = (0..500)
        .map(|i| {
            let f = i as f64 / 499.0;
            // Zig-zag so Douglas-Peucker cannot collapse it.
            let wiggle = if i % 2 == 0 { 0.01 } else { -0.01 };
            GeoPoint::new(19.0 + f * 2.0 + wiggle, 73.0 + f * 2.0)
        })
        .collect();

    let simplified = simplify_route(&points, &config);
    assert!(simplified.len() <= 50);
}

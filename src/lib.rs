//! # Toll Match
//!
//! Geospatial toll plaza matching library for road routes.
//!
//! This library provides:
//! - Great-circle distance and spherical segment projection
//! - Google polyline decoding/encoding for route geometry
//! - Coarse (straight-chord) and precise (segment scan) route matching
//! - An in-memory plaza engine with R-tree prefiltering and atomic
//!   snapshot reloads
//! - CSV ingestion of plaza reference data
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch matching with rayon (default)
//! - **`synthetic`** - Enable seeded synthetic data generators for tests
//!   and benchmarks
//!
//! ## Quick Start
//!
//! ```rust
//! use tollmatch::{GeoPoint, MatchConfig, TollPlaza};
//! use tollmatch::matching::match_candidates;
//!
//! // Route geometry as delivered by a routing provider (already decoded)
//! let route = vec![
//!     GeoPoint::new(19.0544, 73.0362), // Kharghar
//!     GeoPoint::new(18.9271, 72.8294), // Alibag
//! ];
//!
//! let plazas = vec![
//!     TollPlaza::new("Khalapur Toll Plaza", 19.00, 73.00),
//!     TollPlaza::new("Electronic City Toll", 12.85, 77.66),
//! ];
//!
//! let matches = match_candidates(&route, &plazas, &MatchConfig::default());
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].name, "Khalapur Toll Plaza");
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Result, TollMatchError};

// Geographic utilities (distance, bearing, segment projection)
pub mod geo_utils;

// Polyline codec for encoded route geometry
pub mod polyline;

// Route matching strategies (coarse chord + precise segment scan)
pub mod matching;
pub use matching::{match_candidates, match_candidates_coarse};

// Request validation performed before the engine is invoked
pub mod validate;

// CSV ingestion of plaza reference data
pub mod ingest;

// Engine facade with snapshot store and spatial prefiltering
pub mod engine;
pub use engine::{MatchEngine, PlazaSnapshot, PlazaStore, SpatialIndex};

// Synthetic data generation for stress tests and benchmarks
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate with latitude and longitude in degrees.
///
/// # Example
/// ```
/// use tollmatch::GeoPoint;
/// let point = GeoPoint::new(19.0760, 72.8777); // Mumbai
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new geographic point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Axis-aligned latitude/longitude bounding box.
///
/// Bounds always satisfy `min_lat <= max_lat` and `min_lng <= max_lng`
/// regardless of the order the constructing points were supplied in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Compute bounds from a set of points.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Expand the bounds by a fixed buffer in degrees on every side.
    pub fn buffered(&self, degrees: f64) -> Self {
        Self {
            min_lat: self.min_lat - degrees,
            max_lat: self.max_lat + degrees,
            min_lng: self.min_lng - degrees,
            max_lng: self.max_lng + degrees,
        }
    }

    /// Check whether a point lies inside the bounds (inclusive).
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lng
            && point.longitude <= self.max_lng
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// A toll plaza from the reference data set.
///
/// The engine never mutates plazas; it only reads their coordinates to test
/// them against route geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TollPlaza {
    /// Display name of the plaza.
    pub name: String,
    /// State the plaza is located in, when the reference data carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl TollPlaza {
    /// Create a plaza without state information.
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            state: None,
            latitude,
            longitude,
        }
    }

    /// Create a plaza with its state.
    pub fn with_state(name: &str, state: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            state: Some(state.to_string()),
            latitude,
            longitude,
        }
    }

    /// The plaza's position as a [`GeoPoint`].
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A plaza that matched a route, with its position along the route.
///
/// Collections of matches are always sorted ascending by
/// `distance_from_start_km`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlazaMatch {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the route start in kilometers.
    ///
    /// Precise mode measures along the route geometry; coarse mode reports
    /// the straight-line distance from the source endpoint.
    pub distance_from_start_km: f64,
}

/// Configuration for the matching strategies.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Precise mode: maximum distance from a route segment for a plaza to
    /// count as on-route. A small constant suffices because the scan walks
    /// the actual road geometry. Default: 5.0 km
    pub route_tolerance_km: f64,

    /// Coarse mode: tolerance as a fraction of the direct source-destination
    /// distance. The chord approximation diverges more from the real road
    /// path as distance grows. Default: 0.15
    pub chord_tolerance_ratio: f64,

    /// Coarse mode: tolerance floor for short routes. Default: 50.0 km
    pub chord_tolerance_floor_km: f64,

    /// Fixed buffer around the coarse-mode bounding box in degrees
    /// (~111 km per degree of latitude). Default: 1.0
    pub bbox_buffer_deg: f64,

    /// Tolerance for Douglas-Peucker simplification of dense route
    /// polylines before the precise scan (in degrees). Default: 0.0001
    pub simplification_tolerance_deg: f64,

    /// Maximum route points after simplification; caps the per-candidate
    /// segment scan for very long routes. Default: 500
    pub max_route_points: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            route_tolerance_km: 5.0,
            chord_tolerance_ratio: 0.15,
            chord_tolerance_floor_km: 50.0,
            bbox_buffer_deg: 1.0,
            simplification_tolerance_deg: 0.0001,
            max_route_points: 500,
        }
    }
}

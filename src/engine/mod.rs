//! # Match Engine
//!
//! Engine facade combining focused subcomponents:
//! - `PlazaStore` - reference data snapshots with atomic reloads
//! - `SpatialIndex` - R-tree prefiltering by bounding box
//!
//! The engine owns no I/O: callers load plazas (e.g. via [`crate::ingest`])
//! and supply route geometry obtained from their routing provider. Queries
//! take `&self` and operate on an immutable snapshot, so the engine can be
//! shared across threads behind an `Arc`.

pub mod plaza_store;
pub mod spatial_index;

pub use plaza_store::{PlazaSnapshot, PlazaStore};
pub use spatial_index::{PlazaPosition, SpatialIndex};

use log::debug;

use crate::error::Result;
use crate::geo_utils::km_to_degrees;
use crate::matching::{self, simplify_route};
use crate::polyline;
use crate::{Bounds, GeoPoint, MatchConfig, PlazaMatch, TollPlaza};

/// Toll matching engine over an in-memory plaza reference set.
///
/// # Example
/// ```
/// use tollmatch::{GeoPoint, MatchEngine, TollPlaza};
///
/// let engine = MatchEngine::new();
/// engine.load_plazas(vec![TollPlaza::new("Khalapur Toll Plaza", 19.00, 73.00)]);
///
/// let route = vec![
///     GeoPoint::new(19.0544, 73.0362),
///     GeoPoint::new(18.9271, 72.8294),
/// ];
/// let matches = engine.matches_along_route(&route);
/// assert_eq!(matches.len(), 1);
/// ```
pub struct MatchEngine {
    store: PlazaStore,
    config: MatchConfig,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchEngine {
    /// Create an engine with default configuration and no plazas.
    pub fn new() -> Self {
        Self {
            store: PlazaStore::new(),
            config: MatchConfig::default(),
        }
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: MatchConfig) -> Self {
        Self {
            store: PlazaStore::new(),
            config,
        }
    }

    /// The engine's matching configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Replace the plaza reference data with a new snapshot.
    ///
    /// In-flight queries keep reading the snapshot they started with.
    pub fn load_plazas(&self, plazas: Vec<TollPlaza>) {
        self.store.replace(plazas);
    }

    /// Get the number of plazas in the current snapshot.
    pub fn plaza_count(&self) -> usize {
        self.store.len()
    }

    /// Precise mode: plazas along actual route geometry, sorted by
    /// distance from the route start.
    ///
    /// The route is simplified before the scan and candidates are
    /// prefiltered through the snapshot's spatial index using the route's
    /// bounding box, buffered by the match tolerance.
    pub fn matches_along_route(&self, route: &[GeoPoint]) -> Vec<PlazaMatch> {
        let snapshot = self.store.snapshot();
        let route = simplify_route(route, &self.config);

        let Some(bounds) = Bounds::from_points(&route) else {
            return Vec::new();
        };

        let buffer = 2.0 * km_to_degrees(self.config.route_tolerance_km, bounds.center().latitude);
        let candidates = snapshot.plazas_within(&bounds.buffered(buffer));
        debug!(
            "spatial prefilter kept {} of {} plazas",
            candidates.len(),
            snapshot.len()
        );

        #[cfg(feature = "parallel")]
        {
            matching::match_candidates_parallel(&route, &candidates, &self.config)
        }
        #[cfg(not(feature = "parallel"))]
        {
            matching::match_candidates(&route, &candidates, &self.config)
        }
    }

    /// Precise mode over an encoded polyline as delivered by a routing
    /// provider.
    pub fn matches_along_encoded(&self, encoded: &str) -> Result<Vec<PlazaMatch>> {
        let route = polyline::decode(encoded)?;
        Ok(self.matches_along_route(&route))
    }

    /// Coarse mode: plazas near the straight chord between two endpoints,
    /// sorted by straight-line distance from the source.
    pub fn matches_between(&self, source: &GeoPoint, dest: &GeoPoint) -> Vec<PlazaMatch> {
        let snapshot = self.store.snapshot();
        let bbox = matching::route_bounding_box(source, dest, &self.config);
        let candidates = snapshot.plazas_within(&bbox);
        debug!(
            "spatial prefilter kept {} of {} plazas",
            candidates.len(),
            snapshot.len()
        );

        #[cfg(feature = "parallel")]
        {
            matching::match_candidates_coarse_parallel(source, dest, &candidates, &self.config)
        }
        #[cfg(not(feature = "parallel"))]
        {
            matching::match_candidates_coarse(source, dest, &candidates, &self.config)
        }
    }

    /// Bounding box for a coarse query, usable by collaborators for their
    /// own pre-query filtering of a larger point store.
    pub fn coarse_bounding_box(&self, source: &GeoPoint, dest: &GeoPoint) -> Bounds {
        matching::route_bounding_box(source, dest, &self.config)
    }
}

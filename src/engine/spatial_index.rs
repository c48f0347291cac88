//! Spatial indexing for plaza prefiltering.
//!
//! Uses an R-tree to efficiently locate plazas inside a route's bounding
//! box instead of scanning the whole reference data set per query.

use rstar::{RTree, RTreeObject, AABB};

use crate::{Bounds, TollPlaza};

/// Plaza position wrapper for R-tree indexing.
///
/// Envelope coordinates are `[lng, lat]`.
#[derive(Debug, Clone)]
pub struct PlazaPosition {
    /// Index into the owning snapshot's plaza vector.
    pub plaza_idx: usize,
    pub position: [f64; 2],
}

impl RTreeObject for PlazaPosition {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// R-tree over plaza coordinates.
///
/// Built once per snapshot; never mutated afterwards.
#[derive(Debug)]
pub struct SpatialIndex {
    tree: RTree<PlazaPosition>,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load an index over a plaza slice.
    pub fn from_plazas(plazas: &[TollPlaza]) -> Self {
        let positions: Vec<PlazaPosition> = plazas
            .iter()
            .enumerate()
            .map(|(i, p)| PlazaPosition {
                plaza_idx: i,
                position: [p.longitude, p.latitude],
            })
            .collect();

        Self {
            tree: RTree::bulk_load(positions),
        }
    }

    /// Indices of plazas that lie inside the given bounds.
    pub fn query_bounds(&self, bounds: &Bounds) -> Vec<usize> {
        let envelope = AABB::from_corners(
            [bounds.min_lng, bounds.min_lat],
            [bounds.max_lng, bounds.max_lat],
        );

        self.tree
            .locate_in_envelope(&envelope)
            .map(|p| p.plaza_idx)
            .collect()
    }

    /// Get the number of indexed plazas.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

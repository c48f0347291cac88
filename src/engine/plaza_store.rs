//! Toll plaza storage with atomic snapshot reloads.
//!
//! The reference data set is read-mostly: loaded once at startup and
//! occasionally refreshed. A refresh builds a complete new snapshot
//! (plazas plus spatial index) and swaps the handle atomically, so readers
//! iterating an old snapshot are never disturbed mid-query.

use std::sync::Arc;

use arc_swap::ArcSwap;
use log::info;

use super::spatial_index::SpatialIndex;
use crate::{Bounds, TollPlaza};

/// Immutable snapshot of the plaza reference data with its spatial index.
#[derive(Debug, Default)]
pub struct PlazaSnapshot {
    plazas: Vec<TollPlaza>,
    index: SpatialIndex,
}

impl PlazaSnapshot {
    /// Build a snapshot, indexing the given plazas.
    pub fn new(plazas: Vec<TollPlaza>) -> Self {
        let index = SpatialIndex::from_plazas(&plazas);
        Self { plazas, index }
    }

    /// All plazas in the snapshot.
    pub fn plazas(&self) -> &[TollPlaza] {
        &self.plazas
    }

    /// Plazas inside the given bounds, via the spatial index.
    pub fn plazas_within(&self, bounds: &Bounds) -> Vec<TollPlaza> {
        self.index
            .query_bounds(bounds)
            .into_iter()
            .map(|i| self.plazas[i].clone())
            .collect()
    }

    /// Get the number of plazas in the snapshot.
    pub fn len(&self) -> usize {
        self.plazas.len()
    }

    /// Check if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.plazas.is_empty()
    }
}

/// Handle to the current plaza snapshot.
///
/// `replace` is the only write path; it publishes a fully built snapshot
/// with a single atomic pointer swap.
pub struct PlazaStore {
    current: ArcSwap<PlazaSnapshot>,
}

impl Default for PlazaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlazaStore {
    /// Create a store with an empty snapshot.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(PlazaSnapshot::default()),
        }
    }

    /// Create a store pre-loaded with plazas.
    pub fn with_plazas(plazas: Vec<TollPlaza>) -> Self {
        Self {
            current: ArcSwap::from_pointee(PlazaSnapshot::new(plazas)),
        }
    }

    /// Replace the reference data with a freshly built snapshot.
    pub fn replace(&self, plazas: Vec<TollPlaza>) {
        info!("publishing plaza snapshot with {} plazas", plazas.len());
        self.current.store(Arc::new(PlazaSnapshot::new(plazas)));
    }

    /// The current snapshot. The returned `Arc` stays valid across
    /// concurrent `replace` calls.
    pub fn snapshot(&self) -> Arc<PlazaSnapshot> {
        self.current.load_full()
    }

    /// Get the number of plazas in the current snapshot.
    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    /// Check if the current snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }
}

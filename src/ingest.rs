//! CSV ingestion of toll plaza reference data.
//!
//! The reference data set is a CSV with headers `toll_name`, `latitude`,
//! `longitude` and optionally `geo_state`. Individual malformed rows
//! (missing fields, unparseable numbers, out-of-range coordinates) are
//! skipped with a warning so one bad row never aborts a load; a missing
//! required column or an unreadable file is a typed error.

use std::io::Read;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::error::{Result, TollMatchError};
use crate::{GeoPoint, TollPlaza};

const REQUIRED_COLUMNS: [&str; 3] = ["toll_name", "latitude", "longitude"];

/// Raw CSV row; numbers stay as strings so a bad value fails per-row.
#[derive(Debug, Deserialize)]
struct PlazaRecord {
    toll_name: String,
    latitude: String,
    longitude: String,
    #[serde(default)]
    geo_state: Option<String>,
}

/// Load toll plazas from a CSV file on disk.
pub fn load_plazas_csv(path: impl AsRef<Path>) -> Result<Vec<TollPlaza>> {
    let path = path.as_ref();
    info!("loading toll plazas from {}", path.display());

    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    read_plazas_from(reader)
}

/// Read toll plazas from any CSV source.
pub fn read_plazas(input: impl Read) -> Result<Vec<TollPlaza>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    read_plazas_from(reader)
}

fn read_plazas_from<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<TollPlaza>> {
    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(TollMatchError::MissingColumn { column });
        }
    }

    let mut plazas = Vec::new();
    for (row, result) in reader.deserialize::<PlazaRecord>().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping unreadable CSV row {}: {}", row + 1, e);
                continue;
            }
        };

        match parse_record(&record) {
            Some(plaza) => plazas.push(plaza),
            None => warn!(
                "skipping invalid CSV row {} ('{}')",
                row + 1,
                record.toll_name
            ),
        }
    }

    info!("loaded {} toll plazas", plazas.len());
    Ok(plazas)
}

fn parse_record(record: &PlazaRecord) -> Option<TollPlaza> {
    let name = record.toll_name.trim();
    if name.is_empty() {
        return None;
    }

    let latitude: f64 = record.latitude.trim().parse().ok()?;
    let longitude: f64 = record.longitude.trim().parse().ok()?;
    if !GeoPoint::new(latitude, longitude).is_valid() {
        return None;
    }

    let state = record
        .geo_state
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(TollPlaza {
        name: name.to_string(),
        state,
        latitude,
        longitude,
    })
}

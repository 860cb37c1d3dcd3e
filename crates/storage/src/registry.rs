//! Station metadata registry.
//!
//! Loaded once from a static CSV (`id,name,source_name,lat,lon,elevation_m,
//! type`). The precipitation pages spell a handful of station names
//! differently from the canonical metadata; `canonical_name` bridges the
//! two.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::info;

use precip_common::{PrecipError, Station};

/// In-memory station registry with name lookups.
#[derive(Debug, Clone)]
pub struct StationRegistry {
    stations: Vec<Station>,
    by_source_name: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl StationRegistry {
    /// Load the registry from a metadata CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PrecipError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|e| {
            PrecipError::StorageError(format!(
                "failed to open station file {}: {}",
                path.display(),
                e
            ))
        })?;
        let registry = Self::from_reader(file)?;
        info!(
            count = registry.len(),
            path = %path.display(),
            "Loaded station registry"
        );
        Ok(registry)
    }

    /// Parse registry CSV from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PrecipError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let mut stations: Vec<Station> = Vec::new();
        for record in csv_reader.deserialize() {
            let station: Station = record.map_err(|e| {
                PrecipError::StorageError(format!("bad station record: {}", e))
            })?;
            stations.push(station);
        }
        stations.sort_by(|a, b| a.name.cmp(&b.name));

        let mut by_source_name = HashMap::with_capacity(stations.len());
        let mut by_name = HashMap::with_capacity(stations.len());
        for (idx, station) in stations.iter().enumerate() {
            by_source_name.insert(station.source_name.clone(), idx);
            by_name.insert(station.name.clone(), idx);
        }

        Ok(Self {
            stations,
            by_source_name,
            by_name,
        })
    }

    /// All stations, sorted by canonical name.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Look up a station by the name the precipitation source uses.
    pub fn by_source_name(&self, source_name: &str) -> Option<&Station> {
        self.by_source_name
            .get(source_name)
            .map(|&idx| &self.stations[idx])
    }

    /// Look up a station by canonical name.
    pub fn by_name(&self, name: &str) -> Option<&Station> {
        self.by_name.get(name).map(|&idx| &self.stations[idx])
    }

    /// Canonical display name for a source-side station name.
    ///
    /// Stations absent from the registry keep their source spelling.
    pub fn canonical_name<'a>(&'a self, source_name: &'a str) -> &'a str {
        self.by_source_name(source_name)
            .map(|s| s.name.as_str())
            .unwrap_or(source_name)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

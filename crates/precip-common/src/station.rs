//! Station metadata.

use serde::{Deserialize, Serialize};

/// A fixed weather-monitoring location.
///
/// `source_name` is the spelling used by the precipitation pages; `name` is
/// the canonical display name shown in the dashboard. The two differ for a
/// handful of stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Stable CHMI identifier.
    pub id: String,
    /// Canonical display name.
    pub name: String,
    /// Name used by the precipitation source.
    pub source_name: String,
    pub lat: f64,
    pub lon: f64,
    /// Elevation above sea level in metres.
    pub elevation_m: i32,
    /// Station type code (e.g. "AKU", "MAN").
    #[serde(rename = "type")]
    pub station_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_csv_round_trip() {
        let station = Station {
            id: "P1PKLE01".to_string(),
            name: "Praha-Klementinum".to_string(),
            source_name: "Praha, Klementinum".to_string(),
            lat: 50.0865,
            lon: 14.4166,
            elevation_m: 191,
            station_type: "AKU".to_string(),
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&station).unwrap();
        let data = writer.into_inner().unwrap();

        let mut reader = csv::Reader::from_reader(data.as_slice());
        let parsed: Station = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(parsed, station);
    }
}

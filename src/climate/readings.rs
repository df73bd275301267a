//! JSON shapes returned by the query routes.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One precipitation row, serialized as `{"<date>": <prcp>}`.
///
/// Rows sharing a date stay separate objects; nothing is merged.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationReading {
    pub date: String,
    pub prcp: f64,
}

impl Serialize for PrecipitationReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.prcp)?;
        map.end()
    }
}

/// Temperature aggregate, serialized as `[min, avg, max]`.
///
/// Every field is `None` when no rows matched.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct TemperatureStats(pub Option<f64>, pub Option<f64>, pub Option<f64>);

impl TemperatureStats {
    pub fn min(&self) -> Option<f64> {
        self.0
    }

    pub fn avg(&self) -> Option<f64> {
        self.1
    }

    pub fn max(&self) -> Option<f64> {
        self.2
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none() && self.1.is_none() && self.2.is_none()
    }
}

impl From<(Option<f64>, Option<f64>, Option<f64>)> for TemperatureStats {
    fn from((min, avg, max): (Option<f64>, Option<f64>, Option<f64>)) -> Self {
        Self(min, avg, max)
    }
}

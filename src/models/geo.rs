use serde::{Deserialize, Serialize};

/// A captured GPS coordinate pair attached to a punch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Short "lat,lng" rendering for tables and logs.
    pub fn display(&self) -> String {
        format!("{:.5},{:.5}", self.latitude, self.longitude)
    }
}

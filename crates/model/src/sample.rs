use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataPointType {
    CurrentSpeed,
    FuelLevel,
}

/// A single kinematic measurement as understood by the tracking service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(rename = "type")]
    pub kind: DataPointType,
    pub value: f64,
}

/// One emitted telemetry sample: a waypoint and its datapoints share the
/// timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub latitude: f64,
    pub longitude: f64,
    /// meters per second
    pub speed: f64,
    /// percent, `(0, 100]`
    pub fuel_level: f64,
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    pub fn data_points(&self) -> Vec<DataPoint> {
        vec![
            DataPoint {
                kind: DataPointType::CurrentSpeed,
                value: self.speed,
            },
            DataPoint {
                kind: DataPointType::FuelLevel,
                value: self.fuel_level,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn data_points_use_service_type_names() {
        let sample = Sample {
            latitude: 57.0,
            longitude: 9.9,
            speed: 13.5,
            fuel_level: 99.5,
            timestamp: Utc.timestamp_millis_opt(1_463_000_000_123).unwrap(),
        };
        let json = serde_json::to_value(sample.data_points()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "type": "currentspeed", "value": 13.5 },
                { "type": "fuellevel", "value": 99.5 },
            ])
        );
        assert_eq!(sample.timestamp_ms(), 1_463_000_000_123);
    }
}

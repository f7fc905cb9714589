use serde::{Deserialize, Deserializer, Serialize};

/// One sensor acquisition. Either field may be absent when the sensor
/// could not be read; such readings are never transmitted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reading {
    pub humidity: Option<f64>,
    pub temperature: Option<f64>,
}

impl Reading {
    pub fn new(humidity: f64, temperature: f64) -> Self {
        Reading {
            humidity: Some(humidity),
            temperature: Some(temperature),
        }
    }

    pub fn empty() -> Self {
        Reading::default()
    }
}

/// JSON body POSTed to the collector's `/store` endpoint.
#[derive(Debug, PartialEq, Serialize)]
pub struct StorePayload {
    pub humidity: f64,
    pub temperature: f64,
    pub mac_address: String,
}

impl StorePayload {
    /// `None` unless both measurements are present.
    pub fn from_reading(reading: &Reading, mac_address: &str) -> Option<Self> {
        match (reading.humidity, reading.temperature) {
            (Some(humidity), Some(temperature)) => Some(StorePayload {
                humidity,
                temperature,
                mac_address: mac_address.to_string(),
            }),
            _ => None,
        }
    }
}

/// One stored sample returned by the collector's `/search` endpoint.
/// The collector serializes field values as strings, so both string
/// and plain number representations are accepted.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct HistoryPoint {
    #[serde(deserialize_with = "int_coerce")]
    pub timestamp: i64,
    #[serde(deserialize_with = "float_coerce")]
    pub temperature: f64,
    #[serde(deserialize_with = "float_coerce")]
    pub humidity: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrStr<T> {
    Num(T),
    Str(String),
}

fn float_coerce<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(v) => Ok(v),
        NumOrStr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn int_coerce<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(v) => Ok(v),
        NumOrStr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn payload_requires_both_measurements() {
        let mac = "11:22:33:44:55:66";

        assert!(StorePayload::from_reading(&Reading::empty(), mac).is_none());
        assert!(StorePayload::from_reading(
            &Reading {
                humidity: Some(55.0),
                temperature: None
            },
            mac
        )
        .is_none());
        assert!(StorePayload::from_reading(
            &Reading {
                humidity: None,
                temperature: Some(22.0)
            },
            mac
        )
        .is_none());

        let payload = StorePayload::from_reading(&Reading::new(55.0, 22.0), mac).unwrap();
        assert_eq!(payload.humidity, 55.0);
        assert_eq!(payload.temperature, 22.0);
        assert_eq!(payload.mac_address, mac);
    }

    #[test]
    fn payload_serializes_with_expected_field_names() {
        let payload = StorePayload {
            humidity: 55.0,
            temperature: 22.0,
            mac_address: "11:22:33:44:55:66".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"humidity": 55.0, "temperature": 22.0, "mac_address": "11:22:33:44:55:66"})
        );
    }

    #[test]
    fn history_point_parses_string_coerced_fields() {
        let points: Vec<HistoryPoint> = serde_json::from_str(
            r#"[{"timestamp":"1000","temperature":"21.5","humidity":"40.0"}]"#,
        )
        .unwrap();

        assert_eq!(
            points,
            vec![HistoryPoint {
                timestamp: 1000,
                temperature: 21.5,
                humidity: 40.0
            }]
        );
    }

    #[test]
    fn history_point_parses_plain_numbers() {
        let point: HistoryPoint =
            serde_json::from_value(json!({"timestamp": 1000, "temperature": 21.5, "humidity": 40}))
                .unwrap();

        assert_eq!(point.timestamp, 1000);
        assert_eq!(point.temperature, 21.5);
        assert_eq!(point.humidity, 40.0);
    }

    #[test]
    fn malformed_history_point_is_an_error() {
        let result: Result<HistoryPoint, _> = serde_json::from_value(json!({
            "timestamp": "not-a-number",
            "temperature": "21.5",
            "humidity": "40.0"
        }));

        assert!(result.is_err());
    }
}

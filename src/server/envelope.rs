//! Parsing of ingestion payloads.
//!
//! A sample arrives either as flat fields,
//! `{"latitude": 48.85, "longitude": 2.35, "speed": 4.2}`,
//! or wrapped under `data`, as a JSON-encoded string or as an object:
//! `{"data": "{\"latitude\": 48.85, \"longitude\": 2.35, \"speed\": 4.2}"}`.
//!
//! Absent fields read as `0`. Present fields must be finite numbers, or
//! strings holding one.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::server::error::ServerError;
use crate::server::wire::Numeric;
use crate::store::SensorPoint;

#[derive(Debug, Default, Deserialize)]
struct Sample {
    #[serde(default)]
    latitude: Numeric,
    #[serde(default)]
    longitude: Numeric,
    #[serde(default)]
    speed: Numeric,
}

impl From<Sample> for SensorPoint {
    fn from(sample: Sample) -> Self {
        SensorPoint::new(sample.latitude.0, sample.longitude.0, sample.speed.0)
    }
}

fn sample_of(object: Map<String, Value>, error: &'static str) -> Result<SensorPoint, ServerError> {
    serde_json::from_value::<Sample>(Value::Object(object))
        .map(SensorPoint::from)
        .map_err(|err| ServerError::malformed(error, err))
}

/// Extracts the sample carried by a raw ingestion body.
pub fn parse_sample(body: &[u8]) -> Result<SensorPoint, ServerError> {
    let mut object = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) if !object.is_empty() => object,
        Ok(_) => return Err(ServerError::malformed("No JSON body", "expected a JSON object")),
        Err(err) => return Err(ServerError::malformed("No JSON body", err)),
    };

    match object.remove("data") {
        Some(Value::String(encoded)) => match serde_json::from_str::<Value>(&encoded) {
            Ok(Value::Object(nested)) => sample_of(nested, "Invalid data JSON"),
            Ok(_) => Err(ServerError::malformed(
                "Invalid data JSON",
                "expected a JSON object",
            )),
            Err(err) => Err(ServerError::malformed("Invalid data JSON", err)),
        },
        Some(Value::Object(nested)) => sample_of(nested, "Invalid data JSON"),
        Some(_) => Err(ServerError::malformed(
            "Invalid data JSON",
            "data must be a JSON object or a JSON-encoded string",
        )),
        None => sample_of(object, "Invalid numeric values"),
    }
}

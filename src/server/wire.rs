//! JSON bodies exchanged over HTTP.
//!
//! Coordinates travel as `[lat, lon]` pairs and samples as
//! `[lat, lon, speed]` triples.

use geo::Point;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};

use crate::classify::{ChainEntry, CorridorReport, SegmentLabel};
use crate::geometry::Segment;
use crate::store::SensorPoint;

/// A finite number, given either as a JSON number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Numeric(pub f64);

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        let value = match Raw::deserialize(deserializer)
            .map_err(|_| D::Error::custom("expected a number or a numeric string"))?
        {
            Raw::Number(value) => value,
            Raw::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("{text:?} is not a number")))?,
        };

        if !value.is_finite() {
            return Err(D::Error::custom(format!("{value} is not a finite number")));
        }

        Ok(Numeric(value))
    }
}

/// `[lat, lon]`
pub type WirePosition = [Numeric; 2];

fn to_segment([[lat_a, lon_a], [lat_b, lon_b]]: [WirePosition; 2]) -> Segment {
    Segment::from_degrees((lat_a.0, lon_a.0), (lat_b.0, lon_b.0))
}

fn lat_lng(point: &Point) -> [f64; 2] {
    [point.y(), point.x()]
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComputeRequest {
    #[serde(rename = "latA")]
    pub lat_a: Numeric,
    #[serde(rename = "lonA")]
    pub lon_a: Numeric,
    #[serde(rename = "latB")]
    pub lat_b: Numeric,
    #[serde(rename = "lonB")]
    pub lon_b: Numeric,
    /// Corridor half-width in meters.
    #[serde(default)]
    pub corridor: Option<Numeric>,
}

impl ComputeRequest {
    pub fn segment(&self) -> Segment {
        Segment::from_degrees((self.lat_a.0, self.lon_a.0), (self.lat_b.0, self.lon_b.0))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComputeMultipleRequest {
    pub segments: Vec<[WirePosition; 2]>,
    #[serde(default)]
    pub corridor: Option<Numeric>,
}

impl ComputeMultipleRequest {
    pub fn segments(&self) -> Vec<Segment> {
        self.segments.iter().copied().map(to_segment).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsResponse {
    pub points: Vec<[f64; 3]>,
}

impl From<Vec<SensorPoint>> for PointsResponse {
    fn from(points: Vec<SensorPoint>) -> Self {
        PointsResponse {
            points: points
                .iter()
                .map(|point| [point.latitude, point.longitude, point.speed])
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResponse {
    pub on_street: Vec<[f64; 2]>,
    pub off_street: Vec<[f64; 2]>,
    pub avg_speed: f64,
}

impl From<CorridorReport> for ComputeResponse {
    fn from(report: CorridorReport) -> Self {
        ComputeResponse {
            on_street: report.on_points.iter().map(lat_lng).collect(),
            off_street: report.off_points.iter().map(lat_lng).collect(),
            avg_speed: report.average_speed,
        }
    }
}

/// Positional entries serialize as their index, the chain summary as `"A->Z"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireLabel {
    Index(usize),
    Span(String),
}

impl From<SegmentLabel> for WireLabel {
    fn from(label: SegmentLabel) -> Self {
        match label {
            SegmentLabel::Index(index) => WireLabel::Index(index),
            SegmentLabel::Summary => WireLabel::Span(label.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainResult {
    pub segment_index: WireLabel,
    pub on_count: usize,
    pub off_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputeMultipleResponse {
    pub results: Vec<ChainResult>,
}

impl From<Vec<ChainEntry>> for ComputeMultipleResponse {
    fn from(entries: Vec<ChainEntry>) -> Self {
        ComputeMultipleResponse {
            results: entries
                .into_iter()
                .map(|entry| ChainResult {
                    segment_index: entry.label.into(),
                    on_count: entry.count.on,
                    off_count: entry.count.off,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushResponse {
    pub status: &'static str,
    pub count: usize,
}

//! Seeds the store from a CSV export of recorded samples.
//!
//! The file must carry a header row naming `Latitude`, `Longitude` and `Speed`
//! columns, in any order and alongside any other columns. Rows missing one of
//! the three values, or holding a value which is not a finite number, are
//! skipped. Failures reading the source itself abort the load.

#[doc(hidden)]
pub mod error;

#[doc(inline)]
pub use error::BootstrapError;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};

use crate::store::SensorPoint;

pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const SPEED: &str = "Speed";

/// Positions of the three required columns within a record.
struct Columns {
    latitude: usize,
    longitude: usize,
    speed: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, BootstrapError> {
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or(BootstrapError::MissingColumn(name))
        };

        Ok(Columns {
            latitude: column(LATITUDE)?,
            longitude: column(LONGITUDE)?,
            speed: column(SPEED)?,
        })
    }

    fn parse(&self, record: &StringRecord) -> Option<SensorPoint> {
        let cell = |index: usize| -> Option<f64> {
            record
                .get(index)
                .filter(|value| !value.is_empty())?
                .parse::<f64>()
                .ok()
        };

        Some(SensorPoint::new(
            cell(self.latitude)?,
            cell(self.longitude)?,
            cell(self.speed)?,
        ))
        .filter(SensorPoint::is_finite)
    }
}

/// Reads every well-formed sample from a headed CSV source.
pub fn read_points<R: Read>(source: R) -> Result<Vec<SensorPoint>, BootstrapError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let columns = Columns::locate(reader.headers()?)?;

    let mut skipped = 0usize;
    let mut points = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => Some(record),
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(_) => None,
        };

        match record.and_then(|record| columns.parse(&record)) {
            Some(point) => points.push(point),
            None => {
                debug!("Skipping malformed row {}", row + 1);
                skipped += 1;
            }
        }
    }

    info!("Read {} points ({} rows skipped)", points.len(), skipped);
    Ok(points)
}

/// Reads every well-formed sample from the CSV file at `path`.
pub fn load_file(path: impl AsRef<Path>) -> crate::Result<Vec<SensorPoint>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    info!("Loading points from {}", path.display());
    Ok(read_points(file)?)
}

//! CSV ingestion
//!
//! Parses the delimited source file and discards rows whose required
//! numeric fields are missing or non-finite, so every surviving record
//! carries finite values for all ranked metrics. Projection coordinates
//! are optional per row.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;

use aq_core::Year;

use crate::dataset::Dataset;
use crate::record::Record;
use crate::DataError;

/// Raw CSV row as it appears in the source file. Numeric cells may be
/// blank; blanks deserialize to `None` and disqualify the row when the
/// field is required.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Continent", default)]
    continent: String,
    #[serde(rename = "Year")]
    year: Year,
    #[serde(rename = "Value - GDP per capita", default)]
    gdp_per_capita: Option<f64>,
    #[serde(rename = "Value - HDI", default)]
    hdi: Option<f64>,
    #[serde(rename = "Value - Water Use Efficiency", default)]
    water_use_efficiency: Option<f64>,
    #[serde(rename = "Value - Water Stress", default)]
    water_stress: Option<f64>,
    #[serde(rename = "TSNE_1", default)]
    tsne_1: Option<f64>,
    #[serde(rename = "TSNE_2", default)]
    tsne_2: Option<f64>,
}

impl RawRow {
    fn into_record(self) -> Option<Record> {
        let gdp_per_capita = finite(self.gdp_per_capita)?;
        let hdi = finite(self.hdi)?;
        let water_use_efficiency = finite(self.water_use_efficiency)?;
        let water_stress = finite(self.water_stress)?;

        let projection = match (finite(self.tsne_1), finite(self.tsne_2)) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        };

        Some(Record {
            country: self.country,
            continent: self.continent,
            year: self.year,
            gdp_per_capita,
            hdi,
            water_use_efficiency,
            water_stress,
            projection,
        })
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// CSV data source for loading the indicator dataset
pub struct CsvSource;

impl CsvSource {
    /// Load a dataset from a CSV file
    pub fn load(path: &Path) -> Result<Dataset, DataError> {
        let file = File::open(path)?;
        tracing::info!(path = %path.display(), "loading dataset");
        Self::read(BufReader::new(file))
    }

    /// Load a dataset from any CSV reader
    pub fn read<R: Read>(reader: R) -> Result<Dataset, DataError> {
        let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let mut kept = Vec::new();
        let mut dropped = 0usize;
        for result in csv_reader.deserialize::<RawRow>() {
            let row = match result {
                Ok(row) => row,
                Err(err) => {
                    tracing::debug!("skipping malformed row: {err}");
                    dropped += 1;
                    continue;
                }
            };
            match row.into_record() {
                Some(record) => kept.push(record),
                None => dropped += 1,
            }
        }

        tracing::info!(kept = kept.len(), dropped, "ingested records");
        Dataset::new(kept)
    }
}

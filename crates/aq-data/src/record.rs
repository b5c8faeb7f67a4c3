//! Per-(country, year) observation record

use aq_core::Year;

/// Canonical metric column names, matching the source data headers. These
/// double as the metric keys accepted by the rank engine.
pub mod columns {
    pub const GDP_PER_CAPITA: &str = "Value - GDP per capita";
    pub const HDI: &str = "Value - HDI";
    pub const WATER_USE_EFFICIENCY: &str = "Value - Water Use Efficiency";
    pub const WATER_STRESS: &str = "Value - Water Stress";

    /// Every metric column, in display order.
    pub const ALL: [&str; 4] = [GDP_PER_CAPITA, HDI, WATER_USE_EFFICIENCY, WATER_STRESS];
}

/// One country/year observation. All metric values are finite once a
/// record has survived ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub country: String,
    pub continent: String,
    pub year: Year,
    pub gdp_per_capita: f64,
    pub hdi: f64,
    pub water_use_efficiency: f64,
    pub water_stress: f64,
    /// 2D projection coordinates, when present in the source data.
    pub projection: Option<(f64, f64)>,
}

impl Record {
    /// Resolve a metric column name to this record's value. `None` for
    /// unrecognized keys.
    pub fn metric_value(&self, metric: &str) -> Option<f64> {
        match metric {
            columns::GDP_PER_CAPITA => Some(self.gdp_per_capita),
            columns::HDI => Some(self.hdi),
            columns::WATER_USE_EFFICIENCY => Some(self.water_use_efficiency),
            columns::WATER_STRESS => Some(self.water_stress),
            _ => None,
        }
    }
}

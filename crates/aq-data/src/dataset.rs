//! Immutable dataset with derived navigation views

use aq_core::Year;
use indexmap::IndexSet;

use crate::record::Record;
use crate::DataError;

/// The full record set, loaded once and never mutated. Distinct years and
/// countries are derived at construction.
pub struct Dataset {
    records: Vec<Record>,
    years: Vec<Year>,
    countries: IndexSet<String>,
}

impl Dataset {
    /// Build a dataset from ingested records. At least one record is
    /// required; an empty dataset cannot seed the scrubber.
    pub fn new(records: Vec<Record>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::EmptyDataset);
        }

        let mut years: Vec<Year> = records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();

        // Insertion order, matching how the country selector lists them.
        let countries: IndexSet<String> =
            records.iter().map(|r| r.country.clone()).collect();

        Ok(Self {
            records,
            years,
            countries,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct years, ascending
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    /// Distinct country names, in first-appearance order
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(String::as_str)
    }

    pub fn contains_country(&self, country: &str) -> bool {
        self.countries.contains(country)
    }

    /// All records for one year, in dataset order
    pub fn slice(&self, year: Year) -> Vec<&Record> {
        self.records.iter().filter(|r| r.year == year).collect()
    }

    /// All records for one country, ascending by year (trajectory order)
    pub fn for_country(&self, country: &str) -> Vec<&Record> {
        let mut records: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| r.country == country)
            .collect();
        records.sort_by_key(|r| r.year);
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, year: Year) -> Record {
        Record {
            country: country.to_owned(),
            continent: "Europe".to_owned(),
            year,
            gdp_per_capita: 1000.0,
            hdi: 0.5,
            water_use_efficiency: 10.0,
            water_stress: 20.0,
            projection: None,
        }
    }

    #[test]
    fn empty_record_set_is_rejected() {
        assert!(matches!(
            Dataset::new(Vec::new()),
            Err(DataError::EmptyDataset)
        ));
    }

    #[test]
    fn years_are_distinct_and_ascending() {
        let dataset = Dataset::new(vec![
            record("France", 2012),
            record("Brazil", 2010),
            record("France", 2010),
            record("Brazil", 2012),
        ])
        .unwrap();

        assert_eq!(dataset.years(), &[2010, 2012]);
    }

    #[test]
    fn countries_keep_first_appearance_order() {
        let dataset = Dataset::new(vec![
            record("France", 2010),
            record("Brazil", 2010),
            record("France", 2011),
            record("Chad", 2010),
        ])
        .unwrap();

        let countries: Vec<&str> = dataset.countries().collect();
        assert_eq!(countries, vec!["France", "Brazil", "Chad"]);
    }

    #[test]
    fn slice_filters_by_year() {
        let dataset = Dataset::new(vec![
            record("France", 2010),
            record("Brazil", 2011),
            record("Chad", 2010),
        ])
        .unwrap();

        let slice = dataset.slice(2010);
        let countries: Vec<&str> = slice.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["France", "Chad"]);
        assert!(dataset.slice(1999).is_empty());
    }

    #[test]
    fn trajectories_come_back_in_year_order() {
        let dataset = Dataset::new(vec![
            record("France", 2012),
            record("Brazil", 2010),
            record("France", 2010),
            record("France", 2011),
        ])
        .unwrap();

        let years: Vec<Year> = dataset
            .for_country("France")
            .iter()
            .map(|r| r.year)
            .collect();
        assert_eq!(years, vec![2010, 2011, 2012]);
    }
}

//! Country ranking for one metric over a year slice

use ahash::AHashMap;

use crate::record::{columns, Record};
use crate::DataError;

/// Result of ranking a year slice on one metric
#[derive(Debug, Clone, PartialEq)]
pub struct RankResult {
    /// Country name to 1-based rank position.
    pub rankings: AHashMap<String, usize>,
    /// Countries ordered by rank.
    pub ordered: Vec<String>,
}

/// Rank every record in `slice` by `metric`. Ranks are the 1-based sorted
/// positions, a permutation of `1..=slice.len()`.
///
/// Equal values keep their relative order from `slice`. That tie-break is
/// a contract, not an accident: the rank order for tied countries must be
/// identical across redraws given the same input order, or their labels
/// would swap places from frame to frame.
pub fn rank(slice: &[&Record], metric: &str, ascending: bool) -> Result<RankResult, DataError> {
    if !columns::ALL.contains(&metric) {
        return Err(DataError::InvalidMetric(metric.to_owned()));
    }

    let mut pairs: Vec<(&str, f64)> = slice
        .iter()
        .filter_map(|r| r.metric_value(metric).map(|v| (r.country.as_str(), v)))
        .collect();

    // Stable sort: ties preserve slice order in both directions.
    pairs.sort_by(|a, b| {
        if ascending {
            a.1.total_cmp(&b.1)
        } else {
            b.1.total_cmp(&a.1)
        }
    });

    let mut rankings = AHashMap::with_capacity(pairs.len());
    let mut ordered = Vec::with_capacity(pairs.len());
    for (position, (country, _)) in pairs.iter().enumerate() {
        rankings.insert((*country).to_owned(), position + 1);
        ordered.push((*country).to_owned());
    }

    Ok(RankResult { rankings, ordered })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, gdp: f64) -> Record {
        Record {
            country: country.to_owned(),
            continent: "Europe".to_owned(),
            year: 2015,
            gdp_per_capita: gdp,
            hdi: 0.5,
            water_use_efficiency: 10.0,
            water_stress: 20.0,
            projection: None,
        }
    }

    #[test]
    fn ranks_descending_by_default_direction() {
        let a = record("A", 100.0);
        let b = record("B", 300.0);
        let c = record("C", 200.0);
        let slice = vec![&a, &b, &c];

        let result = rank(&slice, columns::GDP_PER_CAPITA, false).unwrap();
        assert_eq!(result.ordered, vec!["B", "C", "A"]);
        assert_eq!(result.rankings["B"], 1);
        assert_eq!(result.rankings["C"], 2);
        assert_eq!(result.rankings["A"], 3);
    }

    #[test]
    fn ranks_ascending_when_lower_is_better() {
        let a = record("A", 100.0);
        let b = record("B", 300.0);
        let slice = vec![&a, &b];

        let result = rank(&slice, columns::GDP_PER_CAPITA, true).unwrap();
        assert_eq!(result.ordered, vec!["A", "B"]);
    }

    #[test]
    fn ties_keep_slice_order() {
        let a = record("A", 10.0);
        let b = record("B", 5.0);
        let c = record("C", 10.0);
        let slice = vec![&a, &b, &c];

        let result = rank(&slice, columns::GDP_PER_CAPITA, false).unwrap();
        assert_eq!(result.ordered, vec!["A", "C", "B"]);
        assert_eq!(result.rankings["A"], 1);
        assert_eq!(result.rankings["C"], 2);
        assert_eq!(result.rankings["B"], 3);
    }

    #[test]
    fn ranks_are_a_permutation_of_one_to_n() {
        let records: Vec<Record> = (0..17)
            .map(|i| record(&format!("C{i}"), (i % 5) as f64))
            .collect();
        let slice: Vec<&Record> = records.iter().collect();

        let result = rank(&slice, columns::GDP_PER_CAPITA, false).unwrap();
        let mut positions: Vec<usize> = result.rankings.values().copied().collect();
        positions.sort_unstable();
        let expected: Vec<usize> = (1..=slice.len()).collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn identical_input_yields_identical_output() {
        let a = record("A", 10.0);
        let b = record("B", 10.0);
        let c = record("C", 7.5);
        let slice = vec![&a, &b, &c];

        let first = rank(&slice, columns::GDP_PER_CAPITA, false).unwrap();
        let second = rank(&slice, columns::GDP_PER_CAPITA, false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_metric_is_an_error() {
        let a = record("A", 10.0);
        let slice = vec![&a];

        let err = rank(&slice, "Value - Rainfall", false).unwrap_err();
        assert!(matches!(err, DataError::InvalidMetric(name) if name == "Value - Rainfall"));
    }

    #[test]
    fn empty_slice_ranks_to_empty_result() {
        let result = rank(&[], columns::HDI, false).unwrap();
        assert!(result.rankings.is_empty());
        assert!(result.ordered.is_empty());
    }
}

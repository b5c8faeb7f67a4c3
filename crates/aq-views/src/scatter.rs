//! GDP/HDI scatter with country trajectories
//!
//! One point per country for the current year (x = HDI, y = GDP per
//! capita, point size driven by water-use efficiency, color keyed by
//! continent), plus the selected country's trajectory across all years.
//! Axis domains span the whole dataset so they stay fixed during
//! playback.

use std::sync::Arc;

use parking_lot::RwLock;

use aq_core::{Selection, SelectionObserver};
use aq_data::{Dataset, Record};

/// Fixed axis extents computed over the full dataset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDomains {
    /// HDI extent.
    pub x: (f64, f64),
    /// GDP per capita extent.
    pub y: (f64, f64),
}

/// One plotted country
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub country: String,
    pub continent: String,
    pub x: f64,
    pub y: f64,
    /// Size driver (water-use efficiency).
    pub size: f64,
    pub selected: bool,
}

/// Chart-ready scatter state
#[derive(Debug, Clone, Default)]
pub struct ScatterFrame {
    pub title: String,
    /// Large background year watermark.
    pub year_label: String,
    pub points: Vec<ScatterPoint>,
    /// Selected country's (HDI, GDP) path in ascending year order.
    pub trajectory: Vec<(f64, f64)>,
    /// Tooltip lines for the selected country, empty when it has no data
    /// this year.
    pub tooltip: Vec<String>,
}

/// Scatter/trajectory view model
pub struct ScatterTrajectoryView {
    dataset: Arc<Dataset>,
    domains: AxisDomains,
    frame: RwLock<ScatterFrame>,
}

impl ScatterTrajectoryView {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let domains = axis_domains(dataset.records());
        Self {
            dataset,
            domains,
            frame: RwLock::new(ScatterFrame::default()),
        }
    }

    pub fn domains(&self) -> AxisDomains {
        self.domains
    }

    /// Latest computed frame
    pub fn frame(&self) -> ScatterFrame {
        self.frame.read().clone()
    }

    /// Recompute the scatter for a selection
    pub fn update(&self, selection: &Selection) {
        let slice = self.dataset.slice(selection.year);
        let selected = selection.country.as_deref();

        let points: Vec<ScatterPoint> = slice
            .iter()
            .map(|r| ScatterPoint {
                country: r.country.clone(),
                continent: r.continent.clone(),
                x: r.hdi,
                y: r.gdp_per_capita,
                size: r.water_use_efficiency,
                selected: Some(r.country.as_str()) == selected,
            })
            .collect();

        let trajectory: Vec<(f64, f64)> = selected
            .map(|country| {
                self.dataset
                    .for_country(country)
                    .iter()
                    .map(|r| (r.hdi, r.gdp_per_capita))
                    .collect()
            })
            .unwrap_or_default();

        let tooltip = selected
            .and_then(|country| slice.iter().find(|r| r.country == country))
            .map(|r| tooltip_lines(r))
            .unwrap_or_default();

        tracing::debug!(year = selection.year, points = points.len(), "scatter updated");
        *self.frame.write() = ScatterFrame {
            title: format!("GDP & HDI per Country in {}", selection.year),
            year_label: selection.year.to_string(),
            points,
            trajectory,
            tooltip,
        };
    }
}

impl SelectionObserver for ScatterTrajectoryView {
    fn on_selection_change(&self, selection: &Selection) {
        self.update(selection);
    }
}

fn tooltip_lines(record: &Record) -> Vec<String> {
    vec![
        format!("Country: {}", record.country),
        format!("HDI: {}", record.hdi),
        format!("GDP per capita: {}", record.gdp_per_capita),
        format!("Continent: {}", record.continent),
    ]
}

fn axis_domains(records: &[Record]) -> AxisDomains {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for record in records {
        x.0 = x.0.min(record.hdi);
        x.1 = x.1.max(record.hdi);
        y.0 = y.0.min(record.gdp_per_capita);
        y.1 = y.1.max(record.gdp_per_capita);
    }
    AxisDomains { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, year: i32, hdi: f64, gdp: f64) -> Record {
        Record {
            country: country.to_owned(),
            continent: "Europe".to_owned(),
            year,
            gdp_per_capita: gdp,
            hdi,
            water_use_efficiency: 12.0,
            water_stress: 3.0,
            projection: None,
        }
    }

    fn view() -> ScatterTrajectoryView {
        let dataset = Arc::new(
            Dataset::new(vec![
                record("France", 2010, 0.87, 34_000.0),
                record("France", 2011, 0.88, 35_000.0),
                record("France", 2012, 0.89, 36_000.0),
                record("Brazil", 2010, 0.70, 11_000.0),
                record("Brazil", 2011, 0.71, 11_500.0),
            ])
            .unwrap(),
        );
        ScatterTrajectoryView::new(dataset)
    }

    #[test]
    fn domains_span_the_whole_dataset() {
        let view = view();
        assert_eq!(view.domains().x, (0.70, 0.89));
        assert_eq!(view.domains().y, (11_000.0, 36_000.0));
    }

    #[test]
    fn plots_the_year_slice_with_the_selection_flagged() {
        let view = view();
        view.update(&Selection {
            year: 2010,
            country: Some("France".to_owned()),
        });

        let frame = view.frame();
        assert_eq!(frame.title, "GDP & HDI per Country in 2010");
        assert_eq!(frame.year_label, "2010");
        assert_eq!(frame.points.len(), 2);

        let france = frame.points.iter().find(|p| p.country == "France").unwrap();
        assert!(france.selected);
        assert_eq!(france.x, 0.87);
        assert_eq!(france.y, 34_000.0);
        assert!(!frame.points.iter().find(|p| p.country == "Brazil").unwrap().selected);
    }

    #[test]
    fn trajectory_follows_the_selected_country_across_years() {
        let view = view();
        view.update(&Selection {
            year: 2011,
            country: Some("France".to_owned()),
        });

        let frame = view.frame();
        assert_eq!(
            frame.trajectory,
            vec![(0.87, 34_000.0), (0.88, 35_000.0), (0.89, 36_000.0)]
        );
        assert_eq!(frame.tooltip[0], "Country: France");
        assert_eq!(frame.tooltip[3], "Continent: Europe");
    }

    #[test]
    fn selection_without_data_this_year_has_no_tooltip() {
        let view = view();
        // Brazil has no 2012 record; the trajectory still draws from the
        // years it does have.
        view.update(&Selection {
            year: 2012,
            country: Some("Brazil".to_owned()),
        });

        let frame = view.frame();
        assert!(frame.tooltip.is_empty());
        assert_eq!(frame.trajectory.len(), 2);
        assert!(frame.points.iter().all(|p| !p.selected));
    }

    #[test]
    fn no_selection_plots_points_only() {
        let view = view();
        view.update(&Selection {
            year: 2010,
            country: None,
        });

        let frame = view.frame();
        assert!(frame.trajectory.is_empty());
        assert!(frame.tooltip.is_empty());
        assert_eq!(frame.points.len(), 2);
    }
}

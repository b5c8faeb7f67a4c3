//! 2D indicator projection
//!
//! Plots each country of the current year slice at its precomputed
//! projection coordinates on a fixed [-1, 1] x [-1, 1] domain. Records
//! without coordinates are skipped.

use std::sync::Arc;

use parking_lot::RwLock;

use aq_core::{Selection, SelectionObserver};
use aq_data::Dataset;

/// Normalized coordinate extent for both axes.
pub const PROJECTION_DOMAIN: (f64, f64) = (-1.0, 1.0);

/// One projected country
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionPoint {
    pub country: String,
    pub continent: String,
    pub x: f64,
    pub y: f64,
    pub selected: bool,
}

/// Chart-ready projection state
#[derive(Debug, Clone, Default)]
pub struct ProjectionFrame {
    pub title: String,
    pub points: Vec<ProjectionPoint>,
}

/// Projection view model
pub struct ProjectionView {
    dataset: Arc<Dataset>,
    frame: RwLock<ProjectionFrame>,
}

impl ProjectionView {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            frame: RwLock::new(ProjectionFrame::default()),
        }
    }

    /// Latest computed frame
    pub fn frame(&self) -> ProjectionFrame {
        self.frame.read().clone()
    }

    /// Recompute the projection for a selection
    pub fn update(&self, selection: &Selection) {
        let slice = self.dataset.slice(selection.year);
        let selected = selection.country.as_deref();

        let points: Vec<ProjectionPoint> = slice
            .iter()
            .filter_map(|r| {
                let (x, y) = r.projection?;
                Some(ProjectionPoint {
                    country: r.country.clone(),
                    continent: r.continent.clone(),
                    x,
                    y,
                    selected: Some(r.country.as_str()) == selected,
                })
            })
            .collect();

        tracing::debug!(
            year = selection.year,
            plotted = points.len(),
            skipped = slice.len() - points.len(),
            "projection updated"
        );
        *self.frame.write() = ProjectionFrame {
            title: "2D visualization of several water indicators".to_owned(),
            points,
        };
    }
}

impl SelectionObserver for ProjectionView {
    fn on_selection_change(&self, selection: &Selection) {
        self.update(selection);
    }
}

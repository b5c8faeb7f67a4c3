//! Aquascope application entry point
//!
//! Loads the indicator CSV, wires the scrubber, selection and chart
//! views together, and drives playback until interrupted.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use aq_core::{
    FrameSubscriber, Scheduler, Scrubber, Selection, SelectionModel, SelectionObserver,
    SystemClock, Year,
};
use aq_data::CsvSource;
use aq_views::{ProjectionView, RankingBoardConfig, RankingBoardView, ScatterTrajectoryView};

mod config;
mod driver;

use config::AppConfig;

/// Forwards scrubber frame changes into the shared selection
struct YearBridge {
    selection: Arc<SelectionModel>,
}

impl FrameSubscriber for YearBridge {
    fn on_frame_change(&self, value: Year) {
        self.selection.set_year(value);
    }
}

/// Reports every redraw-triggering selection change
struct RedrawLogger;

impl SelectionObserver for RedrawLogger {
    fn on_selection_change(&self, selection: &Selection) {
        match selection.country.as_deref() {
            Some(country) => info!(year = selection.year, country, "views redrawn"),
            None => info!(year = selection.year, "views redrawn"),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let data_path: PathBuf = args
        .next()
        .context("usage: aquascope <data.csv> [config.json]")?
        .into();
    let app_config = match args.next() {
        Some(path) => AppConfig::load(Path::new(&path))?,
        None => AppConfig::default(),
    };

    let dataset = Arc::new(CsvSource::load(&data_path)?);
    if let Some(country) = &app_config.default_country {
        if !dataset.contains_country(country) {
            warn!(country = %country, "default country has no records in the dataset");
        }
    }

    let years = dataset.years().to_vec();
    let selection = Arc::new(SelectionModel::new(
        years.clone(),
        app_config.default_country.clone(),
    )?);

    let clock = Arc::new(SystemClock);
    let scheduler = Arc::new(match app_config.frame_interval_ms {
        Some(ms) => Scheduler::with_frame_interval(clock, Duration::from_millis(ms)),
        None => Scheduler::new(clock),
    });
    let scrubber = Arc::new(Scrubber::new(
        years.clone(),
        app_config.scrubber.clone(),
        scheduler,
    )?);

    // Chart views redraw on every selection change, in registration order.
    let ranking = Arc::new(RankingBoardView::new(
        dataset.clone(),
        RankingBoardConfig::default(),
    ));
    let scatter = Arc::new(ScatterTrajectoryView::new(dataset.clone()));
    let projection = Arc::new(ProjectionView::new(dataset.clone()));
    selection.subscribe(ranking.clone());
    selection.subscribe(scatter.clone());
    selection.subscribe(projection.clone());
    let logger = Arc::new(RedrawLogger);
    selection.subscribe(logger.clone());

    let bridge = Arc::new(YearBridge {
        selection: selection.clone(),
    });
    scrubber.subscribe(bridge.clone());

    // Initial render with the starting selection.
    let initial = selection.snapshot();
    ranking.update(&initial);
    scatter.update(&initial);
    projection.update(&initial);

    info!(
        records = dataset.len(),
        years = years.len(),
        countries = dataset.countries().count(),
        "aquascope ready"
    );

    tokio::select! {
        _ = driver::drive(scrubber.clone()) => {}
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }
    scrubber.stop();
    Ok(())
}

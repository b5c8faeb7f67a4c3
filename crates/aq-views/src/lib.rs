//! Headless view models for the aquascope charts
//!
//! Each view implements [`aq_core::SelectionObserver`], recomputes its
//! chart-ready frame on every selection change, and caches the latest
//! frame for a renderer to read. No pixels are produced here; the view
//! models stop at the data the charts are drawn from.

mod projection;
mod ranking_board;
mod scatter;

pub use projection::{ProjectionFrame, ProjectionPoint, ProjectionView, PROJECTION_DOMAIN};
pub use ranking_board::{
    MetricColumn, MetricSpec, RankingBoardConfig, RankingBoardFrame, RankingBoardView,
    SelectedRank,
};
pub use scatter::{AxisDomains, ScatterFrame, ScatterPoint, ScatterTrajectoryView};

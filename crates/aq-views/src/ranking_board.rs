//! Per-metric country ranking board
//!
//! For the current year slice, ranks every country on each configured
//! metric and carries the selected country's rank position and formatted
//! value per column.

use std::sync::Arc;

use parking_lot::RwLock;

use aq_core::{Selection, SelectionObserver};
use aq_data::record::columns;
use aq_data::{rank, Dataset};

/// One metric column with its sort direction
#[derive(Debug, Clone)]
pub struct MetricSpec {
    pub column: String,
    /// Rank ascending (lower value is better) or descending.
    pub ascending: bool,
}

/// Ranking board configuration
#[derive(Debug, Clone)]
pub struct RankingBoardConfig {
    /// Metric columns in display order.
    pub metrics: Vec<MetricSpec>,
}

impl Default for RankingBoardConfig {
    fn default() -> Self {
        // Higher is better everywhere except water stress.
        Self {
            metrics: vec![
                MetricSpec {
                    column: columns::GDP_PER_CAPITA.to_owned(),
                    ascending: false,
                },
                MetricSpec {
                    column: columns::HDI.to_owned(),
                    ascending: false,
                },
                MetricSpec {
                    column: columns::WATER_USE_EFFICIENCY.to_owned(),
                    ascending: false,
                },
                MetricSpec {
                    column: columns::WATER_STRESS.to_owned(),
                    ascending: true,
                },
            ],
        }
    }
}

/// The selected country's position in one metric column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRank {
    pub rank: usize,
    pub value_label: String,
}

/// One rendered metric column
#[derive(Debug, Clone)]
pub struct MetricColumn {
    pub metric: String,
    /// Display label, e.g. `GDP PER CAPITA`.
    pub label: String,
    /// Countries ordered by rank.
    pub ordered: Vec<String>,
    /// `None` when no country is selected or the selection has no data
    /// this year.
    pub selected: Option<SelectedRank>,
}

/// Chart-ready ranking board state
#[derive(Debug, Clone, Default)]
pub struct RankingBoardFrame {
    pub title: String,
    pub columns: Vec<MetricColumn>,
}

/// Ranking board view model
pub struct RankingBoardView {
    dataset: Arc<Dataset>,
    config: RankingBoardConfig,
    frame: RwLock<RankingBoardFrame>,
}

impl RankingBoardView {
    pub fn new(dataset: Arc<Dataset>, config: RankingBoardConfig) -> Self {
        Self {
            dataset,
            config,
            frame: RwLock::new(RankingBoardFrame::default()),
        }
    }

    /// Latest computed frame
    pub fn frame(&self) -> RankingBoardFrame {
        self.frame.read().clone()
    }

    /// Recompute the board for a selection
    pub fn update(&self, selection: &Selection) {
        let slice = self.dataset.slice(selection.year);
        let mut board_columns = Vec::with_capacity(self.config.metrics.len());

        for spec in &self.config.metrics {
            let result = match rank(&slice, &spec.column, spec.ascending) {
                Ok(result) => result,
                Err(err) => {
                    tracing::error!("ranking failed for '{}': {err}", spec.column);
                    continue;
                }
            };

            let selected = selection.country.as_deref().and_then(|country| {
                let position = *result.rankings.get(country)?;
                let record = slice.iter().find(|r| r.country == country)?;
                let value = record.metric_value(&spec.column)?;
                Some(SelectedRank {
                    rank: position,
                    value_label: format_metric(&spec.column, value),
                })
            });

            board_columns.push(MetricColumn {
                metric: spec.column.clone(),
                label: metric_label(&spec.column),
                ordered: result.ordered,
                selected,
            });
        }

        let title = match selection.country.as_deref() {
            Some(country) => format!("Rankings for {country} in {}", selection.year),
            None => format!("Rankings in {}", selection.year),
        };

        tracing::debug!(
            year = selection.year,
            countries = slice.len(),
            "ranking board updated"
        );
        *self.frame.write() = RankingBoardFrame {
            title,
            columns: board_columns,
        };
    }
}

impl SelectionObserver for RankingBoardView {
    fn on_selection_change(&self, selection: &Selection) {
        self.update(selection);
    }
}

fn metric_label(column: &str) -> String {
    column
        .strip_prefix("Value - ")
        .unwrap_or(column)
        .to_uppercase()
}

fn format_metric(column: &str, value: f64) -> String {
    if column == columns::GDP_PER_CAPITA {
        format!("${}", group_thousands(value))
    } else {
        format!("{value}")
    }
}

/// Thousands grouping on the integer part, locale-style
fn group_thousands(value: f64) -> String {
    let formatted = format!("{value}");
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

//! Playback controller for the time scrubber

use serde::{Deserialize, Serialize};

mod scrubber;
mod subscriber;

pub use scrubber::Scrubber;
pub use subscriber::FrameSubscriber;

/// Direction of travel through the frame sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    pub(crate) fn signum(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Whether the controller currently has a scheduled advancement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Running,
}

/// Scrubber playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrubberConfig {
    /// Starting frame position
    pub initial_index: usize,
    /// Initial playback direction
    pub direction: Direction,
    /// Tick period in milliseconds; unset selects frame-driven timing
    pub delay_ms: Option<u64>,
    /// Start in the running state
    pub autoplay: bool,
    /// Wrap at boundaries instead of stopping
    pub looping: bool,
    /// Extra pause at the loop boundary before resuming
    pub loop_delay_ms: Option<u64>,
    /// Reverse direction at boundaries instead of wrapping
    pub alternate: bool,
}

impl Default for ScrubberConfig {
    fn default() -> Self {
        Self {
            initial_index: 0,
            direction: Direction::Forward,
            delay_ms: None,
            autoplay: true,
            looping: true,
            loop_delay_ms: None,
            alternate: false,
        }
    }
}

//! Core functionality for the aquascope explorer
//!
//! This crate provides the playback controller, the cooperative scheduler
//! it runs on, and the shared selection state that keeps every chart view
//! synchronized.

pub mod playback;
pub mod schedule;
pub mod selection;

use thiserror::Error;

/// A frame value in the playback sequence (a calendar year).
pub type Year = i32;

/// Errors raised at construction of core components
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("frame sequence is empty")]
    EmptyFrameSequence,
}

// Re-export commonly used types
pub use playback::{
    Direction, FrameSubscriber, PlaybackState, Scrubber, ScrubberConfig,
};
pub use schedule::{Clock, ManualClock, Scheduler, SystemClock, TaskId};
pub use selection::{Selection, SelectionModel, SelectionObserver};

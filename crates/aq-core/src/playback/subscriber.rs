//! Frame-change subscriber trait

use crate::Year;

/// Trait for components that need to respond to frame advancement
pub trait FrameSubscriber: Send + Sync {
    /// Called synchronously with the new frame value after every advancement
    fn on_frame_change(&self, value: Year);
}

//! Shared selection state
//!
//! One logical `(current year, current country)` pair per explorer,
//! fanned out synchronously and in registration order to every view.
//! Replaces the implicit coupling of chart closures sharing outer-scope
//! variables with an explicitly owned object.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::{CoreError, Year};

/// A consistent copy of the selection pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Current year; always a member of the dataset's year set.
    pub year: Year,
    /// Current country; `None` means no selection. May name a country
    /// absent from the current year's slice — views render that as an
    /// empty selection, not an error.
    pub country: Option<String>,
}

/// Trait for views that need to respond to selection changes
pub trait SelectionObserver: Send + Sync {
    /// Called synchronously with the complete updated pair; never sees a
    /// half-updated selection
    fn on_selection_change(&self, selection: &Selection);
}

/// Owner of the selection pair and its observer list
#[derive(Debug)]
pub struct SelectionModel {
    years: Vec<Year>,
    state: RwLock<Selection>,
    observers: RwLock<Vec<Weak<dyn SelectionObserver>>>,
}

impl SelectionModel {
    /// Create a selection over the dataset's year set, positioned at the
    /// first year
    pub fn new(years: Vec<Year>, initial_country: Option<String>) -> Result<Self, CoreError> {
        let first = *years.first().ok_or(CoreError::EmptyFrameSequence)?;
        Ok(Self {
            years,
            state: RwLock::new(Selection {
                year: first,
                country: initial_country,
            }),
            observers: RwLock::new(Vec::new()),
        })
    }

    /// Get the current selection pair
    pub fn snapshot(&self) -> Selection {
        self.state.read().clone()
    }

    /// Add an observer; observers are notified in registration order
    pub fn subscribe(&self, observer: Arc<dyn SelectionObserver>) {
        self.observers.write().push(Arc::downgrade(&observer));
    }

    /// Move the selection to `year`. The year must belong to the frame
    /// sequence; unknown years are ignored so the membership invariant
    /// holds (the playback controller never supplies one).
    pub fn set_year(&self, year: Year) {
        if !self.years.contains(&year) {
            tracing::warn!(year, "ignoring year outside the frame sequence");
            return;
        }
        let selection = {
            let mut state = self.state.write();
            state.year = year;
            state.clone()
        };
        self.notify(&selection);
    }

    /// Change the selected country. Any value is accepted, including one
    /// with no data in the current year's slice.
    pub fn set_country(&self, country: Option<String>) {
        let selection = {
            let mut state = self.state.write();
            state.country = country;
            state.clone()
        };
        self.notify(&selection);
    }

    fn notify(&self, selection: &Selection) {
        let mut observers = self.observers.write();

        // Remove any dead weak references
        observers.retain(|weak| weak.strong_count() > 0);

        for weak in observers.iter() {
            if let Some(observer) = weak.upgrade() {
                observer.on_selection_change(selection);
            }
        }
    }
}

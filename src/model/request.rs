//! Load generations.
//!
//! Every load request is stamped with the next generation number. Only a
//! completion carrying the latest generation may be applied; anything older
//! belongs to a model the user has already replaced.

use crate::model::format::ModelFormat;

/// Identifies one load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    /// Format the request was dispatched to.
    pub format: ModelFormat,
    /// Display name of the file being loaded.
    pub file_name: String,
}

impl LoadTicket {
    /// Monotonic request number.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Issues tickets and decides which completions are still current.
#[derive(Debug, Default)]
pub struct LoadTracker {
    latest: u64,
}

impl LoadTracker {
    /// Tracker that has issued nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new load, superseding all earlier ones.
    pub fn begin(&mut self, format: ModelFormat, file_name: impl Into<String>) -> LoadTicket {
        self.latest += 1;
        LoadTicket {
            generation: self.latest,
            format,
            file_name: file_name.into(),
        }
    }

    /// Supersede every outstanding ticket without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    /// Whether `ticket` is the most recently issued one.
    #[must_use]
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.latest
    }
}

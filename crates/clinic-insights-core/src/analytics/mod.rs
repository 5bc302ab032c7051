//! Analytics aggregation.
//!
//! The storage layer is a collaborator behind [`ClinicDataSource`]: it hands
//! over a bounded window of recent visit text plus a batch of scalar counts.
//! The engine runs the text pipeline over the visits and combines everything
//! into one [`AnalyticsReport`].

mod engine;
mod report;
mod window;

pub use engine::*;
pub use report::*;
pub use window::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::vocabulary::VocabularyError;

/// Errors raised while setting up an engine.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),
}

/// The text fields of one visit, as handed over by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisitText {
    pub signs: Option<String>,
    pub medicines: Option<String>,
    pub visit_date: String,
}

/// Read-only access to the clinic data a report needs.
pub trait ClinicDataSource {
    type Error: std::error::Error;

    /// Visits that have signs or medicines, most recent first, at most `limit`.
    fn fetch_recent_visits(&self, limit: usize) -> Result<Vec<VisitText>, Self::Error>;

    /// All scalar counts for the window, fetched as one batch.
    fn clinic_statistics(&self, window: &ReportWindow) -> Result<ClinicStatistics, Self::Error>;
}

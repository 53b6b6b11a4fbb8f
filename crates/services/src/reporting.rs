use std::sync::{Arc, Mutex};

use answer_info_core::model::AnswerDetailsReport;
use async_trait::async_trait;

use crate::error::ReportingError;

/// Transmits answer details to wherever they are stored.
#[async_trait]
pub trait AnswerDetailsReporter: Send + Sync {
    /// Deliver one report.
    ///
    /// # Errors
    ///
    /// Returns `ReportingError` if the report could not be delivered.
    async fn submit_answer_details(&self, report: &AnswerDetailsReport)
    -> Result<(), ReportingError>;
}

/// Keeps every delivered report in memory.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    reports: Arc<Mutex<Vec<AnswerDetailsReport>>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the reports received so far, in delivery order.
    ///
    /// # Errors
    ///
    /// Returns `ReportingError::Recorder` if the report list lock is poisoned.
    pub fn reports(&self) -> Result<Vec<AnswerDetailsReport>, ReportingError> {
        let guard = self
            .reports
            .lock()
            .map_err(|e| ReportingError::Recorder(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl AnswerDetailsReporter for RecordingReporter {
    async fn submit_answer_details(
        &self,
        report: &AnswerDetailsReport,
    ) -> Result<(), ReportingError> {
        let mut guard = self
            .reports
            .lock()
            .map_err(|e| ReportingError::Recorder(e.to_string()))?;
        guard.push(report.clone());
        Ok(())
    }
}

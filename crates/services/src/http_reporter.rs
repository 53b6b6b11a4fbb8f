use std::env;
use std::time::Duration;

use answer_info_core::model::{AnswerDetailsReport, AnswerValue};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::error::ReportingError;
use crate::reporting::AnswerDetailsReporter;

const HANDLER_PATH: [&str; 2] = ["learneranswerinfohandler", "learner_answer_details"];

#[derive(Clone, Debug)]
pub struct ReportingConfig {
    pub base_url: String,
    pub entity_type: String,
    pub timeout: Duration,
}

impl ReportingConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            entity_type: "exploration".into(),
            timeout: Duration::from_secs(10),
        }
    }

    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("ANSWER_DETAILS_BASE_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        let mut config = Self::new(base_url);
        if let Ok(entity_type) = env::var("ANSWER_DETAILS_ENTITY_TYPE") {
            if !entity_type.trim().is_empty() {
                config.entity_type = entity_type;
            }
        }
        if let Some(secs) = env::var("ANSWER_DETAILS_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        Some(config)
    }

    /// Handler URL for one exploration; path segments are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns `ReportingError::InvalidUrl` if the base URL does not parse or
    /// cannot carry a path.
    pub fn endpoint(&self, exploration_id: &str) -> Result<Url, ReportingError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| ReportingError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(HANDLER_PATH)
            .push(&self.entity_type)
            .push(exploration_id);
        Ok(url)
    }
}

/// Reports answer details to the backend handler over HTTP.
#[derive(Clone)]
pub struct HttpAnswerDetailsReporter {
    client: Client,
    config: Option<ReportingConfig>,
}

impl HttpAnswerDetailsReporter {
    /// Reporter configured from `ANSWER_DETAILS_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ReportingError::Http` if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, ReportingError> {
        Self::new(ReportingConfig::from_env())
    }

    /// Reporter for `config`; `None` builds a disabled reporter.
    ///
    /// # Errors
    ///
    /// Returns `ReportingError::Http` if the HTTP client cannot be built.
    pub fn new(config: Option<ReportingConfig>) -> Result<Self, ReportingError> {
        let mut builder = Client::builder();
        if let Some(c) = &config {
            builder = builder.timeout(c.timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl AnswerDetailsReporter for HttpAnswerDetailsReporter {
    async fn submit_answer_details(
        &self,
        report: &AnswerDetailsReport,
    ) -> Result<(), ReportingError> {
        let config = self.config.as_ref().ok_or(ReportingError::Disabled)?;
        let url = config.endpoint(report.exploration_id.as_str())?;

        let response = self
            .client
            .post(url)
            .json(&AnswerDetailsPayload::from(report))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReportingError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct AnswerDetailsPayload<'a> {
    state_name: &'a str,
    interaction_id: &'a str,
    answer: &'a AnswerValue,
    answer_details: &'a str,
}

impl<'a> From<&'a AnswerDetailsReport> for AnswerDetailsPayload<'a> {
    fn from(report: &'a AnswerDetailsReport) -> Self {
        Self {
            state_name: report.step_id.as_str(),
            interaction_id: report.interaction_kind.as_str(),
            answer: &report.answer,
            answer_details: &report.answer_details,
        }
    }
}

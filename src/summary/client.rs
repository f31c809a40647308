use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::SummaryApi;

use super::model::SummaryReport;
use super::retry::{run_with_retry, AttemptError, RetryError, RetryPolicy};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build summary http client: {0}")]
    Client(reqwest::Error),
    #[error("summary request failed: {0}")]
    Transport(reqwest::Error),
    #[error("summary endpoint returned status {status}")]
    Status { status: StatusCode },
    #[error("summary payload decode failed: {0}")]
    Decode(reqwest::Error),
    #[error("summary fetch gave up after {attempts} attempts, last status {status}")]
    RetriesExhausted { attempts: u32, status: StatusCode },
}

pub trait SummaryFetch {
    async fn fetch_summary(&self) -> Result<SummaryReport, FetchError>;
}

pub struct HttpSummaryClient {
    client: reqwest::Client,
    url: String,
    policy: RetryPolicy,
}

impl HttpSummaryClient {
    pub fn from_config(config: &SummaryApi) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("covid_summary_bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            url: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                config.endpoint
            ),
            policy: RetryPolicy {
                max_attempts: config.max_attempts,
                initial_backoff: Duration::from_millis(config.retry_backoff_ms),
            },
        })
    }

    // HTTP error statuses are the transient class; transport and decode
    // failures are fatal and bypass the retry loop.
    async fn fetch_once(&self) -> Result<SummaryReport, AttemptError<FetchError>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|error| AttemptError::Fatal(FetchError::Transport(error)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Transient(FetchError::Status { status }));
        }

        response
            .json::<SummaryReport>()
            .await
            .map_err(|error| AttemptError::Fatal(FetchError::Decode(error)))
    }
}

impl SummaryFetch for HttpSummaryClient {
    async fn fetch_summary(&self) -> Result<SummaryReport, FetchError> {
        match run_with_retry(self.policy, |_attempt| self.fetch_once()).await {
            Ok(report) => {
                log::info!(
                    "summary_fetch_ok url={} countries={}",
                    self.url,
                    report.countries.len()
                );
                Ok(report)
            }
            Err(RetryError::Fatal(error)) => Err(error),
            Err(RetryError::Exhausted { attempts, last }) => match last {
                FetchError::Status { status } => {
                    Err(FetchError::RetriesExhausted { attempts, status })
                }
                other => Err(other),
            },
        }
    }
}

//! HTTP adapter for a remote wait-time prediction service.

use serde::Deserialize;

use crate::error::OracleError;
use crate::model::{ActivityId, Conditions};
use crate::traits::WaitTimeOracle;

#[derive(Debug, Clone)]
pub struct RemoteOracleConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for RemoteOracleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Queries `GET {base_url}/predict` once per visit.
///
/// Failures are returned to the caller as-is; the planner never substitutes
/// a guessed wait for a failed prediction.
#[derive(Debug, Clone)]
pub struct RemoteOracle {
    config: RemoteOracleConfig,
    client: reqwest::blocking::Client,
}

impl RemoteOracle {
    pub fn new(config: RemoteOracleConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn url(&self) -> String {
        format!("{}/predict", self.config.base_url.trim_end_matches('/'))
    }
}

impl WaitTimeOracle for RemoteOracle {
    fn predict(
        &self,
        activity: &ActivityId,
        conditions: &Conditions,
        elapsed_minutes: i32,
    ) -> Result<i32, OracleError> {
        let query = [
            ("activity", activity.to_string()),
            ("weekday", conditions.weekday.to_string()),
            ("holiday", u8::from(conditions.holiday).to_string()),
            ("rain", conditions.rain_probability.to_string()),
            ("temperature", conditions.max_temperature.to_string()),
            ("elapsed", elapsed_minutes.to_string()),
        ];

        let body = self
            .client
            .get(self.url())
            .query(&query)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<PredictResponse>())?;

        if !body.wait_minutes.is_finite() {
            return Err(OracleError::Invalid(format!(
                "non-finite wait for {}",
                activity
            )));
        }

        Ok((body.wait_minutes.round() as i32).max(0))
    }
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    wait_minutes: f64,
}

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::constants::defaults;
use crate::data_mgmt::models::{HistoryPoint, StorePayload};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),
    #[error("request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),
    #[error("could not parse response: {0}")]
    Parse(#[from] io::Error),
}

/// Blocking client for the remote reading collector.
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let agent = ureq::AgentBuilder::new()
            .tls_connector(Arc::new(native_tls::TlsConnector::new()?))
            .timeout(defaults::API_REQUEST_TIMEOUT)
            .build();
        Ok(ApiClient {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST one reading to `<base>/store`. The response body is not consumed.
    pub fn store(&self, payload: &StorePayload) -> Result<(), ApiError> {
        self.agent
            .post(&format!("{}/store", self.base_url))
            .send_json(payload)
            .map_err(Box::new)?;
        Ok(())
    }

    /// Fetch all samples stored since `from` (epoch seconds) via
    /// `<base>/search?from=<epoch>&json=True`.
    pub fn search_since(&self, from: i64) -> Result<Vec<HistoryPoint>, ApiError> {
        let points = self
            .agent
            .get(&format!("{}/search", self.base_url))
            .query("from", &from.to_string())
            .query("json", "True")
            .call()
            .map_err(Box::new)?
            .into_json()?;
        Ok(points)
    }
}

//! Real network invoker.
//!
//! Posts the raw payload as JSON to the configured endpoint and expects a
//! JSON object back. Any transport-level failure or non-2xx status is an
//! `InvokeError` for the engine's retry loop to handle.

use std::time::Duration;

use futures_util::future::BoxFuture;

use crate::config::ServiceConfig;
use crate::invoker::{InvokeError, Invoker, ResultMap};

/// Invoker that issues real HTTP calls.
#[derive(Debug, Clone)]
pub struct HttpInvoker {
    client: reqwest::Client,
}

impl HttpInvoker {
    /// Build the invoker with a per-call timeout.
    pub fn new(call_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(call_timeout).build()?;
        Ok(Self { client })
    }
}

impl Invoker for HttpInvoker {
    fn invoke<'a>(
        &'a self,
        service: &'a ServiceConfig,
        payload: &'a ResultMap,
    ) -> BoxFuture<'a, Result<ResultMap, InvokeError>> {
        Box::pin(async move {
            let endpoint = service.endpoint.as_str();

            let response = self
                .client
                .post(endpoint)
                .json(payload)
                .send()
                .await
                .map_err(|e| InvokeError::Transport {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(InvokeError::Status {
                    endpoint: endpoint.to_string(),
                    status: status.as_u16(),
                });
            }

            response
                .json::<ResultMap>()
                .await
                .map_err(|e| InvokeError::MalformedResponse {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                })
        })
    }
}

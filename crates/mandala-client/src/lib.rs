// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Client helper for talking to the mandala generation service over HTTP
//! (JSON-framed), plus the tool-facing [`port::GenerationPort`].

use std::time::Duration;

use mandala_proto::{
    classify_response, GenerateRequest, MandalaPayload, ResponseError, GENERATE_PATH,
};
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod port;

/// Failure modes of a generation call.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The configured endpoint is not a usable base URL.
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        /// Endpoint as configured.
        endpoint: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// Connect/send/receive failed before a full response was read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a failure.
    #[error("service error (status {status})")]
    Application {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, if any.
        message: Option<String>,
    },
    /// The service answered with a body that does not match the contract.
    #[error("malformed response (status {status}): {reason}")]
    Malformed {
        /// HTTP status code.
        status: u16,
        /// Decoder diagnostic.
        reason: String,
    },
}

impl From<ResponseError> for GenerateError {
    fn from(err: ResponseError) -> Self {
        match err {
            ResponseError::Application { status, message } => Self::Application { status, message },
            ResponseError::Malformed { status, reason } => Self::Malformed { status, reason },
        }
    }
}

/// Minimal async client for `POST /generate_mandala`.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    url: Url,
}

impl GenerationClient {
    /// Build a client for the service at `endpoint` (a base URL such as
    /// `http://127.0.0.1:5000`). `timeout` bounds each whole request; `None`
    /// leaves it to the transport.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, GenerateError> {
        let invalid = |reason: String| GenerateError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason,
        };
        let base = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a base URL".into()));
        }
        let url = base.join(GENERATE_PATH).map_err(|e| invalid(e.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, url })
    }

    /// Full URL the client posts to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Post `thought` and classify the reply.
    pub async fn generate(&self, thought: &str) -> Result<MandalaPayload, GenerateError> {
        info!(url = %self.url, "requesting mandala generation");
        let req = GenerateRequest {
            thought: thought.to_owned(),
        };
        let resp = self
            .http
            .post(self.url.clone())
            .json(&req)
            .send()
            .await
            .inspect_err(|err| warn!(%err, "generation request failed"))?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        debug!(status, len = body.len(), "generation response received");
        classify_response(status, &body)
            .inspect_err(|err| warn!(%err, "generation rejected"))
            .map_err(GenerateError::from)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn endpoint_path_is_replaced_by_generate_path() {
        let client = GenerationClient::new("http://localhost:5000/ui/", None).unwrap();
        assert_eq!(client.url().as_str(), "http://localhost:5000/generate_mandala");
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        let err = GenerationClient::new("not a url", None).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidEndpoint { .. }));
    }

    #[test]
    fn rejects_non_base_endpoint() {
        let err = GenerationClient::new("mailto:someone@example.com", None).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidEndpoint { .. }));
    }

    #[test]
    fn response_errors_map_one_to_one() {
        let err = GenerateError::from(ResponseError::Malformed {
            status: 200,
            reason: "x".into(),
        });
        assert!(matches!(err, GenerateError::Malformed { status: 200, .. }));
    }
}

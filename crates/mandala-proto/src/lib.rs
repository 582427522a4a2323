// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wire schema for the mandala generation endpoint.
//!
//! One exchange exists: `POST /generate_mandala` with `{ "thought": .. }`.
//! A 2xx reply carries `{ description, image_url, qr_code? }`; anything else
//! carries `{ error? }`. [`classify_response`] turns a raw status/body pair
//! into either a [`MandalaPayload`] or a [`ResponseError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path of the generation endpoint, relative to the service base URL.
pub const GENERATE_PATH: &str = "/generate_mandala";

/// Request body for `POST /generate_mandala`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The user's thought (already trimmed and non-empty).
    pub thought: String,
}

/// Success body as sent by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated artistic description.
    pub description: String,
    /// URL of the generated image.
    pub image_url: String,
    /// Optional URL of a QR code pointing at the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    /// Optional explicit success flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

/// Minimal view of a 2xx body used to spot `success: false` before strict decoding.
#[derive(Debug, Default, Deserialize)]
struct SuccessProbe {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

/// Failure body as sent by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure reason.
    #[serde(default)]
    pub error: Option<String>,
}

/// Normalized success payload handed to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MandalaPayload {
    /// Generated artistic description.
    pub description: String,
    /// URL of the generated image.
    pub image_url: String,
    /// QR code URL; `None` when absent, null or blank.
    pub qr_code: Option<String>,
}

/// Why a response could not be turned into a [`MandalaPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// The service reported a failure (non-2xx or `success: false`).
    #[error("generation failed (status {status}): {}", message.as_deref().unwrap_or("no message"))]
    Application {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, if any.
        message: Option<String>,
    },
    /// The body was not JSON or lacked required fields.
    #[error("malformed response (status {status}): {reason}")]
    Malformed {
        /// HTTP status code.
        status: u16,
        /// Decoder diagnostic.
        reason: String,
    },
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Classify a raw HTTP status and body according to the endpoint contract.
pub fn classify_response(status: u16, body: &[u8]) -> Result<MandalaPayload, ResponseError> {
    if !(200..300).contains(&status) {
        return match serde_json::from_slice::<ErrorBody>(body) {
            Ok(err) => Err(ResponseError::Application {
                status,
                message: non_blank(err.error),
            }),
            Err(e) => Err(ResponseError::Malformed {
                status,
                reason: e.to_string(),
            }),
        };
    }

    if let Ok(SuccessProbe {
        success: Some(false),
        error,
    }) = serde_json::from_slice::<SuccessProbe>(body)
    {
        return Err(ResponseError::Application {
            status,
            message: non_blank(error),
        });
    }

    let resp: GenerateResponse =
        serde_json::from_slice(body).map_err(|e| ResponseError::Malformed {
            status,
            reason: e.to_string(),
        })?;
    if resp.image_url.trim().is_empty() {
        return Err(ResponseError::Malformed {
            status,
            reason: "empty image_url".into(),
        });
    }

    Ok(MandalaPayload {
        description: resp.description,
        image_url: resp.image_url,
        qr_code: non_blank(resp.qr_code),
    })
}

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Domain-level form state: lifecycle phase, validated input, result and error.

use mandala_client::GenerateError;
use mandala_proto::MandalaPayload;
use thiserror::Error;

/// Shown when the thought is empty or whitespace-only.
pub const VALIDATION_MESSAGE: &str =
    "Por favor, digite um pensamento ou ideia para criar sua mandala.";
/// Shown when the service fails without a usable message.
pub const APPLICATION_FALLBACK_MESSAGE: &str = "Falha ao gerar a mandala";
/// Shown when the request never produced a response.
pub const TRANSPORT_FALLBACK_MESSAGE: &str = "Ocorreu um erro inesperado. Tente novamente.";

/// Plain lifecycle position, without the data each phase carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Waiting for a submission.
    Idle,
    /// One generation request is in flight.
    Loading,
    /// A result is displayed.
    Success,
    /// An alert is displayed.
    Error,
}

/// Rejection of an empty submission.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("input required")]
pub struct ValidationError;

/// A trimmed, non-empty thought. Only constructible through [`SubmissionInput::parse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionInput(String);

impl SubmissionInput {
    /// Trim `raw`; reject it if nothing is left.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The trimmed thought.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifies one issued generation request. Replies carry it back so the
/// reducer can tell the current request from a superseded one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl RequestId {
    /// The id issued after this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A successfully generated mandala.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MandalaResult {
    /// Artistic description text.
    pub description: String,
    /// Image source URL.
    pub image_url: String,
    /// QR code image URL, when the service provided one.
    pub qr_code_url: Option<String>,
}

impl From<MandalaPayload> for MandalaResult {
    fn from(payload: MandalaPayload) -> Self {
        Self {
            description: payload.description,
            image_url: payload.image_url,
            qr_code_url: payload.qr_code,
        }
    }
}

/// Which failure produced an [`ErrorState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty input, caught before any request.
    Validation,
    /// The request never produced a response.
    Transport,
    /// The service reported a failure.
    Application,
    /// The service reply did not match the contract.
    MalformedResponse,
}

/// A displayed failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorState {
    /// Failure category.
    pub kind: ErrorKind,
    /// Alert text.
    pub message: String,
}

impl ErrorState {
    /// The alert raised for an empty submission.
    pub fn validation() -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: VALIDATION_MESSAGE.into(),
        }
    }
}

/// Outcome of a failed generation call, reduced to what the form needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationFailure {
    /// No response was received.
    Transport,
    /// The service failed, optionally explaining why.
    Application {
        /// Server-provided message.
        message: Option<String>,
    },
    /// The reply could not be decoded.
    Malformed,
}

impl GenerationFailure {
    /// Alert state for this failure: the server message verbatim if present,
    /// otherwise the fixed fallback for the category.
    pub fn to_error_state(&self) -> ErrorState {
        match self {
            Self::Transport => ErrorState {
                kind: ErrorKind::Transport,
                message: TRANSPORT_FALLBACK_MESSAGE.into(),
            },
            Self::Application { message } => ErrorState {
                kind: ErrorKind::Application,
                message: message
                    .clone()
                    .unwrap_or_else(|| APPLICATION_FALLBACK_MESSAGE.into()),
            },
            Self::Malformed => ErrorState {
                kind: ErrorKind::MalformedResponse,
                message: APPLICATION_FALLBACK_MESSAGE.into(),
            },
        }
    }
}

impl From<&GenerateError> for GenerationFailure {
    fn from(err: &GenerateError) -> Self {
        match err {
            GenerateError::InvalidEndpoint { .. } | GenerateError::Transport(_) => Self::Transport,
            GenerateError::Application { message, .. } => Self::Application {
                message: message.clone(),
            },
            GenerateError::Malformed { .. } => Self::Malformed,
        }
    }
}

/// Lifecycle phase together with the data that phase owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing in flight, nothing displayed.
    Idle,
    /// Waiting on the response for `input`.
    Loading {
        /// The submitted thought.
        input: SubmissionInput,
        /// Id of the request awaiting a reply.
        request: RequestId,
    },
    /// A result is displayed.
    Success {
        /// The generated mandala.
        result: MandalaResult,
        /// Unix millis at which the response arrived (names the download).
        received_at_ms: u64,
    },
    /// An alert is displayed.
    Error(ErrorState),
}

impl Phase {
    /// The plain lifecycle position.
    pub fn kind(&self) -> LifecyclePhase {
        match self {
            Self::Idle => LifecyclePhase::Idle,
            Self::Loading { .. } => LifecyclePhase::Loading,
            Self::Success { .. } => LifecyclePhase::Success,
            Self::Error(_) => LifecyclePhase::Error,
        }
    }
}

/// Complete form state: the input field text plus the current phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    /// Current input field text (untrimmed).
    pub input: String,
    /// Current lifecycle phase.
    pub phase: Phase,
    /// Most recently issued request id. Survives reset so ids never repeat.
    pub last_request: RequestId,
}

impl FormState {
    /// Fresh state: empty input, `Idle`.
    pub fn new() -> Self {
        Self {
            input: String::new(),
            phase: Phase::Idle,
            last_request: RequestId::default(),
        }
    }

    /// Fresh state that keeps issuing ids after `last_request`.
    pub fn cleared(&self) -> Self {
        Self {
            last_request: self.last_request,
            ..Self::new()
        }
    }

    /// Id of the in-flight request, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        match &self.phase {
            Phase::Loading { request, .. } => Some(*request),
            _ => None,
        }
    }

    /// True when nothing is displayed and the input is empty.
    pub fn is_blank(&self) -> bool {
        self.phase == Phase::Idle && self.input.is_empty()
    }

    /// The displayed result, if any.
    pub fn result(&self) -> Option<&MandalaResult> {
        match &self.phase {
            Phase::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The displayed error, if any.
    pub fn error(&self) -> Option<&ErrorState> {
        match &self.phase {
            Phase::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn submission_input_trims() {
        let input = SubmissionInput::parse("  peace \n").unwrap();
        assert_eq!(input.as_str(), "peace");
    }

    #[test]
    fn whitespace_only_input_is_rejected() {
        for raw in ["", " ", "\t\n", "   \r\n  "] {
            assert_eq!(SubmissionInput::parse(raw), Err(ValidationError));
        }
    }

    #[test]
    fn application_failure_prefers_server_message() {
        let with = GenerationFailure::Application {
            message: Some("Bad input".into()),
        };
        assert_eq!(with.to_error_state().message, "Bad input");

        let without = GenerationFailure::Application { message: None };
        assert_eq!(
            without.to_error_state().message,
            APPLICATION_FALLBACK_MESSAGE
        );
    }

    #[test]
    fn malformed_is_application_with_fallback() {
        let state = GenerationFailure::Malformed.to_error_state();
        assert_eq!(state.kind, ErrorKind::MalformedResponse);
        assert_eq!(state.message, APPLICATION_FALLBACK_MESSAGE);
    }

    #[test]
    fn cleared_state_keeps_request_counter() {
        let state = FormState {
            input: "peace".into(),
            phase: Phase::Loading {
                input: SubmissionInput::parse("peace").unwrap(),
                request: RequestId(3),
            },
            last_request: RequestId(3),
        };
        assert_eq!(state.in_flight(), Some(RequestId(3)));
        let cleared = state.cleared();
        assert!(cleared.is_blank());
        assert_eq!(cleared.in_flight(), None);
        assert_eq!(cleared.last_request.next(), RequestId(4));
    }

    #[test]
    fn transport_uses_generic_fallback() {
        let state = GenerationFailure::Transport.to_error_state();
        assert_eq!(state.message, TRANSPORT_FALLBACK_MESSAGE);
    }
}

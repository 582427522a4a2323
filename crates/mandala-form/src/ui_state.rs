// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pure state transitions for the form (submit, responses, reset).

use crate::core::{
    ErrorState, FormState, GenerationFailure, MandalaResult, Phase, RequestId, SubmissionInput,
};
use tracing::{debug, warn};

/// Region a scroll effect targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollTarget {
    /// The result panel.
    Result,
    /// The inline alert.
    Alert,
}

/// Inputs to [`reduce`]: user actions and request outcomes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// The user edited the input field.
    InputChanged(String),
    /// The user triggered submission with this text.
    Submit(String),
    /// A request succeeded.
    ResponseOk {
        /// Which request this answers.
        request: RequestId,
        /// Decoded result.
        result: MandalaResult,
        /// Arrival time in Unix millis.
        received_at_ms: u64,
    },
    /// A request failed.
    ResponseFailed {
        /// Which request this answers.
        request: RequestId,
        /// What went wrong.
        failure: GenerationFailure,
    },
    /// The user asked for a fresh form.
    Reset,
    /// The deferred result scroll came due.
    ResultScrollDue,
}

/// Side effects requested by [`reduce`]; executed at the boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEffect {
    /// Issue exactly one generation request.
    RequestGeneration {
        /// Id to echo back in the response event.
        request: RequestId,
        /// The trimmed thought.
        input: SubmissionInput,
    },
    /// Abandon the in-flight request.
    CancelGeneration,
    /// Bring a region into view now.
    ScrollIntoView(ScrollTarget),
    /// Bring the result panel into view after the configured delay.
    ScrollResultLater,
    /// Scroll back to the top of the form.
    ScrollToTop,
    /// Move focus to the input field.
    FocusInput,
}

fn is_current(ui: &FormState, request: RequestId) -> bool {
    ui.in_flight() == Some(request)
}

/// Apply `ev` to `ui`, returning the next state and the effects to run.
///
/// A submit while `Loading` is ignored and a reset cancels the in-flight
/// request. Replies are matched by [`RequestId`]; anything that does not
/// answer the current request is dropped.
pub fn reduce(ui: &FormState, ev: FormEvent) -> (FormState, Vec<FormEffect>) {
    let mut next = ui.clone();
    let mut fx = Vec::new();
    match ev {
        FormEvent::InputChanged(text) => {
            next.input = text;
            if matches!(next.phase, Phase::Error(_)) {
                next.phase = Phase::Idle;
            }
        }
        FormEvent::Submit(text) => {
            if ui.in_flight().is_some() {
                debug!("submit ignored: request already in flight");
                return (next, fx);
            }
            next.input = text;
            match SubmissionInput::parse(&next.input) {
                Ok(input) => {
                    let request = ui.last_request.next();
                    next.last_request = request;
                    next.phase = Phase::Loading {
                        input: input.clone(),
                        request,
                    };
                    fx.push(FormEffect::RequestGeneration { request, input });
                }
                Err(err) => {
                    debug!(%err, "submission rejected");
                    next.phase = Phase::Error(ErrorState::validation());
                    fx.push(FormEffect::ScrollIntoView(ScrollTarget::Alert));
                }
            }
        }
        FormEvent::ResponseOk {
            request,
            result,
            received_at_ms,
        } => {
            if !is_current(ui, request) {
                warn!(?request, "dropping stale response");
                return (next, fx);
            }
            next.phase = Phase::Success {
                result,
                received_at_ms,
            };
            fx.push(FormEffect::ScrollResultLater);
        }
        FormEvent::ResponseFailed { request, failure } => {
            if !is_current(ui, request) {
                warn!(?request, ?failure, "dropping stale failure");
                return (next, fx);
            }
            next.phase = Phase::Error(failure.to_error_state());
            fx.push(FormEffect::ScrollIntoView(ScrollTarget::Alert));
        }
        FormEvent::Reset => {
            if ui.in_flight().is_some() {
                fx.push(FormEffect::CancelGeneration);
            }
            next = ui.cleared();
            fx.push(FormEffect::ScrollToTop);
            fx.push(FormEffect::FocusInput);
        }
        FormEvent::ResultScrollDue => {
            if next.result().is_some() {
                fx.push(FormEffect::ScrollIntoView(ScrollTarget::Result));
            }
        }
    }
    (next, fx)
}

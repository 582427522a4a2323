// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Effect runner for FormEffect -> generation port + surface.
//!
//! Network and timer effects run as tokio tasks and report back through the
//! controller's event channel; surface effects are applied synchronously.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use mandala_client::port::GenerationPort;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::core::{GenerationFailure, RequestId, SubmissionInput};
use crate::ports::SurfacePort;
use crate::ui_state::{FormEffect, FormEvent};

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// Executes effects against a generation port and a surface.
///
/// Holds the handle of the in-flight generation task so a reset can abort it.
pub struct EffectsRunner<G> {
    port: Arc<G>,
    events: UnboundedSender<FormEvent>,
    scroll_delay: Duration,
    in_flight: Option<JoinHandle<()>>,
}

impl<G> EffectsRunner<G>
where
    G: GenerationPort,
{
    /// Build a runner. Outcomes of spawned work are sent on `events`.
    pub fn new(port: G, events: UnboundedSender<FormEvent>, scroll_delay: Duration) -> Self {
        Self {
            port: Arc::new(port),
            events,
            scroll_delay,
            in_flight: None,
        }
    }

    /// True while a spawned generation task has not finished.
    pub fn is_generating(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Run `effects` in order. Must be called from within a tokio runtime.
    pub fn run<S>(&mut self, effects: Vec<FormEffect>, surface: &mut S)
    where
        S: SurfacePort + ?Sized,
    {
        for eff in effects {
            match eff {
                FormEffect::RequestGeneration { request, input } => {
                    self.spawn_generation(request, input);
                }
                FormEffect::CancelGeneration => self.cancel_generation(),
                FormEffect::ScrollIntoView(target) => surface.scroll_into_view(target),
                FormEffect::ScrollResultLater => self.schedule_result_scroll(),
                FormEffect::ScrollToTop => surface.scroll_to_top(),
                FormEffect::FocusInput => surface.focus_input(),
            }
        }
    }

    fn spawn_generation(&mut self, request: RequestId, input: SubmissionInput) {
        self.cancel_generation();
        let port = Arc::clone(&self.port);
        let tx = self.events.clone();
        let handle = tokio::spawn(async move {
            let ev = match port.request_generation(input.as_str()).await {
                Ok(payload) => FormEvent::ResponseOk {
                    request,
                    result: payload.into(),
                    received_at_ms: unix_millis(),
                },
                Err(err) => {
                    warn!(%err, "mandala generation failed");
                    FormEvent::ResponseFailed {
                        request,
                        failure: GenerationFailure::from(&err),
                    }
                }
            };
            if tx.send(ev).is_err() {
                debug!("controller gone; dropping generation outcome");
            }
        });
        self.in_flight = Some(handle);
    }

    fn cancel_generation(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!("aborting in-flight generation");
            }
            handle.abort();
        }
    }

    fn schedule_result_scroll(&self) {
        let tx = self.events.clone();
        let delay = self.scroll_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(FormEvent::ResultScrollDue).is_err() {
                debug!("controller gone; dropping result scroll");
            }
        });
    }
}

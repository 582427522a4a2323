// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Top-level controller wiring: state + reducer + surface + effects runner.

use mandala_client::port::GenerationPort;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use crate::core::{FormState, LifecyclePhase};
use crate::ports::SurfacePort;
use crate::render::{render, FormView};
use crate::ui_effects::EffectsRunner;
use crate::ui_state::{self, FormEvent};

/// Owns the form state and routes every event through [`ui_state::reduce`].
pub struct Controller<G, S> {
    state: FormState,
    runner: EffectsRunner<G>,
    surface: S,
}

impl<G, S> Controller<G, S>
where
    G: GenerationPort,
    S: SurfacePort,
{
    /// Start in `Idle` and present the initial view.
    pub fn new(runner: EffectsRunner<G>, mut surface: S) -> Self {
        let state = FormState::new();
        surface.present(&render(&state));
        Self {
            state,
            runner,
            surface,
        }
    }

    /// Current state.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Current view.
    pub fn view(&self) -> FormView {
        render(&self.state)
    }

    /// The surface adapter.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Reduce `ev`, present the new view, then run the resulting effects.
    pub fn dispatch(&mut self, ev: FormEvent) {
        let from = self.state.phase.kind();
        let (next, effects) = ui_state::reduce(&self.state, ev);
        self.state = next;
        let to = self.state.phase.kind();
        if from != to {
            debug!(?from, ?to, "phase transition");
        }
        self.surface.present(&render(&self.state));
        self.runner.run(effects, &mut self.surface);
    }

    /// Feed events from `events` until the form leaves `Loading`.
    /// Returns immediately when nothing is in flight.
    pub async fn settle(&mut self, events: &mut UnboundedReceiver<FormEvent>) {
        while self.state.phase.kind() == LifecyclePhase::Loading {
            let Some(ev) = events.recv().await else {
                break;
            };
            self.dispatch(ev);
        }
    }
}

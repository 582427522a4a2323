// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Request lifecycle controller for the Mandala Creator form.
//!
//! State lives in [`core::FormState`]; [`ui_state::reduce`] is the transition
//! table; [`render::render`] maps state to a view. Side effects (network,
//! timers, display) stay at the boundary: [`ui_effects::EffectsRunner`] and a
//! [`ports::SurfacePort`] such as [`terminal::TerminalSurface`].

pub mod app;
pub mod core;
pub mod ports;
pub mod render;
pub mod terminal;
pub mod ui_effects;
pub mod ui_state;

pub use crate::app::Controller;
pub use crate::core::{FormState, LifecyclePhase, Phase, RequestId};
pub use crate::ui_state::{FormEffect, FormEvent};

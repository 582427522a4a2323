// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port traits that keep the controller independent of any display technology.

use crate::render::FormView;
use crate::ui_state::ScrollTarget;

/// Surface-facing port: display the view and perform navigation effects.
pub trait SurfacePort {
    /// Display the latest view. Called after every transition.
    fn present(&mut self, view: &FormView);
    /// Bring a region into view.
    fn scroll_into_view(&mut self, target: ScrollTarget);
    /// Return to the top of the form.
    fn scroll_to_top(&mut self);
    /// Move focus to the input field.
    fn focus_input(&mut self);
}

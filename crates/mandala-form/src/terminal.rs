// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Line-oriented terminal surface.
//!
//! A terminal cannot scroll a region into view, so "scrolling" prints it.

use std::fmt::Write as _;
use std::io::Write;

use tracing::warn;

use crate::ports::SurfacePort;
use crate::render::FormView;
use crate::ui_state::ScrollTarget;

/// Input prompt printed whenever the input field gains focus.
pub const PROMPT: &str = "> ";
/// Banner printed when scrolling back to the top.
pub const BANNER: &str =
    "Mandala Creator (:clear para limpar, :reset para recomeçar, :quit para sair)";

/// Text rendering of the alert region; empty when hidden.
pub fn render_alert(view: &FormView) -> String {
    view.alert
        .as_ref()
        .map(|alert| format!("! {}\n", alert.message))
        .unwrap_or_default()
}

/// Text rendering of the result panel; empty when hidden.
pub fn render_result(view: &FormView) -> String {
    let mut out = String::new();
    if let Some(result) = &view.result {
        let _ = writeln!(out, "{}", result.description);
        let _ = writeln!(out, "imagem:   {} ({})", result.image_src, result.image_alt);
        let _ = writeln!(
            out,
            "download: {} -> {}",
            result.download_href, result.download_filename
        );
        if let Some(qr) = &result.qr_src {
            let _ = writeln!(out, "qr:       {qr}");
        }
    }
    out
}

/// Full text rendering of a view.
pub fn render_text(view: &FormView) -> String {
    let mut out = String::new();
    if view.busy {
        let _ = writeln!(out, "… {}", view.trigger.label);
    }
    out.push_str(&render_alert(view));
    out.push_str(&render_result(view));
    out
}

/// `SurfacePort` over any writer (stdout in the binary, a buffer in tests).
pub struct TerminalSurface<W> {
    out: W,
    last: Option<FormView>,
}

impl<W> TerminalSurface<W>
where
    W: Write,
{
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Err(err) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
        {
            warn!(%err, "terminal write failed");
        }
    }
}

impl<W> SurfacePort for TerminalSurface<W>
where
    W: Write,
{
    fn present(&mut self, view: &FormView) {
        let was_busy = self.last.as_ref().is_some_and(|v| v.busy);
        if view.busy && !was_busy {
            self.emit(&format!("… {}\n", view.trigger.label));
        }
        self.last = Some(view.clone());
    }

    fn scroll_into_view(&mut self, target: ScrollTarget) {
        let Some(view) = self.last.clone() else {
            return;
        };
        let block = match target {
            ScrollTarget::Alert => render_alert(&view),
            ScrollTarget::Result => render_result(&view),
        };
        self.emit(&block);
        self.emit(PROMPT);
    }

    fn scroll_to_top(&mut self) {
        self.emit(&format!("\n{BANNER}\n"));
    }

    fn focus_input(&mut self) {
        self.emit(PROMPT);
    }
}

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pure view model: maps a `FormState` to what a surface should display.

use crate::core::{FormState, Phase};

/// Trigger label while idle.
pub const TRIGGER_LABEL: &str = "Criar Minha Mandala";
/// Trigger label while a request is in flight.
pub const TRIGGER_LABEL_BUSY: &str = "Criando Sua Mandala...";
/// Alt text for the generated image.
pub const IMAGE_ALT: &str = "Mandala Gerada baseada no seu pensamento";

/// Submission trigger (button) presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerView {
    /// Whether the trigger accepts activation.
    pub enabled: bool,
    /// Button text.
    pub label: &'static str,
}

/// Inline alert region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertView {
    /// Alert text.
    pub message: String,
}

/// Result panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultView {
    /// Description text.
    pub description: String,
    /// Image source.
    pub image_src: String,
    /// Image alt text.
    pub image_alt: &'static str,
    /// Download link target.
    pub download_href: String,
    /// Suggested download filename.
    pub download_filename: String,
    /// QR image source; `None` hides the QR element.
    pub qr_src: Option<String>,
}

/// Everything a surface needs to draw the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormView {
    /// Input field text.
    pub input: String,
    /// Submission trigger.
    pub trigger: TriggerView,
    /// Busy indicator visibility.
    pub busy: bool,
    /// Alert region, hidden when `None`.
    pub alert: Option<AlertView>,
    /// Result panel, hidden when `None`.
    pub result: Option<ResultView>,
}

/// Render `state` into a view. No side effects.
pub fn render(state: &FormState) -> FormView {
    let busy = matches!(state.phase, Phase::Loading { .. });
    let trigger = TriggerView {
        enabled: !busy,
        label: if busy { TRIGGER_LABEL_BUSY } else { TRIGGER_LABEL },
    };
    let alert = state.error().map(|err| AlertView {
        message: err.message.clone(),
    });
    let result = match &state.phase {
        Phase::Success {
            result,
            received_at_ms,
        } => Some(ResultView {
            description: result.description.clone(),
            image_src: result.image_url.clone(),
            image_alt: IMAGE_ALT,
            download_href: result.image_url.clone(),
            download_filename: format!("mandala_{received_at_ms}.png"),
            qr_src: result.qr_code_url.clone(),
        }),
        _ => None,
    };
    FormView {
        input: state.input.clone(),
        trigger,
        busy,
        alert,
        result,
    }
}

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tool-facing generation port.
//!
//! Controllers depend on [`GenerationPort`] rather than on [`GenerationClient`]
//! directly, so tests can substitute a scripted fake without a live service.

use std::future::Future;

use mandala_proto::MandalaPayload;

use crate::{GenerateError, GenerationClient};

/// Abstract port for issuing one generation request.
pub trait GenerationPort: Send + Sync + 'static {
    /// Submit a trimmed, non-empty thought and await the classified outcome.
    fn request_generation(
        &self,
        thought: &str,
    ) -> impl Future<Output = Result<MandalaPayload, GenerateError>> + Send;
}

impl GenerationPort for GenerationClient {
    fn request_generation(
        &self,
        thought: &str,
    ) -> impl Future<Output = Result<MandalaPayload, GenerateError>> + Send {
        self.generate(thought)
    }
}

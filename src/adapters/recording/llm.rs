//! Recording adapter for the `LlmClient` port.

use std::sync::{Arc, Mutex};

use crate::cassette::recorder::CassetteRecorder;
use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

/// Records LLM interactions while delegating to an inner implementation.
pub struct RecordingLlmClient {
    inner: Box<dyn LlmClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingLlmClient {
    /// Creates a new recording LLM client wrapping the given implementation.
    pub fn new(inner: Box<dyn LlmClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

/// Serializes a completion result using the `ok`/`err` convention read back
/// by the replaying adapter.
fn result_json(
    result: &Result<CompletionResponse, Box<dyn std::error::Error + Send + Sync>>,
) -> serde_json::Value {
    match result {
        Ok(response) => {
            let inner = serde_json::to_value(response).expect("failed to serialize response");
            serde_json::json!({ "ok": inner })
        }
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    }
}

impl LlmClient for RecordingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.complete(&request).await;

            let input = serde_json::to_value(&request).expect("failed to serialize request");
            recorder.lock().expect("recorder lock poisoned").record(
                "llm",
                "complete",
                input,
                result_json(&result),
            );

            result
        })
    }
}

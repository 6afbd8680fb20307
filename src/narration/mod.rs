//! Narration: ask the remote text-completion service to document a source file.

pub mod prompt;

use std::path::{Path, PathBuf};

use crate::intake::SourceUnit;
use crate::ports::llm::{CompletionRequest, LlmClient};

pub use prompt::DOCUMENTATION_TEMPLATE;

/// File name used when the generated documentation is saved.
pub const DOCUMENTATION_FILE_NAME: &str = "documentation.md";
/// Media type of the saved documentation.
pub const DOCUMENTATION_CONTENT_TYPE: &str = "text/markdown";

/// The prompt for one source unit: instruction template, newline, file text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationRequest<'a> {
    template: &'a str,
    unit: &'a SourceUnit,
}

impl<'a> NarrationRequest<'a> {
    /// Pair an instruction template with the file it applies to.
    #[must_use]
    pub fn new(template: &'a str, unit: &'a SourceUnit) -> Self {
        Self { template, unit }
    }

    /// The full prompt text.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{}\n{}", self.template, self.unit.text)
    }

    /// Build the port-level request for `model`.
    #[must_use]
    pub fn into_completion(self, model: &str, max_tokens: Option<u32>) -> CompletionRequest {
        CompletionRequest { model: model.to_string(), prompt: self.prompt(), max_tokens }
    }
}

/// Generated documentation for one source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narration {
    /// Markdown text returned by the service.
    pub text: String,
    /// Prompt tokens reported by the service (0 if unreported).
    pub prompt_tokens: u32,
    /// Completion tokens reported by the service (0 if unreported).
    pub completion_tokens: u32,
}

/// Send `unit` with `template` to the narration service and return its text.
///
/// A single attempt is made; there is no retry.
///
/// # Errors
///
/// Returns the service or transport error message.
pub async fn narrate(
    llm: &dyn LlmClient,
    model: &str,
    max_tokens: Option<u32>,
    template: &str,
    unit: &SourceUnit,
) -> Result<Narration, String> {
    let request = NarrationRequest::new(template, unit).into_completion(model, max_tokens);
    tracing::info!(
        path = %unit.path,
        model,
        prompt_bytes = request.prompt.len(),
        "requesting narration"
    );

    let response = llm.complete(&request).await.map_err(|e| e.to_string())?;
    tracing::info!(
        prompt_tokens = response.prompt_tokens,
        completion_tokens = response.completion_tokens,
        "narration received"
    );

    Ok(Narration {
        text: response.text,
        prompt_tokens: response.prompt_tokens,
        completion_tokens: response.completion_tokens,
    })
}

/// A downloadable documentation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentArtifact {
    /// Fixed file name.
    pub file_name: &'static str,
    /// Media type.
    pub content_type: &'static str,
    /// File contents.
    pub body: String,
}

impl DocumentArtifact {
    /// Wrap narration text as `documentation.md`.
    #[must_use]
    pub fn markdown(body: impl Into<String>) -> Self {
        Self {
            file_name: DOCUMENTATION_FILE_NAME,
            content_type: DOCUMENTATION_CONTENT_TYPE,
            body: body.into(),
        }
    }

    /// Write the artifact into `dir`, creating it if needed, and return the file path.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be written.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name);
        std::fs::write(&path, &self.body)?;
        tracing::debug!(path = %path.display(), content_type = self.content_type, "saved artifact");
        Ok(path)
    }
}

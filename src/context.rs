//! Service context bundling the narration port with its optional recorder.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::LiveLlmClient;
use crate::adapters::recording::RecordingLlmClient;
use crate::adapters::replaying::ReplayingLlmClient;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::NarrationConfig;
use crate::ports::llm::LlmClient;

/// Environment variable naming a cassette to record narration calls into.
pub const RECORD_VAR: &str = "DOCSKETCH_RECORD";
/// Environment variable naming a cassette to replay narration calls from.
pub const REPLAY_VAR: &str = "DOCSKETCH_REPLAY";

/// Bundles the LLM port with the recorder that may be observing it.
pub struct ServiceContext {
    /// LLM client for narration requests.
    pub llm: Box<dyn LlmClient>,
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Pick an adapter from the environment: replay if [`REPLAY_VAR`] is set,
    /// record if [`RECORD_VAR`] is set, otherwise live.
    ///
    /// # Errors
    ///
    /// Returns an error if a replay cassette cannot be loaded.
    pub fn from_env(config: &NarrationConfig) -> Result<Self, String> {
        if let Ok(path) = env::var(REPLAY_VAR) {
            tracing::info!(cassette = %path, "replaying narration from cassette");
            return Self::replaying(Path::new(&path));
        }
        if let Ok(path) = env::var(RECORD_VAR) {
            tracing::info!(cassette = %path, "recording narration to cassette");
            return Ok(Self::recording(config, PathBuf::from(path)));
        }
        Ok(Self::live(config))
    }

    /// A context that talks to the configured service directly.
    #[must_use]
    pub fn live(config: &NarrationConfig) -> Self {
        Self::with_llm(Box::new(LiveLlmClient::from_config(config)))
    }

    /// A context that records every live call into a cassette at `path`.
    ///
    /// The cassette is written by [`ServiceContext::finish`].
    #[must_use]
    pub fn recording(config: &NarrationConfig, path: PathBuf) -> Self {
        let name = path
            .file_stem()
            .map_or_else(|| "docsketch-session".to_string(), |s| s.to_string_lossy().into_owned());
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, name, &config.model)));
        let llm = RecordingLlmClient::new(
            Box::new(LiveLlmClient::from_config(config)),
            Arc::clone(&recorder),
        );
        Self { llm: Box::new(llm), recorder: Some(recorder) }
    }

    /// A context that serves narration calls from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        let llm = ReplayingLlmClient::new(CassetteReplayer::new(&cassette));
        Ok(Self::with_llm(Box::new(llm)))
    }

    /// A context around an arbitrary client, with no recording.
    #[must_use]
    pub fn with_llm(llm: Box<dyn LlmClient>) -> Self {
        Self { llm, recorder: None }
    }

    /// Release the client and write the cassette if this context was recording.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be written.
    pub fn finish(self) -> Result<Option<PathBuf>, String> {
        let Self { llm, recorder } = self;
        drop(llm);
        let Some(recorder) = recorder else {
            return Ok(None);
        };
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| "recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("recorder lock poisoned: {e}"))?;
        let path = recorder.finish().map_err(|e| format!("failed to write cassette: {e}"))?;
        Ok(Some(path))
    }
}

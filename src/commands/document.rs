//! `docsketch document` command: diagram a file, then have it documented.

use std::path::PathBuf;

use super::{diagram, open_workspace, select_source, NO_SOURCES_WARNING};
use crate::config::NarrationConfig;
use crate::context::ServiceContext;
use crate::narration::{self, DocumentArtifact, DOCUMENTATION_TEMPLATE};
use crate::structure;

/// Options for one `document` run.
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    /// Zip archive to read.
    pub archive: PathBuf,
    /// Archive-relative file to document; the first listed when `None`.
    pub file: Option<String>,
    /// Where to write the DOT diagram; stdout when `None`.
    pub diagram: Option<PathBuf>,
    /// Directory to save `documentation.md` into, if saving.
    pub save: Option<PathBuf>,
}

/// How a `document` run ended, when it did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// The archive had no source files; nothing was extracted or requested.
    NoSources,
    /// Documentation was generated (and saved to the path, if requested).
    Documented {
        /// Path of the saved artifact.
        saved: Option<PathBuf>,
    },
    /// The diagram was produced but the narration service failed.
    NarrationFailed(String),
}

/// Execute the `document` command against the configured service.
///
/// Configuration is loaded before the archive is touched, so a missing
/// credential fails the command immediately.
///
/// # Errors
///
/// Returns an error string for configuration, archive, selection, parse, or
/// output failures. Narration failures are reported but do not fail the command.
pub fn run(options: &DocumentOptions) -> Result<(), String> {
    let config = NarrationConfig::from_env().map_err(|e| e.to_string())?;
    let ctx = ServiceContext::from_env(&config)?;

    let result = run_with_context(&ctx, &config, options);

    if let Some(path) = ctx.finish()? {
        eprintln!("Recording saved to: {}", path.display());
    }
    result.map(|_| ())
}

/// Execute the `document` pipeline with an explicit service context.
///
/// # Errors
///
/// Same as [`run`], minus configuration loading.
pub fn run_with_context(
    ctx: &ServiceContext,
    config: &NarrationConfig,
    options: &DocumentOptions,
) -> Result<DocumentOutcome, String> {
    let workspace = open_workspace(&options.archive)?;
    let Some(unit) = select_source(&workspace, options.file.as_deref())? else {
        eprintln!("{NO_SOURCES_WARNING}");
        return Ok(DocumentOutcome::NoSources);
    };
    tracing::info!(path = %unit.path, "selected source file");

    let graph = structure::extract(&unit.text).map_err(|e| format!("{}: {e}", unit.path))?;
    diagram::emit(&graph.to_dot(), options.diagram.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    let result = runtime.block_on(narration::narrate(
        ctx.llm.as_ref(),
        &config.model,
        config.max_tokens,
        DOCUMENTATION_TEMPLATE,
        &unit,
    ));

    match result {
        Ok(narration) => {
            println!("Documentation generated successfully!\n");
            println!("{}", narration.text);

            let saved = match &options.save {
                Some(dir) => {
                    let artifact = DocumentArtifact::markdown(narration.text);
                    let path = artifact
                        .write_to(dir)
                        .map_err(|e| format!("failed to save {}: {e}", artifact.file_name))?;
                    println!(
                        "Documentation saved to {} ({})",
                        path.display(),
                        artifact.content_type
                    );
                    Some(path)
                }
                None => None,
            };
            Ok(DocumentOutcome::Documented { saved })
        }
        Err(e) => {
            tracing::warn!(error = %e, "narration failed");
            eprintln!("Error: An error occurred: {e}");
            Ok(DocumentOutcome::NarrationFailed(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::fixtures::zip_bytes;
    use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts calls and answers with fixed text, or fails when `text` is `None`.
    struct CountingLlm {
        calls: Arc<AtomicUsize>,
        text: Option<&'static str>,
    }

    impl LlmClient for CountingLlm {
        fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let text = self.text;
            Box::pin(async move {
                text.map(|t| CompletionResponse {
                    text: t.to_string(),
                    prompt_tokens: 0,
                    completion_tokens: 0,
                })
                .ok_or_else(|| {
                    Box::<dyn std::error::Error + Send + Sync>::from("service unavailable")
                })
            })
        }
    }

    fn context(text: Option<&'static str>) -> (ServiceContext, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let llm = CountingLlm { calls: Arc::clone(&calls), text };
        (ServiceContext::with_llm(Box::new(llm)), calls)
    }

    fn config() -> NarrationConfig {
        NarrationConfig {
            api_key: "k".into(),
            model: "m".into(),
            endpoint: "http://127.0.0.1:9/unused".into(),
            max_tokens: None,
        }
    }

    fn archive(dir: &Path, members: &[(&str, &str)]) -> PathBuf {
        let path = dir.join("code.zip");
        std::fs::write(&path, zip_bytes(members)).unwrap();
        path
    }

    #[test]
    fn archive_without_sources_skips_narration() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, calls) = context(Some("unused"));
        let options = DocumentOptions {
            archive: archive(dir.path(), &[("README.md", "# hi")]),
            ..DocumentOptions::default()
        };

        let outcome = run_with_context(&ctx, &config(), &options).unwrap();
        assert_eq!(outcome, DocumentOutcome::NoSources);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn documents_and_saves_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, calls) = context(Some("# app.py\nDoes things."));
        let options = DocumentOptions {
            archive: archive(dir.path(), &[("app.py", "x = 1\n")]),
            diagram: Some(dir.path().join("app.dot")),
            save: Some(dir.path().join("docs")),
            ..DocumentOptions::default()
        };

        let outcome = run_with_context(&ctx, &config(), &options).unwrap();
        let saved = dir.path().join("docs").join("documentation.md");
        assert_eq!(outcome, DocumentOutcome::Documented { saved: Some(saved.clone()) });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(std::fs::read_to_string(saved).unwrap(), "# app.py\nDoes things.");
        assert!(std::fs::read_to_string(dir.path().join("app.dot")).unwrap().contains("\"x\""));
    }

    #[test]
    fn narration_failure_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _) = context(None);
        let options = DocumentOptions {
            archive: archive(dir.path(), &[("app.py", "x = 1\n")]),
            diagram: Some(dir.path().join("app.dot")),
            save: Some(dir.path().join("docs")),
            ..DocumentOptions::default()
        };

        let outcome = run_with_context(&ctx, &config(), &options).unwrap();
        assert_eq!(outcome, DocumentOutcome::NarrationFailed("service unavailable".into()));
        assert!(!dir.path().join("docs").join("documentation.md").exists());
    }

    #[test]
    fn syntax_error_stops_before_narration() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, calls) = context(Some("unused"));
        let options = DocumentOptions {
            archive: archive(dir.path(), &[("app.py", "def broken(:\n")]),
            ..DocumentOptions::default()
        };

        assert!(run_with_context(&ctx, &config(), &options).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

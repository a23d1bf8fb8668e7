//! Error taxonomy: one variant per pipeline stage, fail-fast, with the
//! collaborator's diagnostic output attached where available.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::request::{Gender, Language};

/// Top-level pipeline error. Every stage failure maps to exactly one
/// variant so the caller can tell which stage aborted the run.
#[derive(Debug, Error)]
pub enum AnnounceError {
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error(transparent)]
    Mastering(#[from] MasteringError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl AnnounceError {
    /// Name of the stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            AnnounceError::Rewrite(_) => "rewrite",
            AnnounceError::Synthesis(_) => "synthesis",
            AnnounceError::Mastering(_) => "mastering",
            AnnounceError::Export(_) => "export",
            AnnounceError::Configuration(_) => "configuration",
        }
    }
}

/// Rewriting collaborator failure: transport, API, or an unusable
/// completion. Never retried.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("rewrite request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rewrite API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("rewrite API returned no completion")]
    EmptyCompletion,
}

/// Synthesis failure. Voice resolution failures are a subtype and surface
/// before the engine is ever invoked.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("missing voice for language='{language}' gender='{gender}'")]
    VoiceNotFound {
        language: Language,
        gender: Gender,
        /// Configured model path, if the pair was configured at all.
        path: Option<PathBuf>,
    },
    #[error("failed to spawn synthesis engine: {0}")]
    Spawn(#[from] io::Error),
    #[error("synthesis engine exited with status {status}: {stderr}")]
    Engine { status: i32, stderr: String },
}

/// Failure of one mastering/transcoding engine invocation.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to spawn audio engine: {0}")]
    Spawn(#[from] io::Error),
    #[error("audio engine exited with status {status}: {stderr}")]
    Engine { status: i32, stderr: String },
}

#[derive(Debug, Error)]
#[error("mastering failed: {0}")]
pub struct MasteringError(#[from] pub TransformError);

#[derive(Debug, Error)]
#[error("export to '{format}' failed: {source}")]
pub struct ExportError {
    pub format: String,
    #[source]
    pub source: TransformError,
}

/// Missing or invalid request fields and startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("missing OpenAI API key (set OPENAI_API_KEY or [openai] api_key)")]
    MissingApiKey,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

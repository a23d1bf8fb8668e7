//! Announce core: styled announcement pipeline — LLM rewrite, prosody
//! repair, Piper synthesis, ffmpeg mastering, optional variant export.

pub mod config;
pub mod error;
pub mod export;
pub mod master;
pub mod pipeline;
pub mod preset;
pub mod prosody;
pub mod request;
pub mod rewrite;
pub mod synth;
pub mod voices;

pub use config::{AnnounceConfig, OpenAiConfig};
pub use error::{
    AnnounceError, ConfigurationError, ExportError, MasteringError, RewriteError, SynthesisError,
    TransformError,
};
pub use export::{ExportFormat, VariantExporter};
pub use master::{AudioMasterer, AudioTransform, FfmpegEngine, TransformSpec, MASTER_FILTER};
pub use pipeline::{Pipeline, PipelineArtifact};
pub use preset::StylePreset;
pub use prosody::post_process;
pub use request::{AnnouncementRequest, Gender, Language, Style};
pub use rewrite::{OpenAiRewriter, Rewriter};
pub use synth::{PiperEngine, SpeechSynthesizer, SynthesisEngine};
pub use voices::VoiceCatalog;

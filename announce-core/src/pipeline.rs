//! Pipeline orchestration: rewrite → prosody repair → synthesis →
//! mastering (or raw acceptance) → variant export, threading each stage's
//! output into the next. Any stage failure aborts the run.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Local;

use crate::config::AnnounceConfig;
use crate::error::{AnnounceError, ConfigurationError};
use crate::export::VariantExporter;
use crate::master::{AudioMasterer, AudioTransform, FfmpegEngine};
use crate::prosody::post_process;
use crate::request::AnnouncementRequest;
use crate::rewrite::{OpenAiRewriter, Rewriter};
use crate::synth::{PiperEngine, SpeechSynthesizer};
use crate::voices::VoiceCatalog;

/// Everything a finished run produced. Fields are populated strictly in
/// pipeline order; the raw path is cleared once mastering retires the file.
#[derive(Debug, Clone, Default)]
pub struct PipelineArtifact {
    pub final_text: String,
    pub raw_audio: Option<PathBuf>,
    pub mastered_audio: Option<PathBuf>,
    pub exports: BTreeMap<String, PathBuf>,
}

impl PipelineArtifact {
    /// Primary deliverable: mastered audio when mastering ran, raw audio
    /// otherwise, or a surviving export when the WAV was dropped.
    pub fn primary_audio(&self) -> Option<&Path> {
        self.mastered_audio
            .as_deref()
            .or(self.raw_audio.as_deref())
            .or_else(|| self.exports.values().next().map(PathBuf::as_path))
    }
}

/// One logical pipeline per request; stages run strictly sequentially.
pub struct Pipeline {
    rewriter: Box<dyn Rewriter>,
    synthesizer: SpeechSynthesizer,
    masterer: AudioMasterer,
    exporter: VariantExporter,
    output_dir: PathBuf,
}

impl Pipeline {
    pub fn new(
        rewriter: Box<dyn Rewriter>,
        synthesizer: SpeechSynthesizer,
        masterer: AudioMasterer,
        exporter: VariantExporter,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            rewriter,
            synthesizer,
            masterer,
            exporter,
            output_dir: output_dir.into(),
        }
    }

    /// Wire up the real collaborators from configuration.
    pub fn from_config(config: &AnnounceConfig) -> Result<Self, AnnounceError> {
        let rewriter = OpenAiRewriter::new(&config.openai)?;
        let catalog = VoiceCatalog::with_default_voices(&config.resolve_voices_dir());
        let audio_engine: Arc<dyn AudioTransform> =
            Arc::new(FfmpegEngine::new(&config.ffmpeg_bin));
        Ok(Self::new(
            Box::new(rewriter),
            SpeechSynthesizer::new(catalog, Box::new(PiperEngine::new(&config.piper_bin))),
            AudioMasterer::new(audio_engine.clone()),
            VariantExporter::new(audio_engine),
            config.output_dir.clone(),
        ))
    }

    /// Full pipeline for one request.
    pub fn run(&self, request: &AnnouncementRequest) -> Result<PipelineArtifact, AnnounceError> {
        request.validate()?;
        let note = request.style.note(request.custom_style.as_deref());
        let draft = self.rewriter.rewrite(&request.text, &note, request.lang)?;
        self.render(&draft, request, true)
    }

    /// Text half only: rewrite plus prosody repair, no audio.
    pub fn generate_text(&self, request: &AnnouncementRequest) -> Result<String, AnnounceError> {
        request.validate()?;
        let note = request.style.note(request.custom_style.as_deref());
        let draft = self.rewriter.rewrite(&request.text, &note, request.lang)?;
        Ok(post_process(&draft, request.style))
    }

    /// Audio half: synthesize possibly hand-edited text without another
    /// rewrite call. With `keep_wav` false and at least one export
    /// produced, the intermediate WAV is dropped and the artifact's primary
    /// falls through to an export.
    pub fn render(
        &self,
        text: &str,
        request: &AnnouncementRequest,
        keep_wav: bool,
    ) -> Result<PipelineArtifact, AnnounceError> {
        if text.trim().is_empty() {
            return Err(ConfigurationError::InvalidRequest(
                "text must not be empty".to_string(),
            )
            .into());
        }
        let final_text = post_process(text, request.style);

        let stamp = unique_stamp();
        let raw_path = self.output_dir.join(format!(
            "raw_{}_{}_{}_{}.wav",
            request.lang, request.style, request.gender, stamp
        ));
        let mastered_path = self.output_dir.join(format!(
            "announcement_{}_{}_{}_{}.wav",
            request.lang, request.style, request.gender, stamp
        ));

        let preset = request.style.preset();
        self.synthesizer.synthesize(
            &final_text,
            request.lang,
            request.gender,
            &preset,
            &raw_path,
            request.speaker,
            &request.extra_args,
        )?;
        tracing::info!(raw = %raw_path.display(), "synthesized raw audio");

        let mut artifact = PipelineArtifact {
            final_text,
            raw_audio: Some(raw_path.clone()),
            ..PipelineArtifact::default()
        };

        let primary = if request.master {
            let mastered = self.masterer.master(&raw_path, &mastered_path)?;
            tracing::info!(mastered = %mastered.display(), "mastered audio");
            artifact.raw_audio = None;
            artifact.mastered_audio = Some(mastered.clone());
            mastered
        } else {
            raw_path
        };

        if !request.export_formats.is_empty() {
            artifact.exports = self.exporter.export(&primary, &request.export_formats)?;
            if !keep_wav && !artifact.exports.is_empty() {
                if let Err(e) = fs::remove_file(&primary) {
                    tracing::warn!(path = %primary.display(), error = %e, "could not remove intermediate wav");
                }
                artifact.raw_audio = None;
                artifact.mastered_audio = None;
            }
        }

        Ok(artifact)
    }
}

/// Collision-resistant per-request stamp: wall-clock second plus the
/// current nanosecond component.
fn unique_stamp() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    format!("{}_{:09}", Local::now().format("%Y%m%d_%H%M%S"), nanos)
}

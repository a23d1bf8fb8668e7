//! Audio mastering: fixed ffmpeg filter chain plus raw-file lifecycle.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use crate::error::{MasteringError, TransformError};

/// Filter chain applied to every raw synthesis, in order: loudness
/// normalization, high-pass below 80 Hz, low-pass above 12 kHz,
/// leading-silence trim, and a fixed 16-bit/48 kHz output format.
pub const MASTER_FILTER: &str = "loudnorm=I=-16:TP=-1.5:LRA=11,\
highpass=f=80,\
lowpass=f=12000,\
silenceremove=start_periods=1:start_threshold=-40dB:start_silence=0.3:detection=peak,\
aformat=sample_fmts=s16:sample_rates=48000";

/// What to ask of the audio engine: a filter chain or a codec selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformSpec {
    Filter(String),
    Codec(Vec<String>),
}

/// Capability seam for the mastering/transcoding collaborator.
pub trait AudioTransform {
    fn transform(
        &self,
        input: &Path,
        spec: &TransformSpec,
        output: &Path,
    ) -> Result<(), TransformError>;
}

/// ffmpeg engine, shared by mastering and variant export.
pub struct FfmpegEngine {
    bin: PathBuf,
}

impl FfmpegEngine {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }
}

impl AudioTransform for FfmpegEngine {
    fn transform(
        &self,
        input: &Path,
        spec: &TransformSpec,
        output: &Path,
    ) -> Result<(), TransformError> {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("-y").arg("-i").arg(input);
        match spec {
            TransformSpec::Filter(chain) => {
                cmd.arg("-af").arg(chain);
            }
            TransformSpec::Codec(args) => {
                cmd.args(args);
            }
        }
        cmd.arg(output);
        cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());

        tracing::debug!(input = %input.display(), output = %output.display(), "invoking audio engine");
        let out = cmd.output()?;
        if !out.status.success() {
            return Err(TransformError::Engine {
                status: out.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

/// Mastering stage: applies the fixed chain, then retires the raw file.
pub struct AudioMasterer {
    engine: Arc<dyn AudioTransform>,
}

impl AudioMasterer {
    pub fn new(engine: Arc<dyn AudioTransform>) -> Self {
        Self { engine }
    }

    /// Master `raw` into `out`. On success the raw input is deleted
    /// best-effort (a deletion failure is logged, never propagated); on
    /// engine failure the raw file is left in place for diagnosis.
    pub fn master(&self, raw: &Path, out: &Path) -> Result<PathBuf, MasteringError> {
        self.engine
            .transform(raw, &TransformSpec::Filter(MASTER_FILTER.to_string()), out)
            .map_err(MasteringError)?;
        if let Err(e) = fs::remove_file(raw) {
            tracing::warn!(raw = %raw.display(), error = %e, "could not remove raw audio after mastering");
        }
        Ok(out.to_path_buf())
    }
}

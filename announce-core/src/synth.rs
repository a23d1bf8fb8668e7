//! Speech synthesis: voice resolution plus the Piper subprocess engine.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::SynthesisError;
use crate::preset::StylePreset;
use crate::request::{Gender, Language};
use crate::voices::VoiceCatalog;

/// Capability seam for the synthesis collaborator.
pub trait SynthesisEngine {
    /// Render `text` with the given voice model into `out_path`.
    fn synthesize(
        &self,
        voice: &Path,
        out_path: &Path,
        preset: &StylePreset,
        speaker: Option<u32>,
        extra_args: &[String],
        text: &str,
    ) -> Result<(), SynthesisError>;
}

/// Piper CLI engine: one subprocess per synthesis, stderr captured for
/// diagnostics.
pub struct PiperEngine {
    bin: PathBuf,
}

impl PiperEngine {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }
}

impl SynthesisEngine for PiperEngine {
    fn synthesize(
        &self,
        voice: &Path,
        out_path: &Path,
        preset: &StylePreset,
        speaker: Option<u32>,
        extra_args: &[String],
        text: &str,
    ) -> Result<(), SynthesisError> {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("-m")
            .arg(voice)
            .arg("-f")
            .arg(out_path)
            .arg("-q")
            .arg("--length_scale")
            .arg(preset.length_scale.to_string())
            .arg("--noise_scale")
            .arg(preset.noise_scale.to_string())
            .arg("--noise_w")
            .arg(preset.noise_w.to_string())
            .arg("--sentence_silence")
            .arg(preset.sentence_silence.to_string());
        if let Some(speaker) = speaker {
            cmd.arg("--speaker").arg(speaker.to_string());
        }
        cmd.args(extra_args);
        cmd.arg("--").arg(text);
        cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());

        tracing::debug!(voice = %voice.display(), out = %out_path.display(), "invoking synthesis engine");
        let output = cmd.output()?;
        if !output.status.success() {
            return Err(SynthesisError::Engine {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

/// Front of the synthesis stage: resolves a voice through the catalog, then
/// drives the engine with the style preset.
pub struct SpeechSynthesizer {
    catalog: VoiceCatalog,
    engine: Box<dyn SynthesisEngine>,
}

impl SpeechSynthesizer {
    pub fn new(catalog: VoiceCatalog, engine: Box<dyn SynthesisEngine>) -> Self {
        Self { catalog, engine }
    }

    /// Voice resolution failures surface before the engine is touched.
    #[allow(clippy::too_many_arguments)]
    pub fn synthesize(
        &self,
        text: &str,
        language: Language,
        gender: Gender,
        preset: &StylePreset,
        out_path: &Path,
        speaker: Option<u32>,
        extra_args: &[String],
    ) -> Result<(), SynthesisError> {
        let voice = self.catalog.resolve(language, gender)?;
        self.engine.synthesize(voice, out_path, preset, speaker, extra_args, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Style;
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;

    /// Engine that records how often it was invoked.
    struct CountingEngine {
        calls: Rc<Cell<usize>>,
    }

    impl SynthesisEngine for CountingEngine {
        fn synthesize(
            &self,
            _voice: &Path,
            out_path: &Path,
            _preset: &StylePreset,
            _speaker: Option<u32>,
            _extra_args: &[String],
            _text: &str,
        ) -> Result<(), SynthesisError> {
            self.calls.set(self.calls.get() + 1);
            fs::write(out_path, b"AUDIO").map_err(SynthesisError::from)
        }
    }

    #[test]
    fn missing_voice_fails_before_engine_call() {
        let calls = Rc::new(Cell::new(0));
        let synth = SpeechSynthesizer::new(
            VoiceCatalog::new(),
            Box::new(CountingEngine { calls: calls.clone() }),
        );
        let err = synth
            .synthesize(
                "Hello.",
                Language::En,
                Gender::Female,
                &Style::Formal.preset(),
                Path::new("/tmp/never-written.wav"),
                None,
                &[],
            )
            .unwrap_err();
        assert!(matches!(err, SynthesisError::VoiceNotFound { .. }));
        assert_eq!(calls.get(), 0, "engine must not run without a voice");
    }

    #[test]
    fn resolved_voice_reaches_engine() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("voice.onnx");
        fs::write(&model, b"onnx").unwrap();
        let mut catalog = VoiceCatalog::new();
        catalog.insert(Language::En, Gender::Female, &model);

        let calls = Rc::new(Cell::new(0));
        let synth = SpeechSynthesizer::new(
            catalog,
            Box::new(CountingEngine { calls: calls.clone() }),
        );
        let out = dir.path().join("out.wav");
        synth
            .synthesize(
                "Hello.",
                Language::En,
                Gender::Female,
                &Style::Friendly.preset(),
                &out,
                None,
                &[],
            )
            .unwrap();
        assert!(out.exists());
        assert_eq!(calls.get(), 1);
    }

    #[cfg(unix)]
    mod piper_stub {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn write_stub(path: &Path, body: &str) {
            fs::write(path, body).unwrap();
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }

        #[test]
        fn piper_engine_writes_output_file() {
            let dir = tempfile::tempdir().unwrap();
            let stub = dir.path().join("piper.sh");
            // Stub that honors the -f output flag like the real engine.
            write_stub(
                &stub,
                "#!/bin/sh\nout=\"\"\nprev=\"\"\nfor a in \"$@\"; do\n  if [ \"$prev\" = \"-f\" ]; then out=\"$a\"; fi\n  prev=\"$a\"\ndone\nprintf 'RIFF' > \"$out\"\n",
            );

            let engine = PiperEngine::new(&stub);
            let voice = dir.path().join("voice.onnx");
            fs::write(&voice, b"onnx").unwrap();
            let out = dir.path().join("raw.wav");
            engine
                .synthesize(&voice, &out, &Style::Urgent.preset(), Some(1), &[], "Act now!")
                .unwrap();
            assert_eq!(fs::read(&out).unwrap(), b"RIFF");
        }

        #[test]
        fn piper_engine_failure_carries_stderr() {
            let dir = tempfile::tempdir().unwrap();
            let stub = dir.path().join("piper.sh");
            write_stub(&stub, "#!/bin/sh\necho 'model load failed' >&2\nexit 3\n");

            let engine = PiperEngine::new(&stub);
            let err = engine
                .synthesize(
                    Path::new("voice.onnx"),
                    Path::new("out.wav"),
                    &Style::Formal.preset(),
                    None,
                    &[],
                    "Hello.",
                )
                .unwrap_err();
            match err {
                SynthesisError::Engine { status, stderr } => {
                    assert_eq!(status, 3);
                    assert!(stderr.contains("model load failed"));
                }
                other => panic!("expected engine error, got {other:?}"),
            }
        }
    }
}

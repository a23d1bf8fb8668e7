//! Variant export: optional transcodes of the mastered audio into extra
//! delivery formats, one engine invocation per recognized format.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ExportError;
use crate::master::{AudioTransform, TransformSpec};

/// Delivery formats, each with a fixed codec/bitrate policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExportFormat {
    M4a,
    Mp3,
    Opus,
}

impl ExportFormat {
    /// Unrecognized names are not an error; the exporter skips them.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "m4a" => Some(ExportFormat::M4a),
            "mp3" => Some(ExportFormat::Mp3),
            "opus" => Some(ExportFormat::Opus),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::M4a => "m4a",
            ExportFormat::Mp3 => "mp3",
            ExportFormat::Opus => "opus",
        }
    }

    fn codec_args(self) -> Vec<String> {
        let args: &[&str] = match self {
            ExportFormat::M4a => &["-c:a", "aac", "-b:a", "192k"],
            ExportFormat::Mp3 => &["-c:a", "libmp3lame", "-q:a", "2"],
            ExportFormat::Opus => &["-c:a", "libopus", "-b:a", "96k"],
        };
        args.iter().map(|s| (*s).to_string()).collect()
    }
}

/// Transcodes the primary audio once per recognized requested format.
/// Formats share nothing beyond the immutable input file.
pub struct VariantExporter {
    engine: Arc<dyn AudioTransform>,
}

impl VariantExporter {
    pub fn new(engine: Arc<dyn AudioTransform>) -> Self {
        Self { engine }
    }

    /// Derive each output path by substituting the extension, then invoke
    /// the engine per format. The first failure aborts the remaining
    /// formats; variants already written stay on disk.
    pub fn export(
        &self,
        input: &Path,
        formats: &[String],
    ) -> Result<BTreeMap<String, PathBuf>, ExportError> {
        let mut outputs = BTreeMap::new();
        for name in formats {
            let Some(format) = ExportFormat::from_name(name) else {
                tracing::debug!(format = %name, "skipping unrecognized export format");
                continue;
            };
            let out_path = input.with_extension(format.extension());
            self.engine
                .transform(input, &TransformSpec::Codec(format.codec_args()), &out_path)
                .map_err(|source| ExportError {
                    format: format.extension().to_string(),
                    source,
                })?;
            outputs.insert(format.extension().to_string(), out_path);
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use std::fs;

    struct TouchTransform;

    impl AudioTransform for TouchTransform {
        fn transform(
            &self,
            _input: &Path,
            spec: &TransformSpec,
            output: &Path,
        ) -> Result<(), TransformError> {
            assert!(matches!(spec, TransformSpec::Codec(_)));
            fs::write(output, b"ENC").map_err(TransformError::from)?;
            Ok(())
        }
    }

    struct FailingTransform;

    impl AudioTransform for FailingTransform {
        fn transform(
            &self,
            _input: &Path,
            _spec: &TransformSpec,
            _output: &Path,
        ) -> Result<(), TransformError> {
            Err(TransformError::Engine { status: 1, stderr: "no encoder".into() })
        }
    }

    #[test]
    fn unknown_formats_are_silently_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("announcement.wav");
        fs::write(&input, b"WAV").unwrap();

        let exporter = VariantExporter::new(Arc::new(TouchTransform));
        let outputs = exporter
            .export(&input, &["m4a".to_string(), "bogus".to_string()])
            .unwrap();
        assert_eq!(outputs.len(), 1);
        let m4a = outputs.get("m4a").unwrap();
        assert_eq!(m4a.extension().unwrap(), "m4a");
        assert!(m4a.exists());
    }

    #[test]
    fn all_known_formats_export() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("announcement.wav");
        fs::write(&input, b"WAV").unwrap();

        let exporter = VariantExporter::new(Arc::new(TouchTransform));
        let formats: Vec<String> = ["opus", "MP3", "m4a"].iter().map(|s| s.to_string()).collect();
        let outputs = exporter.export(&input, &formats).unwrap();
        assert_eq!(outputs.len(), 3);
        assert!(outputs.contains_key("mp3"), "format names are case-insensitive");
    }

    #[test]
    fn empty_request_yields_empty_map() {
        let exporter = VariantExporter::new(Arc::new(TouchTransform));
        let outputs = exporter.export(Path::new("a.wav"), &[]).unwrap();
        assert!(outputs.is_empty());
    }

    #[test]
    fn failure_names_the_format() {
        let exporter = VariantExporter::new(Arc::new(FailingTransform));
        let err = exporter
            .export(Path::new("a.wav"), &["opus".to_string()])
            .unwrap_err();
        assert_eq!(err.format, "opus");
        assert!(err.to_string().contains("no encoder"));
    }
}

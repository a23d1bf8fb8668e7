//! Voice catalog: read-only lookup from (language, gender) to a trained
//! voice model on disk, verified before synthesis.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::SynthesisError;
use crate::request::{Gender, Language};

/// Built once at startup; never mutated during pipeline execution.
#[derive(Debug, Clone, Default)]
pub struct VoiceCatalog {
    entries: HashMap<(Language, Gender), PathBuf>,
}

impl VoiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default voice table rooted at `voices_dir`. The Farsi female slot
    /// reuses the Catalan female model; no dedicated model exists for it.
    pub fn with_default_voices(voices_dir: &Path) -> Self {
        let mut catalog = Self::new();
        catalog.insert(Language::En, Gender::Female, voices_dir.join("en_US-amy-low.onnx"));
        catalog.insert(Language::En, Gender::Male, voices_dir.join("en_GB-alan-low.onnx"));
        catalog.insert(Language::Es, Gender::Female, voices_dir.join("es_ES-mls_10246-low.onnx"));
        catalog.insert(Language::Es, Gender::Male, voices_dir.join("es_ES-carlfm-low.onnx"));
        catalog.insert(Language::Ca, Gender::Female, voices_dir.join("ca_ES-upc_ona-x_low.onnx"));
        catalog.insert(Language::Ca, Gender::Male, voices_dir.join("ca_ES-upc_pau-x_low.onnx"));
        catalog.insert(Language::Fa, Gender::Female, voices_dir.join("ca_ES-upc_ona-x_low.onnx"));
        catalog.insert(Language::Fa, Gender::Male, voices_dir.join("fa_IR-amir-medium.onnx"));
        catalog
    }

    pub fn insert(&mut self, language: Language, gender: Gender, path: impl Into<PathBuf>) {
        self.entries.insert((language, gender), path.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a voice, verifying the model file exists at call time.
    /// Failures surface before any synthesis engine is invoked.
    pub fn resolve(&self, language: Language, gender: Gender) -> Result<&Path, SynthesisError> {
        let path = self
            .entries
            .get(&(language, gender))
            .ok_or(SynthesisError::VoiceNotFound { language, gender, path: None })?;
        if !path.exists() {
            return Err(SynthesisError::VoiceNotFound {
                language,
                gender,
                path: Some(path.clone()),
            });
        }
        Ok(path)
    }
}

//! Request descriptor: what to announce, in which language, voice and style.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Announcement output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Ca,
    Fa,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Ca => "ca",
            Language::Fa => "fa",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voice gender within a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested announcement style. Drives both the rewrite tone note and the
/// synthesis preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Friendly,
    Formal,
    Urgent,
    Custom,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Friendly => "friendly",
            Style::Formal => "formal",
            Style::Urgent => "urgent",
            Style::Custom => "custom",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One announcement request, typically deserialized from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementRequest {
    pub text: String,
    pub lang: Language,
    pub gender: Gender,
    pub style: Style,
    /// Tone note for style=custom; a neutral default applies when absent.
    #[serde(default)]
    pub custom_style: Option<String>,
    #[serde(default = "default_true")]
    pub master: bool,
    /// Extra delivery formats; unrecognized names are skipped, not errors.
    #[serde(default)]
    pub export_formats: Vec<String>,
    /// Speaker index for multi-speaker voice models.
    #[serde(default)]
    pub speaker: Option<u32>,
    /// Passthrough arguments appended to the synthesis engine invocation.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl AnnouncementRequest {
    /// Parse and validate from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, ConfigurationError> {
        let req: Self = serde_json::from_str(s)
            .map_err(|e| ConfigurationError::InvalidRequest(e.to_string()))?;
        req.validate()?;
        Ok(req)
    }

    /// Load from a file path.
    pub fn load_path(path: &Path) -> Result<Self, ConfigurationError> {
        let s = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&s)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.text.trim().is_empty() {
            return Err(ConfigurationError::InvalidRequest(
                "text must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

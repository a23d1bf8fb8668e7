//! Process configuration: engine binaries, voice/output directories, and
//! the rewrite model. Built once at startup and passed in explicitly.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigurationError;

/// Rewriting collaborator settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Usually supplied via OPENAI_API_KEY rather than the config file.
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self { model: default_model(), base_url: default_base_url(), api_key: None }
    }
}

/// Full configuration (announce.toml).
#[derive(Debug, Clone, Deserialize)]
pub struct AnnounceConfig {
    #[serde(default = "default_piper_bin")]
    pub piper_bin: PathBuf,
    #[serde(default = "default_ffmpeg_bin")]
    pub ffmpeg_bin: PathBuf,
    /// When unset, the directory is discovered at startup.
    #[serde(default)]
    pub voices_dir: Option<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub openai: OpenAiConfig,
}

fn default_piper_bin() -> PathBuf {
    PathBuf::from("piper")
}

fn default_ffmpeg_bin() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for AnnounceConfig {
    fn default() -> Self {
        Self {
            piper_bin: default_piper_bin(),
            ffmpeg_bin: default_ffmpeg_bin(),
            voices_dir: None,
            output_dir: default_output_dir(),
            openai: OpenAiConfig::default(),
        }
    }
}

impl AnnounceConfig {
    /// Load from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigurationError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from file path.
    pub fn load_path(path: &Path) -> Result<Self, ConfigurationError> {
        let s = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&s)
    }

    /// Apply environment overrides: PIPER_BIN, FFMPEG_BIN, VOICES_DIR,
    /// OPENAI_MODEL, OPENAI_API_KEY.
    pub fn apply_env(mut self) -> Self {
        if let Ok(v) = env::var("PIPER_BIN") {
            self.piper_bin = PathBuf::from(v);
        }
        if let Ok(v) = env::var("FFMPEG_BIN") {
            self.ffmpeg_bin = PathBuf::from(v);
        }
        if let Ok(v) = env::var("VOICES_DIR") {
            self.voices_dir = Some(PathBuf::from(v));
        }
        if let Ok(v) = env::var("OPENAI_MODEL") {
            self.openai.model = v;
        }
        if let Ok(v) = env::var("OPENAI_API_KEY") {
            self.openai.api_key = Some(v);
        }
        self
    }

    /// Voices directory: configured value, else `./voices` if present, else
    /// `~/.piper/voices` if present, else `./voices`.
    pub fn resolve_voices_dir(&self) -> PathBuf {
        if let Some(dir) = &self.voices_dir {
            return dir.clone();
        }
        let cwd_voices = PathBuf::from("voices");
        if cwd_voices.is_dir() {
            return cwd_voices;
        }
        if let Ok(home) = env::var("HOME") {
            let dot = Path::new(&home).join(".piper").join("voices");
            if dot.is_dir() {
                return dot;
            }
        }
        cwd_voices
    }
}

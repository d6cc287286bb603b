use anyhow::{bail, Context};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::voices::{ProsodyCatalog, VoiceCatalog};

/// Immutable run-wide configuration: service endpoints, sampling parameters,
/// and the voice/prosody catalogs. Loaded once at startup and passed
/// explicitly to the pipelines.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub textgen: TextGenSettings,
    #[serde(default)]
    pub speech: SpeechSettings,
    #[serde(default)]
    pub voices: VoiceCatalog,
    #[serde(default)]
    pub prosody: ProsodyCatalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextGenSettings {
    #[serde(default = "default_textgen_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSettings {
    #[serde(default = "default_speech_endpoint")]
    pub endpoint: String,
    /// Falls back to the AZURE_SPEECH_KEY environment variable when unset.
    #[serde(default)]
    pub subscription_key: Option<String>,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(path) = Self::project_path() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        if let Ok(path) = Self::default_path() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read settings at {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&raw)
            .with_context(|| format!("parse settings at {}", path.display()))?;
        Ok(settings)
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        let base = BaseDirs::new().context("unable to resolve home directory")?;
        Ok(base.config_dir().join("scamset").join("settings.json"))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=2.0).contains(&self.textgen.temperature) {
            bail!("textgen.temperature must be between 0.0 and 2.0");
        }

        if self.textgen.max_output_tokens == 0 {
            bail!("textgen.max_output_tokens must be greater than 0");
        }

        if self.textgen.endpoint.is_empty() || self.speech.endpoint.is_empty() {
            bail!("service endpoints must not be empty");
        }

        self.voices.validate()?;

        Ok(())
    }

    fn project_path() -> Option<PathBuf> {
        Some(PathBuf::from("scamset.json"))
    }
}

impl Default for TextGenSettings {
    fn default() -> Self {
        Self {
            endpoint: default_textgen_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            endpoint: default_speech_endpoint(),
            subscription_key: None,
        }
    }
}

fn default_textgen_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_temperature() -> f32 {
    0.9
}

fn default_max_output_tokens() -> u32 {
    2000
}

fn default_speech_endpoint() -> String {
    "https://eastus.tts.speech.microsoft.com/cognitiveservices/v1".to_string()
}

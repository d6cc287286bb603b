pub mod azure;
pub mod ssml;

use anyhow::Context;
use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Mp3,
}

impl AudioFormat {
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }

    /// X-Microsoft-OutputFormat value for the speech service.
    pub fn output_format(self) -> &'static str {
        match self {
            AudioFormat::Wav => "riff-24khz-16bit-mono-pcm",
            AudioFormat::Mp3 => "audio-24khz-96kbitrate-mono-mp3",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Per-segment prosody modifiers layered on top of the fixed role voice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prosody {
    pub rate: String,
    pub volume: String,
    pub pitch: String,
}

/// Seam to the external speech-synthesis service. The service may reject
/// unsupported parameter combinations; callers fall back to a plain-voice
/// request via [`synthesize_to_file`].
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        prosody: Option<&Prosody>,
        format: AudioFormat,
    ) -> anyhow::Result<Vec<u8>>;
}

/// Synthesize one segment to a file, retrying once without prosody
/// modifiers before giving up.
pub async fn synthesize_to_file(
    backend: &dyn SpeechSynthesizer,
    text: &str,
    voice: &str,
    prosody: &Prosody,
    format: AudioFormat,
    output: &Path,
) -> anyhow::Result<()> {
    let audio = match backend.synthesize(text, voice, Some(prosody), format).await {
        Ok(audio) => audio,
        Err(err) => {
            tracing::warn!(error = ?err, voice, "synthesis with modifiers failed; retrying plain");
            backend
                .synthesize(text, voice, None, format)
                .await
                .context("fallback synthesis")?
        }
    };

    fs::write(output, &audio)
        .with_context(|| format!("write audio segment {}", output.display()))?;
    Ok(())
}

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::Client;

use crate::config::SpeechSettings;

use super::{ssml, AudioFormat, Prosody, SpeechSynthesizer};

/// REST client for the Azure Cognitive Services speech endpoint: one SSML
/// POST per segment, audio bytes back.
pub struct AzureSpeechClient {
    http: Client,
    endpoint: String,
    subscription_key: Option<String>,
}

impl AzureSpeechClient {
    pub fn new(settings: &SpeechSettings) -> Self {
        let subscription_key = settings
            .subscription_key
            .clone()
            .or_else(|| std::env::var("AZURE_SPEECH_KEY").ok());

        Self {
            http: Client::new(),
            endpoint: settings.endpoint.clone(),
            subscription_key,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for AzureSpeechClient {
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        prosody: Option<&Prosody>,
        format: AudioFormat,
    ) -> anyhow::Result<Vec<u8>> {
        let body = ssml::build(text, voice, prosody);

        let mut request = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", format.output_format())
            .header("User-Agent", "scamset")
            .body(body);

        if let Some(key) = &self.subscription_key {
            request = request.header("Ocp-Apim-Subscription-Key", key);
        }

        let response = request.send().await.context("speech service request")?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("speech service returned {status}: {detail}");
        }

        let audio = response
            .bytes()
            .await
            .context("read speech service response")?;
        if audio.is_empty() {
            bail!("speech service returned empty audio");
        }

        Ok(audio.to_vec())
    }
}

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use scamset::assembler::{self, DiarizationDocument};
use scamset::config::Settings;
use scamset::conversation::{Conversation, Language, ScamType, Segment, Speaker};
use scamset::generator;
use scamset::textgen::TextGenerator;
use scamset::tts::{AudioFormat, Prosody, SpeechSynthesizer};

const SCRIPT: &str = "VICTIM: Hello, who is calling?\n\
SCAMMER: This is the bank security department, sir.\n\
VICTIM: Um... is something wrong with my account?\n\
SCAMMER: We noticed suspicious activity on your card this morning.";

struct FixedScript;

#[async_trait]
impl TextGenerator for FixedScript {
    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        Ok(SCRIPT.to_string())
    }
}

/// Fails on exactly one call (zero-based), succeeds otherwise.
struct FlakyScript {
    calls: AtomicUsize,
    fail_on: usize,
}

#[async_trait]
impl TextGenerator for FlakyScript {
    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == self.fail_on {
            anyhow::bail!("service unavailable");
        }
        Ok(SCRIPT.to_string())
    }
}

struct FakeSpeech;

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn synthesize(
        &self,
        _text: &str,
        _voice: &str,
        _prosody: Option<&Prosody>,
        _format: AudioFormat,
    ) -> anyhow::Result<Vec<u8>> {
        Ok(vec![0u8; 16])
    }
}

/// Rejects any request carrying prosody modifiers, accepts the plain retry.
struct RejectsProsody {
    plain_calls: AtomicUsize,
}

#[async_trait]
impl SpeechSynthesizer for RejectsProsody {
    async fn synthesize(
        &self,
        _text: &str,
        _voice: &str,
        prosody: Option<&Prosody>,
        _format: AudioFormat,
    ) -> anyhow::Result<Vec<u8>> {
        if prosody.is_some() {
            anyhow::bail!("unsupported parameter combination");
        }
        self.plain_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![1u8; 16])
    }
}

struct BrokenSpeech;

#[async_trait]
impl SpeechSynthesizer for BrokenSpeech {
    async fn synthesize(
        &self,
        _text: &str,
        _voice: &str,
        _prosody: Option<&Prosody>,
        _format: AudioFormat,
    ) -> anyhow::Result<Vec<u8>> {
        anyhow::bail!("synthesis offline")
    }
}

fn write_conversation(dir: &Path, file_id: &str, language: Language) -> std::path::PathBuf {
    let segments = vec![
        segment(Speaker::Victim, "Hello, who is calling me right now?"),
        segment(Speaker::Scammer, "This is the bank security department, sir."),
        segment(Speaker::Victim, "Um... okay, what do you need from me?"),
    ];
    let conversation = Conversation::new(file_id, ScamType::BankFraud, language, segments);
    let path = dir.join(format!("{file_id}.json"));
    fs::write(&path, serde_json::to_string_pretty(&conversation).unwrap()).unwrap();
    path
}

fn segment(speaker: Speaker, text: &str) -> Segment {
    Segment {
        speaker,
        role: speaker.role(),
        text: text.to_string(),
    }
}

fn csv_line_count(path: &Path) -> usize {
    fs::read_to_string(path).unwrap().lines().count()
}

#[tokio::test]
async fn generator_batch_writes_one_json_per_conversation_plus_metadata() {
    let dir = tempfile::tempdir().unwrap();

    let generated = generator::run_batch(&FixedScript, 3, dir.path()).await.unwrap();
    assert_eq!(generated, 3);

    for id in ["conv_001", "conv_002", "conv_003"] {
        let path = dir.path().join(format!("{id}.json"));
        let conversation: Conversation =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(conversation.file_id, id);
        assert_eq!(conversation.segments.len(), 4);
        assert_eq!(conversation.num_speakers, 2);
    }

    // Header plus three data rows.
    assert_eq!(csv_line_count(&dir.path().join("metadata.csv")), 4);
}

#[tokio::test]
async fn generator_batch_skips_failed_service_calls() {
    let dir = tempfile::tempdir().unwrap();
    let textgen = FlakyScript {
        calls: AtomicUsize::new(0),
        fail_on: 1,
    };

    let generated = generator::run_batch(&textgen, 3, dir.path()).await.unwrap();
    assert_eq!(generated, 2);

    assert!(dir.path().join("conv_001.json").exists());
    assert!(!dir.path().join("conv_002.json").exists());
    assert!(dir.path().join("conv_003.json").exists());
    assert_eq!(csv_line_count(&dir.path().join("metadata.csv")), 3);
}

#[tokio::test]
async fn assembler_emits_audio_diarization_and_transcript() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let conversation_file = write_conversation(input.path(), "conv_001", Language::English);

    let summary = assembler::assemble_conversation(
        &FakeSpeech,
        &Settings::default(),
        &conversation_file,
        output.path(),
        AudioFormat::Wav,
    )
    .await
    .unwrap();

    assert_eq!(summary.num_segments, 3);
    assert_ne!(summary.victim_voice, summary.scammer_voice);
    assert!(summary.duration_sec > 0.0);

    let conv_dir = output.path().join("conv_001");
    for i in 1..=3 {
        assert!(conv_dir.join(format!("segment_{i:03}.wav")).exists());
    }

    let document: DiarizationDocument =
        serde_json::from_str(&fs::read_to_string(&summary.diarization_file).unwrap()).unwrap();
    assert_eq!(document.file_id, "conv_001");
    assert_eq!(document.segments.len(), 3);
    assert_eq!(document.voices.victim, summary.victim_voice);
    for pair in document.segments.windows(2) {
        assert!(pair[1].start >= pair[0].end);
    }

    assert_eq!(csv_line_count(&summary.transcript_file), 4);
}

#[tokio::test]
async fn assembler_uses_only_the_hindi_catalog_for_hindi_conversations() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let conversation_file = write_conversation(input.path(), "conv_007", Language::Hindi);

    let summary = assembler::assemble_conversation(
        &FakeSpeech,
        &Settings::default(),
        &conversation_file,
        output.path(),
        AudioFormat::Wav,
    )
    .await
    .unwrap();

    assert!(summary.victim_voice.starts_with("hi-IN-"));
    assert!(summary.scammer_voice.starts_with("hi-IN-"));
}

#[tokio::test]
async fn assembler_falls_back_to_plain_voice_requests() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let conversation_file = write_conversation(input.path(), "conv_001", Language::English);
    let speech = RejectsProsody {
        plain_calls: AtomicUsize::new(0),
    };

    let summary = assembler::assemble_conversation(
        &speech,
        &Settings::default(),
        &conversation_file,
        output.path(),
        AudioFormat::Wav,
    )
    .await
    .unwrap();

    assert_eq!(summary.num_segments, 3);
    assert_eq!(speech.plain_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn failed_segments_are_left_out_of_the_artifacts() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let conversation_file = write_conversation(input.path(), "conv_001", Language::English);

    let summary = assembler::assemble_conversation(
        &BrokenSpeech,
        &Settings::default(),
        &conversation_file,
        output.path(),
        AudioFormat::Wav,
    )
    .await
    .unwrap();

    assert_eq!(summary.num_segments, 0);
    assert_eq!(summary.duration_sec, 0.0);

    let document: DiarizationDocument =
        serde_json::from_str(&fs::read_to_string(&summary.diarization_file).unwrap()).unwrap();
    assert!(document.segments.is_empty());
    assert_eq!(csv_line_count(&summary.transcript_file), 1);
}

#[tokio::test]
async fn assembler_batch_indexes_every_processed_conversation() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_conversation(input.path(), "conv_001", Language::English);
    write_conversation(input.path(), "conv_002", Language::Hinglish);
    fs::write(input.path().join("notes.txt"), "ignored").unwrap();

    let processed = assembler::run_batch(
        &FakeSpeech,
        &Settings::default(),
        input.path(),
        output.path(),
        AudioFormat::Mp3,
    )
    .await
    .unwrap();

    assert_eq!(processed, 2);
    assert!(output.path().join("conv_001/segment_001.mp3").exists());
    assert_eq!(
        csv_line_count(&output.path().join("dataset_metadata.csv")),
        3
    );
}

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::conversation::Conversation;
use crate::timeline::{DiarizationEntry, Timeline};
use crate::tts::{self, AudioFormat, SpeechSynthesizer};
use crate::voices::VoiceAssignment;

/// Per-conversation diarization artifact: full metadata plus the ordered
/// list of successfully synthesized segments.
#[derive(Debug, Serialize, Deserialize)]
pub struct DiarizationDocument {
    pub file_id: String,
    pub duration: f64,
    pub language: crate::conversation::Language,
    pub scam_type: crate::conversation::ScamType,
    pub voices: RolePair,
    pub genders: RolePair,
    pub segments: Vec<DiarizationEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RolePair {
    pub victim: String,
    pub scammer: String,
}

/// Result summary for one assembled conversation.
#[derive(Debug)]
pub struct AssemblySummary {
    pub file_id: String,
    pub audio_dir: PathBuf,
    pub duration_sec: f64,
    pub num_segments: usize,
    pub diarization_file: PathBuf,
    pub transcript_file: PathBuf,
    pub victim_voice: String,
    pub scammer_voice: String,
}

/// One row of the dataset-level `dataset_metadata.csv`.
#[derive(Debug, Serialize)]
pub struct DatasetRow {
    pub file_id: String,
    pub filename: String,
    pub duration_sec: f64,
    pub num_speakers: u32,
    pub speaker_roles: String,
    pub source_type: &'static str,
    pub recording_conditions: &'static str,
    pub audio_format: &'static str,
    pub audio_directory: String,
    pub diarization_file: String,
    pub transcript_file: String,
    pub victim_voice: String,
    pub scammer_voice: String,
    pub notes: &'static str,
}

impl DatasetRow {
    fn for_summary(summary: &AssemblySummary, format: AudioFormat) -> Self {
        Self {
            file_id: summary.file_id.clone(),
            filename: summary.file_id.clone(),
            duration_sec: summary.duration_sec,
            num_speakers: 2,
            speaker_roles: "victim,scammer".to_string(),
            source_type: "simulated",
            recording_conditions: "synthetic_tts",
            audio_format: format.extension(),
            audio_directory: summary.audio_dir.display().to_string(),
            diarization_file: summary.diarization_file.display().to_string(),
            transcript_file: summary.transcript_file.display().to_string(),
            victim_voice: summary.victim_voice.clone(),
            scammer_voice: summary.scammer_voice.clone(),
            notes: "Generated using Azure neural TTS with distinct voices",
        }
    }
}

/// Assemble one conversation: assign a distinct voice pair, synthesize each
/// segment in order (one fallback retry, failed segments skipped), and emit
/// diarization JSON plus transcript CSV.
pub async fn assemble_conversation(
    speech: &dyn SpeechSynthesizer,
    settings: &Settings,
    conversation_file: &Path,
    output_dir: &Path,
    format: AudioFormat,
) -> anyhow::Result<AssemblySummary> {
    let raw = fs::read_to_string(conversation_file)
        .with_context(|| format!("read conversation {}", conversation_file.display()))?;
    let conversation: Conversation = serde_json::from_str(&raw)
        .with_context(|| format!("parse conversation {}", conversation_file.display()))?;

    let conv_dir = output_dir.join(&conversation.file_id);
    fs::create_dir_all(&conv_dir)
        .with_context(|| format!("create conversation directory {}", conv_dir.display()))?;

    let assignment = settings
        .voices
        .assign(conversation.language, &mut rand::thread_rng())
        .context("assign voices")?;

    tracing::info!(
        file_id = %conversation.file_id,
        language = conversation.language.as_str(),
        victim_voice = %assignment.victim_voice,
        scammer_voice = %assignment.scammer_voice,
        "generating audio"
    );

    let total = conversation.segments.len();
    let mut timeline = Timeline::new();

    for (index, segment) in conversation.segments.iter().enumerate() {
        let segment_file = conv_dir.join(format!(
            "segment_{:03}.{}",
            index + 1,
            format.extension()
        ));

        let voice = assignment.voice_for(segment.role);
        let prosody = settings.prosody.sample(
            segment.role,
            assignment.gender_for(segment.role),
            &mut rand::thread_rng(),
        );

        tracing::debug!(
            segment = index + 1,
            total,
            role = segment.role.as_str(),
            "synthesizing segment"
        );

        match tts::synthesize_to_file(speech, &segment.text, voice, &prosody, format, &segment_file)
            .await
        {
            Ok(()) => timeline.push(segment, voice, &mut rand::thread_rng()),
            Err(err) => {
                tracing::warn!(
                    segment = index + 1,
                    error = ?err,
                    "segment synthesis failed; skipping"
                );
            }
        }
    }

    let diarization_file = conv_dir.join(format!("{}_diarization.json", conversation.file_id));
    let transcript_file = conv_dir.join(format!("{}_transcript.csv", conversation.file_id));

    let duration = timeline.duration();
    let num_segments = timeline.len();

    write_diarization(&diarization_file, &conversation, &assignment, &timeline)?;
    write_transcript(&transcript_file, timeline.entries())?;

    Ok(AssemblySummary {
        file_id: conversation.file_id,
        audio_dir: conv_dir,
        duration_sec: duration,
        num_segments,
        diarization_file,
        transcript_file,
        victim_voice: assignment.victim_voice,
        scammer_voice: assignment.scammer_voice,
    })
}

/// Batch driver: enumerate conversation JSON files in sorted order, process
/// strictly one at a time, and write the aggregate dataset CSV at the end.
/// Returns the success count.
pub async fn run_batch(
    speech: &dyn SpeechSynthesizer,
    settings: &Settings,
    input_dir: &Path,
    output_dir: &Path,
    format: AudioFormat,
) -> anyhow::Result<usize> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;

    let conversation_files = list_conversations(input_dir)?;
    tracing::info!(
        count = conversation_files.len(),
        input = %input_dir.display(),
        "found conversation files"
    );

    let mut rows = Vec::new();

    for (index, conversation_file) in conversation_files.iter().enumerate() {
        tracing::info!(
            item = index + 1,
            total = conversation_files.len(),
            path = %conversation_file.display(),
            "processing conversation"
        );

        match assemble_conversation(speech, settings, conversation_file, output_dir, format).await
        {
            Ok(summary) => {
                tracing::info!(
                    file_id = %summary.file_id,
                    duration_sec = summary.duration_sec,
                    segments = summary.num_segments,
                    "completed conversation"
                );
                rows.push(DatasetRow::for_summary(&summary, format));
            }
            Err(err) => {
                tracing::warn!(path = %conversation_file.display(), error = ?err, "conversation failed; skipping");
            }
        }
    }

    let metadata_file = output_dir.join("dataset_metadata.csv");
    write_dataset_metadata(&metadata_file, &rows)?;

    tracing::info!(
        processed = rows.len(),
        metadata = %metadata_file.display(),
        "audio generation finished"
    );

    Ok(rows.len())
}

fn list_conversations(input_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("read input directory {}", input_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn write_diarization(
    path: &Path,
    conversation: &Conversation,
    assignment: &VoiceAssignment,
    timeline: &Timeline,
) -> anyhow::Result<()> {
    let document = DiarizationDocument {
        file_id: conversation.file_id.clone(),
        duration: timeline.duration(),
        language: conversation.language,
        scam_type: conversation.scam_type,
        voices: RolePair {
            victim: assignment.victim_voice.clone(),
            scammer: assignment.scammer_voice.clone(),
        },
        genders: RolePair {
            victim: assignment.victim_gender.as_str().to_string(),
            scammer: assignment.scammer_gender.as_str().to_string(),
        },
        segments: timeline.entries().to_vec(),
    };

    let json = serde_json::to_string_pretty(&document).context("serialize diarization")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn write_transcript(path: &Path, entries: &[DiarizationEntry]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    writer.write_record(["start", "end", "speaker", "role", "text", "voice"])?;
    for entry in entries {
        writer.write_record([
            entry.start.to_string(),
            entry.end.to_string(),
            entry.speaker.label().to_string(),
            entry.role.as_str().to_string(),
            entry.text.clone(),
            entry.voice.clone(),
        ])?;
    }
    writer.flush().context("flush transcript CSV")?;
    Ok(())
}

fn write_dataset_metadata(path: &Path, rows: &[DatasetRow]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    writer.write_record([
        "file_id",
        "filename",
        "duration_sec",
        "num_speakers",
        "speaker_roles",
        "source_type",
        "recording_conditions",
        "audio_format",
        "audio_directory",
        "diarization_file",
        "transcript_file",
        "victim_voice",
        "scammer_voice",
        "notes",
    ])?;
    for row in rows {
        writer.serialize(row).context("write dataset metadata row")?;
    }
    writer.flush().context("flush dataset metadata CSV")?;
    Ok(())
}

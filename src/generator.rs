use anyhow::Context;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::conversation::{parse_transcript, Conversation, Language, ScamType};
use crate::prompts;
use crate::textgen::TextGenerator;

/// One row of the generator's aggregate `metadata.csv`.
#[derive(Debug, Serialize)]
pub struct MetadataRow {
    pub file_id: String,
    pub filename: String,
    pub scam_type: &'static str,
    pub language: &'static str,
    pub num_speakers: u32,
    pub speaker_roles: String,
    pub timestamp: String,
}

impl MetadataRow {
    fn for_conversation(conversation: &Conversation) -> Self {
        Self {
            file_id: conversation.file_id.clone(),
            filename: format!("{}.json", conversation.file_id),
            scam_type: conversation.scam_type.as_str(),
            language: conversation.language.as_str(),
            num_speakers: conversation.num_speakers,
            speaker_roles: conversation
                .speaker_roles
                .iter()
                .map(|role| role.as_str())
                .collect::<Vec<_>>()
                .join(","),
            timestamp: conversation.timestamp.to_rfc3339(),
        }
    }
}

/// Produce one conversation: build the prompt, make a single service call,
/// parse the response into alternating turns. No retries; the caller logs
/// failures and skips the conversation.
pub async fn generate_conversation(
    textgen: &dyn TextGenerator,
    scam_type: ScamType,
    language: Language,
    file_id: &str,
) -> anyhow::Result<Conversation> {
    let prompt = prompts::build_prompt(scam_type, language);
    let raw = textgen.generate(&prompt).await?;
    let segments = parse_transcript(&raw);
    Ok(Conversation::new(file_id, scam_type, language, segments))
}

/// Batch driver: strictly sequential, one aggregate CSV at the end covering
/// all successfully generated conversations. Returns the success count.
pub async fn run_batch(
    textgen: &dyn TextGenerator,
    num_conversations: usize,
    output_dir: &Path,
) -> anyhow::Result<usize> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;

    let mut rows = Vec::new();

    for index in 0..num_conversations {
        let (scam_type, language) = {
            let mut rng = rand::thread_rng();
            let scam_type = *ScamType::ALL
                .choose(&mut rng)
                .unwrap_or(&ScamType::BankFraud);
            let language = *Language::ALL.choose(&mut rng).unwrap_or(&Language::English);
            (scam_type, language)
        };

        let file_id = format!("conv_{:03}", index + 1);
        tracing::info!(
            conversation = index + 1,
            total = num_conversations,
            scam_type = scam_type.as_str(),
            language = language.as_str(),
            "generating conversation"
        );

        let conversation =
            match generate_conversation(textgen, scam_type, language, &file_id).await {
                Ok(conversation) => conversation,
                Err(err) => {
                    tracing::warn!(%file_id, error = ?err, "conversation generation failed; skipping");
                    continue;
                }
            };

        let output_file = output_dir.join(format!("{file_id}.json"));
        let json = serde_json::to_string_pretty(&conversation)
            .context("serialize conversation JSON")?;
        fs::write(&output_file, json)
            .with_context(|| format!("write {}", output_file.display()))?;

        tracing::info!(path = %output_file.display(), "saved conversation");
        rows.push(MetadataRow::for_conversation(&conversation));
    }

    let metadata_file = output_dir.join("metadata.csv");
    write_metadata(&metadata_file, &rows)?;

    tracing::info!(
        generated = rows.len(),
        requested = num_conversations,
        metadata = %metadata_file.display(),
        "conversation generation finished"
    );

    Ok(rows.len())
}

fn write_metadata(path: &Path, rows: &[MetadataRow]) -> anyhow::Result<()> {
    // Header goes out even when every conversation failed.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    writer.write_record([
        "file_id",
        "filename",
        "scam_type",
        "language",
        "num_speakers",
        "speaker_roles",
        "timestamp",
    ])?;
    for row in rows {
        writer.serialize(row).context("write metadata row")?;
    }
    writer.flush().context("flush metadata CSV")?;
    Ok(())
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::tts::AudioFormat;

#[derive(Parser, Debug)]
#[command(name = "scamset", version, about = "Synthetic scam-call dataset generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate scam-call transcripts with a generative text model
    Generate(GenerateArgs),
    /// Synthesize multi-voice audio and diarization from generated transcripts
    Assemble(AssembleArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(long, help = "Text-generation service API key")]
    pub api_key: String,

    #[arg(long, default_value_t = 5, help = "Number of conversations to generate")]
    pub num_conversations: usize,

    #[arg(long, default_value = "generated_conversations", help = "Output directory")]
    pub output_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct AssembleArgs {
    #[arg(long, help = "Directory containing conversation JSON files")]
    pub input_dir: PathBuf,

    #[arg(long, default_value = "audio_dataset", help = "Output directory for audio files")]
    pub output_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = AudioFormat::Wav, help = "Audio format")]
    pub audio_format: AudioFormat,
}

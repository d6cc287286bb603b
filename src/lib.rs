pub mod assembler;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod generator;
pub mod prompts;
pub mod textgen;
pub mod timeline;
pub mod tts;
pub mod voices;

use anyhow::Context;
use cli::{Cli, Commands};
use config::Settings;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    setup_tracing(cli.verbose);

    let settings = Settings::load().context("load settings")?;
    settings.validate().context("validate settings")?;

    match cli.command {
        Commands::Generate(args) => generate(args, &settings).await,
        Commands::Assemble(args) => assemble(args, &settings).await,
    }
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn generate(args: cli::GenerateArgs, settings: &Settings) -> anyhow::Result<()> {
    let client = textgen::GeminiClient::new(args.api_key, &settings.textgen);
    let generated =
        generator::run_batch(&client, args.num_conversations, &args.output_dir).await?;

    println!(
        "Generated {generated}/{} conversations in '{}'",
        args.num_conversations,
        args.output_dir.display()
    );
    Ok(())
}

async fn assemble(args: cli::AssembleArgs, settings: &Settings) -> anyhow::Result<()> {
    let client = tts::azure::AzureSpeechClient::new(&settings.speech);
    let processed = assembler::run_batch(
        &client,
        settings,
        &args.input_dir,
        &args.output_dir,
        args.audio_format,
    )
    .await?;

    println!(
        "Processed {processed} conversations into '{}'",
        args.output_dir.display()
    );
    Ok(())
}

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = scamset::cli::Cli::parse();
    scamset::run(cli).await
}

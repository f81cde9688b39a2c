use clap::Parser;
use clienthello_probe::cli::Cli;
use clienthello_probe::engine::Engine;
use clienthello_probe::output::OutputSink;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let cfg = cli.into_config()?;

    let mut engine = Engine::new(cfg, OutputSink::stdio())?;
    engine.run().await?;

    Ok(())
}

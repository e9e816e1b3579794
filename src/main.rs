use std::io;

use waterfall::config::{Config, OutputFormat};
use waterfall::conn::SharedRegistry;
use waterfall::feed;
use waterfall::render::{JsonLinesRenderer, TextRenderer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.log_level()?)
        .with_writer(io::stderr)
        .init();

    let registry = SharedRegistry::new();

    tokio::select! {
        res = run_feed(&cfg, &registry) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn run_feed(cfg: &Config, registry: &SharedRegistry) -> anyhow::Result<()> {
    let stdout = io::stdout();

    match cfg.format {
        OutputFormat::Json => {
            let mut renderer = JsonLinesRenderer::new(stdout.lock());
            feed::run(cfg, registry, &mut renderer).await?;
        }
        OutputFormat::Text => {
            let mut renderer = TextRenderer::new(stdout.lock(), cfg.bar_scale_ms);
            feed::run(cfg, registry, &mut renderer).await?;
        }
    }

    Ok(())
}

use anyhow::Context;
use clap::Parser;
use recipebook_core::{init_logging, LogTarget};
use recipebook_server::{RecipeBookServer, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recipebook-server", about = "RecipeBook HTTP catalog server", version)]
struct Args {
    /// TOML config file. Missing file means defaults plus environment.
    #[arg(long, env = "RECIPEBOOK_CONFIG", default_value = "recipebook.toml")]
    config: PathBuf,

    /// Overrides `bind_addr` from the config file.
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = ServerConfig::load(&args.config)
        .with_context(|| format!("failed to load `{}`", args.config.display()))?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let target = LogTarget::from_dir(config.log_dir.as_deref()).map_err(anyhow::Error::msg)?;
    init_logging(&config.log_level, target).map_err(anyhow::Error::msg)?;

    RecipeBookServer::open(config)?.serve().await?;
    Ok(())
}

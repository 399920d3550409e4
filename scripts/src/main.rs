use charity_scripts::cli::{Cli, ScriptContext};
use clap::Parser;
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        rpc_url,
        artifacts_dir,
        deployments_path,
        contracts,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let ctx = ScriptContext {
        rpc_url,
        artifacts_dir,
        deployments_path,
        addresses: contracts.into(),
    };
    command.run(&ctx).await?;

    Ok(())
}

//! Charla terminal front-end binary.

mod agents;
mod pane;
mod repl;

use anyhow::anyhow;
use clap::Parser;

use charla_client::{DEFAULT_RELAY_URL, RelayClient};

#[derive(Parser)]
#[command(
    name = "charla-cli",
    about = "Terminal chat front-end for the Charla relay",
    version
)]
struct Cli {
    /// Base URL of the relay.
    #[arg(long, default_value = DEFAULT_RELAY_URL)]
    relay_url: String,

    /// Agent pane to open at startup.
    #[arg(long, default_value = "ventas")]
    agent: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let agent = agents::find(&cli.agent)
        .ok_or_else(|| anyhow!("unknown agent '{}', try one of /agents", cli.agent))?;
    let client = RelayClient::new(cli.relay_url);

    repl::run(client, agent).await
}

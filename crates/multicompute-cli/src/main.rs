//! mcctl — MultiCompute dashboard CLI.
//!
//! Reads channels, clusters, bundle deployments, drift events, and policy
//! violations from the configured data provider, mutates channels, checks
//! channels against their version pins, and can serve the REST API over
//! the mock dataset.
//!
//! # Usage
//!
//! ```text
//! mcctl channels list
//! mcctl --live --server dash:8080 bundles --channel nvidia-stable
//! mcctl channels update amd-lts --phase Succeeded
//! mcctl pins stable --dir versions
//! mcctl serve --port 8080
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::warn;

use multicompute_model::{ChannelPatch, ChannelPhase, NewChannel, ReleaseChannel, Vendor};
use multicompute_provider::pins::DEFAULT_VERSION_DIR;
use multicompute_provider::{DataProvider, FileResolver, ProviderConfig};

mod commands;
mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "mcctl",
    about = "MultiCompute — GPU operator channels across clusters",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Output format.
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Which data provider the query and channel commands talk to.
#[derive(Args)]
struct SourceArgs {
    /// Provider config file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the in-memory mock dataset.
    #[arg(long, global = true, conflicts_with = "live")]
    mock: bool,

    /// Use the REST backend.
    #[arg(long, global = true)]
    live: bool,

    /// REST backend address (host:port).
    #[arg(long, global = true)]
    server: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List and manage channels
    Channels {
        #[command(subcommand)]
        action: ChannelAction,
    },
    /// List clusters
    Clusters,
    /// List bundle deployments
    Bundles {
        /// Only deployments of this channel
        #[arg(long)]
        channel: Option<String>,
    },
    /// List drift events
    Drift {
        /// Only events for this channel
        #[arg(long)]
        channel: Option<String>,
    },
    /// List policy violations
    Violations {
        /// Only violations on this cluster
        #[arg(long)]
        cluster: Option<String>,
    },
    /// Show each vendor's default operator chart
    Vendors,
    /// Compare a release channel's version pins with observed versions
    Pins {
        /// Release channel whose VERSION.yaml to read
        channel: ReleaseChannel,
        /// Directory holding one subdirectory per release channel
        #[arg(long, default_value = DEFAULT_VERSION_DIR)]
        dir: PathBuf,
    },
    /// Serve the REST API over the mock dataset
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "8080")]
        port: u16,
        /// Path prefix for all routes.
        #[arg(long, default_value = "/api/v1")]
        base_path: String,
    },
}

#[derive(Subcommand)]
enum ChannelAction {
    /// List channels
    List,
    /// Create a channel
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        vendor: Vendor,
        #[arg(long)]
        channel: ReleaseChannel,
        #[arg(long, default_value = "Pending")]
        phase: ChannelPhase,
        /// `<operator>/<runtime>` version pair
        #[arg(long, default_value = "")]
        observed_version: String,
        #[arg(long, default_value = "0")]
        cluster_count: u32,
    },
    /// Update fields of a channel
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        vendor: Option<Vendor>,
        #[arg(long)]
        channel: Option<ReleaseChannel>,
        #[arg(long)]
        phase: Option<ChannelPhase>,
        #[arg(long)]
        observed_version: Option<String>,
        #[arg(long)]
        cluster_count: Option<u32>,
    },
    /// Delete a channel
    Delete { id: String },
}

impl SourceArgs {
    /// File and environment first, then command-line flags.
    fn provider_config(&self) -> anyhow::Result<ProviderConfig> {
        let mut config = ProviderConfig::load(self.config.as_deref())?;
        if self.mock {
            config.use_mock = true;
        }
        if self.live {
            config.use_mock = false;
        }
        if let Some(server) = &self.server {
            config.live.server = server.clone();
        }
        Ok(config)
    }

    fn provider(&self) -> anyhow::Result<Arc<dyn DataProvider>> {
        Ok(self.provider_config()?.into_provider())
    }

    /// Any provider-selection flag was passed.
    fn is_set(&self) -> bool {
        self.config.is_some() || self.mock || self.live || self.server.is_some()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,multicompute_cli=info")),
        )
        .init();

    let Cli {
        source,
        format,
        command,
    } = Cli::parse();

    match command {
        Commands::Channels { action } => {
            let provider = source.provider()?;
            run_channel_action(provider.as_ref(), action, format).await
        }
        Commands::Clusters => {
            let provider = source.provider()?;
            commands::query::clusters(provider.as_ref(), format).await
        }
        Commands::Bundles { channel } => {
            let provider = source.provider()?;
            commands::query::bundles(provider.as_ref(), channel.as_deref(), format).await
        }
        Commands::Drift { channel } => {
            let provider = source.provider()?;
            commands::query::drift(provider.as_ref(), channel.as_deref(), format).await
        }
        Commands::Violations { cluster } => {
            let provider = source.provider()?;
            commands::query::violations(provider.as_ref(), cluster.as_deref(), format).await
        }
        Commands::Vendors => commands::query::vendors(format),
        Commands::Pins { channel, dir } => {
            let provider = source.provider()?;
            let resolver = FileResolver::new(dir);
            commands::pins::check(provider.as_ref(), &resolver, channel, format).await
        }
        Commands::Serve { port, base_path } => {
            if source.is_set() {
                warn!("serve always uses the mock dataset; provider flags are ignored");
            }
            commands::serve::serve(port, &base_path).await
        }
    }
}

async fn run_channel_action(
    provider: &dyn DataProvider,
    action: ChannelAction,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match action {
        ChannelAction::List => commands::channels::list(provider, format).await,
        ChannelAction::Create {
            name,
            vendor,
            channel,
            phase,
            observed_version,
            cluster_count,
        } => {
            let draft = NewChannel {
                name,
                vendor,
                channel,
                phase,
                observed_version,
                cluster_count,
            };
            commands::channels::create(provider, draft, format).await
        }
        ChannelAction::Update {
            id,
            name,
            vendor,
            channel,
            phase,
            observed_version,
            cluster_count,
        } => {
            let patch = ChannelPatch {
                name,
                vendor,
                channel,
                phase,
                observed_version,
                cluster_count,
            };
            commands::channels::update(provider, &id, patch, format).await
        }
        ChannelAction::Delete { id } => commands::channels::delete(provider, &id).await,
    }
}

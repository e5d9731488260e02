//! nimble-cfn: run a Nimble Studio resource handler against the in-memory
//! service.
//!
//! Reads a handler request (JSON, file or stdin), optionally preloads remote
//! records from a seed file, then drives the operation to a terminal outcome
//! and prints every progress event as one JSON line on stdout. Logs go to
//! stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nimble_cfn::{execute, parse_request, parse_seed};
use nimble_cfn_core::{Action, HandlerConfig, InMemoryStore, OperationStatus, Orchestrator};
use nimble_cfn_launchprofile::{InMemoryLaunchProfiles, LaunchProfile};
use nimble_cfn_streamingimage::{InMemoryStreamingImages, StreamingImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResourceKind {
    LaunchProfile,
    StreamingImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ActionArg {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl From<ActionArg> for Action {
    fn from(action: ActionArg) -> Self {
        match action {
            ActionArg::Create => Action::Create,
            ActionArg::Read => Action::Read,
            ActionArg::Update => Action::Update,
            ActionArg::Delete => Action::Delete,
            ActionArg::List => Action::List,
        }
    }
}

/// Nimble Studio CloudFormation handler runner
#[derive(Parser, Debug)]
#[command(name = "nimble-cfn", version, about)]
struct Args {
    /// Resource type to operate on
    #[arg(long, value_enum)]
    resource: ResourceKind,

    /// Handler action
    #[arg(long, value_enum)]
    action: ActionArg,

    /// Handler request JSON file, or `-` for stdin
    #[arg(long)]
    request: PathBuf,

    /// JSON array of {"studioId", "record"} entries to preload
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Describe calls a transitional resource survives before settling
    #[arg(long, default_value = "1")]
    settle_polls: u32,

    /// Overall deadline of the operation in seconds
    #[arg(long, env = "NIMBLE_CFN_DEADLINE_SECS", default_value = "7200")]
    deadline_secs: u64,

    /// Callback delay requested while a resource is transitioning
    #[arg(long, env = "NIMBLE_CFN_STABILIZATION_DELAY_SECS", default_value = "5")]
    stabilization_delay_secs: u32,

    /// First backoff delay after a throttled or unavailable service call
    #[arg(long, env = "NIMBLE_CFN_TRANSIENT_BASE_DELAY_SECS", default_value = "2")]
    transient_base_delay_secs: u32,

    /// Upper bound of the transient backoff
    #[arg(long, env = "NIMBLE_CFN_TRANSIENT_MAX_DELAY_SECS", default_value = "60")]
    transient_max_delay_secs: u32,

    /// Re-invoke immediately instead of sleeping for the requested delay
    #[arg(long)]
    no_wait: bool,
}

impl Args {
    fn handler_config(&self) -> Result<HandlerConfig> {
        let config = HandlerConfig {
            stabilization_delay_secs: self.stabilization_delay_secs,
            transient_base_delay_secs: self.transient_base_delay_secs,
            transient_max_delay_secs: self.transient_max_delay_secs,
        };
        config.validate().context("invalid handler configuration")?;
        Ok(config)
    }

    fn orchestrator(&self) -> Orchestrator {
        let orchestrator = Orchestrator::new(Duration::from_secs(self.deadline_secs));
        if self.no_wait {
            orchestrator.with_delay_override(Duration::ZERO)
        } else {
            orchestrator
        }
    }
}

async fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("failed to read request from stdin")?;
        return Ok(text);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

async fn run(args: &Args) -> Result<OperationStatus> {
    let config = args.handler_config()?;
    let orchestrator = args.orchestrator();
    let action = Action::from(args.action);
    let request_text = read_input(&args.request).await?;
    let seed_text = match &args.seed {
        Some(path) => Some(read_input(path).await?),
        None => None,
    };
    let mut stdout = std::io::stdout();

    let status = match args.resource {
        ResourceKind::LaunchProfile => {
            let service = InMemoryLaunchProfiles::new(
                InMemoryStore::new("lp").with_settle_polls(Some(args.settle_polls)),
            );
            if let Some(text) = &seed_text {
                let seed = parse_seed::<LaunchProfile>(text)?;
                info!("Seeding {} launch profile(s)", seed.len());
                for entry in seed {
                    service.seed(&entry.studio_id, entry.record).await;
                }
            }
            let handler = nimble_cfn_launchprofile::handler(service, config);
            let request = parse_request(&request_text)?;
            execute(&handler, &orchestrator, action, &request, &mut stdout)
                .await?
                .event
                .status
        }
        ResourceKind::StreamingImage => {
            let service = InMemoryStreamingImages::new(
                InMemoryStore::new("si").with_settle_polls(Some(args.settle_polls)),
            );
            if let Some(text) = &seed_text {
                let seed = parse_seed::<StreamingImage>(text)?;
                info!("Seeding {} streaming image(s)", seed.len());
                for entry in seed {
                    service.seed(&entry.studio_id, entry.record).await;
                }
            }
            let handler = nimble_cfn_streamingimage::handler(service, config);
            let request = parse_request(&request_text)?;
            execute(&handler, &orchestrator, action, &request, &mut stdout)
                .await?
                .event
                .status
        }
    };
    Ok(status)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "nimble_cfn=info,nimble_cfn_core=info,nimble_cfn_launchprofile=info,\
                 nimble_cfn_streamingimage=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    info!(
        "Running {} on {:?} (settle polls: {}, no wait: {})",
        Action::from(args.action),
        args.resource,
        args.settle_polls,
        args.no_wait
    );

    match run(&args).await? {
        OperationStatus::Failed => Ok(ExitCode::FAILURE),
        _ => Ok(ExitCode::SUCCESS),
    }
}

mod cli;
mod config;
mod notify;
mod pinger;
mod pool;
mod store;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, SinkCommand, TargetCommand};
use config::Config;
use notify::WebhookNotifier;
use pinger::validation::validate_target_url;
use pinger::{HttpProber, Scheduler, SchedulerSettings};
use store::models::Target;
use store::{StoreImpl, TargetStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_config(cli.config.as_deref()).context("loading configuration")?;

    let pool = pool::connect(&config.pinger.db_path)
        .await
        .context("opening target store")?;
    let conn = pool.get().await.context("connecting to target store")?;
    store::initialize_store(&conn)
        .await
        .context("initializing target store schema")?;
    drop(conn);

    let store: Arc<dyn TargetStore> = Arc::new(StoreImpl::new_from_pool(pool));

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run(store, &config).await,
        Command::Target(command) => target_command(store.as_ref(), command).await,
        Command::Sink(SinkCommand::Set { url }) => {
            validate_target_url(&url).context("sink URL")?;
            store.set_sink_url(&url).await
        }
    }
}

/// Start the scheduler and run until terminated.
async fn run(store: Arc<dyn TargetStore>, config: &Config) -> Result<()> {
    store::seed_if_empty(store.as_ref(), &config.bootstrap)
        .await
        .context("seeding target store")?;

    let settings = SchedulerSettings {
        interval_seconds: config.pinger.interval_seconds,
        timeout_seconds: config.pinger.timeout_seconds,
    };
    let prober = Arc::new(HttpProber::new(settings.timeout_seconds)?);
    let notifier = Arc::new(WebhookNotifier::new(settings.timeout_seconds)?);

    info!(
        interval_seconds = settings.interval_seconds,
        timeout_seconds = settings.timeout_seconds,
        "starting pingping scheduler"
    );

    Scheduler::new(store, prober, notifier, settings).run_forever().await
}

async fn target_command(store: &dyn TargetStore, command: TargetCommand) -> Result<()> {
    match command {
        TargetCommand::List => {
            for target in store.list_targets().await? {
                println!("{}\t{}\t{}", target.name, target.status, target.url);
            }
            Ok(())
        }
        TargetCommand::Add { name, url } => {
            validate_target_url(&url)?;
            store.add_target(&Target::new(name, url)).await?;
            Ok(())
        }
        TargetCommand::Remove { name } => store.remove_target(&name).await,
        TargetCommand::SetUrl { name, url } => {
            validate_target_url(&url)?;
            store.set_target_url(&name, &url).await
        }
    }
}

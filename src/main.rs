// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crd_adapter::config::ProviderConfig;
use crd_adapter::kinds::Registry;
use crd_adapter::kubernetes::ProviderContext;
use crd_adapter::provider::{ChangePlan, ManifestState, Provider, ResourceState};

#[derive(Parser)]
#[command(name = "crd-adapter")]
#[command(version)]
#[command(about = "Manage Calico custom resources through server-side apply", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Fail every operation that needs a cluster
    #[arg(long, global = true)]
    offline: bool,

    /// Field manager used for server-side apply
    #[arg(long, global = true)]
    field_manager: Option<String>,

    /// Take ownership of fields managed by someone else
    #[arg(long, global = true)]
    force_conflicts: bool,

    /// Kubeconfig file to use instead of the inferred configuration
    #[arg(long, global = true)]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long, global = true)]
    context: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered kinds and their type names
    Kinds,

    /// Print the attribute schemas published under a type name
    Schema { type_name: String },

    /// Render a resource file as a YAML manifest
    Render {
        type_name: String,

        #[arg(short, long)]
        file: PathBuf,
    },

    /// Create or update the resource described in a file
    Apply {
        type_name: String,

        #[arg(short, long)]
        file: PathBuf,

        /// Honor the wait_for conditions of the file
        #[arg(long)]
        wait: bool,
    },

    /// Print the stored state of a resource
    Get { type_name: String, id: String },

    /// Delete a resource
    Delete { type_name: String, id: String },

    /// Print the state of an existing resource as it would be imported
    Import { type_name: String, id: String },
}

impl Commands {
    fn needs_cluster(&self) -> bool {
        matches!(
            self,
            Commands::Apply { .. }
                | Commands::Get { .. }
                | Commands::Delete { .. }
                | Commands::Import { .. }
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ProviderConfig::from_env()?;
    if cli.offline {
        config.offline = true;
    }
    if let Some(manager) = cli.field_manager.filter(|m| !m.is_empty()) {
        config.field_manager = manager;
    }
    if cli.force_conflicts {
        config.force_conflicts = true;
    }
    if cli.kubeconfig.is_some() {
        config.kubeconfig = cli.kubeconfig;
    }
    if cli.context.is_some() {
        config.context = cli.context;
    }

    let context = if cli.command.needs_cluster() {
        ProviderContext::connect(config).await?
    } else {
        ProviderContext::offline(config)
    };
    let provider = Provider::new(context, Registry::calico()?);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            on_signal.cancel();
        }
    });

    match cli.command {
        Commands::Kinds => {
            for entry in provider.registry().iter() {
                let d = &entry.descriptor;
                let scope = if d.namespaced { "namespaced" } else { "cluster" };
                println!("{}\t{}/{}\t{}", d.type_name(), d.api_version(), d.kind, scope);
            }
        }
        Commands::Schema { type_name } => {
            let schemas = provider.schema(&type_name)?;
            println!("{}", serde_json::to_string_pretty(&schemas)?);
        }
        Commands::Render { type_name, file } => {
            let config: ManifestState = load(&file)?;
            let state = provider.manifest(&type_name)?.read(&config)?;
            print!("{}", state.yaml.unwrap_or_default());
        }
        Commands::Apply {
            type_name,
            file,
            wait,
        } => {
            let mut desired: ResourceState = load(&file)?;
            if !wait {
                desired.wait_for.clear();
            }

            let resource = provider.resource(&type_name)?;
            let prior = resource.read(&desired).await?;

            let state = match resource.plan(prior.as_ref(), &desired)? {
                ChangePlan::Create => resource.create(&desired, &cancel).await?,
                ChangePlan::Update => match &prior {
                    Some(prior) => resource.update(prior, &desired, &cancel).await?,
                    None => resource.create(&desired, &cancel).await?,
                },
                ChangePlan::NoOp => {
                    info!("{} is up to date", type_name);
                    prior.unwrap_or(desired)
                }
                ChangePlan::Replace { from, to } => {
                    info!("Replacing {} with {}", from, to);
                    resource
                        .delete(&ResourceState {
                            id: Some(from.to_string()),
                            ..Default::default()
                        })
                        .await?;
                    resource.create(&desired, &cancel).await?
                }
            };
            print!("{}", serde_yaml::to_string(&state)?);
        }
        Commands::Get { type_name, id } => {
            let lookup = ResourceState {
                id: Some(id.clone()),
                ..Default::default()
            };
            match provider.resource(&type_name)?.read(&lookup).await? {
                Some(state) => print!("{}", serde_yaml::to_string(&state)?),
                None => bail!("{} {} not found", type_name, id),
            }
        }
        Commands::Delete { type_name, id } => {
            provider
                .resource(&type_name)?
                .delete(&ResourceState {
                    id: Some(id.clone()),
                    ..Default::default()
                })
                .await?;
            info!("Deleted {}", id);
        }
        Commands::Import { type_name, id } => {
            let state = provider.resource(&type_name)?.import(&id).await?;
            print!("{}", serde_yaml::to_string(&state)?);
        }
    }

    Ok(())
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kube::{Client, ResourceExt};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dashboard_projects::config::Config;
use dashboard_projects::constants::labels;
use dashboard_projects::kubernetes::{create_dashboard_client, KubeServingRuntimes};
use dashboard_projects::projects::{watch_projects, DeletedProject, ProjectApi};
use dashboard_projects::provisioning::{
    DashboardProvisioner, NamespaceApplicationCase, ProvisionParams,
};
use dashboard_projects::types::Project;

/// Manage data science projects the way the dashboard does
#[derive(Parser, Debug)]
#[command(name = "dashboard-projects")]
#[command(about = "Manage data science projects on an OpenShift cluster", long_about = None)]
struct Args {
    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = Output::Name)]
    output: Output,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Output {
    Name,
    Json,
    Yaml,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Platform {
    ModelMesh,
    KServe,
}

impl From<Platform> for NamespaceApplicationCase {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::ModelMesh => NamespaceApplicationCase::ModelMeshPromotion,
            Platform::KServe => NamespaceApplicationCase::KServePromotion,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List projects
    List {
        /// Label selector, e.g. "opendatahub.io/dashboard=true"
        #[arg(long, short = 'l')]
        selector: Option<String>,
    },
    /// List projects with model serving enabled
    Serving {
        /// Only projects that already own a serving runtime
        #[arg(long)]
        available: bool,
    },
    /// Show a single project
    Get { name: String },
    /// Create a project
    Create {
        display_name: String,
        /// Resource name; defaults to the display name
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        /// User the project is requested for
        #[arg(long, default_value = "cli")]
        user: String,
    },
    /// Enable a model serving platform on a project
    EnableServing {
        name: String,
        #[arg(long, value_enum, default_value_t = Platform::ModelMesh)]
        platform: Platform,
        /// Validate without persisting
        #[arg(long)]
        dry_run: bool,
    },
    /// Change the display name and description of a project
    Update {
        name: String,
        #[arg(long)]
        display_name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a project
    Delete { name: String },
    /// Print the project list every time it changes
    Watch,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn project_line(project: &Project) -> String {
    let mut line = format!("{}\t{}", project.name_any(), project.display_name());
    if project.has_label(labels::MODEL_SERVING_PROJECT) {
        line.push_str("\t[model serving]");
    }
    line
}

fn print_projects(output: Output, projects: &[Project]) -> Result<()> {
    match output {
        Output::Name => {
            for project in projects {
                println!("{}", project_line(project));
            }
        }
        Output::Json => println!("{}", serde_json::to_string_pretty(projects)?),
        Output::Yaml => print!("{}", serde_yaml::to_string(projects)?),
    }
    Ok(())
}

fn print_project(output: Output, project: &Project) -> Result<()> {
    print_projects(output, std::slice::from_ref(project))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let client = Client::try_default()
        .await
        .context("Failed to connect to the Kubernetes cluster")?;
    debug!("Connected to Kubernetes cluster");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: dashboard_url={}, product_name={}",
        config.dashboard_url, config.product_name
    );

    let dashboard = create_dashboard_client(&config).await?;
    let api = ProjectApi::new(
        client.clone(),
        Arc::new(DashboardProvisioner::new(dashboard)),
        Arc::new(KubeServingRuntimes::new(client.clone())),
        config.product_name.clone(),
    );

    match args.command {
        Command::List { selector } => {
            let projects = api.list(selector.as_deref()).await?;
            print_projects(args.output, &projects)?;
        }
        Command::Serving { available } => {
            let projects = if available {
                api.list_for_serving_available().await?
            } else {
                api.list_for_serving_enabled().await?
            };
            print_projects(args.output, &projects)?;
        }
        Command::Get { name } => {
            let project = api.get(&name).await?;
            print_project(args.output, &project)?;
        }
        Command::Create {
            display_name,
            name,
            description,
            user,
        } => {
            let name = api
                .create(&user, &display_name, &description, name.as_deref())
                .await?;
            println!("{}", name);
        }
        Command::EnableServing {
            name,
            platform,
            dry_run,
        } => {
            let name = api
                .add_serving_platform_support(&name, platform.into(), ProvisionParams { dry_run })
                .await?;
            println!("{}", name);
        }
        Command::Update {
            name,
            display_name,
            description,
        } => {
            let project = api.get(&name).await?;
            let updated = api.update(&project, &display_name, &description).await?;
            print_project(args.output, &updated)?;
        }
        Command::Delete { name } => match api.delete(&name).await? {
            DeletedProject::Terminating(project) => {
                println!("{} terminating", project.name_any())
            }
            DeletedProject::Gone(_) => println!("{} deleted", name),
        },
        Command::Watch => watch(client, args.output).await?,
    }

    Ok(())
}

async fn watch(client: Client, output: Output) -> Result<()> {
    let project_watch = watch_projects(client);
    let mut rx = project_watch.subscribe();

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                if let Some(error) = state.error {
                    eprintln!("watch error: {}", error);
                }
                if state.loaded {
                    print_projects(output, &state.value)?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                break;
            }
        }
    }

    Ok(())
}

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use arti_content::config::RepositoryConfig;
use arti_content::maven::{ArtifactCoordinate, Layout, ProjectCoordinate, RepositoryContent, VersionCoordinate};
use arti_content::storage::FsRepositoryStorage;

/// Inspects and maintains the content of a Maven repository on disk
#[derive(Parser)]
#[command(name = "arti-content", version)]
struct Cli {
    /// repository configuration file (JSON)
    #[arg(long, conflicts_with_all = ["root", "layout"])]
    config: Option<PathBuf>,

    /// repository root directory
    #[arg(long)]
    root: Option<PathBuf>,

    /// repository layout: 'default' or 'legacy'
    #[arg(long)]
    layout: Option<Layout>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// print the path of an artifact given as group:artifact:version[:classifier]:type
    Encode { coordinate: ArtifactCoordinate },
    /// print the coordinate of an artifact path
    Decode { path: String },
    /// list the versions of a project, or the builds of one version
    Versions { group_id: String, artifact_id: String, version: Option<String> },
    /// list the artifacts sharing group, artifact and version with the given one
    Related { coordinate: ArtifactCoordinate },
    /// list all artifacts in the repository
    Scan,
    /// delete all artifacts of a version
    DeleteVersion { group_id: String, artifact_id: String, version: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let repo = open_repository(&cli).await?;
    debug!("repository {} with {} layout", repo.id(), repo.layout());

    match cli.command {
        Command::Encode { coordinate } => {
            println!("{}", repo.to_path(&coordinate));
        }
        Command::Decode { path } => {
            println!("{}", repo.to_artifact(&path)?);
        }
        Command::Versions { group_id, artifact_id, version: None } => {
            let project = ProjectCoordinate::new(&group_id, &artifact_id)?;
            for version in repo.get_project_versions(&project).await? {
                println!("{}", version);
            }
        }
        Command::Versions { group_id, artifact_id, version: Some(version) } => {
            let version = VersionCoordinate::new(&group_id, &artifact_id, &version)?;
            for build in repo.get_versions(&version).await? {
                println!("{}", build);
            }
        }
        Command::Related { coordinate } => {
            for artifact in repo.get_related_artifacts(&coordinate).await? {
                println!("{}", artifact);
            }
        }
        Command::Scan => {
            for artifact in repo.discover_artifacts().await? {
                println!("{}", artifact);
            }
        }
        Command::DeleteVersion { group_id, artifact_id, version } => {
            repo.delete_version(&VersionCoordinate::new(&group_id, &artifact_id, &version)?).await?;
        }
    }
    Ok(())
}

async fn open_repository(cli: &Cli) -> anyhow::Result<RepositoryContent<FsRepositoryStorage>> {
    if let Some(config) = &cli.config {
        return Ok(RepositoryConfig::load(config).await?.open());
    }

    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
    Ok(RepositoryContent::new("local", cli.layout.unwrap_or_default(), Arc::new(FsRepositoryStorage::new(root))))
}

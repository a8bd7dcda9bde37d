use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

use npm_cdn_gateway::cdn::{CdnError, CdnFetcher};
use npm_cdn_gateway::config::{load_config, GatewayConfig};
use npm_cdn_gateway::registry::{resolve_entry, RegistryClient};
use npm_cdn_gateway::routing::classify;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Inspect how the npm CDN gateway resolves packages", long_about = None)]
struct Cli {
    /// Gateway configuration file (registry and CDN origins).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which request shape a path maps to
    Classify {
        /// Request path, e.g. `vue@3.3.4/dist/vue.global.js`
        path: String,
    },
    /// Resolve the version and entry file of a package
    Entry {
        package: String,
        /// Pinned version (default: the `latest` dist-tag)
        #[arg(short, long)]
        version: Option<String>,
    },
    /// Download a file through the CDN fallback chain
    Fetch {
        package: String,
        version: String,
        path: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    match cli.command {
        Commands::Classify { path } => {
            let shape = classify(path.trim_start_matches('/'));
            println!("{} ({})", shape.name(), shape);
        }
        Commands::Entry { package, version } => {
            let registry = RegistryClient::new(&config)?;
            let cdn = CdnFetcher::new(&config)?;

            let manifest = registry.fetch_manifest(&package).await?;
            let version = match version.as_deref().or(manifest.latest()) {
                Some(v) => v.to_string(),
                None => return Err(format!("{} has no latest dist-tag", package).into()),
            };
            let Some(version_manifest) = manifest.version(&version) else {
                return Err(format!("version {} of {} is not published", version, package).into());
            };

            let entry = resolve_entry(version_manifest);
            let candidates = entry
                .as_deref()
                .map(|e| cdn.candidate_urls(&package, &version, e))
                .unwrap_or_default();

            let report = serde_json::json!({
                "package": package,
                "version": version,
                "entry": entry,
                "candidates": candidates,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Fetch { package, version, path, output } => {
            let cdn = CdnFetcher::new(&config)?;
            let file = match cdn.fetch_file(&package, &version, &path).await {
                Ok(file) => file,
                Err(CdnError::NotFound { attempts, .. }) => {
                    eprintln!("Error: {}@{}/{} not found on any origin", package, version, path);
                    for attempt in attempts {
                        eprintln!("  {}: {}", attempt.origin, attempt.reason);
                    }
                    std::process::exit(1);
                }
            };

            eprintln!("{} ({} bytes, {})", file.origin, file.body.len(), file.content_type);
            match output {
                Some(out) => tokio::fs::write(&out, &file.body).await?,
                None => {
                    let mut stdout = tokio::io::stdout();
                    stdout.write_all(&file.body).await?;
                    stdout.flush().await?;
                }
            }
        }
    }

    Ok(())
}

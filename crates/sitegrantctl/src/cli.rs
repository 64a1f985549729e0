use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};

use sitegrant_core::ClassifierConfig;
use sitegrant_runtime::RequestPolicy;

use crate::commands;
use crate::output::OutputFormat;

/// sitegrant CLI - inspect, check and request extension site access
#[derive(Parser, Debug)]
#[command(name = "sitegrantctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Classifier conventions file (YAML)
    ///
    /// Overrides the script naming conventions used to route content
    /// scripts into the player and page groups.
    #[arg(long, global = true, env = "SITEGRANT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show how a manifest's site requirements are grouped
    Classify {
        /// Extension manifest (JSON)
        #[arg(short, long, env = "SITEGRANT_MANIFEST")]
        manifest: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "wide")]
        output: OutputFormat,
    },

    /// Reconcile every group against the stored grants
    Check {
        /// Extension manifest (JSON)
        #[arg(short, long, env = "SITEGRANT_MANIFEST")]
        manifest: PathBuf,

        /// Grants file (JSON)
        #[arg(short, long, env = "SITEGRANT_GRANTS", default_value = "grants.json")]
        grants: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "wide")]
        output: OutputFormat,
    },

    /// Request every required origin, then re-check
    Request {
        /// Extension manifest (JSON)
        #[arg(short, long, env = "SITEGRANT_MANIFEST")]
        manifest: PathBuf,

        /// Grants file (JSON)
        #[arg(short, long, env = "SITEGRANT_GRANTS", default_value = "grants.json")]
        grants: PathBuf,

        /// How the request is answered (approve, deny, prompt)
        #[arg(long, default_value = "prompt")]
        policy: RequestPolicy,

        /// Output format
        #[arg(short, long, value_enum, default_value = "wide")]
        output: OutputFormat,
    },

    /// Record grants directly in the grants file
    Grant {
        /// Grants file (JSON)
        #[arg(short, long, env = "SITEGRANT_GRANTS", default_value = "grants.json")]
        grants: PathBuf,

        /// Origin match patterns to grant
        #[arg(required = true)]
        origins: Vec<String>,
    },

    /// Remove grants from the grants file
    Revoke {
        /// Grants file (JSON)
        #[arg(short, long, env = "SITEGRANT_GRANTS", default_value = "grants.json")]
        grants: PathBuf,

        /// Origin match patterns to revoke
        #[arg(required = true)]
        origins: Vec<String>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: commands::completion::Shell,
    },
}

impl Cli {
    pub async fn execute(self) -> anyhow::Result<()> {
        let config = load_config(self.config.as_deref())?;

        match self.command {
            Commands::Classify { manifest, output } => {
                commands::classify::execute(&manifest, config, output)
            }
            Commands::Check {
                manifest,
                grants,
                output,
            } => commands::check::execute(&manifest, &grants, config, output).await,
            Commands::Request {
                manifest,
                grants,
                policy,
                output,
            } => commands::request::execute(&manifest, &grants, config, policy, output).await,
            Commands::Grant { grants, origins } => {
                commands::grants::grant(&grants, &origins).await
            }
            Commands::Revoke { grants, origins } => {
                commands::grants::revoke(&grants, &origins).await
            }
            Commands::Completion { shell } => commands::completion::execute(shell),
        }
    }
}

/// Load classifier conventions, falling back to the defaults
fn load_config(path: Option<&Path>) -> anyhow::Result<ClassifierConfig> {
    match path {
        Some(path) => {
            let config = ClassifierConfig::from_file(path)?;
            tracing::info!("Loaded classifier conventions from {:?}", path);
            Ok(config)
        }
        None => Ok(ClassifierConfig::default()),
    }
}

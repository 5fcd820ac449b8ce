//! CLI structure and command definitions.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gatecert_core::GatecertConfig;
use gatecert_types::{LogLevel, ProvisionOptions};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "gatecert")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "API gateway certificate and credential provisioning", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: ~/.gatecert/config.yml)
    #[arg(short, long, global = true, env = "GATECERT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Organization and environment the command targets.
#[derive(Args, Debug, Clone, Default)]
pub struct Target {
    /// Organization name
    #[arg(short, long, env = "GATECERT_ORG")]
    pub org: Option<String>,

    /// Environment name
    #[arg(short, long, env = "GATECERT_ENV")]
    pub env: Option<String>,
}

/// Organization admin credentials.
#[derive(Args, Debug, Clone, Default)]
pub struct Credentials {
    /// Organization admin username
    #[arg(short, long, env = "GATECERT_USER")]
    pub username: Option<String>,

    /// Organization admin password (prompted for when omitted)
    #[arg(short, long, env = "GATECERT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// OAuth bearer token, used instead of username/password
    #[arg(short, long, env = "GATECERT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a certificate and install it in the vault
    Install {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        credentials: Credentials,

        /// Replace an existing vault
        #[arg(short, long)]
        force: bool,
    },

    /// Install a certificate on a private cloud
    #[command(name = "install-private")]
    InstallPrivate {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        credentials: Credentials,

        /// Management server URL
        #[arg(short, long, env = "GATECERT_MGMT_URL")]
        mgmt_url: Option<String>,

        /// Replace an existing vault
        #[arg(short, long)]
        force: bool,
    },

    /// Delete the certificate vault
    Delete {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        credentials: Credentials,
    },

    /// Check that the certificate is installed
    Check {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        credentials: Credentials,
    },

    /// Check the certificate on a private cloud
    #[command(name = "check-private")]
    CheckPrivate {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        credentials: Credentials,

        /// Management server URL
        #[arg(short, long, env = "GATECERT_MGMT_URL")]
        mgmt_url: Option<String>,
    },

    /// Retrieve the public key from the auth proxy
    #[command(name = "public-key")]
    PublicKey {
        #[command(flatten)]
        target: Target,
    },

    /// Retrieve the public key from a private cloud runtime
    #[command(name = "private-public-key")]
    PrivatePublicKey {
        #[command(flatten)]
        target: Target,

        /// Runtime (message processor) URL
        #[arg(short, long, env = "GATECERT_RUNTIME_URL")]
        runtime_url: Option<String>,

        /// Auth proxy base path
        #[arg(short, long)]
        base_path: Option<String>,
    },

    /// Generate and register a gateway key/secret pair
    Genkeys {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        credentials: Credentials,
    },
}

impl Cli {
    /// Log level requested on the command line, if any.
    pub fn log_level(&self) -> Option<LogLevel> {
        if self.debug {
            Some(LogLevel::Trace)
        } else if self.verbose {
            Some(LogLevel::Debug)
        } else if self.quiet {
            Some(LogLevel::Error)
        } else {
            None
        }
    }

    pub async fn execute(&self, settings: &GatecertConfig, cancel: CancellationToken) -> Result<()> {
        use crate::commands::*;

        let session = Session::new(settings, cancel, self.quiet)?;

        match &self.command {
            Commands::Install { target, credentials, force } => {
                let options = ProvisionOptions {
                    force: *force,
                    ..session.options(target, Some(credentials))?
                };
                cert::install(&session, &options).await
            }
            Commands::InstallPrivate { target, credentials, mgmt_url, force } => {
                let options = ProvisionOptions {
                    force: *force,
                    mgmt_url: mgmt_url.clone(),
                    ..session.options(target, Some(credentials))?
                };
                cert::install_private(&session, &options).await
            }
            Commands::Delete { target, credentials } => {
                let options = session.options(target, Some(credentials))?;
                cert::delete(&session, &options).await
            }
            Commands::Check { target, credentials } => {
                let options = session.options(target, Some(credentials))?;
                cert::check(&session, &options).await
            }
            Commands::CheckPrivate { target, credentials, mgmt_url } => {
                let options = ProvisionOptions {
                    mgmt_url: mgmt_url.clone(),
                    ..session.options(target, Some(credentials))?
                };
                cert::check_private(&session, &options).await
            }
            Commands::PublicKey { target } => {
                let options = session.options(target, None)?;
                public_key::retrieve(&session, &options).await
            }
            Commands::PrivatePublicKey { target, runtime_url, base_path } => {
                let options = ProvisionOptions {
                    runtime_url: runtime_url.clone(),
                    base_path: base_path.clone(),
                    ..session.options(target, None)?
                };
                public_key::retrieve_private(&session, &options).await
            }
            Commands::Genkeys { target, credentials } => {
                let options = session.options(target, Some(credentials))?;
                keys::generate(&session, &options).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_install_arguments() {
        let cli = Cli::try_parse_from([
            "gatecert", "install", "-o", "acme", "-e", "test", "-u", "admin", "-p", "pw", "--force",
        ])
        .unwrap();

        match cli.command {
            Commands::Install { target, credentials, force } => {
                assert_eq!(target.org.as_deref(), Some("acme"));
                assert_eq!(target.env.as_deref(), Some("test"));
                assert_eq!(credentials.username.as_deref(), Some("admin"));
                assert!(force);
            }
            _ => panic!("expected install"),
        }
    }

    #[test]
    fn test_log_level_flags() {
        let cli = Cli::try_parse_from(["gatecert", "public-key", "-v"]).unwrap();
        assert_eq!(cli.log_level(), Some(LogLevel::Debug));

        let cli = Cli::try_parse_from(["gatecert", "--debug", "public-key"]).unwrap();
        assert_eq!(cli.log_level(), Some(LogLevel::Trace));
    }
}

//! CLI structure and command definitions
//!
//! Every resource command maps onto one adapter operation; flags become
//! named parameters and `--input-json` supplies them in bulk.

use clap::{Parser, Subcommand};

pub mod qbusiness;

pub use qbusiness::*;

pub use crate::output::OutputFormat;

/// Q Business command-line client
#[derive(Parser, Debug)]
#[command(name = "qbizctl")]
#[command(version, about = "Q Business management CLI")]
#[command(long_about = "
Q Business management CLI for applications, indices, documents and subscriptions

EXAMPLES:
    # Set up a profile
    qbizctl profile set prod --endpoint https://qbusiness.us-east-1.api.aws --token TOKEN

    # Create an index and print only its ID
    qbizctl index create --application-id app-1 --display-name Support

    # Echo a parameter instead of the response
    qbizctl index create --application-id app-1 --display-name Support -s ^DisplayName

    # Whole response as YAML
    qbizctl application get --application-id app-1 -s '*' -o yaml

    # Filter output with JMESPath
    qbizctl index list --application-id app-1 -q '[?status==`ACTIVE`].indexId'

For more help on a specific command, run:
    qbizctl <command> --help
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "QBIZCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "QBIZCTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// JMESPath query to filter output
    #[arg(long, short = 'q', global = true)]
    pub query: Option<String>,

    /// Output selector: '*' for the whole response, a response field, or '^Parameter'
    #[arg(long, short = 's', global = true, allow_hyphen_values = true)]
    pub select: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Application operations
    #[command(subcommand, visible_alias = "app")]
    Application(ApplicationCommands),

    /// Index operations
    #[command(subcommand, visible_alias = "idx")]
    Index(IndexCommands),

    /// Document operations
    #[command(subcommand, visible_alias = "doc")]
    Document(DocumentCommands),

    /// Subscription operations
    #[command(subcommand, visible_alias = "sub")]
    Subscription(SubscriptionCommands),

    /// Profile management
    #[command(subcommand, visible_alias = "prof")]
    Profile(ProfileCommands),

    /// Show version information
    #[command(visible_alias = "ver")]
    Version,

    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    # Bash
    qbizctl completions bash > ~/.local/share/bash-completion/completions/qbizctl

    # Zsh
    qbizctl completions zsh > ~/.zfunc/_qbizctl

    # Fish
    qbizctl completions fish > ~/.config/fish/completions/qbizctl.fish
")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell", alias = "power-shell")]
    PowerShell,
    Elvish,
}

/// Profile management commands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List all configured profiles
    #[command(visible_alias = "ls")]
    List,

    /// Show the path to the configuration file
    Path,

    /// Show details of a specific profile
    #[command(visible_alias = "get")]
    Show {
        /// Profile name to show
        name: String,
    },

    /// Set or create a profile
    #[command(visible_alias = "add")]
    #[command(after_help = "EXAMPLES:
    # Create a profile
    qbizctl profile set prod --endpoint https://qbusiness.us-east-1.api.aws --token TOKEN

    # Reference the token from the environment
    qbizctl profile set ci --endpoint https://qbusiness.us-west-2.api.aws --token '${QB_TOKEN}'
")]
    Set {
        /// Profile name
        name: String,

        /// Service endpoint URL
        #[arg(long)]
        endpoint: String,

        /// Region label for the endpoint
        #[arg(long)]
        region: Option<String>,

        /// Bearer token
        #[arg(long)]
        token: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Store the token in the OS keyring
        #[cfg(feature = "secure-storage")]
        #[arg(long)]
        use_keyring: bool,
    },

    /// Remove a profile
    #[command(visible_alias = "rm")]
    Remove {
        /// Profile name to remove
        name: String,
    },

    /// Set the default profile
    #[command(visible_alias = "def")]
    Default {
        /// Profile name to make default
        name: String,
    },
}

use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use qbizctl_core::Config;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::invoke::InvokeEnv;
use connection::ConnectionManager;
use error::QbizCtlError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            on_interrupt.cancel();
        }
    });

    let code = match run(&cli, &cancel).await {
        Ok(()) => 0,
        Err(e) => {
            e.print_diagnostic();
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn init_tracing(verbose: u8) {
    // RUST_LOG wins over the verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "qbizctl=warn,qbizctl_core=warn",
            1 => "qbizctl=info,qbizctl_core=info",
            2 => "qbizctl=debug,qbizctl_core=debug",
            _ => "qbizctl=trace,qbizctl_core=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn run(cli: &Cli, cancel: &CancellationToken) -> Result<(), QbizCtlError> {
    trace!("Executing command: {:?}", cli.command);
    info!("Command: {}", format_command(&cli.command));

    let start = std::time::Instant::now();
    let result = execute_command(cli, cancel).await;

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!(
            "Command completed successfully in {:.3}s",
            duration.as_secs_f64()
        ),
        Err(e) => debug!("Command failed after {:.3}s: {}", duration.as_secs_f64(), e),
    }

    result
}

/// Load the config file; only commands that talk to a profile need it
fn load_connection_manager(cli: &Cli) -> Result<ConnectionManager, QbizCtlError> {
    let (config, config_path) = if let Some(config_file) = &cli.config_file {
        let path = std::path::PathBuf::from(config_file);
        debug!("Loading config from explicit path: {:?}", path);
        let config = Config::load_from_path(&path)?;
        (config, Some(path))
    } else {
        debug!("Loading config from default location");
        (Config::load()?, None)
    };
    Ok(ConnectionManager::with_config_path(config, config_path))
}

async fn execute_command(cli: &Cli, cancel: &CancellationToken) -> Result<(), QbizCtlError> {
    match &cli.command {
        Commands::Version => {
            debug!("Showing version information");
            match cli.output {
                output::OutputFormat::Json | output::OutputFormat::Yaml => {
                    let output_data = serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "name": env!("CARGO_PKG_NAME"),
                    });
                    output::print_output(&output_data, cli.output, None)?;
                }
                _ => {
                    println!("qbizctl {}", env!("CARGO_PKG_VERSION"));
                }
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            debug!("Generating completions for {:?}", shell);
            generate_completions(*shell);
            Ok(())
        }
        Commands::Profile(profile_cmd) => {
            let mut conn_mgr = load_connection_manager(cli)?;
            commands::profile::handle_profile_command(
                profile_cmd,
                &mut conn_mgr,
                cli.output,
                cli.query.as_deref(),
            )
            .await
        }
        Commands::Application(cmd) => {
            let conn_mgr = load_connection_manager(cli)?;
            let env = invoke_env(cli, &conn_mgr, cancel);
            commands::application::handle_application_command(cmd, &env).await
        }
        Commands::Index(cmd) => {
            let conn_mgr = load_connection_manager(cli)?;
            let env = invoke_env(cli, &conn_mgr, cancel);
            commands::index::handle_index_command(cmd, &env).await
        }
        Commands::Document(cmd) => {
            let conn_mgr = load_connection_manager(cli)?;
            let env = invoke_env(cli, &conn_mgr, cancel);
            commands::document::handle_document_command(cmd, &env).await
        }
        Commands::Subscription(cmd) => {
            let conn_mgr = load_connection_manager(cli)?;
            let env = invoke_env(cli, &conn_mgr, cancel);
            commands::subscription::handle_subscription_command(cmd, &env).await
        }
    }
}

fn invoke_env<'a>(
    cli: &'a Cli,
    conn_mgr: &'a ConnectionManager,
    cancel: &'a CancellationToken,
) -> InvokeEnv<'a> {
    InvokeEnv {
        conn_mgr,
        profile: cli.profile.as_deref(),
        output: cli.output,
        query: cli.query.as_deref(),
        select: cli.select.as_deref(),
        cancel,
    }
}

fn generate_completions(shell: cli::Shell) {
    let mut cmd = cli::Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        cli::Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, name, &mut std::io::stdout())
        }
        cli::Shell::Elvish => generate(shells::Elvish, &mut cmd, name, &mut std::io::stdout()),
    }
}

/// Format command for human-readable logging (without parameter values)
fn format_command(command: &Commands) -> String {
    use cli::{ApplicationCommands, DocumentCommands, IndexCommands, SubscriptionCommands};

    match command {
        Commands::Version => "version".to_string(),
        Commands::Completions { shell } => format!("completions {:?}", shell),
        Commands::Profile(cmd) => {
            use cli::ProfileCommands::*;
            match cmd {
                List => "profile list".to_string(),
                Path => "profile path".to_string(),
                Show { name } => format!("profile show {}", name),
                Set { name, .. } => format!("profile set {} [credentials redacted]", name),
                Remove { name } => format!("profile remove {}", name),
                Default { name } => format!("profile default {}", name),
            }
        }
        Commands::Application(cmd) => match cmd {
            ApplicationCommands::Create { .. } => "application create",
            ApplicationCommands::Get { .. } => "application get",
            ApplicationCommands::List { .. } => "application list",
            ApplicationCommands::Update { .. } => "application update",
            ApplicationCommands::Delete { .. } => "application delete",
        }
        .to_string(),
        Commands::Index(cmd) => match cmd {
            IndexCommands::Create { .. } => "index create",
            IndexCommands::Get { .. } => "index get",
            IndexCommands::List { .. } => "index list",
            IndexCommands::Update { .. } => "index update",
            IndexCommands::Delete { .. } => "index delete",
        }
        .to_string(),
        Commands::Document(cmd) => match cmd {
            DocumentCommands::List { .. } => "document list",
            DocumentCommands::BatchPut { .. } => "document batch-put",
            DocumentCommands::BatchDelete { .. } => "document batch-delete",
        }
        .to_string(),
        Commands::Subscription(cmd) => match cmd {
            SubscriptionCommands::Create { .. } => "subscription create",
            SubscriptionCommands::List { .. } => "subscription list",
            SubscriptionCommands::Cancel { .. } => "subscription cancel",
        }
        .to_string(),
    }
}

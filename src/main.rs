use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use agentdeck::cli::{self, ConfigAction, NavAction};
use agentdeck::{config, logging};

#[derive(Debug, Parser)]
#[command(name = "agentdeck")]
#[command(about = "Query the agent demo server and manage workshop page state")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Submit a query to the selected agents and print the rendered results
    Query {
        /// The query text (quote it)
        text: String,
        /// Agent to include (repeatable). Defaults to every configured agent.
        #[arg(long = "agent", short = 'a')]
        agents: Vec<String>,
        /// Demo server base URL (overrides config)
        #[arg(long)]
        endpoint: Option<String>,
        /// Wrap the output in a standalone HTML page
        #[arg(long)]
        page: bool,
    },
    /// Render a saved /api/query response (reads stdin when no file is given)
    Render {
        file: Option<PathBuf>,
        /// Wrap the output in a standalone HTML page
        #[arg(long)]
        page: bool,
    },
    /// List the agents the demo server offers
    Agents {
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Check the demo server and local state
    Health {
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Manage saved navigation section state
    Nav {
        #[command(subcommand)]
        action: NavCommand,
    },
    /// Copy a file's contents to the clipboard
    Copy {
        file: PathBuf,
        /// Use an in-memory clipboard instead of the system one
        #[arg(long)]
        dry_run: bool,
    },
    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
enum NavCommand {
    /// Print every saved section state
    Show,
    /// Flip a section between open and collapsed
    Toggle { id: String },
    /// Mark a section collapsed
    Collapse { id: String },
    /// Mark a section open
    Open { id: String },
    /// Drop the saved state of one section
    Forget { id: String },
    /// Forget all saved section state
    Clear,
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write the default config to ~/.agentdeck/config.toml
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Show where config files are looked up
    Path,
}

fn main() -> Result<()> {
    let app = App::parse();
    logging::init(&config::load().logging);

    match app.command {
        Commands::Query {
            text,
            agents,
            endpoint,
            page,
        } => cli::run_query(&text, &agents, endpoint.as_deref(), page),
        Commands::Render { file, page } => cli::run_render(file.as_deref(), page),
        Commands::Agents { endpoint } => cli::run_agents(endpoint.as_deref()),
        Commands::Health { endpoint } => cli::run_health(endpoint.as_deref()),
        Commands::Nav { action } => {
            let action = match action {
                NavCommand::Show => NavAction::Show,
                NavCommand::Toggle { id } => NavAction::Toggle(id),
                NavCommand::Collapse { id } => NavAction::Collapse(id),
                NavCommand::Open { id } => NavAction::Open(id),
                NavCommand::Forget { id } => NavAction::Forget(id),
                NavCommand::Clear => NavAction::Clear,
            };
            cli::run_nav(action)
        }
        Commands::Copy { file, dry_run } => cli::run_copy(&file, dry_run),
        Commands::Config { action } => {
            let action = match action {
                ConfigCommand::Show => ConfigAction::Show,
                ConfigCommand::Init { force } => ConfigAction::Init { force },
                ConfigCommand::Path => ConfigAction::Path,
            };
            cli::run_config(action)
        }
    }
}

mod cmd;
mod output;
mod root;
mod session;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "checklist",
    about = "Customer-experience checklist with local persistence and cloud sync",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data root (default: nearest directory with .checklist/, else home)
    #[arg(long, global = true, env = "CHECKLIST_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the checklist with per-category progress
    Show {
        /// Only show one category
        #[arg(long)]
        category: Option<String>,
    },

    /// Flip one item between done and not done
    Toggle {
        /// Item id, e.g. onboarding-1
        item_id: String,
    },

    /// Mark every item in a category as not done
    Uncheck {
        /// Category id, e.g. onboarding
        category_id: String,
    },

    /// Save now (locally, and to the cloud when signed in)
    Save,

    /// Discard the working copy and load again
    Reload,

    /// Show sync status and overall progress
    Status,

    /// Export a Markdown report
    Export {
        /// Include action, rationale, and insight for every item
        #[arg(long)]
        detailed: bool,
        /// Write to this file instead of stdout (default name when no path is given)
        #[arg(long, num_args = 0..=1)]
        out: Option<Option<PathBuf>>,
    },

    /// Sign in: link this device to an identity's cloud record
    Login {
        /// User key, e.g. jane.doe
        identity: String,
    },

    /// Sign out: keep progress on this device only
    Logout,

    /// Inspect and modify configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Run the checklist sync server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3141")]
        port: u16,
        /// Record database file (default: <root>/.checklist/remote.redb)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Require this bearer token on checklist requests
        #[arg(long, env = "CHECKLIST_SERVER_TOKEN")]
        token: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = root::resolve_root(cli.root.as_deref()).and_then(|root| match cli.command {
        Commands::Show { category } => cmd::show::run(&root, category.as_deref(), cli.json),
        Commands::Toggle { item_id } => cmd::toggle::run(&root, &item_id, cli.json),
        Commands::Uncheck { category_id } => cmd::uncheck::run(&root, &category_id, cli.json),
        Commands::Save => cmd::save::run(&root, cli.json),
        Commands::Reload => cmd::reload::run(&root, cli.json),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Export { detailed, out } => {
            cmd::export::run(&root, detailed, out, cli.json)
        }
        Commands::Login { identity } => cmd::login::login(&root, &identity, cli.json),
        Commands::Logout => cmd::login::logout(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Serve { port, db, token } => cmd::serve::run(&root, port, db, token),
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

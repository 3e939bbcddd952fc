use crate::output::print_json;
use anyhow::Context;
use checklist_core::config::{Config, WarnLevel};
use clap::Subcommand;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the current configuration
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Point cloud sync at a checklist server
    SetRemote {
        /// Server base URL, e.g. http://localhost:3141
        url: String,
        /// Bearer token the server expects
        #[arg(long)]
        token: Option<String>,
    },

    /// Stop syncing with any server
    ClearRemote,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
        ConfigSubcommand::SetRemote { url, token } => set_remote(root, &url, token, json),
        ConfigSubcommand::ClearRemote => clear_remote(root, json),
    }
}

fn load(root: &Path) -> anyhow::Result<Config> {
    Config::load_or_default(root).context("failed to load config")
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = load(root)?;
    let token_set = config.remote.token.is_some();

    if json {
        return print_json(&serde_json::json!({
            "version": config.version,
            "identity": config.identity,
            "remote": {
                "url": config.remote.url,
                "token_set": token_set,
            },
            "sync": config.sync,
        }));
    }

    println!(
        "identity:          {}",
        config.identity.as_deref().unwrap_or("(not signed in)")
    );
    println!(
        "remote.url:        {}",
        config.remote.url.as_deref().unwrap_or("(none)")
    );
    println!(
        "remote.token:      {}",
        if token_set { "(set)" } else { "(none)" }
    );
    println!("sync.debounce_ms:  {}", config.sync.debounce_ms);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = load(root)?;
    let warnings = config.validate();

    if json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// set-remote / clear-remote
// ---------------------------------------------------------------------------

fn set_remote(root: &Path, url: &str, token: Option<String>, json: bool) -> anyhow::Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("remote URL must start with http:// or https://, got '{url}'");
    }
    let mut config = load(root)?;
    config.remote.url = Some(url.trim_end_matches('/').to_string());
    config.remote.token = token;
    config.save(root).context("failed to save config")?;

    if json {
        return print_json(&serde_json::json!({ "url": config.remote.url }));
    }
    println!("Remote set to {url}");
    if config.identity.is_none() {
        println!("Run 'checklist login <IDENTITY>' to start syncing.");
    }
    Ok(())
}

fn clear_remote(root: &Path, json: bool) -> anyhow::Result<()> {
    let mut config = load(root)?;
    config.remote.url = None;
    config.remote.token = None;
    config.save(root).context("failed to save config")?;

    if json {
        return print_json(&serde_json::json!({ "url": null }));
    }
    println!("Remote cleared. Progress stays on this device.");
    Ok(())
}

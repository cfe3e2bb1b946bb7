mod config;
mod output;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::debug;

use publish_helper_settings::{
    is_default_key, redact_value, EnvSource, SettingsManager, ValueSource,
};

use config::Config;
use output::{note_info, note_success, note_warn, render_settings_table, supports_color};

#[derive(Parser)]
#[command(name = "publish-helper")]
#[command(about = "Publish Helper: inspect and edit application settings")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to $PUBLISH_HELPER_SETTINGS_FILE or ./static/settings.json)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also write JSON logs to this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved value of a setting
    Get {
        key: String,
        /// Value to use when the setting is not set
        #[arg(long)]
        default: Option<String>,
        /// Print the value together with where it came from, as JSON
        #[arg(long)]
        source: bool,
    },
    /// Set a setting and save the document
    Set { key: String, value: String },
    /// List every stored setting
    List {
        /// Print the document as JSON
        #[arg(long)]
        json: bool,
        /// Do not mask tokens and passwords
        #[arg(long)]
        show_secrets: bool,
    },
    /// Overwrite the settings file with the defaults
    Reset {
        /// Confirm the reset
        #[arg(short, long)]
        yes: bool,
    },
    /// Save templates that still use renamed placeholders in their current form
    Migrate,
    /// Print the settings file location
    Path,
}

fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let env_config = Config::from_env();
    let config = Config {
        settings_path: cli.settings.clone().unwrap_or(env_config.settings_path),
        log_level: cli.log_level.clone().unwrap_or(env_config.log_level),
        log_dir: cli.log_dir.clone().or(env_config.log_dir),
    };

    publish_helper_logging::init_logger(config.log_dir.as_deref(), &config.log_level);
    debug!(settings = %config.settings_path.display(), "Starting publish-helper");

    if let Commands::Path = cli.command {
        println!("{}", config.settings_path.display());
        return Ok(());
    }

    let settings = SettingsManager::open_with_env(&config.settings_path, EnvSource::Process)
        .with_context(|| format!("Failed to open settings at {}", config.settings_path.display()))?;

    match cli.command {
        Commands::Get {
            key,
            default,
            source,
        } => get_cmd(&settings, &key, default, source),
        Commands::Set { key, value } => set_cmd(&settings, &key, value),
        Commands::List { json, show_secrets } => list_cmd(&settings, json, show_secrets),
        Commands::Reset { yes } => reset_cmd(&settings, yes),
        Commands::Migrate => migrate_cmd(&settings),
        Commands::Path => Ok(()),
    }
}

fn get_cmd(settings: &SettingsManager, key: &str, default: Option<String>, source: bool) -> Result<()> {
    let resolved = settings
        .resolve(key, default.map(Value::String))
        .with_context(|| format!("Failed to read setting \"{key}\""))?;

    let Some(resolved) = resolved else {
        bail!("Setting \"{key}\" is not set");
    };

    if source {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        println!("{}", display_value(&resolved.value));
    }
    Ok(())
}

fn set_cmd(settings: &SettingsManager, key: &str, value: String) -> Result<()> {
    if !is_default_key(key) {
        note_warn(&format!("\"{key}\" is not a recognized setting; saving it anyway"));
    }
    settings
        .update(key, value)
        .with_context(|| format!("Failed to update setting \"{key}\""))?;

    if let Ok(Some(resolved)) = settings.resolve(key, None) {
        if let ValueSource::Environment(var) = resolved.source {
            note_warn(&format!("{var} is set in the environment and overrides the saved value"));
        }
    }
    note_success(&format!("Updated {key}"));
    Ok(())
}

fn list_cmd(settings: &SettingsManager, json: bool, show_secrets: bool) -> Result<()> {
    let doc = settings.get_all().context("Failed to read settings")?;

    if json {
        let shown: serde_json::Map<String, Value> = doc
            .iter()
            .map(|(key, value)| {
                let value = if show_secrets { value.clone() } else { redact_value(key, value) };
                (key.clone(), value)
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    let mut rows = Vec::with_capacity(doc.len());
    for (key, value) in &doc {
        let shown = if show_secrets { value.clone() } else { redact_value(key, value) };
        let note = settings
            .resolve(key, None)?
            .and_then(|r| match r.source {
                ValueSource::Environment(var) => Some(format!("overridden by {var}")),
                _ => None,
            });
        rows.push((key.clone(), display_value(&shown), note));
    }
    print!("{}", render_settings_table(&rows, supports_color()));
    Ok(())
}

fn reset_cmd(settings: &SettingsManager, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to reset {} without --yes", settings.path().display());
    }
    settings
        .reset_to_defaults()
        .context("Failed to reset settings")?;
    note_success(&format!("Reset {} to defaults", settings.path().display()));
    Ok(())
}

fn migrate_cmd(settings: &SettingsManager) -> Result<()> {
    let keys = settings
        .persist_migrations()
        .context("Failed to migrate settings")?;
    if keys.is_empty() {
        note_info("No legacy template variables found");
    } else {
        note_success(&format!("Migrated {}", keys.join(", ")));
    }
    Ok(())
}

/// Strings print raw; anything else prints as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Folio - portfolio site service with a career chat persona.
//!
//! This is the binary entry point.

mod password;
mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use folio_config::{ConfigError, FolioConfig};
use folio_gateway::{AdminAuth, AdminCredential};

/// Folio - portfolio site service with a career chat persona.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Start the HTTP server (default).
    Serve,
    /// Load and validate configuration, then print a summary.
    CheckConfig,
    /// Hash an admin password for `admin.password_hash`.
    HashPassword,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    if command == Commands::HashPassword {
        match password::run_hash_password() {
            Ok(hash) => println!("{hash}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            folio_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    if command == Commands::CheckConfig {
        print!("{}", config_summary(&config));
        return;
    }

    if let Err(e) = serve::run_serve(config).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<FolioConfig, Vec<ConfigError>> {
    match path {
        Some(path) => folio_config::load_and_validate_path(path),
        None => folio_config::load_and_validate(),
    }
}

/// Human-readable summary printed by `folio check-config`. Never includes secrets.
fn config_summary(config: &FolioConfig) -> String {
    let enabled = |on: bool| if on { "enabled" } else { "disabled" };
    let agent_mode = if folio_openai::resolve_api_key(&config.openai).is_some() {
        "llm"
    } else {
        "fallback"
    };
    let admin = match AdminAuth::from_config(&config.admin, config.site.environment).credential {
        AdminCredential::Hash(_) => "argon2 hash",
        AdminCredential::Plaintext(_) => "plaintext (development only)",
        AdminCredential::Disabled => "disabled",
    };

    format!(
        "folio: config OK\n\
         \x20 site:          {} ({})\n\
         \x20 listen:        {}:{}\n\
         \x20 database:      {}\n\
         \x20 agent mode:    {} (model {})\n\
         \x20 notifications: {}\n\
         \x20 admin auth:    {}\n\
         \x20 static files:  {}\n",
        config.site.name,
        config.site.environment,
        config.server.host,
        config.server.port,
        config.database_path(),
        agent_mode,
        config.openai.model,
        enabled(folio_email::resolve_api_key(&config.email).is_some()),
        admin,
        config.site.static_dir.as_deref().unwrap_or("none"),
    )
}

// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./folio.toml` > `~/.config/folio/folio.toml` > `/etc/folio/folio.toml`
//! with environment variable overrides via the `FOLIO_` prefix and the
//! platform-conventional `PORT` variable.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::FolioConfig;

/// Top-level config sections, used to map `FOLIO_<SECTION>_<KEY>` to `section.key`.
const SECTIONS: &[&str] = &[
    "site", "openai", "agent", "storage", "server", "admin", "email",
];

/// Config files in merge order (later overrides earlier).
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/folio/folio.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("folio/folio.toml"));
    }
    paths.push(PathBuf::from("folio.toml"));
    paths
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/folio/folio.toml` (system-wide)
/// 3. `~/.config/folio/folio.toml` (user XDG config)
/// 4. `./folio.toml` (local directory)
/// 5. `PORT`, then `FOLIO_*` environment variables
pub fn load_config() -> Result<FolioConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<FolioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FolioConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FolioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FolioConfig::default()))
        .merge(Toml::file(path))
        .merge(port_provider())
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(FolioConfig::default()));
    for path in config_file_paths() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(port_provider()).merge(env_provider())
}

/// `PORT` as set by most container platforms.
fn port_provider() -> Env {
    Env::raw().only(&["PORT"]).map(|_| "server.port".into())
}

/// Environment provider mapping `FOLIO_OPENAI_API_KEY` to `openai.api_key`.
///
/// Only the leading section name is turned into a dot; the remainder keeps its
/// underscores so `FOLIO_ADMIN_PASSWORD_HASH` maps to `admin.password_hash`.
fn env_provider() -> Env {
    Env::prefixed("FOLIO_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./passfort.toml` > `~/.config/passfort/passfort.toml` >
//! `/etc/passfort/passfort.toml`, with `PASSFORT_` environment variable
//! overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PassfortConfig;

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/passfort/passfort.toml` (system-wide)
/// 3. `~/.config/passfort/passfort.toml` (user XDG config)
/// 4. `./passfort.toml` (local directory)
/// 5. `PASSFORT_*` environment variables
pub fn load_config() -> Result<PassfortConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PassfortConfig::default()))
        .merge(Toml::file("/etc/passfort/passfort.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("passfort/passfort.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("passfort.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PassfortConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PassfortConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PassfortConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PassfortConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay unambiguous: `PASSFORT_SECURITY_SECRET_KEY` must map to
/// `security.secret_key`, not `security.secret.key`.
fn env_provider() -> Env {
    Env::prefixed("PASSFORT_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("security_", "security.", 1)
            .replacen("vault_", "vault.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("bootstrap_", "bootstrap.", 1);
        mapped.into()
    })
}

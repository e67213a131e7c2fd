// SPDX-License-Identifier: GPL-2.0
//
// meson-postinstall - Configuration Management
//
// Loads optional hook settings (tool overrides, strict mode) from TOML files.
//
// Copyright (C) 2025-2026 ghostkellz <ckelley@ghostkellz.sh>

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration file structure
#[derive(Debug, Clone, Deserialize)]
pub struct HookConfig {
    /// Abort when a cache-update command fails instead of carrying on
    #[serde(default)]
    pub strict: bool,

    /// Icon theme whose cache gets rebuilt
    #[serde(default = "default_icon_theme")]
    pub icon_theme: String,

    /// External programs invoked by the hook
    #[serde(default)]
    pub tools: ToolConfig,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            strict: false,
            icon_theme: default_icon_theme(),
            tools: ToolConfig::default(),
        }
    }
}

fn default_icon_theme() -> String {
    "hicolor".to_string()
}

/// Program names (or absolute paths) for the cache utilities
#[derive(Debug, Clone, Deserialize)]
pub struct ToolConfig {
    #[serde(default = "default_icon_cache")]
    pub icon_cache: String,

    #[serde(default = "default_desktop_database")]
    pub desktop_database: String,

    #[serde(default = "default_compile_schemas")]
    pub compile_schemas: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            icon_cache: default_icon_cache(),
            desktop_database: default_desktop_database(),
            compile_schemas: default_compile_schemas(),
        }
    }
}

fn default_icon_cache() -> String {
    "gtk-update-icon-cache".to_string()
}

fn default_desktop_database() -> String {
    "update-desktop-database".to_string()
}

fn default_compile_schemas() -> String {
    "glib-compile-schemas".to_string()
}

/// Standard config file locations (in priority order)
const CONFIG_PATHS: &[&str] = &[
    "/etc/meson-postinstall/config.toml",
    "~/.config/meson-postinstall/config.toml",
];

impl HookConfig {
    /// Load configuration from standard paths.
    ///
    /// An unreadable or malformed file is reported and replaced by the
    /// defaults so it can never fail an install.
    pub fn load() -> Self {
        let candidates: Vec<PathBuf> = CONFIG_PATHS
            .iter()
            .map(|path| PathBuf::from(shellexpand::tilde(path).as_ref()))
            .collect();
        Self::load_first(&candidates)
    }

    /// First existing file in `candidates` wins
    pub fn load_first(candidates: &[PathBuf]) -> Self {
        let Some(path) = candidates.iter().find(|p| p.exists()) else {
            debug!("No config file found, using defaults");
            return Self::default();
        };

        match Self::load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config: {:#}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: HookConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        info!("Loaded config from {:?}", path);
        debug!("Config: {:?}", config);

        Ok(config)
    }
}
